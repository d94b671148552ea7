//! Association rule derivation from frequent itemsets

use crate::error::MiningError;
use crate::itemset::{Item, Itemset};
use crate::support::SupportCounter;
use serde::Serialize;
use std::cmp::Ordering;

/// `antecedent => consequent`, with the metrics it was scored on
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rule<T> {
    pub antecedent: Itemset<T>,
    pub consequent: Itemset<T>,
    /// Transactions containing both sides
    pub support: usize,
    /// `support / support(antecedent)`
    pub confidence: f64,
    /// Set only by the corrected lift pass
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lift: Option<f64>,
}

impl<T: Item> Rule<T> {
    /// The frequent itemset the rule was split from
    pub fn itemset(&self) -> Itemset<T> {
        self.antecedent.union(&self.consequent)
    }
}

/// Smallest antecedent considered when splitting an itemset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AntecedentSize {
    /// `n - 1` for an itemset of `n` items: only single-item consequents
    #[default]
    SingleConsequent,
    /// Every split whose antecedent has at least this many items
    AtLeast(usize),
}

impl AntecedentSize {
    /// Concrete minimum antecedent size for an itemset of `itemset_len` items
    pub fn resolve(self, itemset_len: usize) -> usize {
        match self {
            Self::SingleConsequent => itemset_len.saturating_sub(1),
            Self::AtLeast(size) => size,
        }
    }
}

pub(crate) fn check_confidence(min_confidence: f64) -> Result<(), MiningError> {
    if (0.0..=1.0).contains(&min_confidence) {
        Ok(())
    } else {
        Err(MiningError::ConfidenceOutOfRange(min_confidence))
    }
}

/// Split `itemset` into every antecedent/consequent pair with an antecedent of
/// `min_antecedent_size..n` items and keep the rules meeting both thresholds.
///
/// Splits whose antecedent never occurs have no defined confidence and are
/// skipped rather than scored.
///
/// # Errors
/// Returns a [`MiningError`] when `min_confidence` is outside `[0, 1]` or
/// `min_antecedent_size` is not below the itemset size.
pub fn generate_rules<T: Item>(
    itemset: &Itemset<T>,
    counter: &dyn SupportCounter<T>,
    min_antecedent_size: usize,
    min_support: usize,
    min_confidence: f64,
) -> Result<Vec<Rule<T>>, MiningError> {
    check_confidence(min_confidence)?;
    if itemset.is_empty() {
        return Ok(Vec::new());
    }
    if min_antecedent_size >= itemset.len() {
        return Err(MiningError::AntecedentSizeOutOfRange {
            size: min_antecedent_size,
            itemset_len: itemset.len(),
        });
    }

    // every split recombines to the full itemset
    let support = counter.support(itemset);
    if support < min_support {
        return Ok(Vec::new());
    }

    let mut rules = Vec::new();
    for size in min_antecedent_size..itemset.len() {
        for antecedent in itemset.subsets_of_size(size) {
            let antecedent_support = counter.support(&antecedent);
            if antecedent_support == 0 {
                continue;
            }

            let confidence = support as f64 / antecedent_support as f64;
            if confidence >= min_confidence {
                let consequent = itemset.difference(&antecedent);
                rules.push(Rule {
                    antecedent,
                    consequent,
                    support,
                    confidence,
                    lift: None,
                });
            }
        }
    }

    Ok(rules)
}

/// Order rules by confidence, then support (both descending), then by items
pub fn rank_rules<T: Item>(rules: &mut [Rule<T>]) {
    rules.sort_by(|a, b| {
        b.confidence
            .total_cmp(&a.confidence)
            .then_with(|| b.support.cmp(&a.support))
            .then_with(|| compare_sides(a, b))
    });
}

fn compare_sides<T: Item>(a: &Rule<T>, b: &Rule<T>) -> Ordering {
    a.antecedent
        .cmp(&b.antecedent)
        .then_with(|| a.consequent.cmp(&b.consequent))
}
