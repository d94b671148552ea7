//! Optional lift pass that drops rules recommending items that are common anyway

use crate::error::MiningError;
use crate::itemset::Item;
use crate::rules::Rule;
use crate::support::SupportCounter;
use serde::Deserialize;

/// How the lift ratio is computed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LiftMode {
    /// Compatibility mode: the ratio compares the consequent's support with
    /// itself, so every rule scores 1 regardless of its antecedent
    Legacy,
    /// `confidence / (support(consequent) / transactions)`
    #[default]
    Corrected,
}

pub(crate) fn check_lift(min_lift: f64) -> Result<(), MiningError> {
    if min_lift.is_finite() && min_lift >= 0.0 {
        Ok(())
    } else {
        Err(MiningError::InvalidLift(min_lift))
    }
}

/// Keep the rules whose lift reaches `min_lift`.
///
/// Each kept rule carries the lift it was scored with. Rules whose
/// consequent never occurs have no defined ratio and are dropped.
///
/// # Errors
/// Returns [`MiningError::InvalidLift`] for a negative or non-finite threshold.
pub fn filter_by_lift<T: Item>(
    rules: Vec<Rule<T>>,
    counter: &dyn SupportCounter<T>,
    min_lift: f64,
    mode: LiftMode,
) -> Result<Vec<Rule<T>>, MiningError> {
    check_lift(min_lift)?;

    let transactions = counter.transaction_count();
    let before = rules.len();
    let kept: Vec<_> = rules
        .into_iter()
        .filter_map(|mut rule| {
            let lift = match mode {
                LiftMode::Legacy => legacy_ratio(&rule, counter)?,
                LiftMode::Corrected => lift(&rule, counter, transactions)?,
            };
            rule.lift = Some(lift);
            (lift >= min_lift).then_some(rule)
        })
        .collect();
    tracing::debug!(before, after = kept.len(), min_lift, ?mode, "lift pass finished");
    Ok(kept)
}

/// Consequent support over itself: 1 for any consequent that occurs
fn legacy_ratio<T: Item>(rule: &Rule<T>, counter: &dyn SupportCounter<T>) -> Option<f64> {
    let consequent_support = counter.support(&rule.consequent);
    if consequent_support == 0 {
        return None;
    }
    Some(consequent_support as f64 / consequent_support as f64)
}

/// Confidence of `rule` relative to the baseline frequency of its consequent
fn lift<T: Item>(
    rule: &Rule<T>,
    counter: &dyn SupportCounter<T>,
    transactions: usize,
) -> Option<f64> {
    let consequent_support = counter.support(&rule.consequent);
    if transactions == 0 || consequent_support == 0 {
        return None;
    }
    let baseline = consequent_support as f64 / transactions as f64;
    Some(rule.confidence / baseline)
}
