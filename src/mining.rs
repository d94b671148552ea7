//! End-to-end mining: frequent itemsets, rule derivation, lift pass, ranking

use crate::apriori::{Apriori, FrequentItemsets};
use crate::config::MiningConfig;
use crate::error::MiningError;
use crate::itemset::{Item, Itemset};
use crate::lift::filter_by_lift;
use crate::rules::{generate_rules, rank_rules, AntecedentSize, Rule};
use crate::store::TransactionStore;
use crate::support::SupportCounter;
use std::time::{Duration, Instant};

/// Wall-clock time spent in each stage of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageTimings {
    pub index: Duration,
    pub apriori: Duration,
    pub rules: Duration,
    pub lift: Duration,
}

impl StageTimings {
    pub fn total(&self) -> Duration {
        self.index + self.apriori + self.rules + self.lift
    }
}

/// Everything a run produced
#[derive(Debug, Clone)]
pub struct MiningOutcome<T> {
    pub frequent: FrequentItemsets<T>,
    /// Ranked best first
    pub rules: Vec<Rule<T>>,
    pub timings: StageTimings,
}

/// Answers support queries for already-known frequent itemsets without a
/// scan and defers everything else to the underlying counter.
struct KnownSupport<'a, T> {
    frequent: &'a FrequentItemsets<T>,
    fallback: &'a dyn SupportCounter<T>,
}

impl<T: Item> SupportCounter<T> for KnownSupport<'_, T> {
    fn support(&self, itemset: &Itemset<T>) -> usize {
        self.frequent
            .support(itemset)
            .unwrap_or_else(|| self.fallback.support(itemset))
    }

    fn transaction_count(&self) -> usize {
        self.fallback.transaction_count()
    }
}

/// Mine `store` and return the ranked rules meeting every threshold in `config`.
///
/// # Errors
/// Any configuration error, reported before the store is scanned.
pub fn mine<T: Item>(
    store: &TransactionStore<T>,
    config: &MiningConfig,
) -> Result<Vec<Rule<T>>, MiningError> {
    mine_with_timings(store, config).map(|outcome| outcome.rules)
}

/// Like [`mine`], also returning the frequent itemsets and per-stage timings
///
/// # Errors
/// Any configuration error, reported before the store is scanned.
pub fn mine_with_timings<T: Item>(
    store: &TransactionStore<T>,
    config: &MiningConfig,
) -> Result<MiningOutcome<T>, MiningError> {
    config.validate()?;
    let mut timings = StageTimings::default();

    let started = Instant::now();
    let counter = config.counter.build(store);
    timings.index = started.elapsed();

    let started = Instant::now();
    let frequent = Apriori::new(store, &*counter, config.min_support)?.run();
    timings.apriori = started.elapsed();
    tracing::info!(
        frequent = frequent.len(),
        levels = frequent.max_len(),
        elapsed_ms = timings.apriori.as_millis() as u64,
        "frequent itemsets found"
    );

    let started = Instant::now();
    let known = KnownSupport {
        frequent: &frequent,
        fallback: &*counter,
    };
    let mut rules = derive_rules(&frequent, &known, config)?;
    timings.rules = started.elapsed();
    tracing::info!(
        rules = rules.len(),
        elapsed_ms = timings.rules.as_millis() as u64,
        "rules derived"
    );

    if let Some(min_lift) = config.min_lift {
        let started = Instant::now();
        rules = filter_by_lift(rules, &known, min_lift, config.lift_mode)?;
        timings.lift = started.elapsed();
        tracing::info!(
            rules = rules.len(),
            mode = ?config.lift_mode,
            elapsed_ms = timings.lift.as_millis() as u64,
            "lift pass applied"
        );
    }

    rank_rules(&mut rules);
    Ok(MiningOutcome {
        frequent,
        rules,
        timings,
    })
}

fn derive_rules<T: Item>(
    frequent: &FrequentItemsets<T>,
    counter: &dyn SupportCounter<T>,
    config: &MiningConfig,
) -> Result<Vec<Rule<T>>, MiningError> {
    // validated non-negative by the caller
    let min_support = usize::try_from(config.min_support)
        .map_err(|_| MiningError::NegativeSupport(config.min_support))?;
    let antecedent = config.antecedent();

    let mut rules = Vec::new();
    for itemset in frequent.itemsets() {
        let n = itemset.len();
        // single items only split into an empty antecedent when asked for explicitly
        if n < 2 && antecedent == AntecedentSize::SingleConsequent {
            continue;
        }
        let min_size = antecedent.resolve(n);
        if min_size >= n {
            tracing::debug!(
                itemset_len = n,
                min_antecedent = min_size,
                "itemset too small for the antecedent size, skipped"
            );
            continue;
        }
        rules.extend(generate_rules(
            itemset,
            counter,
            min_size,
            min_support,
            config.min_confidence,
        )?);
    }
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lift::LiftMode;
    use crate::support::CounterKind;

    fn sample_store() -> TransactionStore<u32> {
        TransactionStore::new(vec![
            Itemset::from([1, 2, 3]),
            Itemset::from([1, 2]),
            Itemset::from([1, 3]),
            Itemset::from([2, 3]),
            Itemset::from([1]),
        ])
    }

    #[test]
    fn test_mine_sample() {
        let store = sample_store();
        let rules = mine(&store, &MiningConfig::new(2, 0.5)).unwrap();

        // both directions of each pair: four at 2/3, two at 1/2
        assert_eq!(rules.len(), 6);
        assert!(rules.iter().all(|rule| rule.support == 2));
        assert!(rules
            .windows(2)
            .all(|pair| pair[0].confidence >= pair[1].confidence));
        assert_eq!(rules.last().map(|rule| rule.confidence), Some(0.5));
    }

    #[test]
    fn test_outcome_reports_frequent_itemsets() {
        let store = sample_store();
        let outcome = mine_with_timings(&store, &MiningConfig::new(2, 0.5)).unwrap();
        assert_eq!(outcome.frequent.level_sizes(), vec![3, 3]);
        assert!(outcome.timings.total() >= outcome.timings.apriori);
        assert_eq!(outcome.timings.lift, Duration::ZERO);
    }

    #[test]
    fn test_idempotent_and_counter_independent() {
        let store = sample_store();
        let scan = MiningConfig::new(1, 0.3).with_counter(CounterKind::Scan);
        let indexed = MiningConfig::new(1, 0.3).with_counter(CounterKind::Indexed);

        let first = mine(&store, &scan).unwrap();
        assert_eq!(first, mine(&store, &scan).unwrap());
        assert_eq!(first, mine(&store, &indexed).unwrap());
    }

    #[test]
    fn test_raising_confidence_never_adds_rules() {
        let store = sample_store();
        let mut previous = usize::MAX;
        for step in 0..=10 {
            let config = MiningConfig::new(1, step as f64 / 10.0).with_min_antecedent(1);
            let count = mine(&store, &config).unwrap().len();
            assert!(count <= previous, "confidence step {step}");
            previous = count;
        }
    }

    #[test]
    fn test_lift_pass_is_applied() {
        let store = sample_store();
        let config = MiningConfig::new(2, 0.5).with_min_lift(0.9, LiftMode::Corrected);
        let rules = mine(&store, &config).unwrap();
        // only the {2, 3} rules beat the baseline: (2/3) / (3/5)
        assert_eq!(rules.len(), 2);
        assert!(rules.iter().all(|rule| rule.itemset() == Itemset::from([2, 3])));
        assert!(rules
            .iter()
            .all(|rule| (rule.lift.unwrap() - 10.0 / 9.0).abs() < 1e-12));

        // legacy scores every rule at 1, so the threshold decides all or nothing
        let legacy = MiningConfig::new(2, 0.5).with_min_lift(0.9, LiftMode::Legacy);
        let rules = mine(&store, &legacy).unwrap();
        assert_eq!(rules.len(), 6);
        assert!(rules.iter().all(|rule| rule.lift == Some(1.0)));

        let legacy = MiningConfig::new(2, 0.5).with_min_lift(5.0, LiftMode::Legacy);
        assert!(mine(&store, &legacy).unwrap().is_empty());
    }

    #[test]
    fn test_antecedent_larger_than_itemsets_is_skipped() {
        let store = sample_store();
        // the triple {1, 2, 3} is the largest frequent itemset at support 1
        let config = MiningConfig::new(1, 0.0).with_min_antecedent(3);
        assert!(mine(&store, &config).unwrap().is_empty());

        let config = MiningConfig::new(1, 0.0).with_min_antecedent(2);
        let rules = mine(&store, &config).unwrap();
        assert_eq!(rules.len(), 3);
        assert!(rules.iter().all(|rule| rule.antecedent.len() == 2));
    }

    #[test]
    fn test_explicit_zero_antecedent_includes_single_items() {
        let store = sample_store();
        let config = MiningConfig::new(3, 0.0).with_min_antecedent(0);
        let rules = mine(&store, &config).unwrap();
        assert_eq!(rules.len(), 3);
        assert!(rules.iter().all(|rule| rule.antecedent.is_empty()));
    }

    #[test]
    fn test_configuration_errors_are_reported() {
        let store = sample_store();
        assert_eq!(
            mine(&store, &MiningConfig::new(-1, 0.5)).unwrap_err(),
            MiningError::NegativeSupport(-1)
        );
        assert!(mine(&store, &MiningConfig::new(1, 2.0)).is_err());
    }

    #[test]
    fn test_empty_store() {
        let store = TransactionStore::<u32>::new(Vec::new());
        let outcome = mine_with_timings(&store, &MiningConfig::new(1, 0.5)).unwrap();
        assert!(outcome.frequent.is_empty());
        assert!(outcome.rules.is_empty());
    }
}
