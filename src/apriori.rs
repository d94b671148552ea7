//! The Apriori level-wise search for frequent itemsets

use crate::candidates::generate_candidates;
use crate::error::MiningError;
use crate::itemset::{Item, Itemset};
use crate::store::TransactionStore;
use crate::support::SupportCounter;
use std::collections::{BTreeMap, BTreeSet};

/// Every frequent itemset found by a run, with its support count.
///
/// Holds all levels, not only the maximal itemsets, so any subset of a
/// member is also a member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequentItemsets<T> {
    supports: BTreeMap<Itemset<T>, usize>,
}

impl<T: Item> FrequentItemsets<T> {
    pub fn len(&self) -> usize {
        self.supports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.supports.is_empty()
    }

    pub fn contains(&self, itemset: &Itemset<T>) -> bool {
        self.supports.contains_key(itemset)
    }

    /// Support recorded for `itemset`, if it was found frequent
    pub fn support(&self, itemset: &Itemset<T>) -> Option<usize> {
        self.supports.get(itemset).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Itemset<T>, usize)> + '_ {
        self.supports.iter().map(|(itemset, &support)| (itemset, support))
    }

    pub fn itemsets(&self) -> impl Iterator<Item = &Itemset<T>> + '_ {
        self.supports.keys()
    }

    /// Frequent itemsets of exactly `size` items
    pub fn level(&self, size: usize) -> impl Iterator<Item = (&Itemset<T>, usize)> + '_ {
        self.iter().filter(move |(itemset, _)| itemset.len() == size)
    }

    /// Size of the largest frequent itemset, zero when nothing is frequent
    pub fn max_len(&self) -> usize {
        self.supports.keys().map(Itemset::len).max().unwrap_or(0)
    }

    /// Number of frequent itemsets per size, indexed from size 1
    pub fn level_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.max_len()];
        for itemset in self.supports.keys() {
            sizes[itemset.len() - 1] += 1;
        }
        sizes
    }
}

enum Phase<T> {
    Seeding,
    Expanding(BTreeSet<Itemset<T>>),
    Done,
}

/// Level-wise frequent itemset search over a read-only store
pub struct Apriori<'a, T> {
    store: &'a TransactionStore<T>,
    counter: &'a dyn SupportCounter<T>,
    min_support: usize,
}

impl<'a, T: Item> Apriori<'a, T> {
    /// Configure a search. Negative thresholds are rejected here, before
    /// any scanning happens.
    pub fn new(
        store: &'a TransactionStore<T>,
        counter: &'a dyn SupportCounter<T>,
        min_support: i64,
    ) -> Result<Self, MiningError> {
        let min_support =
            usize::try_from(min_support).map_err(|_| MiningError::NegativeSupport(min_support))?;
        Ok(Self {
            store,
            counter,
            min_support,
        })
    }

    /// Run the search to completion
    pub fn run(&self) -> FrequentItemsets<T> {
        let mut supports = BTreeMap::new();
        let mut phase = Phase::Seeding;
        let mut size = 1;

        loop {
            phase = match phase {
                Phase::Seeding => {
                    let level = self.seed(&mut supports);
                    tracing::debug!(size, frequent = level.len(), "seeded frequent single items");
                    Phase::Expanding(level)
                }
                Phase::Expanding(level) if level.is_empty() => Phase::Done,
                Phase::Expanding(level) => {
                    size += 1;
                    let candidates = generate_candidates(&level);
                    let next = self.filter_by_support(candidates.iter(), &mut supports);
                    tracing::debug!(
                        size,
                        candidates = candidates.len(),
                        frequent = next.len(),
                        "expanded level"
                    );
                    Phase::Expanding(next)
                }
                Phase::Done => break,
            };
        }

        FrequentItemsets { supports }
    }

    /// Frequent single items, read from the precomputed occurrence counts
    fn seed(&self, supports: &mut BTreeMap<Itemset<T>, usize>) -> BTreeSet<Itemset<T>> {
        let mut level = BTreeSet::new();
        for (item, &count) in self.store.item_counts() {
            if count >= self.min_support {
                let itemset = Itemset::from([item.clone()]);
                supports.insert(itemset.clone(), count);
                level.insert(itemset);
            }
        }
        level
    }

    fn filter_by_support<'c>(
        &self,
        candidates: impl Iterator<Item = &'c Itemset<T>>,
        supports: &mut BTreeMap<Itemset<T>, usize>,
    ) -> BTreeSet<Itemset<T>>
    where
        T: 'c,
    {
        let mut level = BTreeSet::new();
        for candidate in candidates {
            let support = self.counter.support(candidate);
            if support >= self.min_support {
                supports.insert(candidate.clone(), support);
                level.insert(candidate.clone());
            }
        }
        level
    }
}

/// Find every frequent itemset in `store` with support of at least `min_support`
pub fn apriori<T: Item>(
    store: &TransactionStore<T>,
    counter: &dyn SupportCounter<T>,
    min_support: i64,
) -> Result<FrequentItemsets<T>, MiningError> {
    Ok(Apriori::new(store, counter, min_support)?.run())
}
