//! Support counting over a [`TransactionStore`]
//!
//! Two interchangeable counters are provided. [`ScanCounter`] walks every
//! transaction on each call. [`IndexedCounter`] builds an inverted index
//! from item to the ids of the transactions containing it and intersects
//! the posting lists, which returns the same counts with far less work once
//! the store grows.

use crate::itemset::{Item, Itemset};
use crate::store::TransactionStore;
use serde::Deserialize;
use std::collections::HashMap;

/// Counts the transactions that contain a given itemset.
pub trait SupportCounter<T> {
    /// Number of transactions that are supersets of `itemset`.
    /// The empty itemset is contained in every transaction.
    fn support(&self, itemset: &Itemset<T>) -> usize;

    /// Total number of transactions
    fn transaction_count(&self) -> usize;
}

/// Which counter implementation a mining run uses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CounterKind {
    /// Linear scan over every transaction
    Scan,
    /// Inverted index with posting-list intersection
    #[default]
    Indexed,
}

impl CounterKind {
    pub fn build<'a, T: Item>(
        self,
        store: &'a TransactionStore<T>,
    ) -> Box<dyn SupportCounter<T> + 'a> {
        match self {
            Self::Scan => Box::new(ScanCounter::new(store)),
            Self::Indexed => Box::new(IndexedCounter::new(store)),
        }
    }
}

/// Reference counter: a full pass over the store per call
#[derive(Debug, Clone, Copy)]
pub struct ScanCounter<'a, T> {
    store: &'a TransactionStore<T>,
}

impl<'a, T: Item> ScanCounter<'a, T> {
    pub fn new(store: &'a TransactionStore<T>) -> Self {
        Self { store }
    }
}

impl<T: Item> SupportCounter<T> for ScanCounter<'_, T> {
    fn support(&self, itemset: &Itemset<T>) -> usize {
        support(itemset, self.store)
    }

    fn transaction_count(&self) -> usize {
        self.store.len()
    }
}

/// Inverted-index counter
#[derive(Debug, Clone)]
pub struct IndexedCounter<T> {
    /// Sorted transaction ids per item
    postings: HashMap<T, Vec<usize>>,
    transaction_count: usize,
}

impl<T: Item> IndexedCounter<T> {
    pub fn new(store: &TransactionStore<T>) -> Self {
        let mut postings: HashMap<T, Vec<usize>> =
            HashMap::with_capacity(store.distinct_items());
        for (id, transaction) in store.transactions().iter().enumerate() {
            for item in transaction {
                postings.entry(item.clone()).or_default().push(id);
            }
        }
        Self {
            postings,
            transaction_count: store.len(),
        }
    }
}

impl<T: Item> SupportCounter<T> for IndexedCounter<T> {
    fn support(&self, itemset: &Itemset<T>) -> usize {
        let mut lists = Vec::with_capacity(itemset.len());
        for item in itemset {
            match self.postings.get(item) {
                Some(list) => lists.push(list.as_slice()),
                None => return 0,
            }
        }

        // start from the rarest item so the candidate list is as short as possible
        lists.sort_by_key(|list| list.len());
        let Some((shortest, rest)) = lists.split_first() else {
            return self.transaction_count;
        };

        shortest
            .iter()
            .filter(|&&id| rest.iter().all(|list| list.binary_search(&id).is_ok()))
            .count()
    }

    fn transaction_count(&self) -> usize {
        self.transaction_count
    }
}

/// Support of `itemset` by a linear scan of `store`
pub fn support<T: Item>(itemset: &Itemset<T>, store: &TransactionStore<T>) -> usize {
    store
        .transactions()
        .iter()
        .filter(|transaction| itemset.is_subset_of(transaction))
        .count()
}
