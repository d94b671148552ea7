//! In-memory transaction store

use crate::itemset::{Item, Itemset};
use std::collections::HashMap;

/// Immutable collection of transactions plus the number of transactions
/// each item occurs in.
///
/// The counts are derived from the transactions at construction time, so
/// `item_count(i)` always equals the number of transactions containing `i`.
#[derive(Debug, Clone)]
pub struct TransactionStore<T> {
    transactions: Vec<Itemset<T>>,
    item_counts: HashMap<T, usize>,
}

impl<T: Item> TransactionStore<T> {
    pub fn new(transactions: Vec<Itemset<T>>) -> Self {
        let mut item_counts = HashMap::new();
        for transaction in &transactions {
            for item in transaction {
                *item_counts.entry(item.clone()).or_insert(0) += 1;
            }
        }
        Self {
            transactions,
            item_counts,
        }
    }

    pub fn transactions(&self) -> &[Itemset<T>] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Number of transactions containing `item` (zero for unknown items)
    pub fn item_count(&self, item: &T) -> usize {
        self.item_counts.get(item).copied().unwrap_or(0)
    }

    pub fn item_counts(&self) -> &HashMap<T, usize> {
        &self.item_counts
    }

    /// Number of distinct items seen across all transactions
    pub fn distinct_items(&self) -> usize {
        self.item_counts.len()
    }
}

impl<T: Item> FromIterator<Itemset<T>> for TransactionStore<T> {
    fn from_iter<I: IntoIterator<Item = Itemset<T>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
