//! Canonical itemset representation and the set helpers shared by the miner

use itertools::{EitherOrBoth, Itertools};
use serde::Serialize;
use std::fmt;
use std::hash::Hash;

/// Identifier of a single item. Any totally ordered, hashable value works;
/// the total order fixes which element is "largest" during candidate joins.
pub trait Item: Ord + Clone + Hash + fmt::Debug {}

impl<T: Ord + Clone + Hash + fmt::Debug> Item for T {}

/// A set of items stored as a strictly increasing vector.
///
/// Two itemsets with the same members compare equal and hash identically,
/// no matter how they were built, so they can be used as map and set keys.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Itemset<T> {
    items: Vec<T>,
}

impl<T: Item> Itemset<T> {
    /// The empty itemset
    pub fn empty() -> Self {
        Self { items: Vec::new() }
    }

    /// Build an itemset from a vector already sorted with no duplicates
    fn from_sorted(items: Vec<T>) -> Self {
        debug_assert!(items.windows(2).all(|w| w[0] < w[1]));
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn contains(&self, item: &T) -> bool {
        self.items.binary_search(item).is_ok()
    }

    /// Largest member under the item order
    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    /// All members except the largest one
    pub fn prefix(&self) -> &[T] {
        match self.items.split_last() {
            Some((_, rest)) => rest,
            None => &[],
        }
    }

    /// True when every member of `self` is also in `other`.
    ///
    /// Both sides are sorted, so this is a single merge pass.
    pub fn is_subset_of(&self, other: &Self) -> bool {
        is_sorted_subset(&self.items, &other.items)
    }

    /// Members of `self` not present in `other`
    pub fn difference(&self, other: &Self) -> Self {
        let items = self
            .items
            .iter()
            .filter(|item| !other.contains(item))
            .cloned()
            .collect();
        Self::from_sorted(items)
    }

    pub fn union(&self, other: &Self) -> Self {
        let items = itertools::merge_join_by(&self.items, &other.items, |a, b| a.cmp(b))
            .map(|pair| match pair {
                EitherOrBoth::Left(item)
                | EitherOrBoth::Right(item)
                | EitherOrBoth::Both(item, _) => item.clone(),
            })
            .collect();
        Self::from_sorted(items)
    }

    /// Copy of `self` with `item` added
    pub fn with(&self, item: T) -> Self {
        let mut items = self.items.clone();
        if let Err(pos) = items.binary_search(&item) {
            items.insert(pos, item);
        }
        Self::from_sorted(items)
    }

    /// Every subset obtained by removing exactly one member
    pub fn drop_one_subsets(&self) -> impl Iterator<Item = Itemset<T>> + '_ {
        (0..self.items.len()).map(move |skip| {
            let items = self
                .items
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != skip)
                .map(|(_, item)| item.clone())
                .collect();
            Self::from_sorted(items)
        })
    }

    /// Every subset with exactly `size` members, in lexicographic order.
    ///
    /// Yields C(n, size) itemsets; `size == 0` yields the empty itemset once
    /// and `size > n` yields nothing.
    pub fn subsets_of_size(&self, size: usize) -> impl Iterator<Item = Itemset<T>> + '_ {
        self.items
            .iter()
            .cloned()
            .combinations(size)
            .map(Self::from_sorted)
    }
}

impl<T: Item> FromIterator<T> for Itemset<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut items: Vec<T> = iter.into_iter().collect();
        items.sort_unstable();
        items.dedup();
        Self { items }
    }
}

impl<T: Item, const N: usize> From<[T; N]> for Itemset<T> {
    fn from(items: [T; N]) -> Self {
        items.into_iter().collect()
    }
}

impl<'a, T> IntoIterator for &'a Itemset<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: fmt::Display> fmt::Display for Itemset<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{item}")?;
        }
        f.write_str("}")
    }
}

/// Merge-walk subset test over two strictly increasing slices
fn is_sorted_subset<T: Ord>(needle: &[T], haystack: &[T]) -> bool {
    if needle.len() > haystack.len() {
        return false;
    }
    let mut rest = haystack.iter();
    'outer: for wanted in needle {
        for candidate in rest.by_ref() {
            match candidate.cmp(wanted) {
                std::cmp::Ordering::Less => continue,
                std::cmp::Ordering::Equal => continue 'outer,
                std::cmp::Ordering::Greater => return false,
            }
        }
        return false;
    }
    true
}
