//! Level-wise candidate generation (join, then prune)

use crate::itemset::{Item, Itemset};
use std::collections::BTreeSet;

/// Build the size-(k+1) candidates from a level of frequent size-k itemsets.
///
/// Join: two itemsets that agree on everything but their largest element are
/// merged. Because the level is kept sorted, itemsets sharing a prefix sit
/// next to each other, so each prefix group is joined pairwise.
///
/// Prune: a joined candidate survives only if every one of its size-k
/// subsets is itself in `level`.
pub fn generate_candidates<T: Item>(level: &BTreeSet<Itemset<T>>) -> BTreeSet<Itemset<T>> {
    debug_assert!(
        level
            .iter()
            .zip(level.iter().skip(1))
            .all(|(a, b)| a.len() == b.len()),
        "a level holds itemsets of a single size"
    );

    let members: Vec<&Itemset<T>> = level.iter().collect();
    let mut candidates = BTreeSet::new();
    let mut pruned = 0usize;

    let mut start = 0;
    while start < members.len() {
        let prefix = members[start].prefix();
        let end = start
            + members[start..]
                .iter()
                .take_while(|itemset| itemset.prefix() == prefix)
                .count();

        let group = &members[start..end];
        for (i, left) in group.iter().enumerate() {
            for right in &group[i + 1..] {
                let Some(largest) = right.last() else {
                    continue;
                };
                let candidate = left.with(largest.clone());
                if has_infrequent_subset(&candidate, level) {
                    tracing::trace!(?candidate, "pruned candidate with infrequent subset");
                    pruned += 1;
                } else {
                    candidates.insert(candidate);
                }
            }
        }

        start = end;
    }

    tracing::trace!(
        joined = candidates.len() + pruned,
        pruned,
        "candidate generation finished"
    );
    candidates
}

fn has_infrequent_subset<T: Item>(candidate: &Itemset<T>, level: &BTreeSet<Itemset<T>>) -> bool {
    candidate
        .drop_one_subsets()
        .any(|subset| !level.contains(&subset))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(sets: &[&[u32]]) -> BTreeSet<Itemset<u32>> {
        sets.iter()
            .map(|items| items.iter().copied().collect())
            .collect()
    }

    #[test]
    fn test_singletons_join_into_all_pairs() {
        let candidates = generate_candidates(&level(&[&[1], &[2], &[3]]));
        assert_eq!(candidates, level(&[&[1, 2], &[1, 3], &[2, 3]]));
    }

    #[test]
    fn test_join_requires_shared_prefix() {
        // {1,2} and {2,3} differ in more than the largest element
        let candidates = generate_candidates(&level(&[&[1, 2], &[2, 3]]));
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_prune_drops_candidates_with_missing_subsets() {
        // {1,2,3} is joined from {1,2} and {1,3} but {2,3} is absent
        let candidates = generate_candidates(&level(&[&[1, 2], &[1, 3]]));
        assert!(candidates.is_empty());

        let candidates = generate_candidates(&level(&[&[1, 2], &[1, 3], &[2, 3]]));
        assert_eq!(candidates, level(&[&[1, 2, 3]]));
    }

    #[test]
    fn test_larger_level() {
        let frequent = level(&[
            &[1, 2, 3],
            &[1, 2, 4],
            &[1, 3, 4],
            &[1, 3, 5],
            &[2, 3, 4],
        ]);
        // {1,3,4,5} is pruned because {1,4,5} is not frequent
        assert_eq!(generate_candidates(&frequent), level(&[&[1, 2, 3, 4]]));
    }

    #[test]
    fn test_empty_and_single_levels() {
        assert!(generate_candidates(&BTreeSet::<Itemset<u32>>::new()).is_empty());
        assert!(generate_candidates(&level(&[&[7]])).is_empty());
    }

    #[test]
    fn test_candidates_are_one_larger() {
        let frequent = level(&[&[1, 2], &[1, 3], &[1, 4], &[2, 3], &[2, 4], &[3, 4]]);
        let candidates = generate_candidates(&frequent);
        assert_eq!(candidates.len(), 4);
        assert!(candidates.iter().all(|c| c.len() == 3));
    }
}
