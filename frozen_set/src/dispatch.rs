//! Picks the representation for a deduplicated set of keys.
use crate::{
    comparer::{Comparer, ComparerKind},
    config::{MAX_SMALL_LEN, MAX_SMALL_ORDERED_LEN},
    hash_index::HashIndex,
    key::{FrozenKey, KeyClass},
    key_analyzer::analyze,
    length_buckets::LengthBuckets,
    repr::{
        sorted_permutation, HashedRepr, IntRepr, LengthRepr, Lookup, OrderedScanRepr, ScanRepr,
        StringRepr,
    },
};

/// A chosen representation and the order in which it expects the keys to be stored.
///
/// `permutation[dest] == src` moves the entry at `src` to `dest`. A missing permutation keeps
/// the entries in their current order.
pub(crate) struct Choice {
    pub lookup: Lookup,
    pub permutation: Option<Vec<usize>>,
}

impl Choice {
    fn keep_order(lookup: Lookup) -> Self {
        Choice {
            lookup,
            permutation: None,
        }
    }

    fn reorder(lookup: Lookup, permutation: Vec<usize>) -> Self {
        Choice {
            lookup,
            permutation: Some(permutation),
        }
    }
}

/// Chooses a representation for distinct `keys`.
///
/// Rules are tried in order and the first applicable one wins.
pub(crate) fn choose<K: FrozenKey, C: Comparer<K>>(keys: &[K], comparer: &C) -> Choice {
    let count = keys.len();
    if count == 0 {
        return Choice::keep_order(Lookup::Empty);
    }

    let kind = comparer.kind();
    let default_comparer = kind == ComparerKind::Default;

    if default_comparer && K::CLASS.has_total_order() && count <= MAX_SMALL_ORDERED_LEN {
        if let Some(permutation) = sorted_permutation(keys) {
            return Choice::reorder(Lookup::SmallOrdered(OrderedScanRepr), permutation);
        }
    }

    if count <= MAX_SMALL_LEN {
        return Choice::keep_order(Lookup::Scan(ScanRepr));
    }

    if default_comparer && K::CLASS.hash_is_key() {
        if let Some(ints) = keys.iter().map(K::as_i32).collect::<Option<Vec<i32>>>() {
            let (index, permutation) = HashIndex::build(&ints, true);
            return Choice::reorder(Lookup::DirectInt(IntRepr { index }), permutation);
        }
    }

    if K::CLASS == KeyClass::Str && kind != ComparerKind::Custom {
        if let Some(strs) = keys.iter().map(K::as_str).collect::<Option<Vec<&str>>>() {
            return choose_string(&strs, kind == ComparerKind::OrdinalIgnoreCase);
        }
    }

    let hashes: Vec<i32> = keys.iter().map(|key| comparer.hash(key)).collect();
    let (index, permutation) = HashIndex::build(&hashes, false);
    Choice::reorder(Lookup::Hashed(HashedRepr { index }), permutation)
}

fn choose_string(keys: &[&str], ignore_case: bool) -> Choice {
    let all_ascii = keys.iter().all(|key| key.is_ascii());

    // Length buckets measure bytes, which folding does not preserve for non-ASCII keys.
    if !ignore_case || all_ascii {
        if let Some(buckets) = LengthBuckets::try_build(keys) {
            return Choice::keep_order(Lookup::LengthBuckets(LengthRepr {
                buckets,
                ignore_case: ignore_case
                    && keys.iter().any(|key| key.bytes().any(|b| b.is_ascii_alphabetic())),
                fold_non_ascii_probes: ignore_case,
            }));
        }
    }

    let analysis = analyze(keys, ignore_case);
    let hashes: Vec<i32> = keys
        .iter()
        .map(|key| {
            analysis
                .hash(key)
                .expect("analyzed region must fit every analyzed key")
        })
        .collect();
    let (index, permutation) = HashIndex::build(&hashes, false);
    Choice::reorder(
        Lookup::OrdinalString(StringRepr { index, analysis }),
        permutation,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        key_analyzer::{HashMode, Region},
        DefaultComparer, Ordinal, OrdinalIgnoreCase, Strategy,
    };

    fn strategy<K: FrozenKey, C: Comparer<K>>(keys: &[K], comparer: &C) -> Strategy {
        choose(keys, comparer).lookup.strategy()
    }

    #[test]
    fn small_collections() {
        assert_eq!(strategy::<i32, _>(&[], &DefaultComparer), Strategy::Empty);
        assert_eq!(strategy(&[3i64, 1, 2], &DefaultComparer), Strategy::SmallOrdered);
        assert_eq!(strategy(&[1u8; 0], &DefaultComparer), Strategy::Empty);
        let ten: Vec<i32> = (0..10).collect();
        assert_eq!(strategy(&ten, &DefaultComparer), Strategy::SmallOrdered);
        assert_eq!(strategy(&["a", "b", "c"], &DefaultComparer), Strategy::SmallScan);
        assert_eq!(strategy(&["a", "b", "c", "d"], &Ordinal), Strategy::SmallScan);
    }

    #[test]
    fn int_keys() {
        let eleven: Vec<i32> = (1..=11).collect();
        assert_eq!(strategy(&eleven, &DefaultComparer), Strategy::DirectInt);
        let wide: Vec<i64> = (1..=11).collect();
        assert_eq!(strategy(&wide, &DefaultComparer), Strategy::Hashed);
    }

    #[test]
    fn string_keys() {
        assert_eq!(
            strategy(&["a", "bb", "ccc", "dddd", "eeeee"], &Ordinal),
            Strategy::LengthBuckets { ignore_case: false }
        );
        assert_eq!(
            strategy(&["cat", "bat", "hat", "mat", "rat"], &DefaultComparer),
            Strategy::OrdinalString {
                region: Region::Left { offset: 0, len: 1 },
                hash_mode: HashMode::Ordinal,
                single_unit: true,
                ignore_case: false,
            }
        );
        assert_eq!(
            strategy(&["Cat", "bat", "HAT", "mat", "rat"], &OrdinalIgnoreCase),
            Strategy::OrdinalString {
                region: Region::Left { offset: 0, len: 1 },
                hash_mode: HashMode::AsciiIgnoreCase,
                single_unit: true,
                ignore_case: true,
            }
        );
    }

    #[test]
    fn permutation_covers_every_key() {
        let keys: Vec<String> = (0..100).map(|i| format!("item-{i}")).collect();
        let choice = choose(&keys, &Ordinal);
        let mut permutation = choice.permutation.unwrap();
        permutation.sort_unstable();
        assert!(permutation.iter().copied().eq(0..100));
    }
}
