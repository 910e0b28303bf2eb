//! Collects the caller's entries into deduplicated parallel arrays.
use hashbrown::hash_table::{Entry, HashTable};

use crate::comparer::Comparer;

/// hashbrown takes its control bits from the top of the hash, so a 32-bit hash code has to be
/// spread over the full 64 bits.
#[inline(always)]
fn widen(hash: i32) -> u64 {
    (hash as u32 as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15)
}

/// Deduplicated entries in order of first occurrence.
pub(crate) struct Entries<K, V> {
    pub keys: Vec<K>,
    pub values: Vec<V>,
}

impl<K, V> Entries<K, V> {
    /// Collects `source`, keeping the first occurrence of each key and the last value written to
    /// it.
    pub fn collect<C: Comparer<K>>(source: impl IntoIterator<Item = (K, V)>, comparer: &C) -> Self {
        let source = source.into_iter();
        let (lower_bound, _) = source.size_hint();

        let mut table: HashTable<usize> = HashTable::with_capacity(lower_bound);
        let mut keys: Vec<K> = Vec::with_capacity(lower_bound);
        let mut values: Vec<V> = Vec::with_capacity(lower_bound);

        for (key, value) in source {
            let hash = widen(comparer.hash(&key));
            match table.entry(
                hash,
                |&index| comparer.equals(&keys[index], &key),
                |&index| widen(comparer.hash(&keys[index])),
            ) {
                Entry::Occupied(entry) => values[*entry.get()] = value,
                Entry::Vacant(entry) => {
                    entry.insert(keys.len());
                    keys.push(key);
                    values.push(value);
                }
            }
        }

        Entries { keys, values }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DefaultComparer, OrdinalIgnoreCase};

    #[test]
    fn last_value_wins() {
        let entries = Entries::collect(
            [("a", 1), ("b", 2), ("a", 3), ("c", 4), ("b", 5)],
            &DefaultComparer,
        );
        assert_eq!(entries.keys, ["a", "b", "c"]);
        assert_eq!(entries.values, [3, 5, 4]);
    }

    #[test]
    fn first_key_is_kept() {
        let entries = Entries::collect(
            [("Key", ()), ("KEY", ()), ("other", ()), ("key", ())],
            &OrdinalIgnoreCase,
        );
        assert_eq!(entries.keys, ["Key", "other"]);
    }
}
