use std::{borrow::Borrow, cmp::Ordering};

use super::Representation;
use crate::{comparer::Comparer, key::FrozenKey};

/// Linear scan using the collection's comparer.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct ScanRepr;

impl Representation for ScanRepr {
    #[inline(always)]
    fn find<K, Q, C>(&self, keys: &[K], comparer: &C, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: FrozenKey + ?Sized,
        C: Comparer<Q>,
    {
        keys.iter()
            .position(|stored| comparer.equals(stored.borrow(), key))
    }
}

/// Linear scan over sorted keys, which stops at the first key larger than the probe.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct OrderedScanRepr;

impl OrderedScanRepr {
    /// Returns `None` if the probe's type does not provide an order.
    #[inline(always)]
    fn find_ordered<K, Q>(keys: &[K], key: &Q) -> Option<Option<usize>>
    where
        K: Borrow<Q>,
        Q: FrozenKey + ?Sized,
    {
        let (Some(first), Some(last)) = (keys.first(), keys.last()) else {
            return Some(None);
        };
        if key.total_cmp(first.borrow())? == Ordering::Less
            || key.total_cmp(last.borrow())? == Ordering::Greater
        {
            return Some(None);
        }
        for (index, stored) in keys.iter().enumerate() {
            match key.total_cmp(stored.borrow())? {
                Ordering::Equal => return Some(Some(index)),
                Ordering::Less => return Some(None),
                Ordering::Greater => (),
            }
        }
        Some(None)
    }
}

impl Representation for OrderedScanRepr {
    #[inline(always)]
    fn find<K, Q, C>(&self, keys: &[K], comparer: &C, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: FrozenKey + ?Sized,
        C: Comparer<Q>,
    {
        match Self::find_ordered(keys, key) {
            Some(found) => found,
            None => ScanRepr.find(keys, comparer, key),
        }
    }
}

/// Returns the permutation sorting `keys`, if the key type is ordered.
pub(crate) fn sorted_permutation<K: FrozenKey>(keys: &[K]) -> Option<Vec<usize>> {
    if keys.iter().any(|key| key.total_cmp(key).is_none()) {
        return None;
    }
    let mut permutation: Vec<usize> = (0..keys.len()).collect();
    permutation.sort_unstable_by(|&a, &b| {
        keys[a].total_cmp(&keys[b]).unwrap_or(Ordering::Equal)
    });
    Some(permutation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DefaultComparer;

    #[test]
    fn ordered_scan_stops_early() {
        let keys = [9u16, 2, 7, 4];
        let permutation = sorted_permutation(&keys).unwrap();
        let sorted: Vec<u16> = permutation.iter().map(|&i| keys[i]).collect();
        assert_eq!(sorted, [2, 4, 7, 9]);
        for (index, key) in sorted.iter().enumerate() {
            assert_eq!(OrderedScanRepr.find(&sorted, &DefaultComparer, key), Some(index));
        }
        for missing in [0, 3, 8, 10, u16::MAX] {
            assert_eq!(OrderedScanRepr.find(&sorted, &DefaultComparer, &missing), None);
        }
    }

    #[test]
    fn unordered_keys_have_no_sort() {
        assert!(sorted_permutation(&["b", "a"]).is_none());
    }
}
