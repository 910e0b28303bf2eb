//! Hash-free lookup for small string sets of varied lengths.
//!
//! Each length between the shortest and the longest key owns a fixed band of slots holding the
//! indices of keys with that length. A lookup jumps straight to the band of the probe's length
//! and compares against at most [`LENGTH_BUCKET_SLOTS`] keys.
use crate::config::{LENGTH_BUCKET_MIN_USED_RATIO, LENGTH_BUCKET_SLOTS};

const EMPTY: u32 = u32::MAX;

/// Slot table indexed by key length in bytes.
#[derive(Clone, Debug)]
pub struct LengthBuckets {
    slots: Box<[u32]>,
    min_len: usize,
}

impl LengthBuckets {
    /// Builds a table for `keys`, or returns `None` if they are not a good fit.
    ///
    /// Keys are a poor fit when they all share a length, when some length has more keys than it
    /// has slots, or when most lengths in the covered range are unused.
    pub fn try_build(keys: &[&str]) -> Option<LengthBuckets> {
        if u32::try_from(keys.len()).map_or(true, |len| len == EMPTY) {
            return None;
        }
        let min_len = keys.iter().map(|key| key.len()).min()?;
        let max_len = keys.iter().map(|key| key.len()).max()?;
        let spread = max_len - min_len + 1;

        if spread < 2 || keys.len() / spread > LENGTH_BUCKET_SLOTS {
            return None;
        }
        let table_len = spread
            .checked_mul(LENGTH_BUCKET_SLOTS)
            .filter(|&table_len| table_len <= i32::MAX as usize)?;

        let mut slots = vec![EMPTY; table_len];
        for (index, key) in keys.iter().enumerate() {
            let start = (key.len() - min_len) * LENGTH_BUCKET_SLOTS;
            let band = &mut slots[start..start + LENGTH_BUCKET_SLOTS];
            // a length with more keys than slots rules out the whole table
            let slot = band.iter_mut().find(|slot| **slot == EMPTY)?;
            *slot = index as u32;
        }
        let used_lengths = slots
            .chunks_exact(LENGTH_BUCKET_SLOTS)
            .filter(|band| band[0] != EMPTY)
            .count();
        if used_lengths * LENGTH_BUCKET_MIN_USED_RATIO < spread {
            return None;
        }

        Some(LengthBuckets {
            slots: slots.into_boxed_slice(),
            min_len,
        })
    }

    /// Returns the number of distinct lengths covered by the table.
    pub fn spread(&self) -> usize {
        self.slots.len() / LENGTH_BUCKET_SLOTS
    }

    /// Returns the length of the shortest key.
    pub fn min_len(&self) -> usize {
        self.min_len
    }

    /// Returns the indices of the keys of length `len`.
    #[inline(always)]
    pub fn candidates(&self, len: usize) -> impl Iterator<Item = usize> + '_ {
        let band: &[u32] = match len.checked_sub(self.min_len) {
            Some(offset) if offset < self.spread() => {
                let start = offset * LENGTH_BUCKET_SLOTS;
                &self.slots[start..start + LENGTH_BUCKET_SLOTS]
            }
            _ => &[],
        };
        band.iter()
            .take_while(|&&slot| slot != EMPTY)
            .map(|&slot| slot as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn varied_lengths() {
        let keys = ["ab", "abc", "de", "abcd", "fg"];
        let buckets = LengthBuckets::try_build(&keys).unwrap();
        assert_eq!(buckets.spread(), 3);
        assert_eq!(buckets.min_len(), 2);
        assert_eq!(buckets.candidates(2).collect::<Vec<_>>(), [0, 2, 4]);
        assert_eq!(buckets.candidates(3).collect::<Vec<_>>(), [1]);
        assert_eq!(buckets.candidates(4).collect::<Vec<_>>(), [3]);
        assert_eq!(buckets.candidates(1).count(), 0);
        assert_eq!(buckets.candidates(5).count(), 0);
        assert_eq!(buckets.candidates(usize::MAX).count(), 0);
    }

    #[test]
    fn rejects_uniform_lengths() {
        assert!(LengthBuckets::try_build(&["cat", "bat", "hat", "mat", "rat"]).is_none());
    }

    #[test]
    fn rejects_overfull_length() {
        let keys = ["a", "b", "c", "d", "e", "f", "gg"];
        assert!(LengthBuckets::try_build(&keys).is_none());
    }

    #[test]
    fn rejects_sparse_lengths() {
        let long = "x".repeat(40);
        let keys = ["a", "b", long.as_str()];
        assert!(LengthBuckets::try_build(&keys).is_none());
    }
}
