//! A read-only hash index grouping entries by bucket.
//!
//! Entries are laid out so that all entries of a bucket are contiguous, in the style of a
//! compressed sparse row matrix: a prefix sum over bucket sizes gives each bucket's start. A
//! lookup is a single division plus two offset loads, followed by a scan over the (expected
//! tiny) bucket.
use std::{hash::BuildHasherDefault, ops::Range};

use hashbrown::HashSet;
use zwohash::ZwoHasher;

use crate::config::{
    ACCEPTABLE_COLLISION_DIVISOR, LARGE_INPUT_BUCKET_MULTIPLIER, LARGE_INPUT_LEN,
    MAX_BUCKET_CANDIDATES, SMALL_INPUT_BUCKET_MULTIPLIER,
};

/// Bucket start offsets, with one extra trailing entry holding the total length.
///
/// Offsets are stored as `u32` unless the number of entries does not fit.
#[derive(Clone, Debug)]
enum BucketOffsets {
    Small(Box<[u32]>),
    Large(Box<[usize]>),
}

/// Maps hash codes to ranges of candidate entry indices.
#[derive(Clone, Debug)]
pub struct HashIndex {
    offsets: BucketOffsets,
    hash_codes: Box<[i32]>,
}

#[inline(always)]
fn bucket_of(hash: i32, bucket_count: usize) -> usize {
    hash as u32 as usize % bucket_count
}

impl HashIndex {
    /// Builds an index over the given hash codes.
    ///
    /// Returns the index together with the permutation that was applied, where
    /// `permutation[dest] == src` means that the entry with hash code `hash_codes[src]` is stored
    /// at position `dest`. Callers permute their own entry arrays the same way.
    ///
    /// Setting `hashes_are_unique` promises that `hash_codes` contains no duplicates, which skips
    /// the deduplication pass while choosing the bucket count.
    pub fn build(hash_codes: &[i32], hashes_are_unique: bool) -> (HashIndex, Vec<usize>) {
        let bucket_count = choose_bucket_count(hash_codes, hashes_are_unique);

        let mut offsets = vec![0usize; bucket_count + 1];
        for &hash in hash_codes {
            offsets[bucket_of(hash, bucket_count) + 1] += 1;
        }
        for bucket in 0..bucket_count {
            offsets[bucket + 1] += offsets[bucket];
        }

        let mut cursor = offsets[..bucket_count].to_vec();
        let mut permutation = vec![0; hash_codes.len()];
        for (src, &hash) in hash_codes.iter().enumerate() {
            let bucket = bucket_of(hash, bucket_count);
            permutation[cursor[bucket]] = src;
            cursor[bucket] += 1;
        }

        let hash_codes = permutation.iter().map(|&src| hash_codes[src]).collect();

        let offsets = if u32::try_from(permutation.len()).is_ok() {
            BucketOffsets::Small(offsets.into_iter().map(|offset| offset as u32).collect())
        } else {
            BucketOffsets::Large(offsets.into_boxed_slice())
        };

        (
            HashIndex {
                offsets,
                hash_codes,
            },
            permutation,
        )
    }

    /// Returns the range of entries sharing a bucket with `hash`.
    ///
    /// Every entry with hash code `hash` is inside the returned range, but the range may also
    /// contain entries with other hash codes.
    #[inline(always)]
    pub fn find_range(&self, hash: i32) -> Range<usize> {
        match &self.offsets {
            BucketOffsets::Small(offsets) => {
                let bucket = bucket_of(hash, offsets.len() - 1);
                offsets[bucket] as usize..offsets[bucket + 1] as usize
            }
            BucketOffsets::Large(offsets) => {
                let bucket = bucket_of(hash, offsets.len() - 1);
                offsets[bucket]..offsets[bucket + 1]
            }
        }
    }

    /// Returns the indices of all entries whose hash code is exactly `hash`.
    #[inline(always)]
    pub fn candidates(&self, hash: i32) -> impl Iterator<Item = usize> + '_ {
        self.find_range(hash)
            .filter(move |&index| self.hash_codes[index] == hash)
    }

    /// Returns the hash codes in storage order.
    pub fn hash_codes(&self) -> &[i32] {
        &self.hash_codes
    }

    /// Returns the number of indexed entries.
    pub fn len(&self) -> usize {
        self.hash_codes.len()
    }

    /// Returns `true` if no entries are indexed.
    pub fn is_empty(&self) -> bool {
        self.hash_codes.is_empty()
    }

    /// Returns the number of buckets.
    pub fn bucket_count(&self) -> usize {
        match &self.offsets {
            BucketOffsets::Small(offsets) => offsets.len() - 1,
            BucketOffsets::Large(offsets) => offsets.len() - 1,
        }
    }

    /// Returns `true` if the bucket offsets are stored compactly.
    pub fn is_small(&self) -> bool {
        matches!(self.offsets, BucketOffsets::Small(_))
    }
}

fn is_prime(n: usize) -> bool {
    if n < 4 {
        return n >= 2;
    }
    if n % 2 == 0 {
        return false;
    }
    let mut divisor = 3;
    while divisor <= n / divisor {
        if n % divisor == 0 {
            return false;
        }
        divisor += 2;
    }
    true
}

fn next_prime(mut n: usize) -> usize {
    while !is_prime(n) {
        n += 1;
    }
    n
}

/// Picks a prime bucket count for which few distinct hash codes share a bucket.
fn choose_bucket_count(hash_codes: &[i32], hashes_are_unique: bool) -> usize {
    if hash_codes.is_empty() {
        return 1;
    }

    let deduplicated;
    let distinct: &[i32] = if hashes_are_unique {
        hash_codes
    } else {
        let mut seen: HashSet<i32, BuildHasherDefault<ZwoHasher>> =
            HashSet::with_capacity_and_hasher(hash_codes.len(), Default::default());
        deduplicated = hash_codes
            .iter()
            .copied()
            .filter(|&hash| seen.insert(hash))
            .collect::<Vec<_>>();
        &deduplicated
    };

    let multiplier = if distinct.len() > LARGE_INPUT_LEN {
        LARGE_INPUT_BUCKET_MULTIPLIER
    } else {
        SMALL_INPUT_BUCKET_MULTIPLIER
    };
    let max_bucket_count = distinct.len().saturating_mul(multiplier);
    let acceptable_collisions = distinct.len() / ACCEPTABLE_COLLISION_DIVISOR;

    let mut occupied = vec![0u64; max_bucket_count / 64 + 1];
    let mut best = (usize::MAX, next_prime(distinct.len()));
    let mut candidate = best.1;

    for _ in 0..MAX_BUCKET_CANDIDATES {
        if candidate > max_bucket_count {
            break;
        }
        occupied[..candidate / 64 + 1].fill(0);

        let mut collisions = 0;
        for &hash in distinct {
            let bucket = bucket_of(hash, candidate);
            let (word, bit) = (bucket / 64, 1u64 << (bucket % 64));
            if occupied[word] & bit != 0 {
                collisions += 1;
                if collisions >= best.0 {
                    break;
                }
            } else {
                occupied[word] |= bit;
            }
        }

        if collisions < best.0 {
            best = (collisions, candidate);
        }
        if collisions <= acceptable_collisions {
            break;
        }
        candidate = next_prime(candidate + 1);
    }

    log::trace!(
        "{} distinct hash codes in {} buckets with {} collisions",
        distinct.len(),
        best.1,
        best.0
    );

    best.1
}
