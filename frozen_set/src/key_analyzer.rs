//! Chooses the cheapest part of string keys that still tells them apart.
//!
//! Hashing a short substring is cheaper than hashing the whole key, and for many real key sets
//! (identifiers, header names, file extensions, ...) a handful of characters already separates
//! nearly all keys. The analysis runs once at build time over the deduplicated keys. Lookups then
//! hash only the chosen region but always compare whole keys, so sharing a region never produces
//! a false match.
use std::hash::{BuildHasherDefault, Hash};

use hashbrown::HashSet;
use smallvec::SmallVec;
use zwohash::ZwoHasher;

use crate::{
    config::{MAX_SUBSTRING_LEN, UNIQUENESS_DIVISOR},
    ordinal::{
        eq_ignore_case, fold_char, fold_into, has_ascii_letters, hash_ordinal,
        hash_ordinal_ignore_case_ascii, FoldBuffer,
    },
};

/// The part of a key that gets hashed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Region {
    /// The whole key.
    Full,
    /// `len` units starting `offset` units after the start of the key.
    Left {
        /// Start of the region.
        offset: usize,
        /// Length of the region.
        len: usize,
    },
    /// `len` units starting `back` units before the end of the key.
    Right {
        /// Distance from the start of the region to the end of the key.
        back: usize,
        /// Length of the region.
        len: usize,
    },
}

impl Region {
    /// Returns the region of `units`, or `None` if `units` is too short to contain it.
    #[inline(always)]
    pub fn slice<U>(self, units: &[U]) -> Option<&[U]> {
        match self {
            Region::Full => Some(units),
            Region::Left { offset, len } => units.get(offset..offset + len),
            Region::Right { back, len } => {
                let start = units.len().checked_sub(back)?;
                units.get(start..start + len)
            }
        }
    }

    /// Returns the length of the region, or `None` for [`Region::Full`].
    pub fn len(self) -> Option<usize> {
        match self {
            Region::Full => None,
            Region::Left { len, .. } | Region::Right { len, .. } => Some(len),
        }
    }
}

/// How the units of a region are hashed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HashMode {
    /// Raw UTF-8 code units.
    Ordinal,
    /// UTF-8 code units with the ASCII case bit forced on. Only used for all-ASCII key sets.
    AsciiIgnoreCase,
    /// Case folded chars. Regions are measured in chars rather than bytes.
    IgnoreCase,
}

/// The result of analyzing a set of string keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyAnalysis {
    /// Part of each key to hash.
    pub region: Region,
    /// How to hash the region.
    pub hash_mode: HashMode,
    /// Whether whole keys are compared ignoring case.
    pub ignore_case: bool,
    /// Set for case-insensitive analyses of all-ASCII keys. Lookups with a non-ASCII key then have
    /// to fold the key first, as it might still equal an ASCII key.
    pub fold_non_ascii_probes: bool,
    /// Length of the shortest key, in bytes (in chars for [`HashMode::IgnoreCase`]).
    pub min_len: usize,
    /// Length of the longest key, in bytes (in chars for [`HashMode::IgnoreCase`]).
    pub max_len: usize,
}

fn length_bounds<U>(keys: &[&[U]]) -> (usize, usize) {
    keys.iter().fold((usize::MAX, 0), |(min, max), key| {
        (min.min(key.len()), max.max(key.len()))
    })
}

/// Analyzes deduplicated string keys.
///
/// `ignore_case` requests case-insensitive comparison; the analysis may still decide to hash or
/// compare case-sensitively if that gives identical results for these keys.
pub fn analyze(keys: &[&str], ignore_case: bool) -> KeyAnalysis {
    let all_ascii = keys.iter().all(|key| key.is_ascii());

    if ignore_case && !all_ascii {
        let folded: Vec<Vec<char>> = keys
            .iter()
            .map(|key| key.chars().map(fold_char).collect())
            .collect();
        let units: Vec<&[char]> = folded.iter().map(Vec::as_slice).collect();
        let (min_len, max_len) = length_bounds(&units);
        let region = find_region(&units, min_len, max_len);
        log::trace!("case folded keys hashed by {region:?}");
        return KeyAnalysis {
            region,
            hash_mode: HashMode::IgnoreCase,
            ignore_case: true,
            fold_non_ascii_probes: false,
            min_len,
            max_len,
        };
    }

    let lowered: Vec<Vec<u8>>;
    let units: Vec<&[u8]> = if ignore_case {
        lowered = keys
            .iter()
            .map(|key| key.as_bytes().to_ascii_lowercase())
            .collect();
        lowered.iter().map(Vec::as_slice).collect()
    } else {
        keys.iter().map(|key| key.as_bytes()).collect()
    };
    let (min_len, max_len) = length_bounds(&units);
    let region = find_region(&units, min_len, max_len);

    let (hash_mode, compare_ignoring_case) = if ignore_case {
        let letters_in_region = units
            .iter()
            .any(|&key| region.slice(key).is_some_and(has_ascii_letters));
        let letters_anywhere =
            letters_in_region || units.iter().any(|&key| has_ascii_letters(key));
        let hash_mode = if letters_in_region {
            HashMode::AsciiIgnoreCase
        } else {
            HashMode::Ordinal
        };
        (hash_mode, letters_anywhere)
    } else {
        (HashMode::Ordinal, false)
    };

    log::trace!("keys hashed by {region:?} using {hash_mode:?}");

    KeyAnalysis {
        region,
        hash_mode,
        ignore_case: compare_ignoring_case,
        fold_non_ascii_probes: ignore_case,
        min_len,
        max_len,
    }
}

fn find_region<U: Copy + Eq + Hash>(keys: &[&[U]], min_len: usize, max_len: usize) -> Region {
    let acceptable_duplicates = keys.len() / UNIQUENESS_DIVISOR;
    let mut seen: HashSet<&[U], BuildHasherDefault<ZwoHasher>> =
        HashSet::with_capacity_and_hasher(keys.len(), Default::default());

    for len in 1..=min_len.min(MAX_SUBSTRING_LEN) {
        for offset in 0..=min_len - len {
            let region = Region::Left { offset, len };
            if is_unique_enough(keys, region, &mut seen, acceptable_duplicates) {
                return region;
            }
        }
        // With equal lengths every right-justified region is also a left-justified one.
        if min_len != max_len {
            for skip in 0..=min_len - len {
                let region = Region::Right {
                    back: skip + len,
                    len,
                };
                if is_unique_enough(keys, region, &mut seen, acceptable_duplicates) {
                    return region;
                }
            }
        }
    }
    Region::Full
}

fn is_unique_enough<'a, U: Eq + Hash>(
    keys: &[&'a [U]],
    region: Region,
    seen: &mut HashSet<&'a [U], BuildHasherDefault<ZwoHasher>>,
    acceptable_duplicates: usize,
) -> bool {
    seen.clear();
    let mut duplicates = 0;
    for &key in keys {
        let Some(units) = region.slice(key) else {
            return false;
        };
        if !seen.insert(units) {
            duplicates += 1;
            if duplicates > acceptable_duplicates {
                return false;
            }
        }
    }
    true
}

impl KeyAnalysis {
    /// Hashes the analyzed region of `key`. Returns `None` if `key` is too short to contain the
    /// region, in which case it cannot be equal to any analyzed key.
    #[inline]
    pub fn hash(&self, key: &str) -> Option<i32> {
        match self.hash_mode {
            HashMode::Ordinal => {
                let units = self.region.slice(key.as_bytes())?;
                Some(match units {
                    &[unit] => i32::from(unit),
                    _ => hash_ordinal(units),
                })
            }
            HashMode::AsciiIgnoreCase => {
                let units = self.region.slice(key.as_bytes())?;
                Some(match units {
                    &[unit] => i32::from(unit | 0x20),
                    _ => hash_ordinal_ignore_case_ascii(units),
                })
            }
            HashMode::IgnoreCase => self.hash_folded(key),
        }
    }

    fn hash_folded(&self, key: &str) -> Option<i32> {
        let mut folded = FoldBuffer::new();
        match self.region {
            Region::Full => fold_into(key.chars(), &mut folded),
            Region::Left { offset, len } => {
                let region: SmallVec<[char; MAX_SUBSTRING_LEN]> =
                    key.chars().skip(offset).take(len).collect();
                if region.len() < len {
                    return None;
                }
                if let &[c] = region.as_slice() {
                    return Some(fold_char(c) as i32);
                }
                fold_into(region.into_iter(), &mut folded);
            }
            Region::Right { back, len } => {
                let mut region: SmallVec<[char; MAX_SUBSTRING_LEN]> =
                    key.chars().rev().skip(back - len).take(len).collect();
                if region.len() < len {
                    return None;
                }
                if let &[c] = region.as_slice() {
                    return Some(fold_char(c) as i32);
                }
                region.reverse();
                fold_into(region.into_iter(), &mut folded);
            }
        }
        Some(hash_ordinal(&folded))
    }

    /// Compares two whole keys according to the analysis.
    #[inline(always)]
    pub fn equals(&self, a: &str, b: &str) -> bool {
        if self.ignore_case {
            eq_ignore_case(a, b)
        } else {
            a == b
        }
    }

    /// Returns `false` if a key's length alone rules out a match.
    ///
    /// Lengths are only known cheaply in bytes, so this never rejects keys for
    /// [`HashMode::IgnoreCase`] analyses.
    #[inline(always)]
    pub fn length_in_range(&self, key: &str) -> bool {
        self.hash_mode == HashMode::IgnoreCase
            || (self.min_len..=self.max_len).contains(&key.len())
    }

    /// Returns `true` if the analyzed region is a single unit.
    pub fn is_single_unit(&self) -> bool {
        self.region.len() == Some(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_char_separates_rhymes() {
        let keys = ["cat", "bat", "hat", "mat", "rat"];
        let analysis = analyze(&keys, false);
        assert_eq!(analysis.region, Region::Left { offset: 0, len: 1 });
        assert_eq!(analysis.hash_mode, HashMode::Ordinal);
        assert!(analysis.is_single_unit());
        assert!(!analysis.ignore_case);
    }

    #[test]
    fn suffix_when_prefixes_collide() {
        let keys = ["ab1", "ab2", "ab1x3", "ab2y4", "ab1z5"];
        let analysis = analyze(&keys, false);
        assert_eq!(analysis.region, Region::Right { back: 1, len: 1 });
        assert_eq!(analysis.min_len, 3);
        assert_eq!(analysis.max_len, 5);
        assert_eq!(analysis.hash("ab1x3"), analysis.hash("zz3"));
        assert_eq!(analysis.hash("ab"), analysis.hash("b"));
    }

    #[test]
    fn longer_region_when_single_chars_collide() {
        let keys = ["aa", "ab", "ba", "bb", "ca", "cb"];
        let analysis = analyze(&keys, false);
        assert_eq!(analysis.region, Region::Left { offset: 0, len: 2 });
    }

    #[test]
    fn full_key_when_nothing_short_works() {
        let keys: Vec<String> = (0..40).map(|i| "x".repeat(i)).collect();
        let keys: Vec<&str> = keys.iter().map(String::as_str).collect();
        let analysis = analyze(&keys, false);
        assert_eq!(analysis.region, Region::Full);
        assert_eq!(analysis.min_len, 0);
    }

    #[test]
    fn tolerates_a_few_duplicates() {
        let mut keys: Vec<String> = (0..40)
            .map(|i| format!("{}{i:03}", (b'A' + i as u8) as char))
            .collect();
        // 40 keys allow 2 shared regions
        keys[1] = "A999".to_string();
        keys[2] = "A998".to_string();
        let keys: Vec<&str> = keys.iter().map(String::as_str).collect();
        let analysis = analyze(&keys, false);
        assert_eq!(analysis.region, Region::Left { offset: 0, len: 1 });
    }

    #[test]
    fn ignore_case_ascii() {
        let keys = ["Alpha", "beta", "GAMMA", "delta", "Epsilon"];
        let analysis = analyze(&keys, true);
        assert_eq!(analysis.hash_mode, HashMode::AsciiIgnoreCase);
        assert!(analysis.ignore_case);
        assert!(analysis.fold_non_ascii_probes);
        assert_eq!(analysis.hash("ALPHA"), analysis.hash("alpha"));
        assert!(analysis.equals("gamma", "GAMMA"));
    }

    #[test]
    fn ignore_case_downgrades_without_letters() {
        let keys = ["a-1", "a-2", "b-3", "b-4", "c-5"];
        let analysis = analyze(&keys, true);
        assert_eq!(analysis.region, Region::Left { offset: 2, len: 1 });
        assert_eq!(analysis.hash_mode, HashMode::Ordinal);
        assert!(analysis.ignore_case);

        let digits = ["100", "200", "300", "400", "500"];
        let analysis = analyze(&digits, true);
        assert_eq!(analysis.hash_mode, HashMode::Ordinal);
        assert!(!analysis.ignore_case);
    }

    #[test]
    fn ignore_case_non_ascii_works_on_chars() {
        let keys = ["Ärger", "Öl", "Übel", "éclair", "Straße"];
        let analysis = analyze(&keys, true);
        assert_eq!(analysis.hash_mode, HashMode::IgnoreCase);
        assert_eq!(analysis.region, Region::Left { offset: 0, len: 1 });
        assert_eq!(analysis.min_len, 2);
        assert_eq!(analysis.hash("äRGER"), analysis.hash("Ärger"));
        assert_eq!(analysis.hash("ÉCLAIR"), analysis.hash("éclair"));
        assert!(analysis.equals("STRAßE", "straße"));
        assert!(analysis.length_in_range("x"));
    }

    #[test]
    fn folded_right_region() {
        let analysis = KeyAnalysis {
            region: Region::Right { back: 3, len: 2 },
            hash_mode: HashMode::IgnoreCase,
            ignore_case: true,
            fold_non_ascii_probes: false,
            min_len: 3,
            max_len: 10,
        };
        assert_eq!(analysis.hash("xxÄÖz"), analysis.hash("äöZ"));
        assert_ne!(analysis.hash("xxÄÖz"), analysis.hash("öäZ"));
        assert_eq!(analysis.hash("äö"), None);
    }
}
