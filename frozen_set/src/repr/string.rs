use std::borrow::Borrow;

use super::Representation;
use crate::{
    comparer::Comparer,
    hash_index::HashIndex,
    key::FrozenKey,
    key_analyzer::KeyAnalysis,
    length_buckets::LengthBuckets,
    ordinal::{eq_ignore_case, fold_into, FoldBuffer},
};

/// Runs `find` for `key`, after case folding it if it is not ASCII and `fold_non_ascii` is set.
///
/// A case-insensitive table over ASCII keys stores byte offsets and lengths. A non-ASCII probe can
/// only equal one of its keys if folding turns the probe into ASCII, so that folded form is what
/// gets looked up.
#[inline(always)]
fn with_probe(
    key: &str,
    fold_non_ascii: bool,
    find: impl FnOnce(&str) -> Option<usize>,
) -> Option<usize> {
    if !fold_non_ascii || key.is_ascii() {
        return find(key);
    }
    let mut folded = FoldBuffer::new();
    fold_into(key.chars(), &mut folded);
    if !folded.is_ascii() {
        return None;
    }
    find(std::str::from_utf8(&folded).ok()?)
}

/// String keys hashed over the region chosen by key analysis.
#[derive(Clone, Debug)]
pub(crate) struct StringRepr {
    pub index: HashIndex,
    pub analysis: KeyAnalysis,
}

impl Representation for StringRepr {
    #[inline(always)]
    fn find<K, Q, C>(&self, keys: &[K], _comparer: &C, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: FrozenKey + ?Sized,
        C: Comparer<Q>,
    {
        let analysis = &self.analysis;
        with_probe(key.as_str()?, analysis.fold_non_ascii_probes, |probe| {
            if !analysis.length_in_range(probe) {
                return None;
            }
            let hash = analysis.hash(probe)?;
            self.index.candidates(hash).find(|&index| {
                keys[index]
                    .borrow()
                    .as_str()
                    .is_some_and(|stored| analysis.equals(stored, probe))
            })
        })
    }
}

/// String keys located by length.
#[derive(Clone, Debug)]
pub(crate) struct LengthRepr {
    pub buckets: LengthBuckets,
    pub ignore_case: bool,
    pub fold_non_ascii_probes: bool,
}

impl Representation for LengthRepr {
    #[inline(always)]
    fn find<K, Q, C>(&self, keys: &[K], _comparer: &C, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: FrozenKey + ?Sized,
        C: Comparer<Q>,
    {
        with_probe(key.as_str()?, self.fold_non_ascii_probes, |probe| {
            self.buckets.candidates(probe.len()).find(|&index| {
                keys[index].borrow().as_str().is_some_and(|stored| {
                    if self.ignore_case {
                        eq_ignore_case(stored, probe)
                    } else {
                        stored == probe
                    }
                })
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{key_analyzer::analyze, util::permute, OrdinalIgnoreCase};

    #[test]
    fn folded_probe_reaches_ascii_key() {
        let keys = vec!["kelvin", "other", "x"];
        let repr = LengthRepr {
            buckets: LengthBuckets::try_build(&keys).unwrap(),
            ignore_case: true,
            fold_non_ascii_probes: true,
        };
        // U+212A KELVIN SIGN folds to an ASCII 'k'
        assert_eq!(repr.find(&keys, &OrdinalIgnoreCase, "\u{212A}ELVIN"), Some(0));
        assert_eq!(repr.find(&keys, &OrdinalIgnoreCase, "OTHER"), Some(1));
        assert_eq!(repr.find(&keys, &OrdinalIgnoreCase, "öther"), None);
    }

    #[test]
    fn analyzed_lookup_compares_whole_keys() {
        let keys = vec!["cat", "bat", "hat", "mat", "rat"];
        let analysis = analyze(&keys, false);
        let hashes: Vec<i32> = keys.iter().map(|key| analysis.hash(key).unwrap()).collect();
        let (index, permutation) = HashIndex::build(&hashes, false);
        let keys = permute(keys, &permutation);
        let repr = StringRepr { index, analysis };
        for (position, key) in keys.iter().enumerate() {
            assert_eq!(repr.find(&keys, &crate::Ordinal, *key), Some(position));
        }
        for missing in ["cab", "car", "bad", "c", "catalog", ""] {
            assert_eq!(repr.find(&keys, &crate::Ordinal, missing), None);
        }
    }
}
