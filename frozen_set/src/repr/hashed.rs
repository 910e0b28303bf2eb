use std::borrow::Borrow;

use super::Representation;
use crate::{comparer::Comparer, hash_index::HashIndex, key::FrozenKey};

/// Hash index over the comparer's hash codes.
#[derive(Clone, Debug)]
pub(crate) struct HashedRepr {
    pub index: HashIndex,
}

impl Representation for HashedRepr {
    #[inline(always)]
    fn find<K, Q, C>(&self, keys: &[K], comparer: &C, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: FrozenKey + ?Sized,
        C: Comparer<Q>,
    {
        let hash = <C as Comparer<Q>>::hash(comparer, key);
        self.index
            .candidates(hash)
            .find(|&index| comparer.equals(keys[index].borrow(), key))
    }
}

/// Hash index over `i32` keys using each key as its own hash code.
///
/// Distinct keys have distinct hash codes, so a matching hash code is a matching key and keys are
/// never compared.
#[derive(Clone, Debug)]
pub(crate) struct IntRepr {
    pub index: HashIndex,
}

impl Representation for IntRepr {
    #[inline(always)]
    fn find<K, Q, C>(&self, _keys: &[K], _comparer: &C, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: FrozenKey + ?Sized,
        C: Comparer<Q>,
    {
        self.index.candidates(key.as_i32()?).next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{util::permute, DefaultComparer, Ordinal};

    #[test]
    fn int_keys_are_their_own_hash() {
        let keys: Vec<i32> = vec![-5, 0, 17, i32::MIN, i32::MAX, 1 << 20];
        let (index, permutation) = HashIndex::build(&keys, true);
        let keys = permute(keys, &permutation);
        let repr = IntRepr { index };
        for (position, key) in keys.iter().enumerate() {
            assert_eq!(repr.find(&keys, &DefaultComparer, key), Some(position));
        }
        assert_eq!(repr.find(&keys, &DefaultComparer, &1), None);
    }

    #[test]
    fn hashed_compares_keys() {
        let keys: Vec<String> = (0..40).map(|i| format!("key{i}")).collect();
        let hashes: Vec<i32> = keys
            .iter()
            .map(|key| <Ordinal as Comparer<str>>::hash(&Ordinal, key))
            .collect();
        let (index, permutation) = HashIndex::build(&hashes, false);
        let keys = permute(keys, &permutation);
        let repr = HashedRepr { index };
        for (position, key) in keys.iter().enumerate() {
            assert_eq!(repr.find(&keys, &Ordinal, key.as_str()), Some(position));
        }
        assert_eq!(repr.find(&keys, &Ordinal, "key40"), None);
    }
}
