//! Storage shared by [`FrozenMap`](crate::FrozenMap) and [`FrozenSet`](crate::FrozenSet).
use std::borrow::Borrow;

use crate::{
    comparer::Comparer,
    dispatch::{self, Choice},
    key::FrozenKey,
    repr::{Lookup, Strategy},
    source::Entries,
    util::permute,
};

/// Keys and values in the storage order of the chosen representation.
#[derive(Clone)]
pub(crate) struct Table<K, V, C> {
    keys: Box<[K]>,
    values: Box<[V]>,
    comparer: C,
    lookup: Lookup,
}

impl<K: FrozenKey, V, C: Comparer<K>> Table<K, V, C> {
    pub fn build(source: impl IntoIterator<Item = (K, V)>, comparer: C) -> Self {
        let Entries { keys, values } = Entries::collect(source, &comparer);
        let Choice {
            lookup,
            permutation,
        } = dispatch::choose(&keys, &comparer);

        let (keys, values) = match permutation {
            Some(permutation) => (permute(keys, &permutation), permute(values, &permutation)),
            None => (keys, values),
        };

        log::debug!("froze {} keys using {}", keys.len(), lookup.strategy());

        Table {
            keys: keys.into_boxed_slice(),
            values: values.into_boxed_slice(),
            comparer,
            lookup,
        }
    }
}

impl<K, V, C> Table<K, V, C> {
    #[inline(always)]
    pub fn find<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: FrozenKey + ?Sized,
        C: Comparer<Q>,
    {
        self.lookup.find(&self.keys, &self.comparer, key)
    }

    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    pub fn values(&self) -> &[V] {
        &self.values
    }

    pub fn comparer(&self) -> &C {
        &self.comparer
    }

    pub fn strategy(&self) -> Strategy {
        self.lookup.strategy()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }
}
