//! [FrozenMap] is an immutable map optimized for lookups.
use std::{borrow::Borrow, fmt, ops::Index};

use crate::{
    comparer::{Comparer, DefaultComparer},
    error::FrozenError,
    key::FrozenKey,
    repr::Strategy,
    table::Table,
    util::impl_iterator,
};

/// An immutable map, built once and optimized for lookups.
///
/// The representation is chosen at construction time from the key type, the comparer, the
/// number of entries and the keys themselves, see [`strategy`](FrozenMap::strategy).
///
/// Entries are stored in an order chosen by the representation. [`keys`](FrozenMap::keys),
/// [`values`](FrozenMap::values) and [`iter`](FrozenMap::iter) all use that order, and it never
/// changes for a given map.
#[derive(Clone)]
pub struct FrozenMap<K, V, C = DefaultComparer> {
    table: Table<K, V, C>,
}

/// Builds a [`FrozenMap`] from `source`, comparing keys with `comparer`.
///
/// If a key occurs more than once, the entry keeps the position of the first occurrence and the
/// value of the last.
pub fn freeze_map<K, V, C>(source: impl IntoIterator<Item = (K, V)>, comparer: C) -> FrozenMap<K, V, C>
where
    K: FrozenKey,
    C: Comparer<K>,
{
    FrozenMap::new(source, comparer)
}

impl<K: FrozenKey, V, C: Comparer<K>> FrozenMap<K, V, C> {
    /// Builds a map from `source`, see [`freeze_map`].
    pub fn new(source: impl IntoIterator<Item = (K, V)>, comparer: C) -> Self {
        FrozenMap {
            table: Table::build(source, comparer),
        }
    }
}

impl<K, V, C> FrozenMap<K, V, C> {
    /// Returns the number of entries in the map.
    pub fn len(&self) -> usize {
        self.table.len()
    }
    /// Returns `true` if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.table.len() == 0
    }
    /// Returns the comparer used for keys.
    pub fn comparer(&self) -> &C {
        self.table.comparer()
    }
    /// Returns the representation chosen for this map.
    pub fn strategy(&self) -> Strategy {
        self.table.strategy()
    }
    /// Returns all keys in storage order.
    pub fn keys(&self) -> &[K] {
        self.table.keys()
    }
    /// Returns all values in storage order.
    pub fn values(&self) -> &[V] {
        self.table.values()
    }
    /// Returns an iterator over all key-value pairs in storage order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.table.keys().iter().zip(self.table.values()),
        }
    }
    /// Returns references to the key and value at `index` in storage order, if it exists.
    pub fn get_index(&self, index: usize) -> Option<(&K, &V)> {
        Some((self.table.keys().get(index)?, self.table.values().get(index)?))
    }
}

impl<K, V, C> FrozenMap<K, V, C> {
    /// Returns the storage index of the entry with the specified key, if it exists.
    #[inline]
    pub fn get_index_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: FrozenKey + ?Sized,
        C: Comparer<Q>,
    {
        self.table.find(key)
    }
    /// Returns `true` if the map contains the specified key.
    #[inline]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: FrozenKey + ?Sized,
        C: Comparer<Q>,
    {
        self.table.find(key).is_some()
    }
    /// Returns a reference to the value corresponding to the specified key, if it exists.
    #[inline]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: FrozenKey + ?Sized,
        C: Comparer<Q>,
    {
        self.table.find(key).map(|index| &self.table.values()[index])
    }
    /// Returns references to the stored key and the value corresponding to the specified key,
    /// if it exists.
    ///
    /// The stored key can differ from `key`, e.g. in case for case-insensitive maps.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: FrozenKey + ?Sized,
        C: Comparer<Q>,
    {
        self.table
            .find(key)
            .map(|index| (&self.table.keys()[index], &self.table.values()[index]))
    }
    /// Returns a reference to the value corresponding to the specified key, or
    /// [`FrozenError::KeyNotFound`].
    pub fn try_index<Q>(&self, key: &Q) -> Result<&V, FrozenError>
    where
        K: Borrow<Q>,
        Q: FrozenKey + ?Sized,
        C: Comparer<Q>,
    {
        self.get(key).ok_or(FrozenError::KeyNotFound)
    }
}

impl<K: Clone, V: Clone, C> FrozenMap<K, V, C> {
    /// Clones all entries into the front of `dest`, in storage order.
    pub fn copy_to(&self, dest: &mut [(K, V)]) -> Result<(), FrozenError> {
        if dest.len() < self.len() {
            return Err(FrozenError::DestinationTooShort {
                needed: self.len(),
                available: dest.len(),
            });
        }
        for (slot, (key, value)) in dest.iter_mut().zip(self.iter()) {
            *slot = (key.clone(), value.clone());
        }
        Ok(())
    }
}

impl<K, V, C, Q> Index<&Q> for FrozenMap<K, V, C>
where
    K: Borrow<Q>,
    Q: FrozenKey + ?Sized,
    C: Comparer<Q>,
{
    type Output = V;

    fn index(&self, key: &Q) -> &V {
        match self.try_index(key) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for FrozenMap<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: FrozenKey, V> FromIterator<(K, V)> for FrozenMap<K, V, DefaultComparer> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        FrozenMap::new(iter, DefaultComparer)
    }
}

/// An iterator over the entries of a [`FrozenMap`].
///
/// This struct is created by the [`iter`](`FrozenMap::iter`) method on [`FrozenMap`].
pub struct Iter<'a, K, V> {
    inner: std::iter::Zip<std::slice::Iter<'a, K>, std::slice::Iter<'a, V>>,
}
impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);
    impl_iterator!();
}
impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<'a, K, V, C> IntoIterator for &'a FrozenMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
