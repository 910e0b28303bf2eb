//! [FrozenSet] is an immutable set optimized for membership tests.
use std::{borrow::Borrow, fmt};

use crate::{
    comparer::{Comparer, DefaultComparer},
    error::FrozenError,
    key::FrozenKey,
    repr::Strategy,
    set_algebra::SetView,
    table::Table,
    util::impl_iterator,
};

/// An immutable set, built once and optimized for membership tests.
///
/// See [`FrozenMap`](crate::FrozenMap) for how the representation and the storage order are
/// chosen. Set operations are provided by [`SetAlgebra`](crate::SetAlgebra).
#[derive(Clone)]
pub struct FrozenSet<T, C = DefaultComparer> {
    table: Table<T, (), C>,
}

/// Builds a [`FrozenSet`] from `source`, comparing items with `comparer`.
///
/// Of equal items, only the first is kept.
pub fn freeze_set<T, C>(source: impl IntoIterator<Item = T>, comparer: C) -> FrozenSet<T, C>
where
    T: FrozenKey,
    C: Comparer<T>,
{
    FrozenSet::new(source, comparer)
}

impl<T: FrozenKey, C: Comparer<T>> FrozenSet<T, C> {
    /// Builds a set from `source`, see [`freeze_set`].
    pub fn new(source: impl IntoIterator<Item = T>, comparer: C) -> Self {
        FrozenSet {
            table: Table::build(source.into_iter().map(|item| (item, ())), comparer),
        }
    }
}

impl<T, C> FrozenSet<T, C> {
    /// Returns the number of items in the set.
    pub fn len(&self) -> usize {
        self.table.len()
    }
    /// Returns `true` if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.table.len() == 0
    }
    /// Returns the comparer used for items.
    pub fn comparer(&self) -> &C {
        self.table.comparer()
    }
    /// Returns the representation chosen for this set.
    pub fn strategy(&self) -> Strategy {
        self.table.strategy()
    }
    /// Returns all items in storage order.
    pub fn as_slice(&self) -> &[T] {
        self.table.keys()
    }
    /// Returns an iterator over all items in storage order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.table.keys().iter(),
        }
    }
    /// Returns a reference to the item at `index` in storage order, if it exists.
    pub fn get_index(&self, index: usize) -> Option<&T> {
        self.table.keys().get(index)
    }

    /// Returns the storage index of the item equal to `value`, if it exists.
    #[inline]
    pub fn get_index_of<Q>(&self, value: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: FrozenKey + ?Sized,
        C: Comparer<Q>,
    {
        self.table.find(value)
    }
    /// Returns `true` if the set contains an item equal to `value`.
    #[inline]
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: FrozenKey + ?Sized,
        C: Comparer<Q>,
    {
        self.table.find(value).is_some()
    }
    /// Returns a reference to the stored item equal to `value`, if it exists.
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: FrozenKey + ?Sized,
        C: Comparer<Q>,
    {
        self.table.find(value).map(|index| &self.table.keys()[index])
    }
}

impl<T: Clone, C> FrozenSet<T, C> {
    /// Clones all items into the front of `dest`, in storage order.
    pub fn copy_to(&self, dest: &mut [T]) -> Result<(), FrozenError> {
        let items = self.as_slice();
        let available = dest.len();
        dest.get_mut(..items.len())
            .ok_or(FrozenError::DestinationTooShort {
                needed: items.len(),
                available,
            })?
            .clone_from_slice(items);
        Ok(())
    }
}

impl<T: FrozenKey, C: Comparer<T>> SetView<T> for FrozenSet<T, C> {
    type Comparer = C;

    fn len(&self) -> usize {
        self.table.len()
    }
    fn comparer(&self) -> &C {
        self.table.comparer()
    }
    #[inline]
    fn find_item_index(&self, item: &T) -> Option<usize> {
        self.table.find(item)
    }
    fn items<'a>(&'a self) -> impl Iterator<Item = &'a T>
    where
        T: 'a,
    {
        self.iter()
    }
}

/// Sets are equal if their comparers are equal and they contain the same items.
impl<T: FrozenKey, C: Comparer<T> + PartialEq> PartialEq for FrozenSet<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.comparer() == other.comparer()
            && self.iter().all(|item| other.table.find(item).is_some())
    }
}

impl<T: FrozenKey, C: Comparer<T> + Eq> Eq for FrozenSet<T, C> {}

impl<T: fmt::Debug, C> fmt::Debug for FrozenSet<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: FrozenKey> FromIterator<T> for FrozenSet<T, DefaultComparer> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        FrozenSet::new(iter, DefaultComparer)
    }
}

/// An iterator over the items of a [`FrozenSet`].
///
/// This struct is created by the [`iter`](`FrozenSet::iter`) method on [`FrozenSet`].
pub struct Iter<'a, T> {
    inner: std::slice::Iter<'a, T>,
}
impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;
    impl_iterator!();
}
impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T, C> IntoIterator for &'a FrozenSet<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
