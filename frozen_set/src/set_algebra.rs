//! Set relations that work the same way for every representation.
//!
//! A collection only has to expose [`SetView`]; the relations in [`SetAlgebra`] are provided for
//! every such collection and get monomorphized for each one.
use smallvec::{smallvec, SmallVec};

use crate::comparer::Comparer;

/// Read access to a deduplicated collection, as needed for set relations.
pub trait SetView<T> {
    /// The comparer deciding which items are equal.
    type Comparer: Comparer<T>;

    /// Returns the number of items.
    fn len(&self) -> usize;
    /// Returns the comparer deciding which items are equal.
    fn comparer(&self) -> &Self::Comparer;
    /// Returns the storage index of the item equal to `item`, if any.
    ///
    /// Storage indices must be below [`len`](SetView::len).
    fn find_item_index(&self, item: &T) -> Option<usize>;
    /// Returns an iterator over all items.
    fn items<'a>(&'a self) -> impl Iterator<Item = &'a T>
    where
        T: 'a;
}

/// How many distinct items of `self` another collection contained, and how many of its items
/// were not in `self`.
struct ItemCounts {
    unique_found: usize,
    unfound: usize,
}

/// Marks the items of `set` found in `other` in a bitset, so that repeated items in `other` are
/// only counted once.
///
/// Stops at the first item not in `set` if `stop_at_unfound` is set.
fn count_items<'a, T: 'a, S: SetView<T> + ?Sized>(
    set: &S,
    other: impl IntoIterator<Item = &'a T>,
    stop_at_unfound: bool,
) -> ItemCounts {
    let mut counts = ItemCounts {
        unique_found: 0,
        unfound: 0,
    };
    let mut seen: SmallVec<[u32; 8]> = smallvec![0; set.len() / 32 + 1];

    for item in other {
        match set.find_item_index(item) {
            Some(index) => {
                let (word, bit) = (index / 32, 1u32 << (index % 32));
                if seen[word] & bit == 0 {
                    seen[word] |= bit;
                    counts.unique_found += 1;
                }
            }
            None => {
                counts.unfound += 1;
                if stop_at_unfound {
                    break;
                }
            }
        }
    }
    counts
}

/// Set relations between a [`SetView`] and other collections.
///
/// Methods taking an iterator treat it as a multiset of items compared with `self`'s comparer;
/// repeated items count once. The `*_set` variants take another [`SetView`] and, when both use
/// equal comparers, answer by direct membership tests without tracking repeated items.
pub trait SetAlgebra<T>: SetView<T> {
    /// Returns `true` if every item of `self` occurs in `other`.
    fn is_subset_of<'a>(&self, other: impl IntoIterator<Item = &'a T>) -> bool
    where
        T: 'a,
    {
        if self.len() == 0 {
            return true;
        }
        count_items(self, other, false).unique_found == self.len()
    }

    /// Returns `true` if every item of `self` occurs in `other`, and `other` has an item that
    /// `self` does not.
    fn is_proper_subset_of<'a>(&self, other: impl IntoIterator<Item = &'a T>) -> bool
    where
        T: 'a,
    {
        let counts = count_items(self, other, false);
        counts.unique_found == self.len() && counts.unfound > 0
    }

    /// Returns `true` if every item of `other` occurs in `self`.
    fn is_superset_of<'a>(&self, other: impl IntoIterator<Item = &'a T>) -> bool
    where
        T: 'a,
    {
        contains_all(self, other)
    }

    /// Returns `true` if every item of `other` occurs in `self`, and `self` has an item that
    /// `other` does not.
    fn is_proper_superset_of<'a>(&self, other: impl IntoIterator<Item = &'a T>) -> bool
    where
        T: 'a,
    {
        if self.len() == 0 {
            return false;
        }
        let counts = count_items(self, other, true);
        counts.unique_found < self.len() && counts.unfound == 0
    }

    /// Returns `true` if `self` and `other` have an item in common.
    fn overlaps<'a>(&self, other: impl IntoIterator<Item = &'a T>) -> bool
    where
        T: 'a,
    {
        if self.len() == 0 {
            return false;
        }
        contains_any(self, other)
    }

    /// Returns `true` if `self` and `other` contain the same items.
    fn set_equals<'a>(&self, other: impl IntoIterator<Item = &'a T>) -> bool
    where
        T: 'a,
    {
        let counts = count_items(self, other, true);
        counts.unique_found == self.len() && counts.unfound == 0
    }

    /// [`is_subset_of`](SetAlgebra::is_subset_of) for another set.
    fn is_subset_of_set<S>(&self, other: &S) -> bool
    where
        S: SetView<T, Comparer = Self::Comparer> + ?Sized,
        Self::Comparer: PartialEq,
    {
        if self.comparer() == other.comparer() {
            self.len() <= other.len() && contains_all(other, self.items())
        } else {
            self.is_subset_of(other.items())
        }
    }

    /// [`is_proper_subset_of`](SetAlgebra::is_proper_subset_of) for another set.
    fn is_proper_subset_of_set<S>(&self, other: &S) -> bool
    where
        S: SetView<T, Comparer = Self::Comparer> + ?Sized,
        Self::Comparer: PartialEq,
    {
        if self.comparer() == other.comparer() {
            self.len() < other.len() && contains_all(other, self.items())
        } else {
            self.is_proper_subset_of(other.items())
        }
    }

    /// [`is_superset_of`](SetAlgebra::is_superset_of) for another set.
    fn is_superset_of_set<S>(&self, other: &S) -> bool
    where
        S: SetView<T, Comparer = Self::Comparer> + ?Sized,
        Self::Comparer: PartialEq,
    {
        if self.comparer() == other.comparer() && other.len() > self.len() {
            return false;
        }
        self.is_superset_of(other.items())
    }

    /// [`is_proper_superset_of`](SetAlgebra::is_proper_superset_of) for another set.
    fn is_proper_superset_of_set<S>(&self, other: &S) -> bool
    where
        S: SetView<T, Comparer = Self::Comparer> + ?Sized,
        Self::Comparer: PartialEq,
    {
        if self.comparer() == other.comparer() {
            other.len() < self.len() && contains_all(self, other.items())
        } else {
            self.is_proper_superset_of(other.items())
        }
    }

    /// [`overlaps`](SetAlgebra::overlaps) for another set.
    fn overlaps_set<S>(&self, other: &S) -> bool
    where
        S: SetView<T, Comparer = Self::Comparer> + ?Sized,
        Self::Comparer: PartialEq,
    {
        if self.comparer() == other.comparer() {
            // scan the smaller side
            return if other.len() < self.len() {
                contains_any(self, other.items())
            } else {
                contains_any(other, self.items())
            };
        }
        self.overlaps(other.items())
    }

    /// [`set_equals`](SetAlgebra::set_equals) for another set.
    fn set_equals_set<S>(&self, other: &S) -> bool
    where
        S: SetView<T, Comparer = Self::Comparer> + ?Sized,
        Self::Comparer: PartialEq,
    {
        if self.comparer() == other.comparer() {
            self.len() == other.len() && contains_all(other, self.items())
        } else {
            self.set_equals(other.items())
        }
    }
}

impl<T, S: SetView<T> + ?Sized> SetAlgebra<T> for S {}

fn contains_all<'a, T: 'a, S: SetView<T> + ?Sized>(
    set: &S,
    items: impl IntoIterator<Item = &'a T>,
) -> bool {
    items
        .into_iter()
        .all(|item| set.find_item_index(item).is_some())
}

fn contains_any<'a, T: 'a, S: SetView<T> + ?Sized>(
    set: &S,
    items: impl IntoIterator<Item = &'a T>,
) -> bool {
    items
        .into_iter()
        .any(|item| set.find_item_index(item).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{freeze_set, Ordinal, OrdinalIgnoreCase};

    /// Borrowed items found by a linear scan.
    struct SliceSet<'a, T, C> {
        items: &'a [T],
        comparer: C,
    }

    impl<T, C: Comparer<T>> SetView<T> for SliceSet<'_, T, C> {
        type Comparer = C;

        fn len(&self) -> usize {
            self.items.len()
        }
        fn comparer(&self) -> &C {
            &self.comparer
        }
        fn find_item_index(&self, item: &T) -> Option<usize> {
            self.items
                .iter()
                .position(|stored| self.comparer.equals(stored, item))
        }
        fn items<'a>(&'a self) -> impl Iterator<Item = &'a T>
        where
            T: 'a,
        {
            self.items.iter()
        }
    }

    fn collect_items<'a, T: 'a, S: SetView<T>>(set: &'a S) -> Vec<&'a T> {
        set.items().collect()
    }

    #[test]
    fn borrowed_items() {
        let owned: Vec<String> = ["ant", "bee", "cow", "dog", "eel", "fox"]
            .iter()
            .map(|word| word.to_string())
            .collect();
        let words: Vec<&str> = owned.iter().map(String::as_str).collect();

        let frozen = freeze_set(words.iter().copied(), Ordinal);
        let slice = SliceSet {
            items: &words[..4],
            comparer: Ordinal,
        };
        let mut frozen_items = collect_items(&frozen);
        frozen_items.sort();
        assert!(frozen_items.into_iter().eq(&words));
        assert!(collect_items(&slice).into_iter().eq(&words[..4]));

        assert!(slice.is_proper_subset_of_set(&frozen));
        assert!(frozen.is_proper_superset_of_set(&slice));
        assert!(frozen.overlaps_set(&slice));
        assert!(!frozen.set_equals_set(&slice));
        assert!(frozen.is_superset_of(slice.items()));
        assert!(!slice.is_superset_of(frozen.items()));
    }

    #[test]
    fn repeated_items_count_once() {
        let items = ["x", "Y", "z"];
        let set = SliceSet {
            items: &items,
            comparer: OrdinalIgnoreCase,
        };
        assert!(set.set_equals(&["X", "y", "Z", "x", "z"]));
        assert!(set.is_proper_subset_of(&["y", "y", "x", "z", "w"]));
        assert!(!set.is_proper_superset_of(&["x", "x", "y", "y", "z"]));
        assert!(set.is_proper_superset_of(&["z", "Z"]));
        assert!(!set.overlaps(&["a", "b"]));
    }
}
