//! Classification of key types.
//!
//! Without specialization, the dispatcher cannot ask whether a generic key type happens to be
//! `i32` or a string. Instead, every key type describes itself through [`FrozenKey`]. The trait
//! has defaults for everything, so custom key types opt in with an empty impl:
//!
//! ```
//! use frozen_set::FrozenKey;
//!
//! #[derive(PartialEq, Eq, Hash)]
//! struct Sku(u64);
//!
//! impl FrozenKey for Sku {}
//! ```
use std::{
    cmp::Ordering,
    hash::{BuildHasher, BuildHasherDefault, Hash},
    rc::Rc,
    sync::Arc,
};

use zwohash::ZwoHasher;

use crate::ordinal::hash_ordinal;

/// What the dispatcher knows about a key type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyClass {
    /// `i32`: the default hash code is the key itself.
    Int32,
    /// A primitive with a natural total order, see [`FrozenKey::total_cmp`].
    Ordered,
    /// A string-like type, see [`FrozenKey::as_str`].
    Str,
    /// Anything else.
    Other,
}

impl KeyClass {
    /// Returns `true` if keys of this class can be sorted with [`FrozenKey::total_cmp`].
    pub fn has_total_order(self) -> bool {
        matches!(self, KeyClass::Int32 | KeyClass::Ordered)
    }
    /// Returns `true` if the default hash code of a key can stand in for the key itself.
    pub fn hash_is_key(self) -> bool {
        self == KeyClass::Int32
    }
}

/// A type that can be used as the key of a frozen collection.
///
/// Implementations must keep [`default_hash`](FrozenKey::default_hash) consistent with [`Eq`]
/// and, for string-like types, with [`hash_ordinal`] of [`as_str`](FrozenKey::as_str), since
/// the default comparer compares strings ordinally. All provided impls uphold this, including
/// across `Borrow` (a `String` key and its `str` form hash identically).
pub trait FrozenKey: Eq + Hash {
    /// Classification of this type used to pick a representation.
    const CLASS: KeyClass = KeyClass::Other;

    /// The hash code used by the [`DefaultComparer`](crate::DefaultComparer).
    fn default_hash(&self) -> i32 {
        fold_hash(<BuildHasherDefault<ZwoHasher>>::default().hash_one(self))
    }

    /// The natural order of this type, if any. Must agree with [`Eq`].
    #[inline(always)]
    fn total_cmp(&self, _other: &Self) -> Option<Ordering> {
        None
    }

    /// The key as a string, for [`KeyClass::Str`] types.
    #[inline(always)]
    fn as_str(&self) -> Option<&str> {
        None
    }

    /// The key as an `i32`, for [`KeyClass::Int32`].
    #[inline(always)]
    fn as_i32(&self) -> Option<i32> {
        None
    }
}

#[inline(always)]
fn fold_hash(hash: u64) -> i32 {
    (hash ^ (hash >> 32)) as i32
}

impl FrozenKey for i32 {
    const CLASS: KeyClass = KeyClass::Int32;

    #[inline(always)]
    fn default_hash(&self) -> i32 {
        *self
    }
    #[inline(always)]
    fn total_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
    #[inline(always)]
    fn as_i32(&self) -> Option<i32> {
        Some(*self)
    }
}

macro_rules! ordered_keys {
    ($($t:ty),* $(,)?) => {
        $(
            impl FrozenKey for $t {
                const CLASS: KeyClass = KeyClass::Ordered;

                #[inline(always)]
                fn total_cmp(&self, other: &Self) -> Option<Ordering> {
                    Some(self.cmp(other))
                }
            }
        )*
    };
}

ordered_keys!(u8, u16, u32, u64, u128, usize, i8, i16, i64, i128, isize, char, bool);

macro_rules! str_keys {
    ($($t:ty),* $(,)?) => {
        $(
            impl FrozenKey for $t {
                const CLASS: KeyClass = KeyClass::Str;

                #[inline(always)]
                fn default_hash(&self) -> i32 {
                    hash_ordinal(self.as_bytes())
                }
                #[inline(always)]
                fn as_str(&self) -> Option<&str> {
                    Some(self)
                }
            }
        )*
    };
}

str_keys!(str, String, Box<str>, Rc<str>, Arc<str>);

impl<T: FrozenKey + ?Sized> FrozenKey for &T {
    const CLASS: KeyClass = T::CLASS;

    #[inline(always)]
    fn default_hash(&self) -> i32 {
        T::default_hash(self)
    }
    #[inline(always)]
    fn total_cmp(&self, other: &Self) -> Option<Ordering> {
        T::total_cmp(self, other)
    }
    #[inline(always)]
    fn as_str(&self) -> Option<&str> {
        T::as_str(self)
    }
    #[inline(always)]
    fn as_i32(&self) -> Option<i32> {
        T::as_i32(self)
    }
}

impl FrozenKey for () {}
impl<A: FrozenKey, B: FrozenKey> FrozenKey for (A, B) {}
impl<A: FrozenKey, B: FrozenKey, C: FrozenKey> FrozenKey for (A, B, C) {}
impl<T: FrozenKey> FrozenKey for Vec<T> {}
impl<T: FrozenKey> FrozenKey for Option<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classes() {
        assert_eq!(<i32 as FrozenKey>::CLASS, KeyClass::Int32);
        assert_eq!(<u64 as FrozenKey>::CLASS, KeyClass::Ordered);
        assert_eq!(<String as FrozenKey>::CLASS, KeyClass::Str);
        assert_eq!(<&str as FrozenKey>::CLASS, KeyClass::Str);
        assert_eq!(<(u8, u8) as FrozenKey>::CLASS, KeyClass::Other);
        assert!(KeyClass::Int32.hash_is_key());
        assert!(!KeyClass::Ordered.hash_is_key());
        assert!(KeyClass::Ordered.has_total_order());
        assert!(!KeyClass::Str.has_total_order());
    }

    #[test]
    fn borrowed_forms_hash_alike() {
        let owned = String::from("glacier");
        assert_eq!(owned.default_hash(), "glacier".default_hash());
        assert_eq!(Arc::<str>::from("glacier").default_hash(), owned.default_hash());
        assert_eq!(FrozenKey::as_str(&owned), Some("glacier"));
        assert_eq!(17i32.default_hash(), 17);
        assert_eq!(17u32.default_hash(), 17u32.default_hash());
    }
}
