//! Equality and hashing capabilities used by frozen collections.
use crate::{
    key::FrozenKey,
    ordinal::{eq_ignore_case, hash_ordinal, hash_ordinal_ignore_case},
};

/// Identifies the built-in comparers, so that the dispatcher can rely on their semantics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComparerKind {
    /// [`DefaultComparer`]
    Default,
    /// [`Ordinal`]
    Ordinal,
    /// [`OrdinalIgnoreCase`]
    OrdinalIgnoreCase,
    /// Any user provided comparer.
    Custom,
}

/// Equality and hashing for values of type `T`.
///
/// Values that are equal must have equal hashes. When a frozen collection with keys of type `K`
/// is queried with a borrowed form `Q` (`K: Borrow<Q>`), the comparer's `Comparer<K>` and
/// `Comparer<Q>` impls must agree on borrowed keys.
pub trait Comparer<T: ?Sized> {
    /// Returns `true` if `a` and `b` are considered equal.
    fn equals(&self, a: &T, b: &T) -> bool;
    /// Returns the hash code of `value`.
    fn hash(&self, value: &T) -> i32;
    /// Identifies built-in comparers. User provided comparers keep the default.
    #[inline(always)]
    fn kind(&self) -> ComparerKind {
        ComparerKind::Custom
    }
}

/// Compares keys with [`Eq`] and hashes them with [`FrozenKey::default_hash`].
///
/// Strings are compared ordinally.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DefaultComparer;

impl<T: FrozenKey + ?Sized> Comparer<T> for DefaultComparer {
    #[inline(always)]
    fn equals(&self, a: &T, b: &T) -> bool {
        a == b
    }
    #[inline(always)]
    fn hash(&self, value: &T) -> i32 {
        value.default_hash()
    }
    #[inline(always)]
    fn kind(&self) -> ComparerKind {
        ComparerKind::Default
    }
}

/// Compares strings by their code units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Ordinal;

impl<T: AsRef<str> + ?Sized> Comparer<T> for Ordinal {
    #[inline(always)]
    fn equals(&self, a: &T, b: &T) -> bool {
        a.as_ref() == b.as_ref()
    }
    #[inline(always)]
    fn hash(&self, value: &T) -> i32 {
        hash_ordinal(value.as_ref().as_bytes())
    }
    #[inline(always)]
    fn kind(&self) -> ComparerKind {
        ComparerKind::Ordinal
    }
}

/// Compares strings by their code units after simple case folding.
///
/// See [`fold_char`](crate::ordinal::fold_char) for the folding used.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct OrdinalIgnoreCase;

impl<T: AsRef<str> + ?Sized> Comparer<T> for OrdinalIgnoreCase {
    #[inline(always)]
    fn equals(&self, a: &T, b: &T) -> bool {
        eq_ignore_case(a.as_ref(), b.as_ref())
    }
    #[inline(always)]
    fn hash(&self, value: &T) -> i32 {
        hash_ordinal_ignore_case(value.as_ref())
    }
    #[inline(always)]
    fn kind(&self) -> ComparerKind {
        ComparerKind::OrdinalIgnoreCase
    }
}
