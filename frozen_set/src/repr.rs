//! The concrete representations a frozen collection can use.
//!
//! Every representation only stores lookup metadata; the keys themselves live in the owning
//! table, permuted into whatever order the representation requires. Dispatch between
//! representations is a `match` on [`Lookup`], so each lookup path is monomorphized for the key
//! and comparer types.
use std::{borrow::Borrow, fmt};

use crate::{
    comparer::Comparer,
    key::FrozenKey,
    key_analyzer::{HashMode, Region},
};

mod hashed;
mod small;
mod string;

pub(crate) use hashed::{HashedRepr, IntRepr};
pub(crate) use small::{sorted_permutation, OrderedScanRepr, ScanRepr};
pub(crate) use string::{LengthRepr, StringRepr};

/// A way of finding the storage index of a key.
pub(crate) trait Representation {
    fn find<K, Q, C>(&self, keys: &[K], comparer: &C, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: FrozenKey + ?Sized,
        C: Comparer<Q>;
}

#[derive(Clone, Debug)]
pub(crate) enum Lookup {
    Empty,
    Scan(ScanRepr),
    SmallOrdered(OrderedScanRepr),
    DirectInt(IntRepr),
    Hashed(HashedRepr),
    LengthBuckets(LengthRepr),
    OrdinalString(StringRepr),
}

impl Lookup {
    #[inline(always)]
    pub fn find<K, Q, C>(&self, keys: &[K], comparer: &C, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: FrozenKey + ?Sized,
        C: Comparer<Q>,
    {
        match self {
            Lookup::Empty => None,
            Lookup::Scan(repr) => repr.find(keys, comparer, key),
            Lookup::SmallOrdered(repr) => repr.find(keys, comparer, key),
            Lookup::DirectInt(repr) => repr.find(keys, comparer, key),
            Lookup::Hashed(repr) => repr.find(keys, comparer, key),
            Lookup::LengthBuckets(repr) => repr.find(keys, comparer, key),
            Lookup::OrdinalString(repr) => repr.find(keys, comparer, key),
        }
    }

    pub fn strategy(&self) -> Strategy {
        match self {
            Lookup::Empty => Strategy::Empty,
            Lookup::Scan(_) => Strategy::SmallScan,
            Lookup::SmallOrdered(_) => Strategy::SmallOrdered,
            Lookup::DirectInt(_) => Strategy::DirectInt,
            Lookup::Hashed(_) => Strategy::Hashed,
            Lookup::LengthBuckets(repr) => Strategy::LengthBuckets {
                ignore_case: repr.ignore_case,
            },
            Lookup::OrdinalString(repr) => {
                let analysis = &repr.analysis;
                Strategy::OrdinalString {
                    region: analysis.region,
                    hash_mode: analysis.hash_mode,
                    single_unit: analysis.is_single_unit(),
                    ignore_case: analysis.ignore_case,
                }
            }
        }
    }
}

/// The representation chosen for a frozen collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// No entries.
    Empty,
    /// A few entries, compared one after another.
    SmallScan,
    /// A few entries with a natural order, kept sorted so that a scan can stop early.
    SmallOrdered,
    /// `i32` keys, indexed by their own value.
    DirectInt,
    /// Keys indexed by the hash codes of the collection's comparer.
    Hashed,
    /// String keys located by their length alone.
    LengthBuckets {
        /// Whether keys are compared ignoring case.
        ignore_case: bool,
    },
    /// String keys indexed by a hash over part of each key.
    OrdinalString {
        /// The part of each key that is hashed.
        region: Region,
        /// How that part is hashed.
        hash_mode: HashMode,
        /// Whether the hashed part is a single unit, used as hash code directly.
        single_unit: bool,
        /// Whether keys are compared ignoring case.
        ignore_case: bool,
    },
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Empty => write!(f, "empty"),
            Strategy::SmallScan => write!(f, "small scan"),
            Strategy::SmallOrdered => write!(f, "small ordered scan"),
            Strategy::DirectInt => write!(f, "direct int"),
            Strategy::Hashed => write!(f, "hashed"),
            Strategy::LengthBuckets { ignore_case } => {
                write!(f, "length buckets")?;
                if *ignore_case {
                    write!(f, ", ignoring case")?;
                }
                Ok(())
            }
            Strategy::OrdinalString {
                region,
                hash_mode,
                single_unit,
                ignore_case,
            } => {
                match region {
                    Region::Full => write!(f, "full string")?,
                    Region::Left { offset, len } => {
                        write!(f, "left substring [{offset}..{}]", offset + len)?
                    }
                    Region::Right { back, len } => {
                        write!(f, "right substring [-{back}..-{}]", back - len)?
                    }
                }
                if *single_unit {
                    write!(f, " (single unit)")?;
                }
                match hash_mode {
                    HashMode::Ordinal => write!(f, ", ordinal hash")?,
                    HashMode::AsciiIgnoreCase => write!(f, ", ascii case-insensitive hash")?,
                    HashMode::IgnoreCase => write!(f, ", case-folded hash")?,
                }
                if *ignore_case {
                    write!(f, ", ignoring case")?;
                }
                Ok(())
            }
        }
    }
}
