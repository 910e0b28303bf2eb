//! [FrozenMap] and [FrozenSet] are immutable collections built once from a fixed set of keys and
//! optimized for lookups afterwards.
//!
//! Construction looks at the key type, the comparer, the number of keys and the keys themselves
//! and picks a representation accordingly:
//!
//! - tiny collections are scanned linearly (sorted first if the keys have a natural order),
//! - `i32` keys are indexed by their own value,
//! - string keys are either located by length alone, or hashed over the shortest part of the key
//!   that still tells most keys apart (see [`KeyAnalysis`]),
//! - everything else goes through a hash index over the comparer's hash codes.
//!
//! All hashed representations share [`HashIndex`], which stores entries bucket by bucket in a
//! single array, so that a lookup touches one contiguous range.
//!
//! Keys are compared with a [`Comparer`]. [`DefaultComparer`] uses [`Eq`] (ordinal comparison for
//! strings), [`Ordinal`] and [`OrdinalIgnoreCase`] compare strings by code units with or without
//! case folding. Key types describe themselves through [`FrozenKey`].
//!
//! ```
//! use frozen_set::{freeze_set, OrdinalIgnoreCase, Strategy};
//!
//! let set = freeze_set(["cat", "bat", "hat", "mat", "rat"], OrdinalIgnoreCase);
//! assert!(set.contains("HAT"));
//! assert!(!set.contains("car"));
//! assert!(matches!(set.strategy(), Strategy::OrdinalString { .. }));
//! ```

mod comparer;
mod dispatch;
mod error;
mod frozen_map;
mod frozen_set;
mod hash_index;
mod key;
mod key_analyzer;
mod length_buckets;
mod repr;
mod set_algebra;
mod source;
mod table;
mod util;

pub mod config;
pub mod ordinal;

pub use comparer::{Comparer, ComparerKind, DefaultComparer, Ordinal, OrdinalIgnoreCase};
pub use error::FrozenError;
pub use frozen_map::{freeze_map, FrozenMap, Iter as MapIter};
pub use frozen_set::{freeze_set, FrozenSet, Iter as SetIter};
pub use hash_index::HashIndex;
pub use key::{FrozenKey, KeyClass};
pub use key_analyzer::{analyze, HashMode, KeyAnalysis, Region};
pub use length_buckets::LengthBuckets;
pub use repr::Strategy;
pub use set_algebra::{SetAlgebra, SetView};

mod test_map;
mod test_set;
