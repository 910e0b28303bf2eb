use thiserror::Error;

/// Errors reported by the read API of frozen collections.
///
/// Lookup misses are not errors, `get` and `contains` report them with `None`/`false`. These
/// variants cover the accessors that promise a result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FrozenError {
    /// The key passed to an accessor requiring a present key is not in the collection.
    #[error("key not found in frozen collection")]
    KeyNotFound,
    /// The destination of a `copy_to` cannot hold all entries.
    #[error("destination holds {available} entries but {needed} are required")]
    DestinationTooShort {
        /// Number of entries in the collection.
        needed: usize,
        /// Length of the destination slice.
        available: usize,
    },
}
