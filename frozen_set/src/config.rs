//! Tuning constants used when choosing and building a representation.
//!
//! These are fixed at compile time. They are public so that callers can reason about which
//! strategy a given key set will end up with.

/// Key sets with at most this many entries are stored as a plain array and scanned linearly.
pub const MAX_SMALL_LEN: usize = 4;

/// Like [`MAX_SMALL_LEN`], but for key types with a natural total order compared with the
/// [`DefaultComparer`](crate::DefaultComparer). Such sets are kept sorted, so a scan can stop
/// early.
pub const MAX_SMALL_ORDERED_LEN: usize = 10;

/// Number of slots reserved per string length in a length-bucket table.
pub const LENGTH_BUCKET_SLOTS: usize = 5;

/// A length-bucket table is rejected when fewer than `1 / LENGTH_BUCKET_MIN_USED_RATIO` of the
/// lengths between the shortest and longest key are in use.
pub const LENGTH_BUCKET_MIN_USED_RATIO: usize = 5;

/// Longest substring the key analyzer considers before falling back to hashing whole keys.
pub const MAX_SUBSTRING_LEN: usize = 8;

/// A substring candidate is accepted while at most `len / UNIQUENESS_DIVISOR` keys share their
/// substring with an earlier key.
pub const UNIQUENESS_DIVISOR: usize = 20;

/// Above this many distinct hash codes the bucket count search covers a narrower range.
pub const LARGE_INPUT_LEN: usize = 1000;

/// Bucket count search range, as a multiple of the number of distinct hash codes, for small
/// inputs.
pub const SMALL_INPUT_BUCKET_MULTIPLIER: usize = 16;

/// Bucket count search range, as a multiple of the number of distinct hash codes, for large
/// inputs.
pub const LARGE_INPUT_BUCKET_MULTIPLIER: usize = 3;

/// Maximum number of bucket counts tried before settling on the best one seen.
pub const MAX_BUCKET_CANDIDATES: usize = 64;

/// A bucket count is accepted once at most `distinct / ACCEPTABLE_COLLISION_DIVISOR` hash codes
/// land in an already occupied bucket.
pub const ACCEPTABLE_COLLISION_DIVISOR: usize = 20;
