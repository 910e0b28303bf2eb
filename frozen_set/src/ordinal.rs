//! Fixed, unseeded string hashing and case folding over UTF-8 code units.
//!
//! The hashes produced here are deterministic within a build, but they are not part of any stable
//! format and may change between versions.
use smallvec::SmallVec;

/// Scratch buffer used for case folding. Short keys fold on the stack.
pub(crate) type FoldBuffer = SmallVec<[u8; 128]>;

const SEED: u32 = (5381 << 16) + 5381;
const FINAL_FACTOR: u32 = 1_566_083_941;

#[inline(always)]
fn mix(hash: u32, word: u32) -> u32 {
    (hash.rotate_left(5).wrapping_add(hash)) ^ word
}

#[inline(always)]
fn read_word(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

#[inline(always)]
fn hash_masked(bytes: &[u8], mask: u8) -> i32 {
    let word_mask = u32::from_le_bytes([mask; 4]);
    let mut lo = SEED;
    let mut hi = SEED;

    let mut chunks = bytes.chunks_exact(8);
    for chunk in &mut chunks {
        lo = mix(lo, read_word(&chunk[..4]) | word_mask);
        hi = mix(hi, read_word(&chunk[4..]) | word_mask);
    }

    let mut tail = chunks.remainder();
    if tail.len() >= 4 {
        lo = mix(lo, read_word(tail) | word_mask);
        tail = &tail[4..];
    }
    for &byte in tail {
        hi = mix(hi, u32::from(byte | mask));
    }

    lo.wrapping_add(hi.wrapping_mul(FINAL_FACTOR)) as i32
}

/// Hashes the given code units by their raw values.
#[inline]
pub fn hash_ordinal(bytes: &[u8]) -> i32 {
    hash_masked(bytes, 0)
}

/// Hashes the given code units with the ASCII lower case bit forced on.
///
/// Two ASCII strings that are equal ignoring case hash equally. For non-ASCII input the result
/// is still deterministic, but does not respect case folding, see [`hash_ordinal_ignore_case`].
#[inline]
pub fn hash_ordinal_ignore_case_ascii(bytes: &[u8]) -> i32 {
    hash_masked(bytes, 0x20)
}

/// Hashes a string so that any two strings equal under [`eq_ignore_case`] hash equally.
pub fn hash_ordinal_ignore_case(s: &str) -> i32 {
    if s.is_ascii() {
        hash_ordinal_ignore_case_ascii(s.as_bytes())
    } else {
        let mut folded = FoldBuffer::new();
        fold_into(s.chars(), &mut folded);
        hash_ordinal_ignore_case_ascii(&folded)
    }
}

/// Returns the case folded form of a single char.
///
/// This is the simple lower case mapping: chars whose lower case form is not a single char are
/// left unchanged, so folding never changes the number of chars in a string.
#[inline]
pub fn fold_char(c: char) -> char {
    if c.is_ascii() {
        return c.to_ascii_lowercase();
    }
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(folded), None) => folded,
        _ => c,
    }
}

/// Appends the UTF-8 encoding of the folded chars to `buf`.
pub(crate) fn fold_into(chars: impl Iterator<Item = char>, buf: &mut FoldBuffer) {
    for c in chars {
        let mut encoded = [0; 4];
        buf.extend_from_slice(fold_char(c).encode_utf8(&mut encoded).as_bytes());
    }
}

/// Compares two strings char by char after case folding.
#[inline]
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    if a.is_ascii() && b.is_ascii() {
        a.eq_ignore_ascii_case(b)
    } else {
        a.chars().map(fold_char).eq(b.chars().map(fold_char))
    }
}

/// Returns `true` if the code units contain an ASCII letter.
#[inline]
pub(crate) fn has_ascii_letters(bytes: &[u8]) -> bool {
    bytes.iter().any(u8::is_ascii_alphabetic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinal_is_deterministic_and_length_sensitive() {
        assert_eq!(hash_ordinal(b"frozen"), hash_ordinal(b"frozen"));
        assert_ne!(hash_ordinal(b""), hash_ordinal(b"\0"));
        assert_ne!(hash_ordinal(b"abcdefgh"), hash_ordinal(b"abcdefgi"));
        assert_ne!(hash_ordinal(b"abcdefghijk"), hash_ordinal(b"abcdefghijK"));
    }

    #[test]
    fn ignore_case_ascii_covers_every_tail_length() {
        let lower = "abcdefghijklmnopqrstuvwxyz";
        let upper = lower.to_ascii_uppercase();
        for len in 0..=lower.len() {
            assert_eq!(
                hash_ordinal_ignore_case_ascii(&lower.as_bytes()[..len]),
                hash_ordinal_ignore_case_ascii(&upper.as_bytes()[..len]),
                "length {len}"
            );
        }
    }

    #[test]
    fn ignore_case_matches_equality() {
        let pairs = [
            ("Straße", "STRAßE"),
            ("ÉCOLE", "école"),
            ("\u{212A}elvin", "kelvin"),
            ("ΣΊΣΥΦΟΣ", "σίσυφοσ"),
        ];
        for (a, b) in pairs {
            assert!(eq_ignore_case(a, b), "{a} vs {b}");
            assert_eq!(hash_ordinal_ignore_case(a), hash_ordinal_ignore_case(b), "{a} vs {b}");
        }
        assert!(!eq_ignore_case("straße", "strasse"));
        assert!(!eq_ignore_case("abc", "abd"));
    }

    #[test]
    fn fold_keeps_char_count() {
        for c in ['İ', 'ß', 'A', 'Ω', '\u{212A}', '7'] {
            let folded = fold_char(c);
            assert_eq!(fold_char(folded), folded);
        }
        assert_eq!(fold_char('İ'), 'İ');
        assert_eq!(fold_char('\u{212A}'), 'k');
    }
}
