//! UTF-8 Safe String Utilities
//!
//! Selection indices arriving from the editor widget are character indices
//! that must be converted to byte positions before splicing text. Rust
//! strings are UTF-8 encoded, so byte indices must fall on character
//! boundaries; characters like `ø`, `中`, `🎉` are multi-byte, and slicing
//! mid-character panics. These helpers adjust arbitrary indices to valid
//! boundaries and convert between the two index spaces.

// Allow dead code - this is a utility module with functions for future use
#![allow(dead_code)]

// ─────────────────────────────────────────────────────────────────────────────
// Character Boundary Functions
// ─────────────────────────────────────────────────────────────────────────────

/// Returns the largest index that is less than or equal to `index`
/// and is on a UTF-8 character boundary.
///
/// If `index` is greater than the string length, returns the string length.
#[inline]
pub fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    if index == 0 {
        return 0;
    }

    // Walk backwards to find the start of the character
    let bytes = s.as_bytes();
    let mut i = index;
    while i > 0 && !is_utf8_char_start(bytes[i]) {
        i -= 1;
    }
    i
}

/// Returns the smallest index that is greater than or equal to `index`
/// and is on a UTF-8 character boundary.
///
/// If `index` is greater than the string length, returns the string length.
#[inline]
pub fn ceil_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }

    // Walk forwards to find the start of the next character
    let bytes = s.as_bytes();
    let mut i = index;
    while i < s.len() && !is_utf8_char_start(bytes[i]) {
        i += 1;
    }
    i
}

/// Check whether a byte is the first byte of a UTF-8 encoded character.
///
/// Continuation bytes have the form `0b10xxxxxx`.
#[inline]
fn is_utf8_char_start(byte: u8) -> bool {
    (byte & 0xC0) != 0x80
}

// ─────────────────────────────────────────────────────────────────────────────
// Index Conversion
// ─────────────────────────────────────────────────────────────────────────────

/// Convert a character index to a byte index.
///
/// A character index past the end of the string maps to the string length.
#[inline]
pub fn char_index_to_byte_index(s: &str, char_index: usize) -> usize {
    s.char_indices()
        .nth(char_index)
        .map(|(byte_idx, _)| byte_idx)
        .unwrap_or(s.len())
}

/// Convert a byte index to a character index.
///
/// The byte index is floored to the nearest character boundary first.
#[inline]
pub fn byte_index_to_char_index(s: &str, byte_index: usize) -> usize {
    let boundary = floor_char_boundary(s, byte_index);
    s[..boundary].chars().count()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_char_boundary_ascii() {
        let s = "hello";
        assert_eq!(floor_char_boundary(s, 0), 0);
        assert_eq!(floor_char_boundary(s, 3), 3);
        assert_eq!(floor_char_boundary(s, 10), 5);
    }

    #[test]
    fn test_floor_char_boundary_multibyte() {
        let s = "på"; // 'å' spans bytes 1..3
        assert_eq!(floor_char_boundary(s, 2), 1);
        assert_eq!(floor_char_boundary(s, 1), 1);
        assert_eq!(floor_char_boundary(s, 3), 3);
    }

    #[test]
    fn test_ceil_char_boundary_multibyte() {
        let s = "på";
        assert_eq!(ceil_char_boundary(s, 2), 3);
        assert_eq!(ceil_char_boundary(s, 1), 1);
        assert_eq!(ceil_char_boundary(s, 10), 3);
    }

    #[test]
    fn test_ceil_char_boundary_emoji() {
        let s = "a🎉b"; // emoji spans bytes 1..5
        assert_eq!(ceil_char_boundary(s, 2), 5);
        assert_eq!(ceil_char_boundary(s, 5), 5);
    }

    #[test]
    fn test_char_index_to_byte_index() {
        let s = "aåb";
        assert_eq!(char_index_to_byte_index(s, 0), 0);
        assert_eq!(char_index_to_byte_index(s, 1), 1);
        assert_eq!(char_index_to_byte_index(s, 2), 3);
        assert_eq!(char_index_to_byte_index(s, 3), 4);
        assert_eq!(char_index_to_byte_index(s, 99), 4);
    }

    #[test]
    fn test_byte_index_to_char_index() {
        let s = "aåb";
        assert_eq!(byte_index_to_char_index(s, 0), 0);
        assert_eq!(byte_index_to_char_index(s, 1), 1);
        assert_eq!(byte_index_to_char_index(s, 3), 2);
        assert_eq!(byte_index_to_char_index(s, 4), 3);
        // Mid-character byte index floors to the character start
        assert_eq!(byte_index_to_char_index(s, 2), 1);
    }

    #[test]
    fn test_index_roundtrip() {
        let s = "Hei på deg 🎉";
        for (char_idx, _) in s.chars().enumerate() {
            let byte_idx = char_index_to_byte_index(s, char_idx);
            assert_eq!(byte_index_to_char_index(s, byte_idx), char_idx);
        }
    }
}
