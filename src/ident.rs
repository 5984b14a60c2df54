//! Deterministic identifier derivation
//!
//! Anki merges decks and notetypes by numeric id on import, so the ids in a
//! generated package must be stable across requests: the same deck name (or
//! the constant model seed) always hashes to the same id, and repeated
//! imports land in the same logical deck instead of creating duplicates.
//! The same holds for note guids, which Anki uses to detect updated cards.
//!
//! All derivations are pure functions of their text seed: SHA-1 over the
//! UTF-8 bytes, truncated where a 32-bit value is needed.

use sha1::{Digest, Sha1};

/// Derive a stable 32-bit-range identifier from a text seed.
///
/// Takes the first 8 hex digits of the SHA-1 digest (the first four bytes,
/// big-endian), matching what the Anki ecosystem expects for deck and
/// notetype ids. Defined for every input, including the empty string.
pub fn derive_id(seed: &str) -> i64 {
    let digest = Sha1::digest(seed.as_bytes());
    // First 8 hex digits of the digest == first 4 bytes, big-endian.
    i64::from(u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]))
}

/// Stable note guid: the full SHA-1 hex digest of the front text.
///
/// Anki keys update-in-place semantics on this value, so re-importing a
/// package generated from the same front text updates the existing card.
pub fn note_guid(front: &str) -> String {
    format!("{:x}", Sha1::digest(front.as_bytes()))
}

/// Checksum of a note's sort field, stored in the `csum` column.
///
/// Same truncation as [`derive_id`]; Anki uses it for duplicate detection.
pub fn field_checksum(text: &str) -> i64 {
    derive_id(text)
}
