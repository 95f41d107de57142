//! Short URL-safe identifiers for shared records.
//!
//! Uniqueness is best effort: nothing checks the store before insert, so a
//! collision overwrites the earlier record.

use rand::Rng;

use super::domain::ShareId;

pub const SHARE_ID_LEN: usize = 7;

const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

impl ShareId {
    /// Draw a fresh random id.
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        let id = (0..SHARE_ID_LEN)
            .map(|_| char::from(ALPHABET[rng.random_range(0..ALPHABET.len())]))
            .collect();
        Self(id)
    }

    /// Accept a client-supplied id when it has the exact length and alphabet.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.chars().count() != SHARE_ID_LEN || !raw.bytes().all(is_url_safe) {
            return None;
        }
        Some(Self(raw.to_string()))
    }
}

fn is_url_safe(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-'
}
