//! XXH3-128 content hashes.

use serde::{Deserialize, Serialize};
use std::fmt;
use xxhash_rust::xxh3::Xxh3;

/// A 128-bit XXH3 digest.
///
/// Two architecture builds bind the same bels, pins and wires exactly when
/// their binding fingerprints are equal.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentHash([u8; 16]);

impl ContentHash {
    /// Hashes a byte slice in one go.
    pub fn from_bytes(data: &[u8]) -> Self {
        Self(xxhash_rust::xxh3::xxh3_128(data).to_le_bytes())
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|b| write!(f, "{b:02x}"))
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({:02x}{:02x}..)", self.0[0], self.0[1])
    }
}

/// Incremental builder for a [`ContentHash`].
///
/// Strings are written NUL-terminated so that adjacent fields cannot run
/// into each other; integers are written little-endian.
pub struct ContentHasher {
    state: Xxh3,
}

impl ContentHasher {
    /// Starts an empty hash.
    pub fn new() -> Self {
        Self { state: Xxh3::new() }
    }

    /// Feeds raw bytes.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.state.update(bytes);
        self
    }

    /// Feeds a string followed by a NUL byte.
    pub fn write_str(&mut self, s: &str) -> &mut Self {
        self.write_bytes(s.as_bytes()).write_bytes(&[0])
    }

    /// Feeds a `u32`.
    pub fn write_u32(&mut self, v: u32) -> &mut Self {
        self.write_bytes(&v.to_le_bytes())
    }

    /// Feeds an `i32`.
    pub fn write_i32(&mut self, v: i32) -> &mut Self {
        self.write_bytes(&v.to_le_bytes())
    }

    /// Feeds a `u64`.
    pub fn write_u64(&mut self, v: u64) -> &mut Self {
        self.write_bytes(&v.to_le_bytes())
    }

    /// Returns the digest of everything written so far.
    pub fn finish(&self) -> ContentHash {
        ContentHash(self.state.digest128().to_le_bytes())
    }
}

impl Default for ContentHasher {
    fn default() -> Self {
        Self::new()
    }
}
