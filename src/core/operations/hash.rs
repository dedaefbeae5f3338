//! SHA-256 hashing.
//!
//! Digests produced here are the hash input to RSA signature verification.

use sha2::{Digest as _, Sha256};

use crate::core::types::Digest;

/// SHA-256 output size (32 bytes).
pub const SHA256_SIZE: usize = 32;

/// Computes the SHA-256 digest of `data`.
#[must_use]
pub fn sha256(data: &[u8]) -> Digest {
    Sha256::digest(data).into()
}

/// Incremental SHA-256 for data that arrives in several regions.
///
/// # Example
///
/// ```rust
/// use ctr_crypto::core::operations::hash::{sha256, Sha256Stream};
///
/// let mut stream = Sha256Stream::new();
/// stream.update(b"ab");
/// stream.update(b"c");
/// assert_eq!(stream.finalize(), sha256(b"abc"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Sha256Stream {
    hasher: Sha256,
}

impl Sha256Stream {
    /// Starts an empty hash.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds more data.
    pub fn update(&mut self, data: &[u8]) {
        self.hasher.update(data);
    }

    /// Finishes the hash.
    #[must_use]
    pub fn finalize(self) -> Digest {
        self.hasher.finalize().into()
    }
}
