//! `AesKey` - 128-bit symmetric key.
//!
//! This module provides the `AesKey` type used to initialize the counter
//! and CBC engines.

use core::fmt::{self, Debug};

use zeroize::Zeroize;

use crate::core::error::CryptoError;

/// Size of an AES-128 key in bytes.
pub const AES_KEY_SIZE: usize = 16;

/// A 128-bit AES key.
///
/// # Security
///
/// - Key material is zeroized on drop
/// - Debug output redacts the key
/// - Equality comparison uses constant-time comparison
///
/// # Example
///
/// ```rust
/// use ctr_crypto::core::types::AesKey;
///
/// let key = AesKey::from([0u8; 16]);
/// assert_eq!(key.as_bytes(), &[0u8; 16]);
///
/// // Slices must be exactly 16 bytes
/// assert!(AesKey::try_from(&[0u8; 15][..]).is_err());
/// ```
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct AesKey {
    key: [u8; AES_KEY_SIZE],
}

impl AesKey {
    /// Creates a new `AesKey` from raw key bytes.
    #[must_use]
    pub const fn new(key: [u8; AES_KEY_SIZE]) -> Self {
        Self { key }
    }

    /// Returns a reference to the raw key bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; AES_KEY_SIZE] {
        &self.key
    }
}

impl From<[u8; AES_KEY_SIZE]> for AesKey {
    fn from(key: [u8; AES_KEY_SIZE]) -> Self {
        Self::new(key)
    }
}

impl From<&[u8; AES_KEY_SIZE]> for AesKey {
    fn from(key: &[u8; AES_KEY_SIZE]) -> Self {
        Self::new(*key)
    }
}

impl TryFrom<&[u8]> for AesKey {
    type Error = CryptoError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let key: [u8; AES_KEY_SIZE] = bytes
            .try_into()
            .map_err(|_| CryptoError::InvalidInputSize)?;
        Ok(Self::new(key))
    }
}

impl AsRef<[u8]> for AesKey {
    fn as_ref(&self) -> &[u8] {
        &self.key
    }
}

impl Debug for AesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AesKey").field("key", &"[REDACTED]").finish()
    }
}

impl PartialEq for AesKey {
    fn eq(&self, other: &Self) -> bool {
        use subtle::ConstantTimeEq;
        self.key.ct_eq(&other.key).into()
    }
}

impl Eq for AesKey {}
