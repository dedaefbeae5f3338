//! Builder for [`CryptoContext`].
//!
//! Parsers usually know the key, the mode and the starting counter or IV
//! up front. The builder collects them and produces a ready context in one
//! fallible step.
//!
//! # Example
//!
//! ```rust
//! use ctr_crypto::prelude::*;
//!
//! let mut ctx = CryptoContextBuilder::new()
//!     .key([0x2bu8; 16])
//!     .counter([0u8; 16])
//!     .try_build()
//!     .expect("key and mode are set");
//!
//! let mut keystream = [0u8; 32];
//! ctx.crypt_stream(None, &mut keystream).expect("counter mode");
//! assert_eq!(ctx.counter().expect("counter mode"), Counter128::from(2u128));
//! ```

use crate::core::context::CryptoContext;
use crate::core::error::{CryptoError, CryptoResult};
use crate::core::types::{AesKey, Block, Counter128};

#[cfg(feature = "rsa")]
use crate::core::types::RsaKey2048;

/// AES mode requested from the builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Counter(Counter128),
    CbcEncrypt(Block),
    CbcDecrypt(Block),
}

/// Fluent construction of a [`CryptoContext`].
///
/// The AES half is optional, but a key and a mode must be given together.
/// The last mode call wins.
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct CryptoContextBuilder {
    key: Option<AesKey>,
    mode: Option<Mode>,
    #[cfg(feature = "rsa")]
    rsa_key: Option<RsaKey2048>,
}

impl CryptoContextBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the AES-128 key.
    pub fn key(mut self, key: impl Into<AesKey>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Selects counter mode starting at `counter`.
    pub fn counter(mut self, counter: impl Into<Counter128>) -> Self {
        self.mode = Some(Mode::Counter(counter.into()));
        self
    }

    /// Selects CBC encryption with the given IV.
    pub fn cbc_encrypt(mut self, iv: Block) -> Self {
        self.mode = Some(Mode::CbcEncrypt(iv));
        self
    }

    /// Selects CBC decryption with the given IV.
    pub fn cbc_decrypt(mut self, iv: Block) -> Self {
        self.mode = Some(Mode::CbcDecrypt(iv));
        self
    }

    /// Loads an RSA key record into the context.
    #[cfg(feature = "rsa")]
    pub fn rsa_key(mut self, key: RsaKey2048) -> Self {
        self.rsa_key = Some(key);
        self
    }

    /// Builds the context.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::UninitializedKey`] if only one of key and mode was
    ///   given, or the RSA record is not marked valid
    /// - [`CryptoError::KeyValidationFailed`] if the RSA record fails
    ///   validation
    pub fn try_build(self) -> CryptoResult<CryptoContext> {
        let mut ctx = CryptoContext::new();

        match (&self.key, self.mode) {
            (None, None) => {}
            (Some(key), Some(Mode::Counter(counter))) => ctx.init_counter(key, counter),
            (Some(key), Some(Mode::CbcEncrypt(iv))) => ctx.init_cbc_encrypt(key, iv),
            (Some(key), Some(Mode::CbcDecrypt(iv))) => ctx.init_cbc_decrypt(key, iv),
            (Some(_), None) | (None, Some(_)) => return Err(CryptoError::UninitializedKey),
        }

        #[cfg(feature = "rsa")]
        if let Some(rsa_key) = &self.rsa_key {
            ctx.rsa_init(rsa_key)?;
        }

        Ok(ctx)
    }
}
