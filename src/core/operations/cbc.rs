//! AES-128 CBC mode.
//!
//! The engine is keyed for one direction at init time. Inputs must be a
//! whole number of blocks; there is no padding and no truncation.

use crate::core::error::{CryptoError, CryptoResult};
use crate::core::operations::block::{BlockCipher, Direction};
use crate::core::operations::ctr::AES_BLOCK_SIZE;
use crate::core::types::{AesKey, Block};

/// CBC engine: a directional key schedule plus the chaining value.
///
/// The chaining value carries over between calls, so a block-aligned message
/// may be fed in several pieces.
///
/// # Example
///
/// ```rust
/// use ctr_crypto::core::operations::cbc::CbcEngine;
/// use ctr_crypto::core::types::AesKey;
///
/// let key = AesKey::from([0x11u8; 16]);
/// let iv = [0x22u8; 16];
/// let plaintext = [0x33u8; 32];
///
/// let mut ciphertext = [0u8; 32];
/// CbcEngine::init_encrypt(&key, iv)
///     .encrypt(&plaintext, &mut ciphertext)
///     .expect("block aligned");
///
/// let mut decrypted = [0u8; 32];
/// CbcEngine::init_decrypt(&key, iv)
///     .decrypt(&ciphertext, &mut decrypted)
///     .expect("block aligned");
/// assert_eq!(decrypted, plaintext);
/// ```
#[derive(Debug, Clone)]
pub struct CbcEngine {
    cipher: BlockCipher,
    iv: Block,
}

impl CbcEngine {
    /// Keys the engine for encryption.
    #[must_use]
    pub fn init_encrypt(key: &AesKey, iv: Block) -> Self {
        Self {
            cipher: BlockCipher::new(key, Direction::Encrypt),
            iv,
        }
    }

    /// Keys the engine for decryption.
    #[must_use]
    pub fn init_decrypt(key: &AesKey, iv: Block) -> Self {
        Self {
            cipher: BlockCipher::new(key, Direction::Decrypt),
            iv,
        }
    }

    /// Returns the direction the engine was keyed for.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.cipher.direction()
    }

    /// Returns the current chaining value.
    #[must_use]
    pub const fn iv(&self) -> &Block {
        &self.iv
    }

    /// Replaces the chaining value.
    pub fn set_iv(&mut self, iv: Block) {
        self.iv = iv;
    }

    /// CBC-encrypts `input` into `output`.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::UninitializedKey`] if the engine was keyed for decryption
    /// - [`CryptoError::InvalidInputSize`] if the length is not a multiple of 16
    ///   or the buffers differ in length
    pub fn encrypt(&mut self, input: &[u8], output: &mut [u8]) -> CryptoResult<()> {
        self.check(Direction::Encrypt, input, output)?;

        for (src, dst) in input
            .chunks_exact(AES_BLOCK_SIZE)
            .zip(output.chunks_exact_mut(AES_BLOCK_SIZE))
        {
            let mut block = self.iv;
            for (b, p) in block.iter_mut().zip(src) {
                *b ^= p;
            }
            self.iv = self.cipher.process(&block);
            dst.copy_from_slice(&self.iv);
        }
        Ok(())
    }

    /// CBC-decrypts `input` into `output`.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::UninitializedKey`] if the engine was keyed for encryption
    /// - [`CryptoError::InvalidInputSize`] if the length is not a multiple of 16
    ///   or the buffers differ in length
    pub fn decrypt(&mut self, input: &[u8], output: &mut [u8]) -> CryptoResult<()> {
        self.check(Direction::Decrypt, input, output)?;

        for (src, dst) in input
            .chunks_exact(AES_BLOCK_SIZE)
            .zip(output.chunks_exact_mut(AES_BLOCK_SIZE))
        {
            let mut ciphertext = [0u8; AES_BLOCK_SIZE];
            ciphertext.copy_from_slice(src);

            let mut block = self.cipher.process(&ciphertext);
            for (b, c) in block.iter_mut().zip(&self.iv) {
                *b ^= c;
            }
            dst.copy_from_slice(&block);
            self.iv = ciphertext;
        }
        Ok(())
    }

    fn check(&self, direction: Direction, input: &[u8], output: &[u8]) -> CryptoResult<()> {
        if self.cipher.direction() != direction {
            return Err(CryptoError::UninitializedKey);
        }
        if input.len() % AES_BLOCK_SIZE != 0 || input.len() != output.len() {
            return Err(CryptoError::InvalidInputSize);
        }
        Ok(())
    }
}
