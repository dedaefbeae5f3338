//! AES-128 counter mode.
//!
//! Each keystream block is the ECB encryption of the current counter. The
//! counter advances by one after every block, including a trailing partial
//! block whose unused keystream bytes are discarded. Resuming a stream in
//! the middle of a message is the caller's job: derive the counter for the
//! block at that offset with [`Counter128::advanced_by`] and set it.

use crate::core::error::{CryptoError, CryptoResult};
use crate::core::operations::block::{BlockCipher, Direction};
use crate::core::types::{AesKey, Block, Counter128};

/// AES block size in bytes.
pub const AES_BLOCK_SIZE: usize = 16;

/// Counter-mode engine: an encryption key schedule plus the live counter.
///
/// # Example
///
/// ```rust
/// use ctr_crypto::core::operations::ctr::CtrEngine;
/// use ctr_crypto::core::types::{AesKey, Counter128};
///
/// let key = AesKey::from([0u8; 16]);
/// let mut engine = CtrEngine::new(&key, Counter128::default());
///
/// let mut data = *b"firmware section";
/// engine.apply_keystream(&mut data);
///
/// // Rewind and decrypt
/// engine.set_counter([0u8; 16]);
/// engine.apply_keystream(&mut data);
/// assert_eq!(&data, b"firmware section");
/// ```
#[derive(Debug, Clone)]
pub struct CtrEngine {
    cipher: BlockCipher,
    counter: Counter128,
    iv: Block,
}

impl CtrEngine {
    /// Keys the engine and loads the initial counter.
    #[must_use]
    pub fn new(key: &AesKey, counter: impl Into<Counter128>) -> Self {
        Self {
            cipher: BlockCipher::new(key, Direction::Encrypt),
            counter: counter.into(),
            iv: [0u8; AES_BLOCK_SIZE],
        }
    }

    /// Returns the current counter.
    #[must_use]
    pub const fn counter(&self) -> Counter128 {
        self.counter
    }

    /// Replaces the counter verbatim. Any byte pattern is accepted.
    pub fn set_counter(&mut self, counter: impl Into<Counter128>) {
        self.counter = counter.into();
    }

    /// Adds `carry` to the counter as a 128-bit big-endian integer.
    pub fn add_counter(&mut self, carry: u8) {
        self.counter.add(carry);
    }

    /// Stores an IV alongside the counter. Counter mode itself never reads it.
    pub fn set_iv(&mut self, iv: Block) {
        self.iv = iv;
    }

    /// Returns the stored IV.
    #[must_use]
    pub const fn iv(&self) -> &Block {
        &self.iv
    }

    /// Produces one block and consumes one counter value.
    ///
    /// With `input` the result is `keystream ^ input`, otherwise the raw
    /// keystream block. The counter is advanced unconditionally.
    pub fn crypt_block(&mut self, input: Option<&Block>) -> Block {
        let mut output = self.cipher.process(self.counter.as_bytes());
        if let Some(input) = input {
            for (out, byte) in output.iter_mut().zip(input) {
                *out ^= byte;
            }
        }
        self.counter.add(1);
        output
    }

    /// Processes `output.len()` bytes.
    ///
    /// Full blocks go through [`crypt_block`](Self::crypt_block). A trailing
    /// remainder of 1 to 15 bytes uses the first bytes of one more keystream
    /// block, which still costs a whole counter increment. Without `input`
    /// the keystream itself is written.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidInputSize`] if `input` and `output`
    /// differ in length. The counter is left untouched in that case.
    pub fn crypt_stream(&mut self, input: Option<&[u8]>, output: &mut [u8]) -> CryptoResult<()> {
        if input.is_some_and(|input| input.len() != output.len()) {
            return Err(CryptoError::InvalidInputSize);
        }

        let mut out_chunks = output.chunks_exact_mut(AES_BLOCK_SIZE);
        for (index, out) in out_chunks.by_ref().enumerate() {
            let block = match input {
                Some(input) => {
                    let start = index * AES_BLOCK_SIZE;
                    let mut chunk = [0u8; AES_BLOCK_SIZE];
                    chunk.copy_from_slice(&input[start..start + AES_BLOCK_SIZE]);
                    self.crypt_block(Some(&chunk))
                }
                None => self.crypt_block(None),
            };
            out.copy_from_slice(&block);
        }

        let tail = out_chunks.into_remainder();
        if !tail.is_empty() {
            let stream = self.crypt_block(Some(&[0u8; AES_BLOCK_SIZE]));
            let tail_len = tail.len();
            match input {
                Some(input) => {
                    let tail_in = &input[input.len() - tail_len..];
                    for ((out, byte), key) in tail.iter_mut().zip(tail_in).zip(&stream) {
                        *out = byte ^ key;
                    }
                }
                None => tail.copy_from_slice(&stream[..tail_len]),
            }
        }

        Ok(())
    }

    /// Encrypts or decrypts `buf` in place.
    pub fn apply_keystream(&mut self, buf: &mut [u8]) {
        for chunk in buf.chunks_mut(AES_BLOCK_SIZE) {
            let stream = self.crypt_block(None);
            for (byte, key) in chunk.iter_mut().zip(&stream) {
                *byte ^= key;
            }
        }
    }

    /// Fills `output` with keystream.
    pub fn keystream(&mut self, output: &mut [u8]) {
        output.fill(0);
        self.apply_keystream(output);
    }
}
