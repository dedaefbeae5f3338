//! AES-128 ECB block primitive.
//!
//! The cipher is keyed for a single direction, matching how the counter and
//! CBC engines use it. Counter mode only ever encrypts; CBC decryption needs
//! the inverse cipher.

use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use aes::{Aes128Dec, Aes128Enc};

use crate::core::types::{AesKey, Block};

/// Direction a block cipher was keyed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Forward cipher.
    Encrypt,
    /// Inverse cipher.
    Decrypt,
}

/// AES-128 keyed for one direction.
#[derive(Clone)]
pub enum BlockCipher {
    /// Encryption key schedule.
    Encrypt(Aes128Enc),
    /// Decryption key schedule.
    Decrypt(Aes128Dec),
}

impl BlockCipher {
    /// Expands `key` for the given direction.
    #[must_use]
    pub fn new(key: &AesKey, direction: Direction) -> Self {
        let key = aes::cipher::Key::<Aes128Enc>::from(*key.as_bytes());
        match direction {
            Direction::Encrypt => Self::Encrypt(Aes128Enc::new(&key)),
            Direction::Decrypt => Self::Decrypt(Aes128Dec::new(&key)),
        }
    }

    /// Returns the direction this cipher was keyed for.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        match self {
            Self::Encrypt(_) => Direction::Encrypt,
            Self::Decrypt(_) => Direction::Decrypt,
        }
    }

    /// Runs one ECB block through the cipher in its keyed direction.
    #[must_use]
    pub fn process(&self, input: &Block) -> Block {
        let mut block = aes::Block::from(*input);
        match self {
            Self::Encrypt(cipher) => cipher.encrypt_block(&mut block),
            Self::Decrypt(cipher) => cipher.decrypt_block(&mut block),
        }
        block.into()
    }
}

impl core::fmt::Debug for BlockCipher {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BlockCipher")
            .field("direction", &self.direction())
            .field("key", &"[REDACTED]")
            .finish()
    }
}
