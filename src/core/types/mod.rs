//! Key and state types.
//!
//! - [`AesKey`] - 128-bit AES key
//! - [`Counter128`] - 128-bit big-endian counter block
//! - [`RsaKey2048`] - raw RSA-2048 key record

mod aes_key;
mod counter;
mod rsa_key;

pub use aes_key::{AesKey, AES_KEY_SIZE};
pub use counter::{Counter128, COUNTER_SIZE};
pub use rsa_key::{RsaKey2048, RSA_2048_HALF_SIZE, RSA_2048_SIZE, RSA_MAX_EXPONENT_SIZE};

/// A 16-byte AES block, also used for CBC initialization vectors.
pub type Block = [u8; 16];

/// A SHA-256 digest.
pub type Digest = [u8; 32];
