//! EMSA-PKCS1-v1_5 encoding for SHA-256 over a 2048-bit modulus.
//!
//! ```text
//! 00 01 FF .. FF 00 || DigestInfo(SHA-256) || H
//! ```
//!
//! With a fixed digest and modulus size every field has a fixed offset, so
//! verification re-encodes the expected block and compares it to the
//! recovered one in constant time. A wrong block type, short padding, a
//! different digest OID and a different hash all fail the same comparison.

use subtle::ConstantTimeEq;

use crate::core::error::{CryptoError, CryptoResult};
use crate::core::operations::hash::SHA256_SIZE;
use crate::core::types::{Digest, RSA_2048_SIZE};

/// DER `DigestInfo` prefix for SHA-256 (OID 2.16.840.1.101.3.4.2.1).
pub const SHA256_DIGEST_INFO: [u8; 19] = [
    0x30, 0x31, 0x30, 0x0d, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x01, 0x05,
    0x00, 0x04, 0x20,
];

/// Block type for private-key (signature) operations.
const BLOCK_TYPE_SIGNATURE: u8 = 0x01;

/// Length of the `FF` run in a SHA-256 signature block.
pub const PADDING_LEN: usize = RSA_2048_SIZE - 3 - SHA256_DIGEST_INFO.len() - SHA256_SIZE;

/// Builds the encoded message for a SHA-256 digest.
#[must_use]
pub fn encode_sha256(hash: &Digest) -> [u8; RSA_2048_SIZE] {
    let mut em = [0xffu8; RSA_2048_SIZE];
    em[0] = 0x00;
    em[1] = BLOCK_TYPE_SIGNATURE;

    let separator = 2 + PADDING_LEN;
    em[separator] = 0x00;

    let info_start = separator + 1;
    let hash_start = info_start + SHA256_DIGEST_INFO.len();
    em[info_start..hash_start].copy_from_slice(&SHA256_DIGEST_INFO);
    em[hash_start..].copy_from_slice(hash);
    em
}

/// Checks a recovered block against the encoding of `hash`.
///
/// # Errors
///
/// Returns [`CryptoError::PaddingOrDigestMismatch`] on any difference.
pub fn verify_sha256(em: &[u8; RSA_2048_SIZE], hash: &Digest) -> CryptoResult<()> {
    let expected = encode_sha256(hash);
    if em[..].ct_eq(&expected[..]).into() {
        Ok(())
    } else {
        Err(CryptoError::PaddingOrDigestMismatch)
    }
}
