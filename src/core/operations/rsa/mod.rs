//! RSA-2048 with PKCS#1 v1.5 SHA-256 signatures.
//!
//! - [`RsaContext`] - a loaded, validated key
//! - [`verify_hash`] - one-shot signature check against a key record
//! - [`raw_public`] - one-shot `s^E mod N`
//!
//! The one-shot functions build a transient [`RsaContext`] for the call and
//! drop it on every return path, so no key state outlives the request.
//!
//! # Security
//!
//! Exponentiation uses `num-bigint-dig` and is not constant time. The
//! digest comparison is.
//!
//! # Example
//!
//! ```rust
//! use ctr_crypto::core::error::CryptoError;
//! use ctr_crypto::core::operations::rsa::verify_hash;
//! use ctr_crypto::core::types::RsaKey2048;
//!
//! let key = RsaKey2048::invalid();
//! let result = verify_hash(&[0u8; 256], &[0u8; 32], &key);
//! assert_eq!(result, Err(CryptoError::UninitializedKey));
//! ```

mod encoding;
mod engine;
mod pkcs1;

#[cfg(test)]
pub(crate) mod test_keys;

pub use encoding::{i2osp, os2ip};
pub use engine::{RsaContext, RSA_2048_BITS};
pub use pkcs1::{encode_sha256, SHA256_DIGEST_INFO};

use crate::core::error::{CryptoError, CryptoResult};
use crate::core::types::{Digest, RsaKey2048, RSA_2048_SIZE};

/// Verifies a PKCS#1 v1.5 SHA-256 signature against `key`.
///
/// Returns `Ok(false)` for any signature mismatch, whatever stage it was
/// detected at.
///
/// # Errors
///
/// - [`CryptoError::UninitializedKey`] if the key is not marked valid or
///   cannot be parsed
/// - [`CryptoError::KeyValidationFailed`] if the key fails validation
pub fn verify_hash(
    signature: &[u8; RSA_2048_SIZE],
    hash: &Digest,
    key: &RsaKey2048,
) -> CryptoResult<bool> {
    let ctx = RsaContext::init(key)?;
    match ctx.verify_hash(signature, hash) {
        Ok(()) => Ok(true),
        Err(CryptoError::PaddingOrDigestMismatch) => Ok(false),
        Err(err) => Err(err),
    }
}

/// Computes `signature^E mod N` under `key` with no padding interpretation.
///
/// # Errors
///
/// - [`CryptoError::UninitializedKey`] / [`CryptoError::KeyValidationFailed`]
///   as for [`verify_hash`]
/// - [`CryptoError::MessageOutOfRange`] if `signature` is not below N
pub fn raw_public(
    signature: &[u8; RSA_2048_SIZE],
    key: &RsaKey2048,
) -> CryptoResult<[u8; RSA_2048_SIZE]> {
    RsaContext::init(key)?.raw_public(signature)
}
