//! Error types for ctr-crypto operations.
//!
//! Errors carry a kind only. Messages are intentionally short and never
//! include key material or intermediate values.

use thiserror::Error;

/// Errors that can occur while decrypting or verifying container data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// The operation was attempted on a context whose key failed to load,
    /// was never initialized, or was initialized for another mode.
    #[error("Key not initialized")]
    UninitializedKey,

    /// The public or private key structural check failed.
    #[error("Key validation failed")]
    KeyValidationFailed,

    /// A buffer length contract was violated (e.g., CBC input not block aligned).
    #[error("Invalid input size")]
    InvalidInputSize,

    /// PKCS#1 v1.5 verification failed (padding shape, digest OID, or digest value).
    /// Intentionally vague for security.
    #[error("Signature verification failed")]
    PaddingOrDigestMismatch,

    /// CRT parameters cannot be derived because the primes are not coprime.
    #[error("Modular inverse undefined")]
    ModularInverseUndefined,

    /// The RSA input is not smaller than the modulus.
    #[error("RSA input out of range")]
    MessageOutOfRange,
}

/// Result type alias for ctr-crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;
