//! `RsaKey2048` - raw RSA-2048 key record.
//!
//! This is the byte-level key layout handed over by container parsers. All
//! integers are big-endian. Private fields are left zeroed for public-only
//! keys.

use core::fmt::{self, Debug};

use zeroize::Zeroize;

/// Size of the RSA-2048 modulus, private exponent, signatures and raw blocks.
pub const RSA_2048_SIZE: usize = 256;

/// Size of each prime and CRT parameter.
pub const RSA_2048_HALF_SIZE: usize = 128;

/// Largest public exponent encoding accepted.
pub const RSA_MAX_EXPONENT_SIZE: usize = RSA_2048_SIZE;

/// An RSA-2048 key record.
///
/// # Security
///
/// - Key material is zeroized on drop
/// - Debug output redacts every private component
///
/// # Example
///
/// ```rust
/// use ctr_crypto::core::types::RsaKey2048;
///
/// let key = RsaKey2048::public([0xff; 256], &[0x01, 0x00, 0x01]);
/// assert!(key.valid);
/// assert!(!key.has_private());
/// ```
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct RsaKey2048 {
    /// Modulus N.
    pub n: [u8; RSA_2048_SIZE],
    /// Public exponent E, variable length (commonly 3 or 4 bytes).
    pub e: Vec<u8>,
    /// Private exponent D.
    pub d: [u8; RSA_2048_SIZE],
    /// First prime P.
    pub p: [u8; RSA_2048_HALF_SIZE],
    /// Second prime Q.
    pub q: [u8; RSA_2048_HALF_SIZE],
    /// D mod (P - 1).
    pub dp: [u8; RSA_2048_HALF_SIZE],
    /// D mod (Q - 1).
    pub dq: [u8; RSA_2048_HALF_SIZE],
    /// Q^-1 mod P.
    pub qp: [u8; RSA_2048_HALF_SIZE],
    /// Whether the record holds key material at all.
    #[zeroize(skip)]
    pub valid: bool,
}

impl RsaKey2048 {
    /// Creates a public-only key record.
    #[must_use]
    pub fn public(n: [u8; RSA_2048_SIZE], e: &[u8]) -> Self {
        let mut key = Self::default();
        key.n = n;
        key.e = e.to_vec();
        key.valid = true;
        key
    }

    /// Creates an empty record that every RSA operation will reject.
    #[must_use]
    pub fn invalid() -> Self {
        Self::default()
    }

    /// Returns true when any private field (D, P, Q, DP, DQ or QP) is populated.
    #[must_use]
    pub fn has_private(&self) -> bool {
        let populated = |bytes: &[u8]| bytes.iter().any(|&b| b != 0);
        populated(&self.d)
            || populated(&self.p)
            || populated(&self.q)
            || populated(&self.dp)
            || populated(&self.dq)
            || populated(&self.qp)
    }
}

impl Default for RsaKey2048 {
    fn default() -> Self {
        Self {
            n: [0u8; RSA_2048_SIZE],
            e: Vec::new(),
            d: [0u8; RSA_2048_SIZE],
            p: [0u8; RSA_2048_HALF_SIZE],
            q: [0u8; RSA_2048_HALF_SIZE],
            dp: [0u8; RSA_2048_HALF_SIZE],
            dq: [0u8; RSA_2048_HALF_SIZE],
            qp: [0u8; RSA_2048_HALF_SIZE],
            valid: false,
        }
    }
}

impl Debug for RsaKey2048 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaKey2048")
            .field("valid", &self.valid)
            .field("has_private", &self.has_private())
            .field("private", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}
