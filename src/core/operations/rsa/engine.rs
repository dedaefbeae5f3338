//! RSA-2048 context: key loading, validation and the raw transforms.

use num_bigint_dig::{BigInt, ModInverse, Sign};
use num_traits::{One, Zero};
use rsa::BigUint;
use tracing::{debug, trace, warn};
use zeroize::{Zeroize, Zeroizing};

use super::encoding::{i2osp, os2ip};
use super::pkcs1;
use crate::core::error::{CryptoError, CryptoResult};
use crate::core::types::{Digest, RsaKey2048, RSA_2048_SIZE, RSA_MAX_EXPONENT_SIZE};

/// Modulus size in bits.
pub const RSA_2048_BITS: usize = 2048;

/// Largest accepted public exponent, in bits.
const MAX_EXPONENT_BITS: usize = 64;

/// Private half of a loaded key. Zeroized on drop.
struct PrivateParts {
    d: BigUint,
    p: BigUint,
    q: BigUint,
    dp: BigUint,
    dq: BigUint,
    qp: BigUint,
}

impl Drop for PrivateParts {
    fn drop(&mut self) {
        self.d.zeroize();
        self.p.zeroize();
        self.q.zeroize();
        self.dp.zeroize();
        self.dq.zeroize();
        self.qp.zeroize();
    }
}

/// A loaded, validated RSA-2048 key.
///
/// A context only exists once its key has passed validation; a key that is
/// not marked valid, fails to parse, or fails a structural check never
/// produces one. Contexts are meant to live for one verification or
/// transform and are zeroized on drop.
///
/// # Example
///
/// ```rust
/// use ctr_crypto::core::error::CryptoError;
/// use ctr_crypto::core::operations::rsa::RsaContext;
/// use ctr_crypto::core::types::RsaKey2048;
///
/// let result = RsaContext::init(&RsaKey2048::invalid());
/// assert!(matches!(result, Err(CryptoError::UninitializedKey)));
/// ```
pub struct RsaContext {
    n: BigUint,
    e: BigUint,
    private: Option<PrivateParts>,
}

impl RsaContext {
    /// Loads and validates `key`.
    ///
    /// The public check always runs. The private check runs when any
    /// private field, CRT parameters included, is populated.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::UninitializedKey`] if the record is not marked valid
    ///   or E has no usable encoding
    /// - [`CryptoError::KeyValidationFailed`] if either structural check fails
    pub fn init(key: &RsaKey2048) -> CryptoResult<Self> {
        if !key.valid {
            debug!(reason = "record not marked valid", "RSA key rejected");
            return Err(CryptoError::UninitializedKey);
        }
        if key.e.is_empty() || key.e.len() > RSA_MAX_EXPONENT_SIZE {
            debug!(e_len = key.e.len(), reason = "exponent encoding", "RSA key rejected");
            return Err(CryptoError::UninitializedKey);
        }

        let mut ctx = Self {
            n: os2ip(&key.n),
            e: os2ip(&key.e),
            private: None,
        };
        ctx.check_public()?;

        if key.has_private() {
            ctx.private = Some(PrivateParts {
                d: os2ip(&key.d),
                p: os2ip(&key.p),
                q: os2ip(&key.q),
                dp: os2ip(&key.dp),
                dq: os2ip(&key.dq),
                qp: os2ip(&key.qp),
            });
            ctx.check_private()?;
        }

        trace!(private = ctx.is_private(), "RSA context initialized");
        Ok(ctx)
    }

    /// Loads a private key that has no CRT parameters yet.
    ///
    /// Only the public check runs here. Call
    /// [`derive_crt_parameters`](Self::derive_crt_parameters) to complete the
    /// key; that validates the result before committing it.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::UninitializedKey`] if E has no usable encoding
    /// - [`CryptoError::KeyValidationFailed`] if the public check fails
    pub fn from_private_parts(
        n: &[u8; RSA_2048_SIZE],
        e: &[u8],
        d: &[u8; RSA_2048_SIZE],
        p: &[u8],
        q: &[u8],
    ) -> CryptoResult<Self> {
        if e.is_empty() || e.len() > RSA_MAX_EXPONENT_SIZE {
            return Err(CryptoError::UninitializedKey);
        }

        let ctx = Self {
            n: os2ip(n),
            e: os2ip(e),
            private: Some(PrivateParts {
                d: os2ip(d),
                p: os2ip(p),
                q: os2ip(q),
                dp: BigUint::zero(),
                dq: BigUint::zero(),
                qp: BigUint::zero(),
            }),
        };
        ctx.check_public()?;
        Ok(ctx)
    }

    /// Returns true if the context holds private key material.
    #[must_use]
    pub fn is_private(&self) -> bool {
        self.private.is_some()
    }

    /// Returns the modulus size in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.n.bits().div_ceil(8)
    }

    fn check_public(&self) -> CryptoResult<()> {
        let reason = if self.n.bits() != RSA_2048_BITS {
            Some("modulus is not 2048 bits")
        } else if !is_odd(&self.n) {
            Some("modulus is even")
        } else if self.e.bits() < 2 || self.e.bits() > MAX_EXPONENT_BITS {
            Some("exponent out of range")
        } else if !is_odd(&self.e) {
            Some("exponent is even")
        } else if self.e >= self.n {
            Some("exponent not below modulus")
        } else {
            None
        };

        match reason {
            Some(reason) => {
                debug!(reason, "RSA public key rejected");
                Err(CryptoError::KeyValidationFailed)
            }
            None => Ok(()),
        }
    }

    fn check_private(&self) -> CryptoResult<()> {
        let Some(parts) = self.private.as_ref() else {
            return Err(CryptoError::UninitializedKey);
        };

        match private_mismatch(&self.n, &self.e, parts) {
            Some(reason) => {
                debug!(reason, "RSA private key rejected");
                Err(CryptoError::KeyValidationFailed)
            }
            None => Ok(()),
        }
    }

    /// Computes `input^E mod N` with no padding interpretation.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::MessageOutOfRange`] if `input` is not below N.
    pub fn raw_public(&self, input: &[u8; RSA_2048_SIZE]) -> CryptoResult<[u8; RSA_2048_SIZE]> {
        let s = os2ip(input);
        if s >= self.n {
            return Err(CryptoError::MessageOutOfRange);
        }
        let m = Zeroizing::new(s.modpow(&self.e, &self.n));
        i2osp(&m)
    }

    /// Computes `input^D mod N` using the CRT parameters.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::UninitializedKey`] if the context is public-only or
    ///   its CRT parameters have not been derived
    /// - [`CryptoError::MessageOutOfRange`] if `input` is not below N
    pub fn raw_private(&self, input: &[u8; RSA_2048_SIZE]) -> CryptoResult<[u8; RSA_2048_SIZE]> {
        let parts = self.private.as_ref().ok_or(CryptoError::UninitializedKey)?;
        if parts.qp.is_zero() {
            return Err(CryptoError::UninitializedKey);
        }

        let c = Zeroizing::new(os2ip(input));
        if *c >= self.n {
            return Err(CryptoError::MessageOutOfRange);
        }

        // Garner: m = m2 + q * (qp * (m1 - m2) mod p)
        let m1 = Zeroizing::new(c.modpow(&parts.dp, &parts.p));
        let m2 = Zeroizing::new(c.modpow(&parts.dq, &parts.q));
        let m2_mod_p = Zeroizing::new(&*m2 % &parts.p);
        let lifted = Zeroizing::new(&*m1 + &parts.p);
        let lifted_diff = Zeroizing::new(&*lifted - &*m2_mod_p);
        let diff = Zeroizing::new(&*lifted_diff % &parts.p);
        let product = Zeroizing::new(&parts.qp * &*diff);
        let h = Zeroizing::new(&*product % &parts.p);
        let hq = Zeroizing::new(&*h * &parts.q);
        let m = Zeroizing::new(&*m2 + &*hq);
        i2osp(&m)
    }

    /// Verifies a PKCS#1 v1.5 SHA-256 signature.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::PaddingOrDigestMismatch`] if the signature is
    /// out of range, the padding or digest OID is malformed, or the digest
    /// differs from `hash`.
    pub fn verify_hash(&self, signature: &[u8; RSA_2048_SIZE], hash: &Digest) -> CryptoResult<()> {
        let em = Zeroizing::new(
            self.raw_public(signature)
                .map_err(|_| CryptoError::PaddingOrDigestMismatch)?,
        );
        pkcs1::verify_sha256(&em, hash)
    }

    /// Produces a PKCS#1 v1.5 SHA-256 signature over `hash`.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::UninitializedKey`] if the context cannot
    /// perform private operations.
    pub fn sign_hash(&self, hash: &Digest) -> CryptoResult<[u8; RSA_2048_SIZE]> {
        let em = pkcs1::encode_sha256(hash);
        self.raw_private(&em)
    }

    /// Completes the private key: DP = D mod (P-1), DQ = D mod (Q-1),
    /// QP = Q^-1 mod P.
    ///
    /// The new values are checked against the rest of the key before they
    /// replace the old ones. On failure the context is unchanged and the
    /// intermediate values are wiped.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::UninitializedKey`] if the context is public-only
    /// - [`CryptoError::ModularInverseUndefined`] if P or Q is degenerate or
    ///   Q has no inverse modulo P
    /// - [`CryptoError::KeyValidationFailed`] if the completed key is inconsistent
    pub fn derive_crt_parameters(&mut self) -> CryptoResult<()> {
        let parts = self.private.as_ref().ok_or(CryptoError::UninitializedKey)?;

        let one = BigUint::one();
        if parts.p <= one || parts.q <= one {
            warn!("CRT derivation failed: degenerate prime");
            return Err(CryptoError::ModularInverseUndefined);
        }

        let p1 = Zeroizing::new(&parts.p - &one);
        let q1 = Zeroizing::new(&parts.q - &one);

        let Some(qp) = mod_inverse(&parts.q, &parts.p) else {
            warn!("CRT derivation failed: Q has no inverse modulo P");
            return Err(CryptoError::ModularInverseUndefined);
        };

        let candidate = PrivateParts {
            d: parts.d.clone(),
            p: parts.p.clone(),
            q: parts.q.clone(),
            dp: &parts.d % &*p1,
            dq: &parts.d % &*q1,
            qp,
        };

        if let Some(reason) = private_mismatch(&self.n, &self.e, &candidate) {
            warn!(reason, "CRT derivation produced an inconsistent key");
            return Err(CryptoError::KeyValidationFailed);
        }

        self.private = Some(candidate);
        trace!("CRT parameters derived");
        Ok(())
    }

    /// Exports the key material as a record.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::MessageOutOfRange`] if a component does not fit
    /// its field.
    pub fn to_key(&self) -> CryptoResult<RsaKey2048> {
        let mut key = RsaKey2048::invalid();
        key.n = i2osp(&self.n)?;
        key.e = self.e.to_bytes_be();
        if let Some(parts) = self.private.as_ref() {
            key.d = i2osp(&parts.d)?;
            key.p = i2osp(&parts.p)?;
            key.q = i2osp(&parts.q)?;
            key.dp = i2osp(&parts.dp)?;
            key.dq = i2osp(&parts.dq)?;
            key.qp = i2osp(&parts.qp)?;
        }
        key.valid = true;
        Ok(key)
    }
}

impl Drop for RsaContext {
    fn drop(&mut self) {
        self.n.zeroize();
        self.e.zeroize();
    }
}

impl core::fmt::Debug for RsaContext {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RsaContext")
            .field("bits", &self.n.bits())
            .field("private", &self.is_private())
            .finish_non_exhaustive()
    }
}

fn is_odd(value: &BigUint) -> bool {
    value.to_bytes_le().first().is_some_and(|b| b & 1 == 1)
}

/// Q^-1 mod P as a non-negative integer below P.
fn mod_inverse(q: &BigUint, p: &BigUint) -> Option<BigUint> {
    let inverse = Zeroizing::new(q.mod_inverse(p)?);
    let modulus = Zeroizing::new(BigInt::from_biguint(Sign::Plus, p.clone()));
    let remainder = Zeroizing::new(&*inverse % &*modulus);
    let shifted = Zeroizing::new(&*remainder + &*modulus);
    let reduced = Zeroizing::new(&*shifted % &*modulus);
    let (_, bytes) = reduced.to_bytes_be();
    let bytes = Zeroizing::new(bytes);
    Some(BigUint::from_bytes_be(&bytes))
}

/// Returns the first broken identity of a private key, if any.
fn private_mismatch(n: &BigUint, e: &BigUint, parts: &PrivateParts) -> Option<&'static str> {
    let one = BigUint::one();
    if parts.p <= one || parts.q <= one || parts.d.is_zero() {
        return Some("missing private component");
    }
    if &(&parts.p * &parts.q) != n {
        return Some("P * Q does not equal N");
    }

    let p1 = Zeroizing::new(&parts.p - &one);
    let q1 = Zeroizing::new(&parts.q - &one);
    let de = Zeroizing::new(&parts.d * e);

    // D*E = 1 mod (P-1) and mod (Q-1) together mean D*E = 1 mod lcm(P-1, Q-1)
    if (&*de % &*p1) != one || (&*de % &*q1) != one {
        return Some("D is not the inverse of E");
    }
    if parts.dp != &parts.d % &*p1 {
        return Some("DP does not match D mod (P-1)");
    }
    if parts.dq != &parts.d % &*q1 {
        return Some("DQ does not match D mod (Q-1)");
    }
    if parts.qp >= parts.p || (&parts.qp * &parts.q) % &parts.p != one {
        return Some("QP is not the inverse of Q mod P");
    }
    None
}
