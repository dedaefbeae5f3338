//! `CryptoContext` - the single handle container parsers work with.
//!
//! A context bundles one AES sub-state (counter mode or CBC) and, when the
//! `rsa` feature is enabled, one RSA sub-state. Initializing a mode replaces
//! whatever AES state was there before. Operations for a mode the context
//! was not initialized for fail with [`CryptoError::UninitializedKey`].

use tracing::trace;

use crate::core::error::{CryptoError, CryptoResult};
use crate::core::operations::cbc::CbcEngine;
use crate::core::operations::ctr::CtrEngine;
use crate::core::types::{AesKey, Block, Counter128};

#[cfg(feature = "rsa")]
use crate::core::operations::rsa::RsaContext;
#[cfg(feature = "rsa")]
use crate::core::types::{Digest, RsaKey2048, RSA_2048_SIZE};

/// The symmetric half of a context.
#[derive(Debug, Clone, Default)]
enum AesState {
    #[default]
    Empty,
    Counter(CtrEngine),
    Cbc(CbcEngine),
}

/// Per-task cryptographic context.
///
/// Contexts hold no shared state. Give every stream its own context.
///
/// # Example
///
/// ```rust
/// use ctr_crypto::core::context::CryptoContext;
/// use ctr_crypto::core::types::AesKey;
///
/// let key = AesKey::from([0x01u8; 16]);
/// let mut ctx = CryptoContext::new();
/// ctx.init_counter(&key, [0u8; 16]);
///
/// let plaintext = b"exefs:/code.bin";
/// let mut ciphertext = [0u8; 15];
/// ctx.crypt_stream(Some(&plaintext[..]), &mut ciphertext)
///     .expect("context is in counter mode");
///
/// // Same counter, same keystream
/// ctx.set_counter([0u8; 16]).expect("counter mode");
/// let mut decrypted = [0u8; 15];
/// ctx.crypt_stream(Some(&ciphertext[..]), &mut decrypted)
///     .expect("context is in counter mode");
/// assert_eq!(&decrypted, plaintext);
/// ```
#[derive(Debug, Default)]
pub struct CryptoContext {
    aes: AesState,
    #[cfg(feature = "rsa")]
    rsa: Option<RsaContext>,
}

impl CryptoContext {
    /// Creates a context with no key material.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Counter mode
    // =========================================================================

    /// Switches the context to counter mode with `key` and `counter`.
    pub fn init_counter(&mut self, key: &AesKey, counter: impl Into<Counter128>) {
        trace!("context initialized for counter mode");
        self.aes = AesState::Counter(CtrEngine::new(key, counter));
    }

    fn ctr(&mut self) -> CryptoResult<&mut CtrEngine> {
        match &mut self.aes {
            AesState::Counter(engine) => Ok(engine),
            _ => Err(CryptoError::UninitializedKey),
        }
    }

    /// Returns the current counter.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::UninitializedKey`] outside counter mode.
    pub fn counter(&self) -> CryptoResult<Counter128> {
        match &self.aes {
            AesState::Counter(engine) => Ok(engine.counter()),
            _ => Err(CryptoError::UninitializedKey),
        }
    }

    /// Replaces the counter verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::UninitializedKey`] outside counter mode.
    pub fn set_counter(&mut self, counter: impl Into<Counter128>) -> CryptoResult<()> {
        self.ctr()?.set_counter(counter);
        Ok(())
    }

    /// Adds `carry` to the counter.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::UninitializedKey`] outside counter mode.
    pub fn add_counter(&mut self, carry: u8) -> CryptoResult<()> {
        self.ctr()?.add_counter(carry);
        Ok(())
    }

    /// Stores an IV next to the counter.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::UninitializedKey`] outside counter mode.
    pub fn set_iv(&mut self, iv: Block) -> CryptoResult<()> {
        self.ctr()?.set_iv(iv);
        Ok(())
    }

    /// See [`CtrEngine::crypt_block`].
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::UninitializedKey`] outside counter mode.
    pub fn crypt_block(&mut self, input: Option<&Block>) -> CryptoResult<Block> {
        Ok(self.ctr()?.crypt_block(input))
    }

    /// See [`CtrEngine::crypt_stream`].
    ///
    /// # Errors
    ///
    /// - [`CryptoError::UninitializedKey`] outside counter mode
    /// - [`CryptoError::InvalidInputSize`] if the buffers differ in length
    pub fn crypt_stream(&mut self, input: Option<&[u8]>, output: &mut [u8]) -> CryptoResult<()> {
        self.ctr()?.crypt_stream(input, output)
    }

    /// See [`CtrEngine::apply_keystream`].
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::UninitializedKey`] outside counter mode.
    pub fn apply_keystream(&mut self, buf: &mut [u8]) -> CryptoResult<()> {
        self.ctr()?.apply_keystream(buf);
        Ok(())
    }

    // =========================================================================
    // CBC
    // =========================================================================

    /// Switches the context to CBC encryption.
    pub fn init_cbc_encrypt(&mut self, key: &AesKey, iv: Block) {
        trace!("context initialized for CBC encryption");
        self.aes = AesState::Cbc(CbcEngine::init_encrypt(key, iv));
    }

    /// Switches the context to CBC decryption.
    pub fn init_cbc_decrypt(&mut self, key: &AesKey, iv: Block) {
        trace!("context initialized for CBC decryption");
        self.aes = AesState::Cbc(CbcEngine::init_decrypt(key, iv));
    }

    fn cbc(&mut self) -> CryptoResult<&mut CbcEngine> {
        match &mut self.aes {
            AesState::Cbc(engine) => Ok(engine),
            _ => Err(CryptoError::UninitializedKey),
        }
    }

    /// See [`CbcEngine::encrypt`].
    ///
    /// # Errors
    ///
    /// - [`CryptoError::UninitializedKey`] unless initialized for CBC encryption
    /// - [`CryptoError::InvalidInputSize`] for unaligned or mismatched buffers
    pub fn encrypt_cbc(&mut self, input: &[u8], output: &mut [u8]) -> CryptoResult<()> {
        self.cbc()?.encrypt(input, output)
    }

    /// See [`CbcEngine::decrypt`].
    ///
    /// # Errors
    ///
    /// - [`CryptoError::UninitializedKey`] unless initialized for CBC decryption
    /// - [`CryptoError::InvalidInputSize`] for unaligned or mismatched buffers
    pub fn decrypt_cbc(&mut self, input: &[u8], output: &mut [u8]) -> CryptoResult<()> {
        self.cbc()?.decrypt(input, output)
    }

    // =========================================================================
    // RSA
    // =========================================================================

    /// Loads `key` into the RSA sub-state.
    ///
    /// On failure the RSA sub-state is cleared, so later RSA calls fail with
    /// [`CryptoError::UninitializedKey`].
    ///
    /// # Errors
    ///
    /// See [`RsaContext::init`].
    #[cfg(feature = "rsa")]
    pub fn rsa_init(&mut self, key: &RsaKey2048) -> CryptoResult<()> {
        self.rsa = None;
        self.rsa = Some(RsaContext::init(key)?);
        Ok(())
    }

    /// Drops the RSA sub-state.
    #[cfg(feature = "rsa")]
    pub fn rsa_free(&mut self) {
        self.rsa = None;
    }

    #[cfg(feature = "rsa")]
    fn rsa(&self) -> CryptoResult<&RsaContext> {
        self.rsa.as_ref().ok_or(CryptoError::UninitializedKey)
    }

    /// Verifies a signature with the loaded RSA key.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::UninitializedKey`] if no RSA key is loaded.
    #[cfg(feature = "rsa")]
    pub fn rsa_verify_hash(
        &self,
        signature: &[u8; RSA_2048_SIZE],
        hash: &Digest,
    ) -> CryptoResult<bool> {
        match self.rsa()?.verify_hash(signature, hash) {
            Ok(()) => Ok(true),
            Err(CryptoError::PaddingOrDigestMismatch) => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Raw public transform with the loaded RSA key.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::UninitializedKey`] if no RSA key is loaded
    /// - [`CryptoError::MessageOutOfRange`] if `input` is not below N
    #[cfg(feature = "rsa")]
    pub fn rsa_public(&self, input: &[u8; RSA_2048_SIZE]) -> CryptoResult<[u8; RSA_2048_SIZE]> {
        self.rsa()?.raw_public(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_context_is_uninitialized() {
        let mut ctx = CryptoContext::new();
        let mut out = [0u8; 16];
        assert_eq!(
            ctx.crypt_stream(None, &mut out),
            Err(CryptoError::UninitializedKey)
        );
        assert_eq!(
            ctx.encrypt_cbc(&[0u8; 16], &mut out),
            Err(CryptoError::UninitializedKey)
        );
        assert_eq!(ctx.counter(), Err(CryptoError::UninitializedKey));
    }

    #[test]
    fn test_counter_mode_roundtrip() -> CryptoResult<()> {
        let key = AesKey::from([0x10u8; 16]);
        let plaintext: Vec<u8> = (0..100u8).collect();

        let mut ctx = CryptoContext::new();
        ctx.init_counter(&key, 7_u128);
        let mut ciphertext = vec![0u8; 100];
        ctx.crypt_stream(Some(&plaintext), &mut ciphertext)?;
        assert_eq!(ctx.counter()?, Counter128::from(14_u128));

        ctx.set_counter(7_u128)?;
        ctx.apply_keystream(&mut ciphertext)?;
        assert_eq!(ciphertext, plaintext);
        Ok(())
    }

    #[test]
    fn test_counter_operations() -> CryptoResult<()> {
        let mut ctx = CryptoContext::new();
        ctx.init_counter(&AesKey::from([0u8; 16]), [0xffu8; 16]);
        ctx.add_counter(1)?;
        assert_eq!(ctx.counter()?, Counter128::default());

        ctx.set_iv([1u8; 16])?;
        let first = ctx.crypt_block(None)?;
        ctx.set_counter(0_u128)?;
        assert_eq!(ctx.crypt_block(Some(&[0u8; 16]))?, first);
        Ok(())
    }

    #[test]
    fn test_cbc_roundtrip() -> CryptoResult<()> {
        let key = AesKey::from([0x20u8; 16]);
        let iv = [0x30u8; 16];
        let plaintext = [0x40u8; 64];

        let mut ctx = CryptoContext::new();
        ctx.init_cbc_encrypt(&key, iv);
        let mut ciphertext = [0u8; 64];
        ctx.encrypt_cbc(&plaintext, &mut ciphertext)?;

        ctx.init_cbc_decrypt(&key, iv);
        let mut decrypted = [0u8; 64];
        ctx.decrypt_cbc(&ciphertext, &mut decrypted)?;
        assert_eq!(decrypted, plaintext);
        Ok(())
    }

    #[test]
    fn test_mode_switch_replaces_state() {
        let key = AesKey::from([0u8; 16]);
        let mut ctx = CryptoContext::new();
        ctx.init_counter(&key, 0_u128);
        ctx.init_cbc_decrypt(&key, [0u8; 16]);

        let mut out = [0u8; 16];
        assert_eq!(
            ctx.crypt_stream(None, &mut out),
            Err(CryptoError::UninitializedKey)
        );
        assert_eq!(
            ctx.encrypt_cbc(&[0u8; 16], &mut out),
            Err(CryptoError::UninitializedKey)
        );
    }

    #[test]
    #[cfg(feature = "rsa")]
    fn test_rsa_without_key() {
        let ctx = CryptoContext::new();
        assert_eq!(
            ctx.rsa_verify_hash(&[0u8; 256], &[0u8; 32]),
            Err(CryptoError::UninitializedKey)
        );
        assert_eq!(
            ctx.rsa_public(&[0u8; 256]),
            Err(CryptoError::UninitializedKey)
        );
    }

    #[test]
    #[cfg(feature = "rsa")]
    fn test_failed_rsa_init_leaves_context_unusable() {
        let mut ctx = CryptoContext::new();
        assert_eq!(
            ctx.rsa_init(&RsaKey2048::invalid()),
            Err(CryptoError::UninitializedKey)
        );
        assert_eq!(
            ctx.rsa_public(&[0u8; 256]),
            Err(CryptoError::UninitializedKey)
        );
    }

    #[test]
    #[cfg(feature = "rsa")]
    fn test_rsa_verify_through_context() -> CryptoResult<()> {
        use crate::core::operations::hash::sha256;
        use crate::core::operations::rsa::test_keys::reference_record;
        use crate::core::operations::rsa::RsaContext;

        let hash = sha256(b"tmd");
        let signature = RsaContext::init(reference_record())?.sign_hash(&hash)?;

        let mut ctx = CryptoContext::new();
        ctx.rsa_init(reference_record())?;
        assert!(ctx.rsa_verify_hash(&signature, &hash)?);

        let mut tampered = signature;
        tampered[200] ^= 0x04;
        assert!(!ctx.rsa_verify_hash(&tampered, &hash)?);

        ctx.rsa_free();
        assert_eq!(
            ctx.rsa_verify_hash(&signature, &hash),
            Err(CryptoError::UninitializedKey)
        );
        Ok(())
    }

    #[test]
    #[cfg(feature = "rsa")]
    fn test_rsa_init_rejects_malformed_modulus() {
        let mut ctx = CryptoContext::new();
        let key = RsaKey2048::public([0u8; 256], &[3]);
        assert_eq!(ctx.rsa_init(&key), Err(CryptoError::KeyValidationFailed));
    }
}
