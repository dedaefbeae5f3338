//! Loading RSA keys the way container tools receive them: raw big-endian
//! fields, sometimes with the CRT values missing.

#![cfg(feature = "rsa")]
#![allow(clippy::expect_used, clippy::panic, clippy::unwrap_used)]

use std::sync::OnceLock;

use ctr_crypto::core::operations::hash::sha256;
use ctr_crypto::core::operations::rsa::{i2osp, raw_public, verify_hash, RsaContext};
use ctr_crypto::{CryptoContext, CryptoError, RsaKey2048};
use rsa::traits::{PrivateKeyParts, PublicKeyParts};
use rsa::{Pkcs1v15Sign, RsaPrivateKey};
use sha2::Sha256;

fn reference_key() -> &'static RsaPrivateKey {
    static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
    KEY.get_or_init(|| {
        RsaPrivateKey::new(&mut rand::thread_rng(), 2048).expect("key generation")
    })
}

fn sign(hash: &[u8; 32]) -> [u8; 256] {
    reference_key()
        .sign(Pkcs1v15Sign::new::<Sha256>(), hash)
        .expect("reference signing")
        .try_into()
        .expect("256-byte signature")
}

/// Key record completed from N, E, D, P and Q only.
fn derived_record() -> RsaKey2048 {
    let key = reference_key();
    let n: [u8; 256] = i2osp(key.n()).expect("n fits");
    let d: [u8; 256] = i2osp(key.d()).expect("d fits");
    let p: [u8; 128] = i2osp(&key.primes()[0]).expect("p fits");
    let q: [u8; 128] = i2osp(&key.primes()[1]).expect("q fits");

    let mut ctx = RsaContext::from_private_parts(&n, &key.e().to_bytes_be(), &d, &p, &q)
        .expect("public half is well formed");
    ctx.derive_crt_parameters().expect("p and q are coprime");
    ctx.to_key().expect("fields fit")
}

#[test]
fn test_derived_record_verifies_reference_signature() {
    let hash = sha256(b"ncch exheader access descriptor");
    let signature = sign(&hash);
    let record = derived_record();

    assert!(verify_hash(&signature, &hash, &record).expect("valid key"));

    let mut ctx = CryptoContext::new();
    ctx.rsa_init(&record).expect("derived record passes validation");
    assert!(ctx.rsa_verify_hash(&signature, &hash).expect("key loaded"));
}

#[test]
fn test_derived_record_signs_like_reference() {
    let hash = sha256(b"tmd content chunk records");
    let ours = RsaContext::init(&derived_record())
        .expect("valid key")
        .sign_hash(&hash)
        .expect("private key");
    assert_eq!(ours, sign(&hash));
}

#[test]
fn test_public_record_from_modulus_and_exponent() {
    let key = reference_key();
    let n: [u8; 256] = i2osp(key.n()).expect("n fits");
    let record = RsaKey2048::public(n, &key.e().to_bytes_be());

    let hash = sha256(b"certificate body");
    let signature = sign(&hash);
    assert!(verify_hash(&signature, &hash, &record).expect("valid key"));

    let mut other = hash;
    other[31] ^= 1;
    assert!(!verify_hash(&signature, &other, &record).expect("valid key"));

    // The raw transform exposes the padded block
    let em = raw_public(&signature, &record).expect("signature below N");
    assert_eq!(&em[..2], &[0x00, 0x01]);
    assert_eq!(&em[256 - 32..], &hash[..]);
}

#[test]
fn test_tampered_crt_field_rejected() {
    let mut record = derived_record();
    record.dq[127] ^= 0x02;

    let mut ctx = CryptoContext::new();
    assert_eq!(ctx.rsa_init(&record), Err(CryptoError::KeyValidationFailed));
    assert_eq!(
        ctx.rsa_verify_hash(&[0u8; 256], &[0u8; 32]),
        Err(CryptoError::UninitializedKey)
    );
}
