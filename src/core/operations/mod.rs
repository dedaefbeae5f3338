//! Cryptographic operations.
//!
//! - [`block`] - AES-128 ECB primitive
//! - [`ctr`] - counter mode
//! - [`cbc`] - CBC mode
//! - [`hash`] - SHA-256
//! - [`rsa`] - RSA-2048 PKCS#1 v1.5 verification and raw transforms

pub mod block;
pub mod cbc;
pub mod ctr;
pub mod hash;

#[cfg(feature = "rsa")]
pub mod rsa;
