//! Cryptographic context for console firmware containers.
//!
//! Container parsers (NCSD, NCCH, CIA, ExeFS, RomFS) need a small set of
//! primitives with exact, byte-compatible semantics:
//!
//! - AES-128 counter mode over a full 128-bit big-endian counter
//! - AES-128 CBC with IV chaining across calls
//! - SHA-256
//! - RSA-2048 PKCS#1 v1.5 signature verification and raw public transform
//!
//! This crate packages them behind a single [`CryptoContext`].
//!
//! # Quick Start
//!
//! ```rust
//! use ctr_crypto::core::context::CryptoContext;
//! use ctr_crypto::core::types::AesKey;
//!
//! let key = AesKey::from([0x00u8; 16]);
//! let mut ctx = CryptoContext::new();
//! ctx.init_counter(&key, [0u8; 16]);
//!
//! let mut keystream = [0u8; 16];
//! ctx.crypt_stream(None, &mut keystream).expect("counter mode");
//! assert_eq!(keystream[0], 0x66);
//! ```
//!
//! # Counter Semantics
//!
//! The counter is a single 128-bit big-endian integer. Every block,
//! including a final partial one, consumes exactly one increment, and the
//! carry runs across all sixteen bytes. The value wraps modulo 2^128.
//!
//! # Features
//!
//! ```toml
//! [dependencies]
//! ctr-crypto = "0.1"                                   # AES, SHA-256, RSA
//! ctr-crypto = { version = "0.1", default-features = false }  # no RSA
//! ctr-crypto = { version = "0.1", features = ["prelude"] }    # builder
//! ```
//!
//! # Security
//!
//! - Key material is zeroized on drop
//! - Debug output redacts key material
//! - Signature digests are compared in constant time
//! - No unsafe code
//!
//! RSA exponentiation is not constant time. The crate only verifies
//! signatures in production paths; `sign_hash` exists for test fixtures.
//!
//! # Modules
//!
//! - [`core`] - Core types and operations
//! - [`prelude`] - Ergonomic imports (requires `prelude` feature)

pub mod core;

#[cfg(feature = "prelude")]
pub mod prelude;

// Re-export commonly used items at crate root
pub use crate::core::context::CryptoContext;
pub use crate::core::error::{CryptoError, CryptoResult};
pub use crate::core::types::{AesKey, Block, Counter128, Digest, RsaKey2048};
