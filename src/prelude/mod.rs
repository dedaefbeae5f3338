//! Ergonomic layer for context construction.
//!
//! # Usage
//!
//! ```rust
//! use ctr_crypto::prelude::*;
//! ```

mod builders;

pub use builders::CryptoContextBuilder;

// Re-export core types for convenience
pub use crate::core::context::CryptoContext;
pub use crate::core::error::{CryptoError, CryptoResult};
pub use crate::core::operations::block::Direction;
pub use crate::core::operations::hash::{sha256, Sha256Stream};
pub use crate::core::types::{AesKey, Block, Counter128, Digest, RsaKey2048};

#[cfg(feature = "rsa")]
pub use crate::core::operations::rsa::{raw_public, verify_hash, RsaContext};
