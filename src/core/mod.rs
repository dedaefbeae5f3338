//! Core types and operations.
//!
//! - [`error`] - Error types
//! - [`types`] - Keys, counters and RSA key records
//! - [`operations`] - Block cipher modes, hashing and RSA
//! - [`context`] - The aggregate context handed to container parsers

pub mod context;
pub mod error;
pub mod operations;
pub mod types;

// Re-export commonly used items
pub use context::CryptoContext;
pub use error::{CryptoError, CryptoResult};
