//! Test vector types for the known-answer suites in `tests/vectors/`.
//!
//! The AES suites come from NIST SP 800-38A appendix F, the SHA-256 suite
//! from FIPS 180-2 appendix B. Extra cases cover counter carry, wraparound
//! and length errors.

// Some fields are only read by a subset of tests
#![allow(dead_code)]

use serde::Deserialize;

/// A test vector suite (top-level JSON structure).
#[derive(Debug, Deserialize)]
pub struct TestVectorSuite<T> {
    pub name: String,
    pub tests: Vec<T>,
}

/// Test vector for AES-128 counter mode.
#[derive(Debug, Deserialize)]
pub struct CtrTestVector {
    pub name: String,
    #[serde(rename = "expect-fail")]
    pub expect_fail: bool,
    #[serde(default)]
    pub comment: Option<String>,
    /// Hex-encoded AES key
    pub key: String,
    /// Hex-encoded initial counter block
    pub counter: String,
    /// Hex-encoded input (null for a keystream-only test)
    pub plaintext: Option<String>,
    /// Hex-encoded output; its length sizes the output buffer
    pub ciphertext: String,
    /// Hex-encoded counter after the call (null for fail tests)
    #[serde(rename = "final-counter")]
    pub final_counter: Option<String>,
}

/// Test vector for AES-128 CBC.
#[derive(Debug, Deserialize)]
pub struct CbcTestVector {
    pub name: String,
    #[serde(rename = "expect-fail")]
    pub expect_fail: bool,
    #[serde(default)]
    pub comment: Option<String>,
    /// Hex-encoded AES key
    pub key: String,
    /// Hex-encoded initialization vector
    pub iv: String,
    /// Hex-encoded plaintext
    pub plaintext: String,
    /// Hex-encoded ciphertext (null for fail tests)
    pub ciphertext: Option<String>,
}

/// Test vector for SHA-256.
#[derive(Debug, Deserialize)]
pub struct Sha256TestVector {
    pub name: String,
    #[serde(default)]
    pub comment: Option<String>,
    /// Hex-encoded message
    pub message: String,
    /// Number of times the message is repeated (defaults to once)
    #[serde(default)]
    pub repeat: Option<usize>,
    /// Hex-encoded expected digest
    pub digest: String,
}

// =============================================================================
// Helper functions
// =============================================================================

/// Decode a hex string to bytes.
/// Returns `None` if the string is not valid hex.
pub fn hex_decode(s: &str) -> Option<Vec<u8>> {
    hex::decode(s).ok()
}

/// Decode a hex string into a 16-byte block, panicking with the test name.
pub fn hex_block(s: &str, test: &str) -> [u8; 16] {
    hex_decode(s)
        .and_then(|bytes| bytes.try_into().ok())
        .unwrap_or_else(|| panic!("Test '{test}': expected 16 hex-encoded bytes, got {s:?}"))
}

/// Load a test vector suite from a JSON file.
pub fn load_vectors<T: serde::de::DeserializeOwned>(path: &str) -> TestVectorSuite<T> {
    let content = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read test vector file {path}: {e}"));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse test vector file {path}: {e}"))
}
