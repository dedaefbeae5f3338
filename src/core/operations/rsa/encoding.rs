//! Big-endian conversions between byte buffers and big integers.

use rsa::BigUint;
use zeroize::Zeroizing;

use crate::core::error::{CryptoError, CryptoResult};

/// Octet string to integer (big-endian).
#[must_use]
pub fn os2ip(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}

/// Integer to a fixed-width big-endian octet string, left-padded with zeros.
///
/// # Errors
///
/// Returns [`CryptoError::MessageOutOfRange`] if `value` needs more than `N` bytes.
pub fn i2osp<const N: usize>(value: &BigUint) -> CryptoResult<[u8; N]> {
    let raw = Zeroizing::new(value.to_bytes_be());
    // to_bytes_be() of zero is a single 0x00 byte
    let significant = match raw.iter().position(|&b| b != 0) {
        Some(start) => &raw[start..],
        None => &[][..],
    };
    if significant.len() > N {
        return Err(CryptoError::MessageOutOfRange);
    }

    let mut out = [0u8; N];
    out[N - significant.len()..].copy_from_slice(significant);
    Ok(out)
}
