//! `Counter128` - 128-bit big-endian counter block.

use core::fmt::{self, Debug};

/// Size of a counter (and of an AES block) in bytes.
pub const COUNTER_SIZE: usize = 16;

/// A 16-byte big-endian counter, arithmetic modulo 2^128.
///
/// Any byte pattern is a valid counter. Overflow past byte 0 wraps
/// silently.
///
/// # Example
///
/// ```rust
/// use ctr_crypto::core::types::Counter128;
///
/// let mut ctr = Counter128::from([0xff; 16]);
/// ctr.add(1);
/// assert_eq!(ctr.as_bytes(), &[0u8; 16]);
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Counter128([u8; COUNTER_SIZE]);

impl Counter128 {
    /// Creates a counter from its big-endian byte representation.
    #[must_use]
    pub const fn new(bytes: [u8; COUNTER_SIZE]) -> Self {
        Self(bytes)
    }

    /// Returns the big-endian bytes of the counter.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; COUNTER_SIZE] {
        &self.0
    }

    /// Replaces the counter value verbatim.
    pub fn set(&mut self, bytes: [u8; COUNTER_SIZE]) {
        self.0 = bytes;
    }

    /// Adds `carry` to the counter.
    ///
    /// The carry enters at byte 15 and propagates toward byte 0. A carry
    /// out of byte 0 is dropped.
    pub fn add(&mut self, carry: u8) {
        let mut carry = carry;
        for byte in self.0.iter_mut().rev() {
            let (sum, overflow) = byte.overflowing_add(carry);
            *byte = sum;
            carry = u8::from(overflow);
        }
    }

    /// Advances the counter by `blocks` in one step.
    ///
    /// Equivalent to calling [`add`](Self::add) with 1 `blocks` times. Useful
    /// for re-deriving the counter of a block at a known byte offset.
    pub fn add_blocks(&mut self, blocks: u128) {
        let value = u128::from_be_bytes(self.0).wrapping_add(blocks);
        self.0 = value.to_be_bytes();
    }

    /// Returns the counter that is `blocks` ahead of this one.
    #[must_use]
    pub fn advanced_by(mut self, blocks: u128) -> Self {
        self.add_blocks(blocks);
        self
    }
}

impl From<[u8; COUNTER_SIZE]> for Counter128 {
    fn from(bytes: [u8; COUNTER_SIZE]) -> Self {
        Self::new(bytes)
    }
}

impl From<Counter128> for [u8; COUNTER_SIZE] {
    fn from(ctr: Counter128) -> Self {
        ctr.0
    }
}

impl From<u128> for Counter128 {
    fn from(value: u128) -> Self {
        Self(value.to_be_bytes())
    }
}

impl AsRef<[u8]> for Counter128 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Debug for Counter128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Counter128(")?;
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: [u8; 16] = [
        0xf0, 0xf1, 0xf2, 0xf3, 0xf4, 0xf5, 0xf6, 0xf7, 0xf8, 0xf9, 0xfa, 0xfb, 0xfc, 0xfd, 0xfe,
        0xff,
    ];

    #[test]
    fn test_add_zero_is_identity() {
        for seed in [[0u8; 16], [0xff; 16], SAMPLE] {
            let mut ctr = Counter128::from(seed);
            ctr.add(0);
            assert_eq!(ctr.as_bytes(), &seed);
        }
    }

    #[test]
    fn test_add_one_repeated_matches_bulk_add() {
        for seed in [[0u8; 16], [0xff; 16], SAMPLE, [0x7f; 16]] {
            let mut stepped = Counter128::from(seed);
            for _ in 0..256 {
                stepped.add(1);
            }

            let bulk = Counter128::from(seed).advanced_by(256);
            assert_eq!(stepped, bulk);
            assert_eq!(
                u128::from_be_bytes(*stepped.as_bytes()),
                u128::from_be_bytes(seed).wrapping_add(256)
            );
        }
    }

    #[test]
    fn test_wraparound() {
        let mut ctr = Counter128::from([0xff; 16]);
        ctr.add(1);
        assert_eq!(ctr.as_bytes(), &[0u8; 16]);
    }

    #[test]
    fn test_carry_propagates_across_bytes() {
        let mut ctr = Counter128::from(SAMPLE);
        ctr.add(1);
        let mut expected = SAMPLE;
        expected[15] = 0x00;
        expected[14] = 0xff;
        assert_eq!(ctr.as_bytes(), &expected);

        let mut ctr = Counter128::from(0x00ff_ffff_u128);
        ctr.add(1);
        assert_eq!(ctr, Counter128::from(0x0100_0000_u128));
    }

    #[test]
    fn test_add_arbitrary_byte() {
        let mut ctr = Counter128::from(0xf0_u128);
        ctr.add(0x20);
        assert_eq!(ctr, Counter128::from(0x110_u128));

        let mut ctr = Counter128::from([0xff; 16]);
        ctr.add(0xff);
        assert_eq!(ctr, Counter128::from(0xfe_u128));
    }

    #[test]
    fn test_set_replaces_verbatim() {
        let mut ctr = Counter128::default();
        ctr.set(SAMPLE);
        assert_eq!(ctr.as_bytes(), &SAMPLE);
    }

    #[test]
    fn test_debug_is_hex() {
        let ctr = Counter128::from(1_u128);
        assert_eq!(
            format!("{ctr:?}"),
            "Counter128(00000000000000000000000000000001)"
        );
    }
}
