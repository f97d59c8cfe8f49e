//! Prime base construction from a header hash.

use num_bigint::BigUint;
use num_traits::One;

use crate::compact::decode_compact;
use crate::params::{HASH_BITS, SIGNIFICANT_DIGITS, ZEROES_BEFORE_HASH_IN_PRIME};

/// The hash-derived high part of every candidate.
///
/// `base` is stored un-shifted; candidates are `(base << trailing_zeros) + offset`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimeBase {
    /// Leading one, zero prefix and bit-reversed hash (265 bits)
    pub base: BigUint,
    /// Free low bits available to the offset
    pub trailing_zeros: u32,
}

impl PrimeBase {
    /// Build the prime base for `hash` under the compact target `compact`.
    ///
    /// Hash bits are inserted least significant first, so the hash appears
    /// bit-reversed above the zero prefix. When the decoded target is shorter
    /// than the significant digits there are no trailing zeros.
    pub fn generate(hash: &BigUint, compact: u32) -> Self {
        let mut base = BigUint::one() << ZEROES_BEFORE_HASH_IN_PRIME;
        for bit in 0..u64::from(HASH_BITS) {
            base <<= 1u32;
            if hash.bit(bit) {
                base.set_bit(0, true);
            }
        }

        let target_bits = decode_compact(compact);
        let trailing_zeros = target_bits.saturating_sub(SIGNIFICANT_DIGITS);

        log::debug!(
            "prime base: compact {:#010x} -> {} bits, {} trailing zeros",
            compact,
            target_bits,
            trailing_zeros
        );

        PrimeBase {
            base,
            trailing_zeros,
        }
    }

    /// The base moved above its trailing zeros.
    pub fn shifted(&self) -> BigUint {
        &self.base << self.trailing_zeros
    }
}
