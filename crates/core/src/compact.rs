//! Compact "bits" decoding.
//!
//! The compact format packs a whole number into 32 bits like a tiny float:
//!
//! ```text
//! bits = [exponent (8 bits)][sign (1 bit)][mantissa (23 bits)]
//! ```
//!
//! For Riecoin the decoded value is not a hash target but the total bit length
//! of the prime base, so only the magnitude matters and the sign bit is dropped.

/// Mantissa mask (sign bit excluded)
const MANTISSA_MASK: u32 = 0x007F_FFFF;

/// Decode a compact value into the bit-length budget of a prime base.
///
/// The exponent selects how many whole bytes are shifted off the mantissa:
/// `3 - exponent` for exponents up to 3, `exponent - 3` above. This is total:
/// shifts of 32 bits or more decode to zero.
///
/// ```rust
/// use riepow_core::decode_compact;
///
/// assert_eq!(decode_compact(33869056), 205 + (4 << 8));
/// ```
pub fn decode_compact(compact: u32) -> u32 {
    let exponent = compact >> 24;
    let shift_bytes = if exponent <= 3 {
        3 - exponent
    } else {
        exponent - 3
    };

    (compact & MANTISSA_MASK)
        .checked_shr(shift_bytes * 8)
        .unwrap_or(0)
}
