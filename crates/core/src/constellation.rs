//! Offset and residue validation.

use num_bigint::BigUint;

use crate::base::PrimeBase;
use crate::error::{PowError, Result};
use crate::params::{CONSTELLATION_RESIDUE, MAX_BOUNDED_TRAILING_ZEROS, PRIMORIAL};

/// Combine a prime base with a claimed offset into the constellation candidate.
///
/// Checks run in order and stop at the first failure:
/// 1. the offset must fit in the trailing zeros (when fewer than 256);
/// 2. the candidate must be 97 mod 210.
pub fn validate(base: &PrimeBase, offset: &BigUint) -> Result<BigUint> {
    let trailing_zeros = base.trailing_zeros;

    if trailing_zeros < MAX_BOUNDED_TRAILING_ZEROS && offset.bits() > u64::from(trailing_zeros) {
        return Err(PowError::OffsetTooLarge { trailing_zeros });
    }

    let candidate = base.shifted() + offset;

    let residue = residue_mod_primorial(&candidate);
    if residue != CONSTELLATION_RESIDUE {
        return Err(PowError::InvalidResidue { residue });
    }

    Ok(candidate)
}

/// `n mod 210`
pub fn residue_mod_primorial(n: &BigUint) -> u32 {
    (n % PRIMORIAL).iter_u32_digits().next().unwrap_or(0)
}
