//! Verification failures

use thiserror::Error;

/// Why a block's proof-of-work was rejected.
///
/// Every variant is terminal for the verification that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PowError {
    /// A header field could not be decoded or has the wrong width
    #[error("malformed header field `{field}`: {reason}")]
    MalformedHeader {
        field: &'static str,
        reason: String,
    },

    /// The offset does not fit in the trailing-zero budget
    #[error("offset does not fit in {trailing_zeros} trailing zero bits")]
    OffsetTooLarge { trailing_zeros: u32 },

    /// The candidate is not congruent to 97 modulo 210
    #[error("candidate is {residue} mod 210, expected 97")]
    InvalidResidue { residue: u32 },

    /// The constellation member at this offset is composite
    #[error("n+{0} is not prime")]
    NotPrimeAt(u32),
}

impl PowError {
    pub(crate) fn malformed(field: &'static str, reason: impl Into<String>) -> Self {
        PowError::MalformedHeader {
            field,
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = core::result::Result<T, PowError>;
