//! End-to-end proof-of-work verification.

use num_bigint::BigUint;

use crate::base::PrimeBase;
use crate::chain::verify_chain;
use crate::constellation::validate;
use crate::diagnostic::{Diagnostic, DiagnosticOptions};
use crate::error::Result;
use crate::header::{BlockHeader, PowHash};
use crate::primality::{MillerRabin, PrimalityOracle};

/// A proof-of-work that passed every check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verified {
    /// Header PoW hash
    pub pow_hash: PowHash,
    /// Prime base derived from the hash and bits
    pub base: PrimeBase,
    /// First member of the prime constellation
    pub candidate: BigUint,
}

/// Verifies block proofs of work against a primality oracle.
///
/// Holds no mutable state: one verifier can be shared across threads and
/// the same input always yields the same result.
#[derive(Debug, Clone, Default)]
pub struct Verifier<O = MillerRabin> {
    oracle: O,
}

impl Verifier<MillerRabin> {
    /// Verifier backed by reproducible Miller-Rabin.
    pub fn new() -> Self {
        Self::with_oracle(MillerRabin)
    }
}

impl<O: PrimalityOracle> Verifier<O> {
    /// Verifier backed by a custom oracle.
    pub fn with_oracle(oracle: O) -> Self {
        Self { oracle }
    }

    /// The oracle used for the primality chain.
    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Verify `header` with an explicit `offset`.
    ///
    /// Stages: hash, prime base, offset/residue validation, primality chain.
    /// The first failing stage's error is returned unchanged.
    pub fn verify(&self, header: &BlockHeader, offset: &BigUint) -> Result<Verified> {
        let pow_hash = header.pow_hash()?;
        let compact = header.compact_bits()?;
        log::debug!("pow hash {} bits {:#010x}", pow_hash, compact);

        let base = PrimeBase::generate(&pow_hash.to_biguint(), compact);
        let candidate = validate(&base, offset)?;
        log::debug!("candidate has {} bits", candidate.bits());

        verify_chain(&candidate, &self.oracle)?;

        Ok(Verified {
            pow_hash,
            base,
            candidate,
        })
    }

    /// Verify `header` using its own `nOffset` field.
    pub fn verify_header(&self, header: &BlockHeader) -> Result<Verified> {
        let offset = header.pow_offset()?;
        self.verify(header, &offset)
    }

    /// Trace the verification of `header` line by line.
    pub fn diagnose(&self, header: &BlockHeader, options: DiagnosticOptions) -> Diagnostic<'_, O> {
        Diagnostic::new(header, &self.oracle, options)
    }

    /// Trace the verification of `header` with an explicit `offset`.
    pub fn diagnose_with_offset(
        &self,
        header: &BlockHeader,
        offset: BigUint,
        options: DiagnosticOptions,
    ) -> Diagnostic<'_, O> {
        Diagnostic::with_offset(header, offset, &self.oracle, options)
    }
}

/// Verify a header's proof-of-work with the default oracle.
///
/// ```rust,no_run
/// use riepow_core::{verify, BlockHeader};
///
/// # fn header() -> BlockHeader { unimplemented!() }
/// match verify(&header()) {
///     Ok(proof) => println!("valid, n = {}", proof.candidate),
///     Err(e) => println!("rejected: {}", e),
/// }
/// ```
pub fn verify(header: &BlockHeader) -> Result<Verified> {
    Verifier::new().verify_header(header)
}
