//! Parallel verification of independent headers.

use rayon::prelude::*;

use crate::error::Result;
use crate::header::BlockHeader;
use crate::primality::PrimalityOracle;
use crate::verify::{Verified, Verifier};

/// Verify every header (using its own offset) on the rayon pool.
///
/// Results are returned in input order.
pub fn verify_batch<O>(verifier: &Verifier<O>, headers: &[BlockHeader]) -> Vec<Result<Verified>>
where
    O: PrimalityOracle + Sync,
{
    headers
        .par_iter()
        .map(|header| verifier.verify_header(header))
        .collect()
}
