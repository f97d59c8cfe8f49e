//! Batch verification on a dedicated thread pool

use anyhow::Result;
use riepow_core::{BlockHeader, PowError, Verified, Verifier, verify_batch};

/// Outcome of verifying a list of headers
#[derive(Debug)]
pub struct BatchReport {
    /// Per-header results, in input order
    pub results: Vec<Result<Verified, PowError>>,
}

impl BatchReport {
    /// Number of valid proofs
    pub fn valid(&self) -> usize {
        self.results.iter().filter(|r| r.is_ok()).count()
    }

    /// Number of rejected proofs
    pub fn invalid(&self) -> usize {
        self.results.len() - self.valid()
    }

    /// Whether every header verified
    pub fn all_valid(&self) -> bool {
        self.invalid() == 0
    }
}

/// Verify `headers` using `threads` workers
pub fn run_batch(headers: &[BlockHeader], threads: usize) -> Result<BatchReport> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads.max(1))
        .build()?;

    let verifier = Verifier::new();
    let results = pool.install(|| verify_batch(&verifier, headers));

    let report = BatchReport { results };
    log::info!(
        "batch of {} headers: {} valid, {} invalid",
        headers.len(),
        report.valid(),
        report.invalid()
    );
    Ok(report)
}
