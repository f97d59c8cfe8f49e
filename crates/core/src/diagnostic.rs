//! Human-readable verification trace.
//!
//! [`Diagnostic`] runs the same stages as [`Verifier::verify`] but reports
//! each intermediate value as a line of text instead of stopping silently.
//! Lines are produced lazily; the expensive parts (factoring the base and
//! the primality chain) only run as the caller pulls lines.
//!
//! [`Verifier::verify`]: crate::Verifier::verify

use std::collections::VecDeque;
use std::time::Duration;

use num_bigint::BigUint;

use crate::base::PrimeBase;
use crate::chain::{ChainWalk, Pass};
use crate::compact::decode_compact;
use crate::constellation::validate;
use crate::error::{PowError, Result};
use crate::factor::{Factor, Factorizer};
use crate::header::BlockHeader;
use crate::primality::PrimalityOracle;

/// Controls the optional factorization of the prime base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticOptions {
    /// Wall-clock budget for factoring the base, `None` to skip it
    pub factor_budget: Option<Duration>,
    /// Largest trial divisor
    pub factor_limit: u64,
}

impl Default for DiagnosticOptions {
    fn default() -> Self {
        Self {
            factor_budget: Some(Duration::from_secs(3)),
            factor_limit: 1 << 32,
        }
    }
}

enum Stage<'a, O> {
    Start,
    Factoring(Factorizer<'a, O>),
    Validate,
    Chain(ChainWalk<'a, O>),
    Done,
}

/// Lazy stream of diagnostic lines for one header.
pub struct Diagnostic<'a, O> {
    header: BlockHeader,
    offset: Option<BigUint>,
    oracle: &'a O,
    options: DiagnosticOptions,
    base: Option<PrimeBase>,
    stage: Stage<'a, O>,
    pending: VecDeque<String>,
    outcome: Option<Result<()>>,
}

impl<'a, O: PrimalityOracle> Diagnostic<'a, O> {
    /// Trace `header` using its own `nOffset`.
    pub fn new(header: &BlockHeader, oracle: &'a O, options: DiagnosticOptions) -> Self {
        Self {
            header: header.clone(),
            offset: None,
            oracle,
            options,
            base: None,
            stage: Stage::Start,
            pending: VecDeque::new(),
            outcome: None,
        }
    }

    /// Trace `header` with an explicit offset.
    pub fn with_offset(
        header: &BlockHeader,
        offset: BigUint,
        oracle: &'a O,
        options: DiagnosticOptions,
    ) -> Self {
        let mut diagnostic = Self::new(header, oracle, options);
        diagnostic.offset = Some(offset);
        diagnostic
    }

    /// Final verdict, available once the stream is exhausted.
    pub fn outcome(&self) -> Option<&Result<()>> {
        self.outcome.as_ref()
    }

    fn fail(&mut self, err: PowError) {
        self.pending.push_back(format!("failed: {}", err));
        self.outcome = Some(Err(err));
        self.stage = Stage::Done;
    }

    fn start(&mut self) -> Result<()> {
        if self.offset.is_none() {
            self.offset = Some(self.header.pow_offset()?);
        }
        let pow_hash = self.header.pow_hash()?;
        let compact = self.header.compact_bits()?;
        let base = PrimeBase::generate(&pow_hash.to_biguint(), compact);

        self.pending.push_back(format!("pow hash: {}", pow_hash));
        self.pending.push_back(format!(
            "bits: {:#010x} -> {} bits, {} trailing zeros",
            compact,
            decode_compact(compact),
            base.trailing_zeros
        ));
        self.pending.push_back(format!("prime base: {:#x}", base.base));

        self.stage = match self.options.factor_budget {
            Some(budget) => Stage::Factoring(Factorizer::new(
                &base.base,
                budget,
                self.options.factor_limit,
                self.oracle,
            )),
            None => Stage::Validate,
        };
        self.base = Some(base);
        Ok(())
    }

    fn validate(&mut self) -> Result<()> {
        let Some(offset) = self.offset.take() else {
            return Err(PowError::malformed("nOffset", "offset was not parsed"));
        };
        let Some(base) = self.base.as_ref() else {
            return Err(PowError::malformed("bits", "prime base was not built"));
        };

        let candidate = validate(base, &offset)?;
        self.pending.push_back(format!("offset: {:#x}", offset));
        self.pending.push_back(format!("n = {}", candidate));
        self.stage = Stage::Chain(ChainWalk::new(candidate, self.oracle));
        Ok(())
    }

    fn advance(&mut self) {
        match core::mem::replace(&mut self.stage, Stage::Done) {
            Stage::Start => {
                if let Err(e) = self.start() {
                    self.fail(e);
                }
            }
            Stage::Factoring(mut factors) => match factors.next() {
                Some(factor) => {
                    self.pending.push_back(match factor {
                        Factor::Prime(p) => format!("base factor: {}", p),
                        Factor::ProbablePrime(n) => format!("base factor: {} (probable prime)", n),
                        Factor::Abandoned(n) => {
                            format!("base factor: {} (unfactored, budget exhausted)", n)
                        }
                    });
                    self.stage = Stage::Factoring(factors);
                }
                None => self.stage = Stage::Validate,
            },
            Stage::Validate => {
                if let Err(e) = self.validate() {
                    self.fail(e);
                }
            }
            Stage::Chain(mut walk) => match walk.next() {
                Some(Ok(confirmation)) => {
                    let pass = match confirmation.pass {
                        Pass::Before => "",
                        Pass::After => " again",
                    };
                    self.pending.push_back(format!(
                        "n+{} = {} is prime{} ({} rounds)",
                        confirmation.offset, confirmation.value, pass, confirmation.rounds
                    ));
                    self.stage = Stage::Chain(walk);
                }
                Some(Err(e)) => self.fail(e),
                None => {
                    self.pending.push_back("success: proof of work is valid".to_string());
                    self.outcome = Some(Ok(()));
                }
            },
            Stage::Done => {}
        }
    }
}

impl<O: PrimalityOracle> Iterator for Diagnostic<'_, O> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            if let Some(line) = self.pending.pop_front() {
                return Some(line);
            }
            if matches!(self.stage, Stage::Done) {
                return None;
            }
            self.advance();
        }
    }
}
