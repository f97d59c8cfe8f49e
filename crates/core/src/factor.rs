//! Time-boxed trial factorization for diagnostics.

use std::time::{Duration, Instant};

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::primality::PrimalityOracle;

/// Rounds used to decide that a remaining cofactor is prime
const COFACTOR_ROUNDS: u32 = 10;

/// One term of a (possibly partial) factorization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Factor {
    /// A prime found by trial division
    Prime(u64),
    /// The remaining cofactor, judged prime by the oracle
    ProbablePrime(BigUint),
    /// Budget ran out; this part is left unfactored
    Abandoned(BigUint),
}

/// Lazy trial factorization bounded by a deadline and a divisor limit.
///
/// Yields factors in ascending order; repeated factors are yielded once per
/// multiplicity. Factoring is informational only, so running out of time is
/// not an error.
pub struct Factorizer<'a, O> {
    remaining: BigUint,
    divisor: u64,
    limit: u64,
    deadline: Instant,
    oracle: &'a O,
    recheck: bool,
}

impl<'a, O: PrimalityOracle> Factorizer<'a, O> {
    pub fn new(n: &BigUint, budget: Duration, limit: u64, oracle: &'a O) -> Self {
        Self {
            remaining: n.clone(),
            divisor: 2,
            limit,
            deadline: Instant::now() + budget,
            oracle,
            recheck: true,
        }
    }

    fn finish(&mut self) -> BigUint {
        core::mem::replace(&mut self.remaining, BigUint::one())
    }

    fn advance(&mut self) {
        self.divisor = if self.divisor == 2 { 3 } else { self.divisor + 2 };
    }
}

impl<O: PrimalityOracle> Iterator for Factorizer<'_, O> {
    type Item = Factor;

    fn next(&mut self) -> Option<Factor> {
        // Zero has no factorization.
        if self.remaining.is_zero() {
            return None;
        }

        loop {
            if self.remaining.is_one() {
                return None;
            }

            if self.recheck {
                self.recheck = false;
                if self.oracle.is_probably_prime(&self.remaining, COFACTOR_ROUNDS) {
                    return Some(Factor::ProbablePrime(self.finish()));
                }
            }

            if self.divisor > self.limit || Instant::now() >= self.deadline {
                log::debug!("factorization abandoned at divisor {}", self.divisor);
                return Some(Factor::Abandoned(self.finish()));
            }

            let d = self.divisor;
            if (&self.remaining % d).is_zero() {
                self.remaining /= d;
                self.recheck = true;
                return Some(Factor::Prime(d));
            }
            self.advance();
        }
    }
}
