//! Primality chain over the constellation pattern.
//!
//! The walk runs in two passes over [`CONSTELLATION`]:
//!
//! ```text
//! descend: n+0 (1) -> n+4 (1) -> n+6 (1) -> n+10 (1) -> n+12 (1) -> n+16 (10)
//! ascend:  n+12 (9) -> n+10 (9) -> n+6 (9) -> n+4 (9) -> n+0 (9)
//! ```
//!
//! Extra rounds on a position only run once every larger offset has passed.
//! The first composite ends the walk.

use num_bigint::BigUint;

use crate::error::{PowError, Result};
use crate::params::{CONSTELLATION, ConstellationStep};
use crate::primality::PrimalityOracle;

/// Which pass confirmed a position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    Before,
    After,
}

/// One passed primality check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub offset: u32,
    pub rounds: u32,
    pub pass: Pass,
    /// `candidate + offset`
    pub value: BigUint,
}

#[derive(Debug, Clone, Copy)]
enum Cursor {
    Descend(usize),
    Ascend(usize),
    Done,
}

/// Lazy, short-circuiting walk of the constellation checks.
pub struct ChainWalk<'a, O> {
    candidate: BigUint,
    oracle: &'a O,
    cursor: Cursor,
}

impl<'a, O: PrimalityOracle> ChainWalk<'a, O> {
    pub fn new(candidate: BigUint, oracle: &'a O) -> Self {
        Self {
            candidate,
            oracle,
            cursor: Cursor::Descend(0),
        }
    }

    fn check(&mut self, step: &ConstellationStep, rounds: u32, pass: Pass) -> Result<Confirmation> {
        let value = &self.candidate + step.offset;
        if self.oracle.is_probably_prime(&value, rounds) {
            log::trace!("n+{} prime after {} rounds ({:?})", step.offset, rounds, pass);
            Ok(Confirmation {
                offset: step.offset,
                rounds,
                pass,
                value,
            })
        } else {
            log::debug!("n+{} composite ({:?} pass)", step.offset, pass);
            self.cursor = Cursor::Done;
            Err(PowError::NotPrimeAt(step.offset))
        }
    }
}

impl<O: PrimalityOracle> Iterator for ChainWalk<'_, O> {
    type Item = Result<Confirmation>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.cursor {
                Cursor::Done => return None,
                Cursor::Descend(i) => {
                    let step = CONSTELLATION[i];
                    self.cursor = if i + 1 < CONSTELLATION.len() {
                        Cursor::Descend(i + 1)
                    } else {
                        Cursor::Ascend(i)
                    };
                    return Some(self.check(&step, step.rounds_before, Pass::Before));
                }
                Cursor::Ascend(i) => {
                    let step = CONSTELLATION[i];
                    self.cursor = if i == 0 { Cursor::Done } else { Cursor::Ascend(i - 1) };
                    if let Some(rounds) = step.rounds_after {
                        return Some(self.check(&step, rounds, Pass::After));
                    }
                }
            }
        }
    }
}

impl<O: PrimalityOracle> core::iter::FusedIterator for ChainWalk<'_, O> {}

/// Require every constellation member of `candidate` to be prime.
pub fn verify_chain<O: PrimalityOracle>(candidate: &BigUint, oracle: &O) -> Result<()> {
    for confirmation in ChainWalk::new(candidate.clone(), oracle) {
        confirmation?;
    }
    Ok(())
}
