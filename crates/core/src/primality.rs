//! Primality oracles.
//!
//! The chain verifier only needs a yes/no answer with a requested round
//! count, so the test itself sits behind [`PrimalityOracle`].

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};
use sha2::{Digest, Sha256};

/// Answers "is `n` probably prime after `rounds` rounds of testing?"
pub trait PrimalityOracle {
    /// Returns false only if `n` is certainly composite (or below 2).
    fn is_probably_prime(&self, n: &BigUint, rounds: u32) -> bool;
}

impl<O: PrimalityOracle + ?Sized> PrimalityOracle for &O {
    fn is_probably_prime(&self, n: &BigUint, rounds: u32) -> bool {
        (**self).is_probably_prime(n, rounds)
    }
}

/// Primes used for trial division before any Miller-Rabin round
const SMALL_PRIMES: [u32; 54] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89,
    97, 101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181, 191,
    193, 197, 199, 211, 223, 227, 229, 233, 239, 241, 251,
];

/// Miller-Rabin with reproducible witnesses.
///
/// Witnesses are derived from SHA-256 over `n`, the requested round count
/// and the round index, so a given `(n, rounds)` always runs the same test
/// and a re-run with a different round count uses fresh witnesses.
#[derive(Debug, Clone, Copy, Default)]
pub struct MillerRabin;

impl MillerRabin {
    pub fn new() -> Self {
        MillerRabin
    }

    fn witness(n: &BigUint, n_minus_3: &BigUint, rounds: u32, round: u32) -> BigUint {
        let mut hasher = Sha256::new();
        hasher.update(n.to_bytes_be());
        hasher.update(rounds.to_le_bytes());
        hasher.update(round.to_le_bytes());
        let digest = hasher.finalize();

        BigUint::from_bytes_be(&digest) % n_minus_3 + 2u32
    }
}

impl PrimalityOracle for MillerRabin {
    fn is_probably_prime(&self, n: &BigUint, rounds: u32) -> bool {
        if n < &BigUint::from(2u32) {
            return false;
        }

        for &p in SMALL_PRIMES.iter() {
            if *n == BigUint::from(p) {
                return true;
            }
            if (n % p).is_zero() {
                return false;
            }
        }

        // No factor up to the largest small prime.
        let largest = SMALL_PRIMES[SMALL_PRIMES.len() - 1];
        if *n < BigUint::from(largest) * largest {
            return true;
        }

        let one = BigUint::one();
        let n_minus_1 = n - &one;
        let n_minus_3 = n - 3u32;
        let s = n_minus_1.trailing_zeros().unwrap_or(0);
        let d = &n_minus_1 >> s;

        'rounds: for round in 0..rounds {
            let a = Self::witness(n, &n_minus_3, rounds, round);
            let mut x = a.modpow(&d, n);
            if x == one || x == n_minus_1 {
                continue;
            }
            for _ in 1..s {
                x = &x * &x % n;
                if x == n_minus_1 {
                    continue 'rounds;
                }
                if x == one {
                    return false;
                }
            }
            return false;
        }

        true
    }
}

/// Exact primality by trial division; ignores the round count.
///
/// Cost grows with the square root of `n`, so this is only suitable for the
/// small values used in tests and tooling.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrialDivision;

impl PrimalityOracle for TrialDivision {
    fn is_probably_prime(&self, n: &BigUint, _rounds: u32) -> bool {
        match n.to_u64() {
            Some(v) => is_prime_u64(v),
            None => is_prime_big(n),
        }
    }
}

fn is_prime_u64(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }
    let mut d = 3u64;
    while d.saturating_mul(d) <= n {
        if n % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}

fn is_prime_big(n: &BigUint) -> bool {
    if n.is_even() {
        return false;
    }
    let mut d = BigUint::from(3u32);
    while &d * &d <= *n {
        if (n % &d).is_zero() {
            return false;
        }
        d += 2u32;
    }
    true
}
