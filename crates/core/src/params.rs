//! Riecoin Proof-of-Work Parameters
//!
//! Consensus constants shared by the prime base generator, the
//! constellation validator and the primality chain.

/// Zero bits placed between the leading one and the hash bits of a prime base
pub const ZEROES_BEFORE_HASH_IN_PRIME: u32 = 8;

/// Bits contributed by the header hash
pub const HASH_BITS: u32 = 256;

/// Bits of a prime base before any trailing zeros: leading one + prefix + hash
pub const SIGNIFICANT_DIGITS: u32 = 1 + ZEROES_BEFORE_HASH_IN_PRIME + HASH_BITS;

/// Offsets are only bounded by the trailing-zero budget below this many bits
pub const MAX_BOUNDED_TRAILING_ZEROS: u32 = 256;

/// 2 * 3 * 5 * 7
pub const PRIMORIAL: u32 = 210;

/// The only residue modulo 210 where all six constellation members avoid 2, 3, 5 and 7
pub const CONSTELLATION_RESIDUE: u32 = 97;

/// Serialized header length covered by the PoW hash (the offset is excluded)
pub const POW_HEADER_SIZE: usize = 4 + 32 + 32 + 4 + 8;

/// Byte width of the hash fields
pub const HASH_SIZE: usize = 32;

/// Byte width of the compact target field
pub const BITS_SIZE: usize = 4;

/// One position of the prime constellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstellationStep {
    /// Distance from the candidate
    pub offset: u32,
    /// Miller-Rabin rounds run while walking towards larger offsets
    pub rounds_before: u32,
    /// Extra rounds run once every larger offset has been confirmed
    pub rounds_after: Option<u32>,
}

const fn step(offset: u32, rounds_before: u32, rounds_after: Option<u32>) -> ConstellationStep {
    ConstellationStep {
        offset,
        rounds_before,
        rounds_after,
    }
}

/// The six-member constellation in ascending offset order
pub const CONSTELLATION: [ConstellationStep; 6] = [
    step(0, 1, Some(9)),
    step(4, 1, Some(9)),
    step(6, 1, Some(9)),
    step(10, 1, Some(9)),
    step(12, 1, Some(9)),
    step(16, 10, None),
];
