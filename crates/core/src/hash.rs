//! SHA-256 double hashing for header PoW hashes.

use sha2::{Digest, Sha256};

/// SHA256(SHA256(data)).
#[inline]
pub fn double_sha256(data: &[u8]) -> [u8; 32] {
    let first = Sha256::digest(data);
    Sha256::digest(first).into()
}

/// Reverse the byte order of a 32-byte array.
///
/// Node RPC displays hashes byte-reversed relative to their in-memory layout.
#[inline]
pub fn reverse_bytes(bytes: &[u8; 32]) -> [u8; 32] {
    let mut reversed = *bytes;
    reversed.reverse();
    reversed
}
