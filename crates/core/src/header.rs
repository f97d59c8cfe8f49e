//! Riecoin block header as reported by node RPC, and its PoW hash.

use num_bigint::BigUint;

use crate::error::{PowError, Result};
use crate::hash::{double_sha256, reverse_bytes};
use crate::params::{BITS_SIZE, HASH_SIZE, POW_HEADER_SIZE};

/// A block header in its RPC form.
///
/// Hash-like fields stay hex strings exactly as the node reports them
/// (display byte order); they are decoded and width-checked when hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockHeader {
    /// Block version
    pub version: u32,
    /// Hash of the previous block (display order hex)
    #[cfg_attr(feature = "serde", serde(rename = "previousblockhash"))]
    pub previous_block_hash: String,
    /// Merkle root (display order hex)
    #[cfg_attr(feature = "serde", serde(rename = "merkleroot"))]
    pub merkle_root: String,
    /// Compact target (big-endian hex, 4 bytes)
    pub bits: String,
    /// Block timestamp (Unix seconds)
    pub time: u64,
    /// PoW offset (big-endian hex, any length)
    #[cfg_attr(feature = "serde", serde(rename = "nOffset"))]
    pub offset: String,
}

impl BlockHeader {
    /// Serialize the hashed part of the header (everything but the offset).
    ///
    /// Layout is the in-memory one: little-endian integers, hash fields in
    /// internal (reversed display) order.
    pub fn serialize_for_pow(&self) -> Result<[u8; POW_HEADER_SIZE]> {
        let previous = decode_fixed::<HASH_SIZE>("previousblockhash", &self.previous_block_hash)?;
        let merkle = decode_fixed::<HASH_SIZE>("merkleroot", &self.merkle_root)?;
        let bits = decode_fixed::<BITS_SIZE>("bits", &self.bits)?;

        let mut out = [0u8; POW_HEADER_SIZE];
        out[0..4].copy_from_slice(&self.version.to_le_bytes());
        out[4..36].copy_from_slice(&reverse_bytes(&previous));
        out[36..68].copy_from_slice(&reverse_bytes(&merkle));

        let mut bits_le = bits;
        bits_le.reverse();
        out[68..72].copy_from_slice(&bits_le);
        out[72..80].copy_from_slice(&self.time.to_le_bytes());

        Ok(out)
    }

    /// Compute the PoW hash of this header.
    pub fn pow_hash(&self) -> Result<PowHash> {
        let serialized = self.serialize_for_pow()?;
        Ok(PowHash(reverse_bytes(&double_sha256(&serialized))))
    }

    /// The compact target as an integer.
    pub fn compact_bits(&self) -> Result<u32> {
        let bits = decode_fixed::<BITS_SIZE>("bits", &self.bits)?;
        Ok(u32::from_be_bytes(bits))
    }

    /// The PoW offset as an integer (big-endian hex, empty means zero).
    pub fn pow_offset(&self) -> Result<BigUint> {
        let bytes = decode_hex("nOffset", &self.offset)?;
        Ok(BigUint::from_bytes_be(&bytes))
    }
}

/// A header PoW hash in big-endian (display) byte order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PowHash([u8; 32]);

impl PowHash {
    /// Wrap big-endian hash bytes.
    pub fn from_be_bytes(bytes: [u8; 32]) -> Self {
        PowHash(bytes)
    }

    /// Raw big-endian bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// The hash as an unsigned integer.
    pub fn to_biguint(&self) -> BigUint {
        BigUint::from_bytes_be(&self.0)
    }
}

impl core::fmt::Display for PowHash {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

fn decode_hex(field: &'static str, value: &str) -> Result<Vec<u8>> {
    if value.len() % 2 != 0 {
        return Err(PowError::malformed(field, "odd number of hex digits"));
    }
    hex::decode(value).map_err(|e| PowError::malformed(field, e.to_string()))
}

fn decode_fixed<const N: usize>(field: &'static str, value: &str) -> Result<[u8; N]> {
    let bytes = decode_hex(field, value)?;
    bytes.as_slice().try_into().map_err(|_| {
        PowError::malformed(field, format!("expected {} bytes, got {}", N, bytes.len()))
    })
}
