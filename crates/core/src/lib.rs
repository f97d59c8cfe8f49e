//! # Riecoin Proof-of-Work Core
//!
//! Verification of prime-constellation proofs of work: a block is valid when
//! six numbers derived from its header hash and claimed offset are all prime.
//!
//! ## Pipeline
//!
//! ```text
//! header --sha256d--> pow hash --bits--> prime base --offset--> candidate n
//!                                                                  |
//!                    n, n+4, n+6, n+10, n+12, n+16 all prime  <----+
//! ```
//!
//! - The PoW hash is SHA-256d over the 80-byte header (offset excluded).
//! - The prime base is a leading one, 8 zero bits and the 256 hash bits
//!   (least significant first), followed by `decode(bits) - 265` trailing zeros.
//! - The offset must fit in the trailing zeros and the candidate must be
//!   97 mod 210.
//! - Every constellation member must pass Miller-Rabin.
//!
//! ## Example
//!
//! ```rust
//! use riepow_core::{BlockHeader, PowError, Verifier};
//!
//! let header = BlockHeader {
//!     version: 2,
//!     previous_block_hash: "00".repeat(32),
//!     merkle_root: "11".repeat(32),
//!     bits: "02013900".to_string(),
//!     time: 1_700_000_000,
//!     offset: "01".to_string(),
//! };
//!
//! // A made-up offset is almost never on the right residue class.
//! let verifier = Verifier::new();
//! assert!(matches!(
//!     verifier.verify_header(&header),
//!     Err(PowError::InvalidResidue { .. }) | Err(PowError::NotPrimeAt(_))
//! ));
//! ```

mod base;
mod chain;
mod compact;
mod constellation;
mod diagnostic;
mod error;
mod factor;
mod hash;
mod header;
mod params;
mod primality;
mod verify;

#[cfg(feature = "parallel")]
mod batch;

pub use base::PrimeBase;
pub use chain::{ChainWalk, Confirmation, Pass, verify_chain};
pub use compact::decode_compact;
pub use constellation::{residue_mod_primorial, validate};
pub use diagnostic::{Diagnostic, DiagnosticOptions};
pub use error::{PowError, Result};
pub use factor::{Factor, Factorizer};
pub use hash::{double_sha256, reverse_bytes};
pub use header::{BlockHeader, PowHash};
pub use params::*;
pub use primality::{MillerRabin, PrimalityOracle, TrialDivision};
pub use verify::{Verified, Verifier, verify};

#[cfg(feature = "parallel")]
pub use batch::verify_batch;

pub use num_bigint::BigUint;
