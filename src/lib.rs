//! Riecoin Proof-of-Work Verifier Library
//!
//! Reads block header records produced by a Riecoin node and checks their
//! prime-constellation proofs of work.
//!
//! # Overview
//!
//! A Riecoin block is valid when `n, n+4, n+6, n+10, n+12, n+16` are all
//! prime, where `n` is built from the header hash, the compact `bits` and the
//! miner's `nOffset`. The arithmetic lives in [`riepow_core`]; this crate adds
//! record parsing, configuration and batch verification.
//!
//! # Example
//!
//! ```rust
//! use riepow::record::parse_headers;
//! use riepow::pow::{PowError, Verifier};
//!
//! let input = r#"{
//!     "version": 2,
//!     "previousblockhash": "3c4f6a1b9e2d8c7f5a0b1e2d3c4f5a6b7c8d9e0f1a2b3c4d5e6f708192a3b4c5",
//!     "merkleroot": "9d2e4f6a8b0c1d3e5f7a9b1c3d5e7f9a0b2c4d6e8f0a1b3c5d7e9f1a2b4c6d8e",
//!     "bits": "02013900",
//!     "time": 1700000000,
//!     "nOffset": "01"
//! }"#;
//!
//! let headers = parse_headers(input).unwrap();
//! let result = Verifier::new().verify_header(&headers[0]);
//! assert_eq!(result.unwrap_err(), PowError::InvalidResidue { residue: 15 });
//! ```

// Re-export the core algorithm
pub use riepow_core as pow;

pub mod batch;
pub mod config;
pub mod record;

// Convenience re-exports
pub use pow::{BlockHeader, PowError, Verified, Verifier, verify};
