//! # Multicommit Core
//!
//! Foundational types for the multicommit workspace:
//!
//! - Deterministic generator oracle over the Ristretto255 group, with a
//!   grow-only precomputation cache
//! - One-commit prefix sums `G[0] + G[1] + ... + G[n-1]`
//! - Sequence descriptors that lift variable-width little-endian integers
//!   into the scalar field
//! - Transcript protocol for Fiat-Shamir challenges
//! - Error types and scalar-vector utilities
//!
//! The group and scalar arithmetic comes from `curve25519-dalek`; transcripts
//! are `merlin` (STROBE-128) instances driven through [`TranscriptProtocol`].

pub mod errors;
pub mod generators;
pub mod sequence;
pub mod transcript;
pub mod utils;

pub use errors::*;
pub use generators::*;
pub use sequence::*;
pub use transcript::*;

/// Re-export commonly used types from curve25519-dalek
pub use curve25519_dalek::{
    ristretto::{CompressedRistretto, RistrettoPoint},
    scalar::Scalar,
    traits::{Identity, IsIdentity, VartimeMultiscalarMul},
};

/// Re-export merlin transcript
pub use merlin::Transcript;
