//! # Inner Product Argument (IPA)
//!
//! A non-interactive, transcript-driven proof of knowledge that two scalar
//! vectors `a` and `b` satisfy `<a, G> = A` and `<a, b> = z`, with proof size
//! logarithmic in the vector length.
//!
//! The bases come from the deterministic generator stream: for vectors of
//! length `n`, the prover fetches `G[0..np]` at the caller's offset, where
//! `np = 2^ceil(log2(n))`, and reuses `G[np]` as the inner-product base `Q`.
//!
//! Each round halves the vectors:
//!
//! ```text
//! L = <a_lo, G_hi> + <a_lo, b_hi> * Q
//! R = <a_hi, G_lo> + <a_hi, b_lo> * Q
//!
//! a <- u * a_lo + u^-1 * a_hi
//! b <- u^-1 * b_lo + u * b_hi
//! G <- u^-1 * G_lo + u * G_hi
//! ```
//!
//! where `u` is the round challenge drawn from the shared transcript. After
//! `ceil(log2(n))` rounds only `a[0]` remains; the proof is the per-round
//! `L`/`R` pairs plus that final scalar.
//!
//! The verifier reconstructs the challenges from its own transcript and
//! checks a single multi-scalar multiplication; prover and verifier must
//! drive transcripts with identical histories.

pub mod proof;
pub mod prover;
pub mod verifier;

pub use proof::*;
pub use prover::*;
pub use verifier::*;
