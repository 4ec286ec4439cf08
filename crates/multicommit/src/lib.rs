//! # Multicommit
//!
//! Batched Pedersen commitments over the Ristretto255 group.
//!
//! A single call commits many variable-width integer sequences at once,
//! against either the deterministic generator stream from
//! [`multicommit_core::generators`] or a caller-supplied generator vector.
//! Execution is routed through a process-wide backend selected once at
//! [`init`]: the CPU backend runs rayon-parallel multi-scalar multiplication,
//! the GPU backend drives a CUDA kernel when one is linked in.
//!
//! ```no_run
//! use multicommit::{init, compute_commitments, Config};
//! use multicommit_core::{CompressedRistretto, Sequence};
//!
//! init(Config::default()).unwrap();
//!
//! let data: Vec<u8> = vec![1, 2, 3];
//! let sequences = [Sequence::new(&data, 1, false).unwrap()];
//! let mut commitments = [CompressedRistretto::default()];
//! compute_commitments(&mut commitments, &sequences, 0).unwrap();
//! ```

pub mod backend;
pub mod gpu;
pub mod msm;
pub mod pedersen;

pub use backend::{init, is_initialized, BackendKind, Config};
pub use pedersen::{compute_commitments, compute_commitments_with_generators};

/// Re-export the core crate types used at this API surface
pub use multicommit_core::{CompressedRistretto, RistrettoPoint, Scalar, Sequence};
