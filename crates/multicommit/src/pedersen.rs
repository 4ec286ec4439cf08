//! Pedersen commitment entry points
//!
//! Both entry points normalize their sequences, resolve the generator
//! source, and hand the batch to the selected backend. Outputs are written
//! in descriptor order. The calls are pure functions of their inputs once a
//! backend is installed.

use crate::backend;
use multicommit_core::{
    get_generators, CompressedRistretto, MulticommitError, MulticommitResult, RistrettoPoint,
    Sequence,
};

/// Commit each sequence against the deterministic generator stream.
///
/// Sequence `i` commits against `G[offset_generators + j]` for
/// `j < sequences[i].len()`. The output slice must have one slot per
/// sequence. An empty batch is a successful no-op.
pub fn compute_commitments(
    commitments: &mut [CompressedRistretto],
    sequences: &[Sequence],
    offset_generators: u64,
) -> MulticommitResult<()> {
    if commitments.len() != sequences.len() {
        return Err(MulticommitError::VectorLengthMismatch {
            expected: sequences.len(),
            actual: commitments.len(),
        });
    }
    if sequences.is_empty() {
        return Ok(());
    }
    let backend = backend::backend()?;
    let max_len = sequences.iter().map(Sequence::len).max().unwrap_or(0);
    let generators = get_generators(offset_generators, max_len);
    commitments.copy_from_slice(&backend.commit_sequences(sequences, &generators));
    Ok(())
}

/// Commit each sequence against a caller-supplied generator vector.
///
/// The generator vector must cover the longest sequence.
pub fn compute_commitments_with_generators(
    commitments: &mut [CompressedRistretto],
    sequences: &[Sequence],
    generators: &[RistrettoPoint],
) -> MulticommitResult<()> {
    if commitments.len() != sequences.len() {
        return Err(MulticommitError::VectorLengthMismatch {
            expected: sequences.len(),
            actual: commitments.len(),
        });
    }
    if sequences.is_empty() {
        return Ok(());
    }
    let max_len = sequences.iter().map(Sequence::len).max().unwrap_or(0);
    if generators.len() < max_len {
        return Err(MulticommitError::InsufficientGenerators {
            needed: max_len,
            available: generators.len(),
        });
    }
    let backend = backend::backend()?;
    commitments.copy_from_slice(&backend.commit_sequences(sequences, generators));
    Ok(())
}
