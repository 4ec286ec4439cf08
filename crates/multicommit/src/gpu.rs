//! GPU execution path
//!
//! With the `cuda` feature the batch is handed to a linked Pippenger kernel
//! as raw 32-byte scalars and compressed points. Without it, or when the
//! kernel reports a failure, the batch runs on the identical host kernels so
//! callers still get byte-for-byte the same commitments.

use crate::msm;
use multicommit_core::{CompressedRistretto, RistrettoPoint, Sequence};

#[cfg(feature = "cuda")]
mod ffi {
    extern "C" {
        /// Compute `out = sum_i scalars[i] * points[i]` on the device.
        ///
        /// All buffers are 32-byte little-endian encodings, `n` elements
        /// each. Returns 0 on success.
        pub fn multicommit_cuda_msm(
            out: *mut u8,
            scalars: *const u8,
            points: *const u8,
            n: usize,
        ) -> i32;
    }
}

#[cfg(feature = "cuda")]
fn cuda_commit_sequence(
    seq: &Sequence,
    generators: &[RistrettoPoint],
) -> Option<CompressedRistretto> {
    use multicommit_core::Identity;

    if seq.is_empty() {
        return Some(RistrettoPoint::identity().compress());
    }
    let scalars: Vec<u8> = seq
        .scalars()
        .iter()
        .flat_map(|s| s.to_bytes())
        .collect();
    let points: Vec<u8> = generators[..seq.len()]
        .iter()
        .flat_map(|p| p.compress().to_bytes())
        .collect();
    let mut out = [0u8; 32];
    let code = unsafe {
        ffi::multicommit_cuda_msm(out.as_mut_ptr(), scalars.as_ptr(), points.as_ptr(), seq.len())
    };
    if code != 0 {
        tracing::warn!(code, "cuda msm kernel failed, retrying on host");
        return None;
    }
    Some(CompressedRistretto(out))
}

#[cfg(not(feature = "cuda"))]
fn warn_fallback_once() {
    use std::sync::OnceLock;

    static WARNED: OnceLock<()> = OnceLock::new();
    WARNED.get_or_init(|| {
        tracing::warn!("gpu backend selected but no cuda kernel is linked, executing on host");
    });
}

/// Commit each sequence on the device, falling back to the host kernels.
pub fn commit_sequences(
    sequences: &[Sequence],
    generators: &[RistrettoPoint],
) -> Vec<CompressedRistretto> {
    #[cfg(feature = "cuda")]
    {
        let device: Option<Vec<CompressedRistretto>> = sequences
            .iter()
            .map(|seq| cuda_commit_sequence(seq, generators))
            .collect();
        if let Some(out) = device {
            return out;
        }
    }
    #[cfg(not(feature = "cuda"))]
    warn_fallback_once();

    msm::commit_sequences(sequences, generators)
}

#[cfg(test)]
mod tests {
    use super::*;
    use multicommit_core::get_generators;

    #[test]
    fn test_gpu_and_cpu_outputs_are_identical() {
        let gens = get_generators(0, 8);
        let d1: Vec<u8> = (1u8..=8).collect();
        let d2 = 123456789u64.to_le_bytes();
        let sequences = [
            Sequence::new(&d1, 1, false).unwrap(),
            Sequence::new(&d2, 8, false).unwrap(),
        ];
        assert_eq!(
            commit_sequences(&sequences, &gens),
            msm::commit_sequences(&sequences, &gens)
        );
    }
}
