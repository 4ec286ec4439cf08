//! Multi-scalar multiplication kernels
//!
//! One commitment per sequence, batched so that the generator vector is
//! loaded once and shared across the batch. Narrow sequences (widths of at
//! most 8 bytes) run a Pippenger bucket accumulation sized to the actual bit
//! width of the data instead of the full 256-bit scalar range; wider
//! sequences are lifted to scalars and folded through the generic
//! variable-base path.
//!
//! The per-sequence schedule is fixed, so any two backends produce the same
//! group element and therefore the same canonical encoding.

use curve25519_dalek::ristretto::{CompressedRistretto, RistrettoPoint};
use curve25519_dalek::traits::{Identity, VartimeMultiscalarMul};
use multicommit_core::Sequence;
use rayon::prelude::*;

/// Commit each sequence against a shared generator vector.
///
/// `generators` must cover the longest sequence. Outputs are written in
/// sequence order.
pub fn commit_sequences(
    sequences: &[Sequence],
    generators: &[RistrettoPoint],
) -> Vec<CompressedRistretto> {
    sequences
        .par_iter()
        .map(|seq| commit_sequence(seq, generators).compress())
        .collect()
}

/// Commit a single sequence: `sum_j a_j * G_j`.
pub fn commit_sequence(seq: &Sequence, generators: &[RistrettoPoint]) -> RistrettoPoint {
    if seq.is_empty() {
        return RistrettoPoint::identity();
    }
    let bases = &generators[..seq.len()];

    if seq.element_nbytes() <= 8 {
        if seq.is_signed() {
            // fold the sign into the base so the bucket pass sees magnitudes
            let mut magnitudes = Vec::with_capacity(seq.len());
            let mut points = Vec::with_capacity(seq.len());
            for (i, base) in bases.iter().enumerate() {
                let value = seq.i64_value(i);
                magnitudes.push(value.unsigned_abs());
                points.push(if value < 0 { -base } else { *base });
            }
            msm_u64(&magnitudes, &points)
        } else {
            let values: Vec<u64> = (0..seq.len()).map(|i| seq.u64_value(i)).collect();
            msm_u64(&values, bases)
        }
    } else {
        RistrettoPoint::vartime_multiscalar_mul(seq.scalars(), bases)
    }
}

/// Pippenger bucket accumulation over word-sized scalars.
///
/// Windows are walked most-significant first; the window width grows with
/// the input size and never exceeds the bit width of the largest value.
pub fn msm_u64(values: &[u64], points: &[RistrettoPoint]) -> RistrettoPoint {
    debug_assert_eq!(values.len(), points.len());
    let max = values.iter().copied().max().unwrap_or(0);
    if max == 0 {
        return RistrettoPoint::identity();
    }

    let total_bits = (64 - max.leading_zeros()) as usize;
    let window = window_size(values.len()).min(total_bits);
    let num_windows = total_bits.div_ceil(window);
    let mask = (1u64 << window) - 1;

    let mut acc = RistrettoPoint::identity();
    for w in (0..num_windows).rev() {
        if w != num_windows - 1 {
            for _ in 0..window {
                acc = acc + acc;
            }
        }

        let bit_lo = w * window;
        let mut buckets = vec![RistrettoPoint::identity(); (1 << window) - 1];
        for (value, point) in values.iter().zip(points.iter()) {
            let digit = (value >> bit_lo) & mask;
            if digit > 0 {
                buckets[(digit - 1) as usize] += point;
            }
        }

        // running-sum combine weights bucket d by d+1
        let mut running = RistrettoPoint::identity();
        let mut sum = RistrettoPoint::identity();
        for bucket in buckets.into_iter().rev() {
            running += bucket;
            sum += running;
        }
        acc += sum;
    }
    acc
}

fn window_size(n: usize) -> usize {
    if n <= 32 {
        3
    } else if n <= 128 {
        4
    } else if n <= 512 {
        5
    } else if n <= 2048 {
        6
    } else if n <= 8192 {
        7
    } else {
        8
    }
}
