//! Scalar-vector utilities

use crate::Scalar;

/// Compute the inner product of two scalar vectors.
///
/// Lengths must match; callers split vectors into equal halves.
pub fn inner_product(a: &[Scalar], b: &[Scalar]) -> Scalar {
    assert_eq!(a.len(), b.len(), "inner_product: vector lengths differ");
    a.iter().zip(b.iter()).map(|(ai, bi)| ai * bi).sum()
}

/// Number of folding rounds for a vector of length `n`: `ceil(log2(n))`.
pub fn num_rounds(n: usize) -> usize {
    assert!(n > 0, "num_rounds: length must be non-zero");
    n.next_power_of_two().trailing_zeros() as usize
}

/// Pad a scalar vector with zeros to the next power of two length.
pub fn pad_to_power_of_two(mut vec: Vec<Scalar>) -> Vec<Scalar> {
    let target = vec.len().next_power_of_two();
    vec.resize(target, Scalar::ZERO);
    vec
}
