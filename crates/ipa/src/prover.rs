//! Inner product argument prover

use crate::InnerProductProof;
use multicommit_core::{
    get_generators,
    utils::{inner_product, num_rounds, pad_to_power_of_two},
    MulticommitError, MulticommitResult, RistrettoPoint, Scalar, TranscriptProtocol,
    VartimeMultiscalarMul,
};
use merlin::Transcript;
use std::iter;

/// Create an inner product proof for `a` and `b`.
///
/// The bases are `G[generators_offset ..]`; the challenges depend on the
/// entire transcript, so parent protocols can seed it before calling. The
/// vectors are zero-padded to the next power of two; padding is transparent
/// in the produced transcript and proof.
pub fn prove(
    transcript: &mut Transcript,
    a: &[Scalar],
    b: &[Scalar],
    generators_offset: u64,
) -> MulticommitResult<InnerProductProof> {
    if a.is_empty() {
        return Err(MulticommitError::EmptyVectors);
    }
    if a.len() != b.len() {
        return Err(MulticommitError::VectorLengthMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    let rounds = num_rounds(a.len());
    let np = 1usize << rounds;

    // one extra generator past the padded width serves as the product base
    let mut generators = get_generators(generators_offset, np + 1);
    let q = generators[np];
    generators.truncate(np);

    let mut a_vec = pad_to_power_of_two(a.to_vec());
    let mut b_vec = pad_to_power_of_two(b.to_vec());
    let mut g_vec = generators;

    let mut l_vector = Vec::with_capacity(rounds);
    let mut r_vector = Vec::with_capacity(rounds);

    while a_vec.len() > 1 {
        let m = a_vec.len() / 2;
        let (a_lo, a_hi) = a_vec.split_at(m);
        let (b_lo, b_hi) = b_vec.split_at(m);
        let (g_lo, g_hi) = g_vec.split_at(m);

        let c_l = inner_product(a_lo, b_hi);
        let c_r = inner_product(a_hi, b_lo);

        let l = RistrettoPoint::vartime_multiscalar_mul(
            a_lo.iter().chain(iter::once(&c_l)),
            g_hi.iter().chain(iter::once(&q)),
        )
        .compress();
        let r = RistrettoPoint::vartime_multiscalar_mul(
            a_hi.iter().chain(iter::once(&c_r)),
            g_lo.iter().chain(iter::once(&q)),
        )
        .compress();

        transcript.append_point(b"L", &l);
        transcript.append_point(b"R", &r);
        let u = transcript.challenge_scalar(b"x");
        if u == Scalar::ZERO {
            return Err(MulticommitError::ZeroChallenge);
        }
        let u_inv = u.invert();

        let mut folded_a = Vec::with_capacity(m);
        let mut folded_b = Vec::with_capacity(m);
        let mut folded_g = Vec::with_capacity(m);
        for i in 0..m {
            folded_a.push(u * a_lo[i] + u_inv * a_hi[i]);
            folded_b.push(u_inv * b_lo[i] + u * b_hi[i]);
            folded_g.push(RistrettoPoint::vartime_multiscalar_mul(
                [u_inv, u],
                [g_lo[i], g_hi[i]],
            ));
        }
        a_vec = folded_a;
        b_vec = folded_b;
        g_vec = folded_g;

        l_vector.push(l);
        r_vector.push(r);
    }

    Ok(InnerProductProof {
        l_vector,
        r_vector,
        ap_value: a_vec[0],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalars(values: &[u64]) -> Vec<Scalar> {
        values.iter().map(|v| Scalar::from(*v)).collect()
    }

    #[test]
    fn test_prove_round_counts() {
        for (n, expected) in [(1usize, 0usize), (2, 1), (3, 2), (4, 2), (8, 3)] {
            let a = scalars(&vec![1; n]);
            let b = scalars(&vec![2; n]);
            let mut transcript = Transcript::new(b"ipp test");
            let proof = prove(&mut transcript, &a, &b, 0).unwrap();
            assert_eq!(proof.num_rounds(), expected, "n = {n}");
            assert_eq!(proof.r_vector.len(), expected);
        }
    }

    #[test]
    fn test_prove_single_element_returns_input() {
        let a = scalars(&[7]);
        let b = scalars(&[9]);
        let mut transcript = Transcript::new(b"ipp test");
        let proof = prove(&mut transcript, &a, &b, 0).unwrap();
        assert!(proof.l_vector.is_empty());
        assert_eq!(proof.ap_value, Scalar::from(7u64));
    }

    #[test]
    fn test_prove_rejects_empty_vectors() {
        let mut transcript = Transcript::new(b"ipp test");
        assert_eq!(
            prove(&mut transcript, &[], &[], 0),
            Err(MulticommitError::EmptyVectors)
        );
    }

    #[test]
    fn test_prove_rejects_mismatched_lengths() {
        let a = scalars(&[1, 2]);
        let b = scalars(&[3]);
        let mut transcript = Transcript::new(b"ipp test");
        assert!(matches!(
            prove(&mut transcript, &a, &b, 0),
            Err(MulticommitError::VectorLengthMismatch { .. })
        ));
    }

    #[test]
    fn test_prove_is_deterministic() {
        let a = scalars(&[1, 2, 3, 4]);
        let b = scalars(&[5, 6, 7, 8]);
        let mut t1 = Transcript::new(b"ipp test");
        let mut t2 = Transcript::new(b"ipp test");
        assert_eq!(
            prove(&mut t1, &a, &b, 0).unwrap(),
            prove(&mut t2, &a, &b, 0).unwrap()
        );
    }

    #[test]
    fn test_transcript_history_changes_the_proof() {
        let a = scalars(&[1, 2]);
        let b = scalars(&[3, 4]);
        let mut fresh = Transcript::new(b"ipp test");
        let mut seeded = Transcript::new(b"ipp test");
        seeded.append_scalar(b"salt", &Scalar::from(42u64));

        let p1 = prove(&mut fresh, &a, &b, 0).unwrap();
        let p2 = prove(&mut seeded, &a, &b, 0).unwrap();
        // same L/R commitments, different challenges, different final scalar
        assert_eq!(p1.l_vector[0], p2.l_vector[0]);
        assert_ne!(p1.ap_value, p2.ap_value);
    }
}
