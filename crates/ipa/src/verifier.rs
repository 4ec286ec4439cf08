//! Inner product argument verifier
//!
//! The proof, the claimed commitment, and the claimed product are untrusted:
//! malformed encodings and structural mismatches reject rather than error.

use crate::InnerProductProof;
use multicommit_core::{
    get_generators, utils::num_rounds, IsIdentity, MulticommitError, MulticommitResult,
    CompressedRistretto, RistrettoPoint, Scalar, TranscriptProtocol, VartimeMultiscalarMul,
};
use merlin::Transcript;
use std::iter;

/// Verify an inner product proof.
///
/// `a_commit` is the claimed `<a, G>` and `product` the claimed `<a, b>`;
/// `b` and `n` are the verifier's own copies of the public vector and
/// length, and `generators_offset` must match the prover's. Returns
/// `Ok(true)` on acceptance, `Ok(false)` on any rejection.
pub fn verify(
    transcript: &mut Transcript,
    proof: &InnerProductProof,
    n: usize,
    generators_offset: u64,
    b: &[Scalar],
    product: &Scalar,
    a_commit: &CompressedRistretto,
) -> MulticommitResult<bool> {
    if n == 0 {
        return Err(MulticommitError::EmptyVectors);
    }
    if b.len() != n {
        return Err(MulticommitError::VectorLengthMismatch {
            expected: n,
            actual: b.len(),
        });
    }

    let rounds = num_rounds(n);
    let np = 1usize << rounds;
    if proof.l_vector.len() != rounds || proof.r_vector.len() != rounds {
        return Ok(false);
    }

    let Some(a_commit) = a_commit.decompress() else {
        return Ok(false);
    };

    // replay the prover's absorb order to reconstruct the challenges
    let mut challenges = Vec::with_capacity(rounds);
    let mut l_points = Vec::with_capacity(rounds);
    let mut r_points = Vec::with_capacity(rounds);
    for (l, r) in proof.l_vector.iter().zip(proof.r_vector.iter()) {
        transcript.append_point(b"L", l);
        transcript.append_point(b"R", r);
        let u = transcript.challenge_scalar(b"x");
        if u == Scalar::ZERO {
            return Ok(false);
        }
        challenges.push(u);

        let (Some(l), Some(r)) = (l.decompress(), r.decompress()) else {
            return Ok(false);
        };
        l_points.push(l);
        r_points.push(r);
    }

    let mut challenges_inv = challenges.clone();
    let all_inv = Scalar::batch_invert(&mut challenges_inv);

    // s[i] = prod_j u_j^{e_ij}, e_ij = +1 iff bit j of i is set; built by
    // reusing the prefix with the top bit cleared
    let challenges_sq: Vec<Scalar> = challenges.iter().map(|u| u * u).collect();
    let mut s = Vec::with_capacity(np);
    s.push(all_inv);
    for i in 1..np {
        let lg = usize::BITS as usize - 1 - i.leading_zeros() as usize;
        s.push(s[i - (1 << lg)] * challenges_sq[rounds - 1 - lg]);
    }

    // the verifier's collapse of the public vector, padded zeros dropped
    let b_folded: Scalar = b.iter().zip(s.iter()).map(|(bi, si)| bi * si).sum();

    let mut generators = get_generators(generators_offset, np + 1);
    let q = generators[np];
    generators.truncate(np);

    // single multiscalar check of
    //   ap * <s, G> + (ap * b' - z) * Q - A - sum_j (u_j^2 L_j + u_j^-2 R_j)
    let ap = proof.ap_value;
    let scalars = s
        .iter()
        .map(|si| ap * si)
        .chain(iter::once(ap * b_folded - product))
        .chain(iter::once(-Scalar::ONE))
        .chain(challenges_sq.iter().map(|u_sq| -u_sq))
        .chain(challenges_inv.iter().map(|u_inv| -(u_inv * u_inv)));
    let points = generators
        .iter()
        .chain(iter::once(&q))
        .chain(iter::once(&a_commit))
        .chain(l_points.iter())
        .chain(r_points.iter());

    Ok(RistrettoPoint::vartime_multiscalar_mul(scalars, points).is_identity())
}
