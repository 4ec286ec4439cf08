//! Inner product proof structure

use curve25519_dalek::{ristretto::CompressedRistretto, scalar::Scalar};
use serde::{Deserialize, Serialize};

/// An inner product proof
///
/// `l_vector[0]` and `r_vector[0]` belong to the first (widest) folding
/// round; the verifier replays them in the same order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InnerProductProof {
    /// L values from each folding round (`ceil(log2(n))` elements)
    pub l_vector: Vec<CompressedRistretto>,
    /// R values from each folding round (`ceil(log2(n))` elements)
    pub r_vector: Vec<CompressedRistretto>,
    /// The lone scalar remaining after the final fold
    pub ap_value: Scalar,
}

impl InnerProductProof {
    /// Number of folding rounds
    pub fn num_rounds(&self) -> usize {
        self.l_vector.len()
    }

    /// Proof size in bytes on the wire
    pub fn size_bytes(&self) -> usize {
        (self.l_vector.len() + self.r_vector.len()) * 32 + 32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proof_size() {
        let proof = InnerProductProof {
            l_vector: vec![CompressedRistretto::default(); 3],
            r_vector: vec![CompressedRistretto::default(); 3],
            ap_value: Scalar::from(1u64),
        };
        assert_eq!(proof.num_rounds(), 3);
        assert_eq!(proof.size_bytes(), 7 * 32);
    }

    #[test]
    fn test_proof_serde_round_trip() {
        let proof = InnerProductProof {
            l_vector: vec![CompressedRistretto::default(); 2],
            r_vector: vec![CompressedRistretto::default(); 2],
            ap_value: Scalar::from(99u64),
        };
        let encoded = serde_json::to_string(&proof).unwrap();
        let decoded: InnerProductProof = serde_json::from_str(&encoded).unwrap();
        assert_eq!(proof, decoded);
    }
}
