//! Transcript management for the Fiat-Shamir heuristic
//!
//! The transcript is a `merlin` (STROBE-128) instance. Prover and verifier
//! drive the same labeled append/challenge sequence; the byte-level label
//! strings are part of the wire contract.

use crate::{CompressedRistretto, Scalar};
use merlin::Transcript;

/// Extension trait adding labeled point/scalar operations to [`Transcript`]
pub trait TranscriptProtocol {
    /// Append a compressed group element to the transcript
    fn append_point(&mut self, label: &'static [u8], point: &CompressedRistretto);

    /// Append a scalar to the transcript
    fn append_scalar(&mut self, label: &'static [u8], scalar: &Scalar);

    /// Derive a challenge scalar with a 512-bit wide reduction
    fn challenge_scalar(&mut self, label: &'static [u8]) -> Scalar;
}

impl TranscriptProtocol for Transcript {
    fn append_point(&mut self, label: &'static [u8], point: &CompressedRistretto) {
        self.append_message(label, point.as_bytes());
    }

    fn append_scalar(&mut self, label: &'static [u8], scalar: &Scalar) {
        self.append_message(label, scalar.as_bytes());
    }

    fn challenge_scalar(&mut self, label: &'static [u8]) -> Scalar {
        let mut buf = [0u8; 64];
        self.challenge_bytes(label, &mut buf);
        Scalar::from_bytes_mod_order_wide(&buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Identity, RistrettoPoint};

    #[test]
    fn test_equal_histories_give_equal_challenges() {
        let point = RistrettoPoint::identity().compress();
        let scalar = Scalar::from(42u64);

        let mut t1 = Transcript::new(b"test");
        let mut t2 = Transcript::new(b"test");

        t1.append_point(b"P", &point);
        t1.append_scalar(b"s", &scalar);
        t2.append_point(b"P", &point);
        t2.append_scalar(b"s", &scalar);

        assert_eq!(t1.challenge_scalar(b"x"), t2.challenge_scalar(b"x"));
    }

    #[test]
    fn test_labels_separate_domains() {
        let mut t1 = Transcript::new(b"test");
        let mut t2 = Transcript::new(b"test");

        t1.append_scalar(b"a", &Scalar::from(1u64));
        t2.append_scalar(b"b", &Scalar::from(1u64));

        assert_ne!(t1.challenge_scalar(b"x"), t2.challenge_scalar(b"x"));
    }

    #[test]
    fn test_challenges_advance_the_state() {
        let mut t = Transcript::new(b"test");
        let c1 = t.challenge_scalar(b"x");
        let c2 = t.challenge_scalar(b"x");
        assert_ne!(c1, c2);
    }
}
