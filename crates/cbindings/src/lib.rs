//! C ABI for the multicommit library
//!
//! Layouts follow the shipped wire forms: points are canonical 32-byte
//! Ristretto encodings, scalars are 32-byte little-endian residues, sequence
//! elements are little-endian integers of a declared power-of-two width.
//! Transcripts cross the boundary as opaque handles created by
//! [`mc_transcript_new`] and released by [`mc_transcript_free`].
//!
//! Error policy matches the original contract: misuse (null required
//! pointers, invalid widths, uninitialized backend, `n == 0` proofs) aborts
//! the process; recoverable conditions return a non-zero code; verifier
//! rejection returns `0` from [`mc_verify_inner_product`] and never aborts.

use core::ffi::c_int;
use std::slice;

use ipa::InnerProductProof;
use merlin::Transcript;
use multicommit::{backend, compute_commitments, compute_commitments_with_generators, Config};
use multicommit_core::{
    get_generators, get_one_commit, CompressedRistretto, MulticommitError, RistrettoPoint, Scalar,
    Sequence,
};

/// Success return code
pub const MC_SUCCESS: c_int = 0;
/// A required pointer was null or an argument was out of range
pub const MC_INVALID_ARGUMENT: c_int = 1;
/// The backend was already initialized by an earlier call
pub const MC_ALREADY_INITIALIZED: c_int = 2;

/// CPU backend id for [`McConfig::backend`]
pub const MC_CPU_BACKEND: c_int = 1;
/// GPU backend id for [`McConfig::backend`]
pub const MC_GPU_BACKEND: c_int = 2;

/// Library configuration consumed by [`mc_init`]
#[repr(C)]
pub struct McConfig {
    /// Backend id, [`MC_CPU_BACKEND`] or [`MC_GPU_BACKEND`]
    pub backend: c_int,
    /// Number of generators to precompute at init
    pub num_precomputed_generators: u64,
}

/// Canonical 32-byte encoding of a Ristretto255 point
#[repr(C)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct McCompressedRistretto {
    pub ristretto_bytes: [u8; 32],
}

/// 32-byte little-endian scalar modulo the group order
#[repr(C)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct McScalar {
    pub bytes: [u8; 32],
}

/// Describes one sequence of fixed-width little-endian elements
#[repr(C)]
pub struct McSequenceDescriptor {
    /// Element width in bytes; a power of two in `[1, 32]`
    pub element_nbytes: u8,
    /// Number of elements
    pub n: u64,
    /// Pointer to `n * element_nbytes` bytes; may be null when `n == 0`
    pub data: *const u8,
    /// Non-zero when elements are two's-complement signed
    pub is_signed: c_int,
}

/// Opaque transcript handle wrapping a STROBE-128 state
pub struct McTranscript {
    inner: Transcript,
}

fn fatal(msg: &str) -> ! {
    eprintln!("multicommit: fatal: {msg}");
    std::process::abort()
}

fn scalar_from(raw: &McScalar) -> Scalar {
    Scalar::from_bytes_mod_order(raw.bytes)
}

unsafe fn sequences_from<'a>(
    descriptors: *const McSequenceDescriptor,
    num_sequences: u32,
) -> Vec<Sequence<'a>> {
    if descriptors.is_null() {
        fatal("descriptors must not be null");
    }
    let descriptors = slice::from_raw_parts(descriptors, num_sequences as usize);
    descriptors
        .iter()
        .map(|d| {
            let nbytes = d.element_nbytes as usize;
            let data = if d.n == 0 {
                &[][..]
            } else if d.data.is_null() {
                fatal("sequence data must not be null when n > 0");
            } else {
                slice::from_raw_parts(d.data, d.n as usize * nbytes)
            };
            match Sequence::new(data, nbytes, d.is_signed != 0) {
                Ok(seq) => seq,
                Err(e) => fatal(&e.to_string()),
            }
        })
        .collect()
}

fn write_commitments(out: &mut [McCompressedRistretto], commitments: &[CompressedRistretto]) {
    for (slot, commitment) in out.iter_mut().zip(commitments.iter()) {
        slot.ristretto_bytes = commitment.to_bytes();
    }
}

/// Initialize the library; callable successfully at most once.
///
/// Returns [`MC_SUCCESS`], or a non-zero code when `config` is null, names an
/// unknown backend, or a backend is already installed.
///
/// # Safety
///
/// `config` must be null or point to a valid [`McConfig`].
#[no_mangle]
pub unsafe extern "C" fn mc_init(config: *const McConfig) -> c_int {
    let Some(config) = config.as_ref() else {
        return MC_INVALID_ARGUMENT;
    };
    let Ok(kind) = config.backend.try_into() else {
        return MC_INVALID_ARGUMENT;
    };
    match multicommit::init(Config {
        backend: kind,
        num_precomputed_generators: config.num_precomputed_generators,
    }) {
        Ok(()) => MC_SUCCESS,
        Err(MulticommitError::AlreadyInitialized) => MC_ALREADY_INITIALIZED,
        Err(_) => MC_INVALID_ARGUMENT,
    }
}

/// Commit each descriptor against the deterministic generator stream.
///
/// Sequence `i` commits against `G[offset_generators + j]`. Aborts on null
/// outputs or descriptors, invalid widths, or an uninitialized backend;
/// `num_sequences == 0` skips the computation.
///
/// # Safety
///
/// `commitments` must hold `num_sequences` slots, `descriptors` must hold
/// `num_sequences` entries, and each descriptor's data pointer must cover
/// `n * element_nbytes` bytes.
#[no_mangle]
pub unsafe extern "C" fn mc_compute_pedersen_commitments(
    commitments: *mut McCompressedRistretto,
    num_sequences: u32,
    descriptors: *const McSequenceDescriptor,
    offset_generators: u64,
) {
    if num_sequences == 0 {
        return;
    }
    if commitments.is_null() {
        fatal("commitments must not be null");
    }
    if !backend::is_initialized() {
        fatal("backend is not initialized");
    }
    let sequences = sequences_from(descriptors, num_sequences);
    let mut out = vec![CompressedRistretto::default(); sequences.len()];
    if let Err(e) = compute_commitments(&mut out, &sequences, offset_generators) {
        fatal(&e.to_string());
    }
    write_commitments(
        slice::from_raw_parts_mut(commitments, num_sequences as usize),
        &out,
    );
}

/// Commit each descriptor against a caller-supplied generator array.
///
/// `generators` must hold as many points as the longest sequence. Aborts on
/// the same misuse conditions as [`mc_compute_pedersen_commitments`], and on
/// generator encodings that fail to decode.
///
/// # Safety
///
/// Pointer obligations as in [`mc_compute_pedersen_commitments`], plus
/// `generators` must cover the longest sequence.
#[no_mangle]
pub unsafe extern "C" fn mc_compute_pedersen_commitments_with_generators(
    commitments: *mut McCompressedRistretto,
    num_sequences: u32,
    descriptors: *const McSequenceDescriptor,
    generators: *const McCompressedRistretto,
) {
    if num_sequences == 0 {
        return;
    }
    if commitments.is_null() {
        fatal("commitments must not be null");
    }
    if !backend::is_initialized() {
        fatal("backend is not initialized");
    }
    let sequences = sequences_from(descriptors, num_sequences);
    let max_len = sequences.iter().map(Sequence::len).max().unwrap_or(0);
    let generators: Vec<RistrettoPoint> = if max_len == 0 {
        Vec::new()
    } else if generators.is_null() {
        fatal("generators must not be null");
    } else {
        slice::from_raw_parts(generators, max_len)
            .iter()
            .map(|g| match CompressedRistretto(g.ristretto_bytes).decompress() {
                Some(point) => point,
                None => fatal("generator is not a canonical ristretto encoding"),
            })
            .collect()
    };
    let mut out = vec![CompressedRistretto::default(); sequences.len()];
    if let Err(e) = compute_commitments_with_generators(&mut out, &sequences, &generators) {
        fatal(&e.to_string());
    }
    write_commitments(
        slice::from_raw_parts_mut(commitments, num_sequences as usize),
        &out,
    );
}

/// Fetch `num_generators` generators starting at `offset_generators`.
///
/// Returns [`MC_SUCCESS`], or [`MC_INVALID_ARGUMENT`] when `num_generators`
/// is non-zero and `generators` is null. Zero generators skip the
/// computation.
///
/// # Safety
///
/// `generators` must be null or hold `num_generators` slots.
#[no_mangle]
pub unsafe extern "C" fn mc_get_generators(
    generators: *mut McCompressedRistretto,
    offset_generators: u64,
    num_generators: u64,
) -> c_int {
    if num_generators == 0 {
        return MC_SUCCESS;
    }
    if generators.is_null() {
        return MC_INVALID_ARGUMENT;
    }
    let points = get_generators(offset_generators, num_generators as usize);
    let out = slice::from_raw_parts_mut(generators, num_generators as usize);
    for (slot, point) in out.iter_mut().zip(points.iter()) {
        slot.ristretto_bytes = point.compress().to_bytes();
    }
    MC_SUCCESS
}

/// Compute `G[0] + ... + G[n-1]`, the identity when `n == 0`.
///
/// Returns [`MC_SUCCESS`], or [`MC_INVALID_ARGUMENT`] when `one_commit` is
/// null.
///
/// # Safety
///
/// `one_commit` must be null or point to a single output slot.
#[no_mangle]
pub unsafe extern "C" fn mc_get_one_commit(
    one_commit: *mut McCompressedRistretto,
    n: u64,
) -> c_int {
    let Some(out) = one_commit.as_mut() else {
        return MC_INVALID_ARGUMENT;
    };
    out.ristretto_bytes = get_one_commit(n).compress().to_bytes();
    MC_SUCCESS
}

/// Create a transcript under the library's domain label.
///
/// The returned handle is owned by the caller and must be released with
/// [`mc_transcript_free`].
#[no_mangle]
pub extern "C" fn mc_transcript_new() -> *mut McTranscript {
    Box::into_raw(Box::new(McTranscript {
        inner: Transcript::new(b"multicommit v1"),
    }))
}

/// Release a transcript handle. Null is a no-op.
///
/// # Safety
///
/// `transcript` must be null or a handle returned by [`mc_transcript_new`]
/// that has not been freed.
#[no_mangle]
pub unsafe extern "C" fn mc_transcript_free(transcript: *mut McTranscript) {
    if !transcript.is_null() {
        drop(Box::from_raw(transcript));
    }
}

/// Create an inner product proof.
///
/// `l_vector` and `r_vector` receive `ceil(log2(n))` round commitments each
/// and `ap_value` the final folded scalar. Aborts on null required pointers
/// or `n == 0`.
///
/// # Safety
///
/// `a_vector` and `b_vector` must hold `n` scalars; `l_vector` and
/// `r_vector` must hold `ceil(log2(n))` slots each; `transcript` must be a
/// live handle.
#[no_mangle]
pub unsafe extern "C" fn mc_prove_inner_product(
    l_vector: *mut McCompressedRistretto,
    r_vector: *mut McCompressedRistretto,
    ap_value: *mut McScalar,
    transcript: *mut McTranscript,
    n: u64,
    generators_offset: u64,
    a_vector: *const McScalar,
    b_vector: *const McScalar,
) {
    if n == 0 {
        fatal("proof length must be non-zero");
    }
    if ap_value.is_null() || a_vector.is_null() || b_vector.is_null() {
        fatal("prover arguments must not be null");
    }
    let Some(transcript) = transcript.as_mut() else {
        fatal("transcript must not be null");
    };
    if l_vector.is_null() || r_vector.is_null() {
        fatal("round commitment outputs must not be null");
    }
    let rounds = multicommit_core::utils::num_rounds(n as usize);

    let a: Vec<Scalar> = slice::from_raw_parts(a_vector, n as usize)
        .iter()
        .map(scalar_from)
        .collect();
    let b: Vec<Scalar> = slice::from_raw_parts(b_vector, n as usize)
        .iter()
        .map(scalar_from)
        .collect();

    let proof = match ipa::prove(&mut transcript.inner, &a, &b, generators_offset) {
        Ok(proof) => proof,
        Err(e) => fatal(&e.to_string()),
    };

    if rounds > 0 {
        write_commitments(slice::from_raw_parts_mut(l_vector, rounds), &proof.l_vector);
        write_commitments(slice::from_raw_parts_mut(r_vector, rounds), &proof.r_vector);
    }
    (*ap_value).bytes = proof.ap_value.to_bytes();
}

/// Verify an inner product proof.
///
/// Returns `1` when the proof verifies and `0` otherwise; malformed point
/// encodings reject rather than abort. Aborts on null required pointers or
/// `n == 0`.
///
/// # Safety
///
/// `b_vector` must hold `n` scalars; `l_vector` and `r_vector` must hold
/// `ceil(log2(n))` points each; the remaining pointers must each cover one
/// element; `transcript` must be a live handle.
#[no_mangle]
pub unsafe extern "C" fn mc_verify_inner_product(
    transcript: *mut McTranscript,
    n: u64,
    generators_offset: u64,
    b_vector: *const McScalar,
    product: *const McScalar,
    a_commit: *const McCompressedRistretto,
    l_vector: *const McCompressedRistretto,
    r_vector: *const McCompressedRistretto,
    ap_value: *const McScalar,
) -> c_int {
    if n == 0 {
        fatal("proof length must be non-zero");
    }
    if b_vector.is_null() || product.is_null() || a_commit.is_null() || ap_value.is_null() {
        fatal("verifier arguments must not be null");
    }
    let Some(transcript) = transcript.as_mut() else {
        fatal("transcript must not be null");
    };
    if l_vector.is_null() || r_vector.is_null() {
        fatal("round commitments must not be null");
    }
    let rounds = multicommit_core::utils::num_rounds(n as usize);

    let collect_points = |ptr: *const McCompressedRistretto| -> Vec<CompressedRistretto> {
        slice::from_raw_parts(ptr, rounds)
            .iter()
            .map(|p| CompressedRistretto(p.ristretto_bytes))
            .collect()
    };
    let proof = InnerProductProof {
        l_vector: collect_points(l_vector),
        r_vector: collect_points(r_vector),
        ap_value: scalar_from(&*ap_value),
    };
    let b: Vec<Scalar> = slice::from_raw_parts(b_vector, n as usize)
        .iter()
        .map(scalar_from)
        .collect();

    match ipa::verify(
        &mut transcript.inner,
        &proof,
        n as usize,
        generators_offset,
        &b,
        &scalar_from(&*product),
        &CompressedRistretto((*a_commit).ristretto_bytes),
    ) {
        Ok(true) => 1,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use multicommit_core::{ristretto_generator, VartimeMultiscalarMul};
    use std::ptr;

    fn ensure_init() {
        let config = McConfig {
            backend: MC_CPU_BACKEND,
            num_precomputed_generators: 8,
        };
        let code = unsafe { mc_init(&config) };
        assert!(code == MC_SUCCESS || code == MC_ALREADY_INITIALIZED);
    }

    #[test]
    fn test_init_rejects_bad_config() {
        assert_eq!(unsafe { mc_init(ptr::null()) }, MC_INVALID_ARGUMENT);
        let bad = McConfig {
            backend: 9,
            num_precomputed_generators: 0,
        };
        assert_eq!(unsafe { mc_init(&bad) }, MC_INVALID_ARGUMENT);
        ensure_init();
        let again = McConfig {
            backend: MC_CPU_BACKEND,
            num_precomputed_generators: 0,
        };
        assert_eq!(unsafe { mc_init(&again) }, MC_ALREADY_INITIALIZED);
    }

    #[test]
    fn test_commitments_round_trip() {
        ensure_init();
        let data = [2u8, 3];
        let descriptor = McSequenceDescriptor {
            element_nbytes: 1,
            n: 2,
            data: data.as_ptr(),
            is_signed: 0,
        };
        let mut out = [McCompressedRistretto {
            ristretto_bytes: [0; 32],
        }];
        unsafe { mc_compute_pedersen_commitments(out.as_mut_ptr(), 1, &descriptor, 0) };

        let expected = ristretto_generator(0) * Scalar::from(2u64)
            + ristretto_generator(1) * Scalar::from(3u64);
        assert_eq!(out[0].ristretto_bytes, expected.compress().to_bytes());
    }

    #[test]
    fn test_commitments_with_supplied_generators() {
        ensure_init();
        let data = [1u8];
        let descriptor = McSequenceDescriptor {
            element_nbytes: 1,
            n: 1,
            data: data.as_ptr(),
            is_signed: 0,
        };
        let generator = McCompressedRistretto {
            ristretto_bytes: ristretto_generator(77).compress().to_bytes(),
        };
        let mut out = [McCompressedRistretto {
            ristretto_bytes: [0; 32],
        }];
        unsafe {
            mc_compute_pedersen_commitments_with_generators(
                out.as_mut_ptr(),
                1,
                &descriptor,
                &generator,
            )
        };
        assert_eq!(out[0].ristretto_bytes, generator.ristretto_bytes);
    }

    #[test]
    fn test_zero_sequences_skip_the_computation() {
        unsafe { mc_compute_pedersen_commitments(ptr::null_mut(), 0, ptr::null(), 0) };
    }

    #[test]
    fn test_get_generators_error_codes() {
        assert_eq!(
            unsafe { mc_get_generators(ptr::null_mut(), 0, 0) },
            MC_SUCCESS
        );
        assert_eq!(
            unsafe { mc_get_generators(ptr::null_mut(), 0, 3) },
            MC_INVALID_ARGUMENT
        );

        let mut out = [McCompressedRistretto {
            ristretto_bytes: [0; 32],
        }; 2];
        assert_eq!(unsafe { mc_get_generators(out.as_mut_ptr(), 5, 2) }, MC_SUCCESS);
        assert_eq!(
            out[0].ristretto_bytes,
            ristretto_generator(5).compress().to_bytes()
        );
        assert_eq!(
            out[1].ristretto_bytes,
            ristretto_generator(6).compress().to_bytes()
        );
    }

    #[test]
    fn test_get_one_commit() {
        assert_eq!(
            unsafe { mc_get_one_commit(ptr::null_mut(), 1) },
            MC_INVALID_ARGUMENT
        );
        let mut out = McCompressedRistretto {
            ristretto_bytes: [1; 32],
        };
        assert_eq!(unsafe { mc_get_one_commit(&mut out, 0) }, MC_SUCCESS);
        assert_eq!(out.ristretto_bytes, [0u8; 32]);

        assert_eq!(unsafe { mc_get_one_commit(&mut out, 2) }, MC_SUCCESS);
        let expected = ristretto_generator(0) + ristretto_generator(1);
        assert_eq!(out.ristretto_bytes, expected.compress().to_bytes());
    }

    #[test]
    fn test_inner_product_prove_and_verify() {
        ensure_init();
        let to_scalar = |v: u64| McScalar {
            bytes: Scalar::from(v).to_bytes(),
        };
        let a: Vec<McScalar> = [1u64, 2, 3, 4].map(to_scalar).to_vec();
        let b: Vec<McScalar> = [5u64, 6, 7, 8].map(to_scalar).to_vec();

        let a_scalars: Vec<Scalar> = a.iter().map(scalar_from).collect();
        let generators = get_generators(0, 4);
        let a_commit = McCompressedRistretto {
            ristretto_bytes: RistrettoPoint::vartime_multiscalar_mul(&a_scalars, &generators)
                .compress()
                .to_bytes(),
        };
        let product = to_scalar(70);

        let mut l = [McCompressedRistretto {
            ristretto_bytes: [0; 32],
        }; 2];
        let mut r = l;
        let mut ap = McScalar { bytes: [0; 32] };

        let prover_transcript = mc_transcript_new();
        unsafe {
            mc_prove_inner_product(
                l.as_mut_ptr(),
                r.as_mut_ptr(),
                &mut ap,
                prover_transcript,
                4,
                0,
                a.as_ptr(),
                b.as_ptr(),
            );
            mc_transcript_free(prover_transcript);
        }

        let verifier_transcript = mc_transcript_new();
        let accepted = unsafe {
            mc_verify_inner_product(
                verifier_transcript,
                4,
                0,
                b.as_ptr(),
                &product,
                &a_commit,
                l.as_ptr(),
                r.as_ptr(),
                &ap,
            )
        };
        unsafe { mc_transcript_free(verifier_transcript) };
        assert_eq!(accepted, 1);

        // tampering with the final scalar must reject
        let mut forged = ap;
        forged.bytes = (scalar_from(&ap) + Scalar::ONE).to_bytes();
        let verifier_transcript = mc_transcript_new();
        let accepted = unsafe {
            mc_verify_inner_product(
                verifier_transcript,
                4,
                0,
                b.as_ptr(),
                &product,
                &a_commit,
                l.as_ptr(),
                r.as_ptr(),
                &forged,
            )
        };
        unsafe { mc_transcript_free(verifier_transcript) };
        assert_eq!(accepted, 0);
    }
}
