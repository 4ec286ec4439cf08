//! Deterministic generator oracle and one-commit prefix sums
//!
//! Every generator `G[i]` is derived from its index alone, so any party can
//! reproduce any window of the generator stream without coordination. The
//! derivation hashes a domain-separated encoding of the index and maps the
//! digest onto the group with the Elligator-based uniform-bytes construction.
//!
//! A process-wide cache holds the first `n` generators when the caller asks
//! for precomputation; indices beyond the cache are derived on demand.

use crate::{Identity, RistrettoPoint};
use rayon::prelude::*;
use sha2::{Digest, Sha512};
use std::sync::{Mutex, RwLock};

/// Domain label prefixed to the index encoding before hashing to the curve.
const GENERATOR_DOMAIN: &[u8] = b"multicommit generator";

/// Derivation threshold below which parallel iteration is not worth the setup.
const PAR_THRESHOLD: usize = 1024;

static GENERATOR_CACHE: RwLock<Vec<RistrettoPoint>> = RwLock::new(Vec::new());
static ONE_COMMIT_CACHE: Mutex<Vec<RistrettoPoint>> = Mutex::new(Vec::new());

/// Derive the generator at `index`.
///
/// The map is fixed for the lifetime of the library: Sha-512 over the domain
/// label and the little-endian index, then `from_uniform_bytes` onto the
/// group. No algebraic relation between distinct outputs is known to any
/// caller, per the usual hash-to-curve assumption.
pub fn ristretto_generator(index: u64) -> RistrettoPoint {
    let mut hasher = Sha512::new();
    hasher.update(GENERATOR_DOMAIN);
    hasher.update(index.to_le_bytes());
    let digest = hasher.finalize();

    let mut bytes = [0u8; 64];
    bytes.copy_from_slice(&digest);
    RistrettoPoint::from_uniform_bytes(&bytes)
}

/// Fetch `count` generators starting at `offset`.
///
/// Serves the prefix covered by the precomputation cache and derives the rest
/// on demand, in parallel for large windows.
pub fn get_generators(offset: u64, count: usize) -> Vec<RistrettoPoint> {
    let cache = GENERATOR_CACHE.read().expect("generator cache poisoned");
    let cached: &[RistrettoPoint] = &cache;

    let derive = |i: usize| {
        let index = offset + i as u64;
        if index < cached.len() as u64 {
            cached[index as usize]
        } else {
            ristretto_generator(index)
        }
    };

    if count < PAR_THRESHOLD {
        (0..count).map(derive).collect()
    } else {
        (0..count).into_par_iter().map(derive).collect()
    }
}

/// Extend the process-wide generator cache to cover indices `[0, n)`.
///
/// Grow-only; a shorter request than the current cache is a no-op.
pub fn precompute_generators(n: u64) {
    let n = n as usize;
    let mut cache = GENERATOR_CACHE.write().expect("generator cache poisoned");
    if n <= cache.len() {
        return;
    }
    let start = cache.len() as u64;
    let fresh: Vec<RistrettoPoint> = (start..n as u64)
        .into_par_iter()
        .map(ristretto_generator)
        .collect();
    cache.extend(fresh);
}

/// Number of generators currently held by the precomputation cache.
pub fn num_precomputed_generators() -> usize {
    GENERATOR_CACHE.read().expect("generator cache poisoned").len()
}

/// Compute `G[0] + G[1] + ... + G[n-1]`, the identity when `n == 0`.
///
/// Prefix sums are memoized, so repeated calls with growing `n` only pay for
/// the new tail: `one_commit(n + 1) = one_commit(n) + G[n]`.
pub fn get_one_commit(n: u64) -> RistrettoPoint {
    if n == 0 {
        return RistrettoPoint::identity();
    }
    let n = n as usize;
    let mut sums = ONE_COMMIT_CACHE.lock().expect("one-commit cache poisoned");
    if n > sums.len() {
        let start = sums.len();
        let tail = get_generators(start as u64, n - start);
        let mut acc = if start == 0 {
            RistrettoPoint::identity()
        } else {
            sums[start - 1]
        };
        for g in tail {
            acc += g;
            sums.push(acc);
        }
    }
    sums[n - 1]
}
