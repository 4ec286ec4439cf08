//! Process-wide backend selection
//!
//! The backend is chosen exactly once, at [`init`]. Every later entry point
//! reads the selection through [`backend`]; there is no hot-swapping. The
//! configured precomputation is performed during init so that concurrent
//! callers only ever observe an immutable state.

use crate::{gpu, msm};
use multicommit_core::{
    precompute_generators, CompressedRistretto, MulticommitError, MulticommitResult,
    RistrettoPoint, Sequence,
};
use std::sync::OnceLock;

/// Execution backend for the commitment kernels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Rayon-parallel execution on the host
    Cpu = 1,
    /// CUDA kernel execution, falling back to the host when unavailable
    Gpu = 2,
}

impl TryFrom<i32> for BackendKind {
    type Error = MulticommitError;

    fn try_from(value: i32) -> MulticommitResult<Self> {
        match value {
            1 => Ok(BackendKind::Cpu),
            2 => Ok(BackendKind::Gpu),
            other => Err(MulticommitError::InvalidConfig(format!(
                "unknown backend id {other}"
            ))),
        }
    }
}

/// Library configuration, consumed once by [`init`]
#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// Which backend executes commitment kernels
    pub backend: BackendKind,
    /// How many generators to precompute into the process-wide cache
    pub num_precomputed_generators: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendKind::Cpu,
            num_precomputed_generators: 0,
        }
    }
}

/// The selected backend and its capability set
#[derive(Debug)]
pub struct Backend {
    kind: BackendKind,
}

impl Backend {
    /// Which backend this is
    pub fn kind(&self) -> BackendKind {
        self.kind
    }

    /// Commit each sequence against a shared generator vector
    pub fn commit_sequences(
        &self,
        sequences: &[Sequence],
        generators: &[RistrettoPoint],
    ) -> Vec<CompressedRistretto> {
        match self.kind {
            BackendKind::Cpu => msm::commit_sequences(sequences, generators),
            BackendKind::Gpu => gpu::commit_sequences(sequences, generators),
        }
    }
}

static BACKEND: OnceLock<Backend> = OnceLock::new();

/// Initialize the library. Callable successfully at most once per process.
///
/// Precomputes the configured number of generators, then installs the
/// backend. A second call fails with [`MulticommitError::AlreadyInitialized`]
/// and leaves the existing state untouched.
pub fn init(config: Config) -> MulticommitResult<()> {
    if BACKEND.get().is_some() {
        return Err(MulticommitError::AlreadyInitialized);
    }
    precompute_generators(config.num_precomputed_generators);
    tracing::debug!(backend = ?config.backend, "initializing commitment backend");
    BACKEND
        .set(Backend {
            kind: config.backend,
        })
        .map_err(|_| MulticommitError::AlreadyInitialized)
}

/// Whether [`init`] has completed successfully
pub fn is_initialized() -> bool {
    BACKEND.get().is_some()
}

/// The process-wide backend, or an error before [`init`]
pub fn backend() -> MulticommitResult<&'static Backend> {
    BACKEND.get().ok_or(MulticommitError::NotInitialized)
}
