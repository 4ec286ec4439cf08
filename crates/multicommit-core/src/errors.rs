//! Error types for multicommit operations

use thiserror::Error;

/// Main error type for multicommit operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MulticommitError {
    /// No backend has been initialized yet
    #[error("backend is not initialized")]
    NotInitialized,

    /// A backend was already initialized by an earlier call
    #[error("backend is already initialized")]
    AlreadyInitialized,

    /// Invalid init configuration
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Sequence element width outside the supported range
    #[error("invalid element width of {nbytes} bytes")]
    InvalidElementWidth { nbytes: usize },

    /// Sequence buffer is not a whole number of elements
    #[error("data length {len} is not a multiple of the element width {nbytes}")]
    MisalignedData { len: usize, nbytes: usize },

    /// Vector length mismatch
    #[error("vector length mismatch: expected {expected}, got {actual}")]
    VectorLengthMismatch { expected: usize, actual: usize },

    /// Caller-supplied generator array is too short
    #[error("insufficient generators: need {needed}, have {available}")]
    InsufficientGenerators { needed: usize, available: usize },

    /// Empty input vectors where at least one element is required
    #[error("input vectors cannot be empty")]
    EmptyVectors,

    /// The transcript produced a zero challenge scalar
    #[error("transcript produced a zero challenge")]
    ZeroChallenge,

    /// A compressed point failed to decode
    #[error("invalid point encoding")]
    InvalidPoint,
}

/// Result type for multicommit operations
pub type MulticommitResult<T> = Result<T, MulticommitError>;
