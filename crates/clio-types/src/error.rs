// ─────────────────────────────────────────────────────────────────────
// Nine Owls — CLIO Kernel Error Hierarchy
// ─────────────────────────────────────────────────────────────────────

use thiserror::Error;

/// Root error type for all CLIO kernel failures.
///
/// The computation is deterministic, so none of these are transient:
/// retrying the same call yields the same error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClioError {
    /// Rejected before any simulation work (geometry mode, step size,
    /// schedule window, site count, JSON shape).
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Phase, frequency, adjacency or time arrays disagree in shape.
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),
}

pub type ClioResult<T> = Result<T, ClioError>;

impl ClioError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    pub fn dims(msg: impl Into<String>) -> Self {
        Self::DimensionMismatch(msg.into())
    }
}
