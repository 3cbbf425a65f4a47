//! Error taxonomy for the nested Monte Carlo engine.
//!
//! All errors are surfaced synchronously to the orchestrator's caller.
//! A simulation run is an all-or-nothing batch: any failure aborts the
//! whole run and no partial result set is returned.

use thiserror::Error;

/// Convenience result alias used across the engine crates.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Top-level engine error.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A numeric simulation parameter failed validation before any work
    /// started (non-positive grid size or horizon, zero path counts).
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name as exposed to the caller.
        name: &'static str,
        /// Description of why the value was rejected.
        reason: String,
    },

    /// The XVA request itself is malformed: unknown kind token, negative
    /// or non-finite rate, duplicate kind.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Accelerator unavailable or selection failed.
    #[error(transparent)]
    Device(#[from] DeviceError),

    /// An internal task hit an unexpected numeric condition. Fatal for
    /// the whole batch.
    #[error("computation failure: {0}")]
    ComputationFailure(String),
}

impl EngineError {
    /// Shorthand for an [`EngineError::InvalidParameter`].
    pub fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Accelerator device errors.
///
/// Surfaced to the caller unchanged; whether to retry on the CPU backend
/// is a caller policy decision, not an engine one.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DeviceError {
    /// No accelerator runtime is linked or no device is present.
    #[error("no accelerator available")]
    Unavailable,

    /// The requested device id does not exist.
    #[error("invalid device id {0}")]
    InvalidDevice(u32),

    /// The device exists but could not be selected.
    #[error("device selection failed: {0}")]
    SelectionFailed(String),
}
