//! CLI error type.

use thiserror::Error;

/// Convenience result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors surfaced by the command-line layer.
#[derive(Debug, Error)]
pub enum CliError {
    /// Engine-level failure (validation, device, computation).
    #[error(transparent)]
    Engine(#[from] nmc_core::EngineError),

    /// Adapter-level failure (results table writing).
    #[error(transparent)]
    Io(#[from] nmc_io::IoError),

    /// Invalid command-line argument combination.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
