//! Error types for debugtap

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for debugtap operations.
///
/// Configuration coercion never fails, so everything here comes from
/// channel setup or from the write path. Channel setup errors are fatal
/// to instance initialization; write errors surface to the caller of
/// the log operation.
#[derive(Error, Debug)]
pub enum TapError {
    /// General I/O error (stream open, write)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Creating the named pipe failed
    #[error("failed to create fifo at {}: {source}", path.display())]
    FifoCreate {
        path: PathBuf,
        source: nix::Error,
    },

    /// The configured destination is not a path string
    #[error("destination must be a path string, got {0}")]
    InvalidDestination(String),
}

/// Result type alias using TapError
pub type TapResult<T> = Result<T, TapError>;
