//! Error types for the frame solver

use thiserror::Error;

/// Main error type for frame operations
#[derive(Error, Debug)]
pub enum FrameError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Malformed parameter file: {0}")]
    MalformedFile(#[from] serde_json::Error),

    #[error("Singular stiffness matrix - {0}")]
    SingularSystem(String),

    #[error("Model not solved - run solve() first")]
    NotSolved,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for frame operations
pub type FrameResult<T> = Result<T, FrameError>;
