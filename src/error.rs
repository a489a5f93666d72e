use thiserror::Error;

/// Custom Result type for this crate.
pub type Result<T> = std::result::Result<T, OewnLogicError>;

/// Enum representing all possible errors in the oewn_logic library.
///
/// Query-time "no solution" outcomes are never errors; relations model them
/// as empty solution sequences. These variants cover the load pipeline only.
#[derive(Error, Debug)]
pub enum OewnLogicError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Dataset decode error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("Data directory not found or could not be determined")]
    DataDirNotFound,

    #[error("Required data file not found: {0}")]
    DataFileNotFound(String),
}
