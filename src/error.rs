//! PoppyTalk Error Types
//!
//! Weather failures have their own type in [`crate::weather::GatewayError`]
//! because they are absorbed rather than propagated.

use std::path::PathBuf;
use thiserror::Error;

/// Central error type for PoppyTalk
#[derive(Error, Debug)]
pub enum PoppyError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Audio playback error: {0}")]
    Audio(String),

    #[error("Missing clip for actor '{actor}': {}", .path.display())]
    MissingAsset { actor: String, path: PathBuf },

    #[error("Invalid token: {0:?}")]
    InvalidToken(String),

    #[error("Trigger error: {0}")]
    Trigger(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for PoppyTalk operations
pub type PoppyResult<T> = Result<T, PoppyError>;
