//! Error types for persistence and import.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid game state: {0}")]
    Invalid(String),

    #[error("Save checksum mismatch")]
    Checksum,

    #[error("Unsupported save version: {0}")]
    UnsupportedVersion(u32),

    #[error("Could not determine a save directory")]
    NoSaveDirectory,
}

pub type Result<T> = std::result::Result<T, StoreError>;
