//! Payload conversion errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("Value cannot be encoded: {0}")]
    Unsupported(String),

    #[error("Payload has no encoding metadata")]
    MissingEncoding,

    #[error("Unknown payload encoding: {0}")]
    UnknownEncoding(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
