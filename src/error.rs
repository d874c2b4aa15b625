//! Errors surfaced by the command line tooling.

use thiserror::Error;
use wayline_config::ConfigError;
use wayline_protocols::PayloadError;

pub type Result<T> = std::result::Result<T, WaylineError>;

#[derive(Debug, Error)]
pub enum WaylineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Payload error: {0}")]
    Payload(#[from] PayloadError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
