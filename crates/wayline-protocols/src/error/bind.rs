//! Context binding errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BindError {
    #[error("Invalid context key: {0:?}")]
    InvalidKey(String),

    #[error("Binding rejected for {key}: {message}")]
    Rejected { key: String, message: String },
}

impl BindError {
    pub fn rejected(key: impl Into<String>, message: impl Into<String>) -> Self {
        BindError::Rejected {
            key: key.into(),
            message: message.into(),
        }
    }
}
