//! Workflow and activity execution errors.

use thiserror::Error;

use super::PayloadError;

/// Error surfaced by the host runtime or by business code behind a chain.
///
/// Interceptors never raise these for propagation problems; they only pass
/// through what the next link returned.
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("Execution failed: {0}")]
    Failed(String),

    #[error("Execution was cancelled")]
    Cancelled,

    #[error("Not registered: {0}")]
    NotRegistered(String),

    #[error("Payload error: {0}")]
    Payload(#[from] PayloadError),
}
