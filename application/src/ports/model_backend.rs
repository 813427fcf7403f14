//! Model backend port
//!
//! Defines the single call contract for communicating with a model:
//! a (phase, input text) pair in, raw response text out. Implementations
//! (the offline fixture and the live HTTP adapter) live in the
//! infrastructure layer.

use async_trait::async_trait;
use thiserror::Error;
use triad_domain::Phase;

/// Errors that can occur during a backend call
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    #[error("Backend call timed out")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

impl BackendError {
    /// Check if this error represents a per-call timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, BackendError::Timeout)
    }
}

/// Backend for model communication
///
/// The phase selects one of three fixed instruction templates; the input is
/// the question or the answer-under-review. The returned string is expected
/// to be the phase's structured payload (free text for the planner).
#[async_trait]
pub trait ModelBackend: Send + Sync {
    /// Send one phase invocation and return the raw response text
    async fn invoke(&self, phase: Phase, input: &str) -> Result<String, BackendError>;
}
