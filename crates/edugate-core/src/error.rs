//! Error types shared across EduGate crates

use thiserror::Error;

/// Result alias used throughout EduGate
pub type EdugateResult<T> = Result<T, EdugateError>;

/// Errors raised by tools, the remote collaborator and configuration loading
#[derive(Debug, Error)]
pub enum EdugateError {
    /// Tool lookup or execution error
    #[error("Tool error: {0}")]
    Tool(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error reported by the remote school-management API
    #[error("Remote error: {0}")]
    Remote(String),

    /// Invalid tool input
    #[error("Validation error: {0}")]
    Validation(String),

    /// JSON (de)serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl EdugateError {
    pub fn tool(msg: impl Into<String>) -> Self {
        Self::Tool(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn remote(msg: impl Into<String>) -> Self {
        Self::Remote(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
