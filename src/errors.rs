//! Unified error types and result handling for `FreelanceBuddy`.

use thiserror::Error;

/// Crate-wide error type covering validation, persistence, and lookup failures.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    #[error("Client not found: {id}")]
    ClientNotFound { id: String },

    #[error("Project not found: {id}")]
    ProjectNotFound { id: String },
}

impl Error {
    /// Shorthand for a validation failure with a human-readable message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
