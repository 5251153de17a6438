//! Error types for numint

use thiserror::Error;

/// Main error type for numint operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid function expression: {0}")]
    InvalidExpression(String),

    #[error("Evaluation failed at x = {x}: {message}")]
    Evaluation { x: f64, message: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Server error: {0}")]
    Server(String),
}

impl Error {
    /// Whether the error was caused by the client's input
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidExpression(_) | Error::Evaluation { .. } | Error::InvalidRequest(_)
        )
    }
}

/// Result type alias for numint operations
pub type Result<T> = std::result::Result<T, Error>;
