//! Typed errors for the pillar engine.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use thiserror::Error;

use crate::types::article::ArticleId;

/// Errors that can occur during analysis, suggestion, and authoring
/// operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Referenced article does not exist
    #[error("article not found: {id}")]
    NotFound { id: ArticleId },

    /// Article exists but is not in a published state
    #[error("article {id} is not published")]
    NotPublished { id: ArticleId },

    /// External generation call failed
    #[error("generation provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Caller-supplied input invalid (empty topic, zero limit, ...)
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// Storage operation failed
    #[error("storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Operation was cancelled
    #[error("operation cancelled")]
    Cancelled,
}

impl EngineError {
    /// Shorthand for an `InvalidInput` error.
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Shorthand for a `Storage` error wrapping any error value.
    pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Storage(Box::new(err))
    }
}

/// Errors that can occur when calling an external generation backend.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// HTTP transport failure (connect, timeout, TLS)
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Non-2xx response from the backend
    #[error("provider returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body did not match the expected shape
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),

    /// Required API key missing from configuration
    #[error("{0} API key not configured")]
    MissingApiKey(&'static str),
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Result type alias for provider calls.
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;
