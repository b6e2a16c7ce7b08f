//! Error types for the Switchyard domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for wiring failures at the application edge.
#[derive(Debug, Error)]
pub enum Error {
    // --- Classifier errors ---
    #[error("Invalid routing patterns: {0}")]
    Classifier(#[from] ClassifierError),

    // --- Configuration errors ---
    #[error("Failed to load config: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError {
        status_code: u16,
        message: String,
    },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Empty completion from {0}")]
    EmptyResponse(String),
}

#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Corrupted memory file: {0}")]
    Corrupted(String),
}

#[derive(Debug, Clone, Error)]
pub enum ClassifierError {
    #[error("Invalid {group} pattern `{pattern}`: {reason}")]
    InvalidPattern {
        group: String,
        pattern: String,
        reason: String,
    },

    #[error("Pattern group `{0}` is empty")]
    EmptyGroup(String),
}
