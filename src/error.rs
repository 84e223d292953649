//! Error types for the financial wellness auditor

use thiserror::Error;

/// Result type alias for auditor operations
pub type Result<T> = std::result::Result<T, AuditorError>;

#[derive(Error, Debug)]
pub enum AuditorError {

    // =============================
    // Core Pipeline Errors
    // =============================

    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Invalid tool input: {0}")]
    InvalidToolInput(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    // =============================
    // External Library Conversions
    // =============================

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
