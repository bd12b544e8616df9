//! Error types for the IOC enrichment pipeline.

use thiserror::Error;

/// Result type alias for enrichment pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for feed loading, rule loading and orchestration.
///
/// The enrichment engine itself is total and never produces an error;
/// every variant here belongs to the collaborator layers around it.
#[derive(Debug, Error)]
pub enum Error {
    /// Feed file could not be read or parsed
    #[error("Feed error: {0}")]
    Feed(String),

    /// Threat rule file is malformed
    #[error("Rule error: {0}")]
    Rules(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV parsing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
