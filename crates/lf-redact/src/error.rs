//! Error types for the redaction crate.
//!
//! Redaction itself never fails; these cover the fallible edges around it.

use thiserror::Error;

/// Result type for fallible filter operations.
pub type Result<T> = std::result::Result<T, FilterError>;

/// Errors raised while building filters or record values.
#[derive(Error, Debug)]
pub enum FilterError {
    /// Failed to load, parse or validate the filter configuration.
    #[error("config error: {0}")]
    ConfigError(#[from] lf_config::ValidationError),

    /// A value could not be converted to or from JSON.
    #[error("json error: {0}")]
    JsonError(#[from] serde_json::Error),
}
