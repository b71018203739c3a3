//! Error type shared by every fallible operation in the crate.

use thiserror::Error;

/// Result alias using [`CoreError`].
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors surfaced by generation, roster building, and game simulation.
///
/// Numeric formulas never fail; only bad caller input or bad configuration
/// can produce one of these.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Caller input that names something outside the known set
    /// (position code, tier label).
    #[error("validation error: {0}")]
    Validation(String),

    /// A configuration or roster that cannot produce a sensible result.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A JSON configuration document that does not match the expected shape.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
