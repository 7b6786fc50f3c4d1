//! Error types for JetLime.

use thiserror::Error;

/// Main error type for JetLime operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum JetLimeError {
    /// The integrator supplied an invalid configuration (negative distance,
    /// missing content, unsupported arrangement).
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl JetLimeError {
    /// Shorthand for a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Whether this error stems from an invalid configuration.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

/// Result type alias for JetLime operations.
pub type Result<T> = std::result::Result<T, JetLimeError>;
