//! Engine error types.

use thiserror::Error;

/// Errors produced when validating engine configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// Confidence threshold outside the 0-100 range.
    #[error("monetize confidence must be at most 100, got {value}")]
    InvalidThreshold {
        /// The invalid value provided.
        value: u8,
    },

    /// Negative per-request rate.
    #[error("fallback rate must not be negative, got {value}")]
    NegativeRate {
        /// The invalid value provided.
        value: String,
    },
}
