//! Error types for exposure analytics.
//!
//! Missing or malformed factsheet data is never an error here; it is resolved
//! by heuristics and counted in [`FallbackStats`](crate::diagnostics::FallbackStats).
//! These variants cover caller contract violations only.

use thiserror::Error;
use wealthlens_core::LensError;

/// Result type for exposure operations.
pub type ExposureResult<T> = Result<T, ExposureError>;

/// Errors that can occur during exposure analysis.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExposureError {
    /// Invalid engine configuration.
    #[error("Invalid config: {reason}")]
    InvalidConfig {
        /// Why the configuration was rejected.
        reason: String,
    },

    /// Invalid holding input.
    #[error(transparent)]
    Holding(#[from] LensError),
}

impl ExposureError {
    /// Create an invalid config error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}
