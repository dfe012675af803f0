//! Error types for the WealthLens core crate.
//!
//! Classification itself never fails. These errors cover caller contract
//! violations only, such as building a holding with a negative value.

use rust_decimal::Decimal;
use thiserror::Error;

/// A specialized Result type for core operations.
pub type LensResult<T> = Result<T, LensError>;

/// Errors raised for invalid caller input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LensError {
    /// Invalid holding data.
    #[error("Invalid holding '{id}': {reason}")]
    InvalidHolding {
        /// The holding ID.
        id: String,
        /// The reason the holding is invalid.
        reason: String,
    },

    /// Missing required field during construction.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: String,
    },

    /// Negative currency amount where only non-negative values are allowed.
    #[error("Negative value for '{id}': {value}")]
    NegativeValue {
        /// The holding ID.
        id: String,
        /// The offending value.
        value: Decimal,
    },

    /// Invalid wrapper allocation percentages.
    #[error("Invalid allocation: {reason}")]
    InvalidAllocation {
        /// Why the allocation was rejected.
        reason: String,
    },
}

impl LensError {
    /// Create an invalid holding error.
    #[must_use]
    pub fn invalid_holding(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidHolding {
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// Create a missing field error.
    #[must_use]
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create an invalid allocation error.
    #[must_use]
    pub fn invalid_allocation(reason: impl Into<String>) -> Self {
        Self::InvalidAllocation {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_display() {
        let err = LensError::invalid_holding("H1", "empty name");
        assert!(err.to_string().contains("H1"));
        assert!(err.to_string().contains("empty name"));

        let err = LensError::missing_field("current_value");
        assert!(err.to_string().contains("current_value"));

        let err = LensError::NegativeValue {
            id: "H2".to_string(),
            value: dec!(-10),
        };
        assert!(err.to_string().contains("-10"));
    }

    #[test]
    fn test_error_clone() {
        let err = LensError::invalid_allocation("sums to 140");
        assert_eq!(err.clone(), err);
    }
}
