//! Rating domain errors
//!
//! Two families of failure exist: `InvalidInput` for a bad value on a
//! single document or line item, and `Configuration` for a rate table
//! that is incomplete when it is built. Both abort the run.

use core_kernel::MoneyError;
use thiserror::Error;

/// Errors that can occur in the rating domain
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RatingError {
    /// A field on the input document cannot be rated
    #[error("Invalid input for {field} = {value}: {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// The rate table is missing or has malformed entries
    #[error("Rate table configuration error: {0}")]
    Configuration(String),

    /// Monetary arithmetic failed
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),
}

impl RatingError {
    /// Creates an invalid input error naming the offending field and value
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl std::fmt::Display,
        reason: impl Into<String>,
    ) -> Self {
        RatingError::InvalidInput {
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Creates a rate table configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        RatingError::Configuration(message.into())
    }

    /// Returns true for per-record input failures
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, RatingError::InvalidInput { .. })
    }
}

/// Result alias for rating operations
pub type RatingResult<T> = Result<T, RatingError>;
