//! Error types for cost and price computation.

use thiserror::Error;

/// Result type for cost operations.
pub type CostResult<T> = Result<T, CostError>;

/// Errors raised at the boundary of the cost and pricing engines.
///
/// Any finite number is accepted, including negatives. Only values that
/// would poison every downstream sum are rejected, plus a printer
/// amortization budget that is not positive.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CostError {
    /// An input was NaN or infinite.
    #[error("non-finite value for {field}: {value}")]
    NonFinite {
        /// Name of the offending input.
        field: String,
        /// The rejected value.
        value: f64,
    },

    /// A value that must be strictly positive was zero or negative.
    #[error("{field} must be positive, got {value}")]
    NotPositive {
        /// Name of the offending input.
        field: String,
        /// The rejected value.
        value: f64,
    },
}

impl CostError {
    /// Create a `NonFinite` error for the given field.
    #[must_use]
    pub fn non_finite(field: impl Into<String>, value: f64) -> Self {
        Self::NonFinite {
            field: field.into(),
            value,
        }
    }

    /// Create a `NotPositive` error for the given field.
    #[must_use]
    pub fn not_positive(field: impl Into<String>, value: f64) -> Self {
        Self::NotPositive {
            field: field.into(),
            value,
        }
    }
}

/// Reject NaN and infinities, passing finite values through.
pub(crate) fn ensure_finite(field: &str, value: f64) -> CostResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CostError::non_finite(field, value))
    }
}
