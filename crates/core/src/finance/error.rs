//! Validation errors for financing inputs.

use rust_decimal::Decimal;
use thiserror::Error;

/// Malformed input to the financial calculator.
///
/// Inputs are never clamped or corrected; the caller must resubmit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FinanceError {
    /// FOB value must be strictly positive.
    #[error("FOB value must be positive, got {0}")]
    NonPositiveValue(Decimal),

    /// The computed cost of this FOB value does not fit a `Decimal`.
    #[error("FOB value {0} is too large to finance")]
    ValueTooLarge(Decimal),

    /// A percentage rate fell outside 0..=100.
    #[error("{field} must be between 0 and 100, got {rate}")]
    RateOutOfRange {
        /// Which rate was rejected.
        field: &'static str,
        /// The rejected value.
        rate: Decimal,
    },

    /// At least one installment term is required.
    #[error("Installment terms cannot be empty")]
    EmptyTerms,

    /// Installment day-counts must be positive.
    #[error("Installment term must be a positive number of days, got {0}")]
    NonPositiveTerm(u32),

    /// Installment day-counts must be strictly increasing.
    #[error("Installment terms must be strictly increasing: {0:?}")]
    UnorderedTerms(Vec<u32>),
}

impl FinanceError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NonPositiveValue(_) | Self::ValueTooLarge(_) => "INVALID_FOB_VALUE",
            Self::RateOutOfRange { .. } => "RATE_OUT_OF_RANGE",
            Self::EmptyTerms | Self::NonPositiveTerm(_) | Self::UnorderedTerms(_) => {
                "INVALID_TERMS"
            }
        }
    }
}
