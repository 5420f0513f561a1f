//! Validation errors for credit application terms.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::finance::FinanceError;

/// Errors raised while validating requested, approved or final terms.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplicationError {
    /// Credit amounts must be positive.
    #[error("{field} must be positive, got {amount}")]
    NonPositiveAmount {
        /// Which amount was rejected.
        field: &'static str,
        /// The offending amount.
        amount: Decimal,
    },

    /// Rates or terms failed calculator validation.
    #[error(transparent)]
    InvalidTerms(#[from] FinanceError),

    /// Finalization needs the financial institution's approved terms.
    #[error("No approved terms recorded by the financial institution")]
    MissingApprovedTerms,

    /// The admin limit may not exceed what the institution approved.
    #[error("Credit limit {limit} exceeds approved amount {approved}")]
    LimitExceedsApproved {
        /// Requested final limit.
        limit: Decimal,
        /// Amount the institution approved.
        approved: Decimal,
    },
}

impl ApplicationError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MissingApprovedTerms => 409,
            Self::NonPositiveAmount { .. }
            | Self::InvalidTerms(_)
            | Self::LimitExceedsApproved { .. } => 400,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NonPositiveAmount { .. } => "INVALID_AMOUNT",
            Self::InvalidTerms(inner) => inner.error_code(),
            Self::MissingApprovedTerms => "MISSING_APPROVED_TERMS",
            Self::LimitExceedsApproved { .. } => "LIMIT_EXCEEDS_APPROVED",
        }
    }
}
