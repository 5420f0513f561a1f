//! Errors surfaced by business operations.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::finance::FinanceError;
use crate::import::ImportError;
use crate::ledger::LedgerError;
use crate::schedule::ScheduleError;
use crate::store::StoreError;
use crate::workflow::WorkflowError;

/// Any failure of a business operation. Nothing is committed when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TradeError {
    /// Calculator input rejected.
    #[error(transparent)]
    Finance(#[from] FinanceError),

    /// Application terms rejected.
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// Status transition rejected.
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    /// Credit reservation rejected.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Import creation or stage change rejected.
    #[error(transparent)]
    Import(#[from] ImportError),

    /// Payment schedule change rejected.
    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    /// Lookup failed or a concurrent change won.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The actor may not perform this operation.
    #[error("Forbidden: {0}")]
    Forbidden(String),
}

impl TradeError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Finance(_) => 400,
            Self::Application(inner) => inner.status_code(),
            Self::Workflow(inner) => inner.status_code(),
            Self::Ledger(inner) => inner.status_code(),
            Self::Import(inner) => inner.status_code(),
            Self::Schedule(inner) => inner.status_code(),
            Self::Store(inner) => inner.status_code(),
            Self::Forbidden(_) => 403,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Finance(inner) => inner.error_code(),
            Self::Application(inner) => inner.error_code(),
            Self::Workflow(inner) => inner.error_code(),
            Self::Ledger(inner) => inner.error_code(),
            Self::Import(inner) => inner.error_code(),
            Self::Schedule(inner) => inner.error_code(),
            Self::Store(inner) => inner.error_code(),
            Self::Forbidden(_) => "FORBIDDEN",
        }
    }

    /// Returns true if retrying the whole operation may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Store(StoreError::VersionConflict { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::{ApplicationStatus, AxisStatus, StatusAxis};
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use tradeline_shared::types::CreditApplicationId;

    #[rstest]
    #[case(TradeError::from(FinanceError::EmptyTerms), 400, "INVALID_TERMS")]
    #[case(
        TradeError::from(ApplicationError::MissingApprovedTerms),
        409,
        "MISSING_APPROVED_TERMS"
    )]
    #[case(
        TradeError::from(WorkflowError::IllegalTransition {
            axis: StatusAxis::Application,
            from: AxisStatus::Application(ApplicationStatus::Draft),
            to: AxisStatus::Application(ApplicationStatus::Approved),
        }),
        409,
        "ILLEGAL_TRANSITION"
    )]
    #[case(
        TradeError::from(LedgerError::InsufficientCredit {
            requested: dec!(2),
            available: dec!(1),
            shortfall: dec!(1),
        }),
        422,
        "INSUFFICIENT_CREDIT"
    )]
    #[case(
        TradeError::from(ImportError::ApplicationNotOpen(CreditApplicationId::new())),
        409,
        "APPLICATION_NOT_OPEN"
    )]
    #[case(
        TradeError::from(StoreError::VersionConflict { expected: 1, actual: 2 }),
        409,
        "CONCURRENCY_CONFLICT"
    )]
    #[case(TradeError::Forbidden("nope".to_string()), 403, "FORBIDDEN")]
    fn test_status_and_code(
        #[case] err: TradeError,
        #[case] status: u16,
        #[case] code: &str,
    ) {
        assert_eq!(err.status_code(), status);
        assert_eq!(err.error_code(), code);
    }

    #[test]
    fn test_only_version_conflicts_are_retryable() {
        assert!(TradeError::from(StoreError::VersionConflict { expected: 0, actual: 1 }).is_retryable());
        assert!(!TradeError::Forbidden(String::new()).is_retryable());
    }

    #[test]
    fn test_message_passes_through() {
        let err = TradeError::from(LedgerError::NegativeAmount(dec!(-5)));
        assert_eq!(err.to_string(), "Reservation amount cannot be negative, got -5");
    }
}
