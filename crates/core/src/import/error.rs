//! Import error types.

use thiserror::Error;
use tradeline_shared::types::{CreditApplicationId, Currency};

use crate::import::types::ImportStage;

/// Errors that can occur while creating or moving an import.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    /// Imports need an approved application with published final terms.
    #[error("Application {0} is not approved and finalized")]
    ApplicationNotOpen(CreditApplicationId),

    /// The FOB value must use the application's currency.
    #[error("Import currency {actual} does not match application currency {expected}")]
    CurrencyMismatch {
        /// Application currency.
        expected: Currency,
        /// Currency supplied.
        actual: Currency,
    },

    /// Stages move one step forward, or to cancelled from a live stage.
    #[error("Illegal import stage transition from {from} to {to}")]
    IllegalStageTransition {
        /// Current stage.
        from: ImportStage,
        /// Requested stage.
        to: ImportStage,
    },
}

impl ImportError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::CurrencyMismatch { .. } => 400,
            Self::ApplicationNotOpen(_) | Self::IllegalStageTransition { .. } => 409,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ApplicationNotOpen(_) => "APPLICATION_NOT_OPEN",
            Self::CurrencyMismatch { .. } => "CURRENCY_MISMATCH",
            Self::IllegalStageTransition { .. } => "ILLEGAL_STAGE_TRANSITION",
        }
    }
}
