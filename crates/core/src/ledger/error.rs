//! Ledger error types.

use rust_decimal::Decimal;
use thiserror::Error;
use tradeline_shared::types::ImportId;

/// Errors that can occur during reserve operations.
///
/// Release never fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Reserved amounts cannot be negative.
    #[error("Reservation amount cannot be negative, got {0}")]
    NegativeAmount(Decimal),

    /// The import already holds an active reservation.
    #[error("Import {0} already holds an active reservation")]
    DuplicateReservation(ImportId),

    /// The reservation would push usage past the limit.
    #[error(
        "Insufficient credit: requested {requested}, available {available}, short by {shortfall}"
    )]
    InsufficientCredit {
        /// Amount asked for.
        requested: Decimal,
        /// Amount still free under the limit.
        available: Decimal,
        /// `requested - available`.
        shortfall: Decimal,
    },
}

impl LedgerError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NegativeAmount(_) => 400,
            Self::DuplicateReservation(_) => 409,
            Self::InsufficientCredit { .. } => 422,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NegativeAmount(_) => "INVALID_AMOUNT",
            Self::DuplicateReservation(_) => "DUPLICATE_RESERVATION",
            Self::InsufficientCredit { .. } => "INSUFFICIENT_CREDIT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_insufficient_credit_message_carries_shortfall() {
        let err = LedgerError::InsufficientCredit {
            requested: dec!(40000),
            available: dec!(30000),
            shortfall: dec!(10000),
        };
        assert_eq!(err.status_code(), 422);
        assert_eq!(err.error_code(), "INSUFFICIENT_CREDIT");
        assert_eq!(
            err.to_string(),
            "Insufficient credit: requested 40000, available 30000, short by 10000"
        );
    }

    #[test]
    fn test_duplicate_reservation_error() {
        let err = LedgerError::DuplicateReservation(ImportId::new());
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.error_code(), "DUPLICATE_RESERVATION");
    }
}
