//! Per-application credit ledger.
//!
//! The ledger keeps a running `used` total next to the reservation list so
//! the capacity check is a single comparison. Callers serialize access per
//! application (see `store`); the ledger itself is plain data.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use tradeline_shared::types::{CreditApplicationId, ImportId, ReservationId};

use crate::ledger::error::LedgerError;
use crate::ledger::types::{CreditSummary, LedgerChange, Reservation};

/// Reservations held against one application's final credit limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditLedger {
    application_id: CreditApplicationId,
    limit: Decimal,
    used: Decimal,
    reservations: Vec<Reservation>,
}

impl CreditLedger {
    /// Opens an empty ledger with the given limit.
    #[must_use]
    pub fn new(application_id: CreditApplicationId, limit: Decimal) -> Self {
        Self {
            application_id,
            limit,
            used: Decimal::ZERO,
            reservations: Vec::new(),
        }
    }

    /// Final credit limit.
    #[must_use]
    pub fn limit(&self) -> Decimal {
        self.limit
    }

    /// Sum of active reservations.
    #[must_use]
    pub fn used(&self) -> Decimal {
        self.used
    }

    /// `limit - sum(active reservations)`.
    #[must_use]
    pub fn available(&self) -> Decimal {
        self.limit - self.used
    }

    /// Every reservation ever made, released ones included.
    #[must_use]
    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    /// The active reservation held by `import_id`, if any.
    #[must_use]
    pub fn active_reservation(&self, import_id: ImportId) -> Option<&Reservation> {
        self.reservations
            .iter()
            .find(|r| r.import_id == import_id && r.is_active())
    }

    /// Reserves `amount` for `import_id` if it fits under the limit.
    ///
    /// Zero is a valid amount (an import paid fully up front).
    ///
    /// # Errors
    ///
    /// - `NegativeAmount` for amounts below zero
    /// - `DuplicateReservation` if the import already holds credit
    /// - `InsufficientCredit` with the shortfall if `used + amount > limit`
    pub fn reserve(
        &mut self,
        import_id: ImportId,
        amount: Decimal,
        at: DateTime<Utc>,
    ) -> Result<(Reservation, LedgerChange), LedgerError> {
        if amount < Decimal::ZERO {
            return Err(LedgerError::NegativeAmount(amount));
        }
        if self.active_reservation(import_id).is_some() {
            return Err(LedgerError::DuplicateReservation(import_id));
        }

        let available = self.available();
        if amount > available {
            let shortfall = amount - available;
            warn!(
                application_id = %self.application_id,
                %import_id,
                %amount,
                %available,
                %shortfall,
                "Reservation refused"
            );
            return Err(LedgerError::InsufficientCredit {
                requested: amount,
                available,
                shortfall,
            });
        }

        let reservation = Reservation {
            id: ReservationId::new(),
            import_id,
            amount,
            reserved_at: at,
            released_at: None,
        };
        self.reservations.push(reservation.clone());
        self.used += amount;

        debug!(
            application_id = %self.application_id,
            %import_id,
            %amount,
            available = %self.available(),
            "Credit reserved"
        );

        let change = LedgerChange {
            application_id: self.application_id,
            import_id,
            delta: amount,
            available: self.available(),
            at,
        };
        Ok((reservation, change))
    }

    /// Releases the active reservation held by `import_id`.
    ///
    /// Releasing twice, or releasing an import that never reserved, is a
    /// no-op and returns `None`.
    pub fn release(&mut self, import_id: ImportId, at: DateTime<Utc>) -> Option<LedgerChange> {
        let reservation = self
            .reservations
            .iter_mut()
            .find(|r| r.import_id == import_id && r.is_active())?;

        reservation.released_at = Some(at);
        let amount = reservation.amount;
        self.used -= amount;

        debug!(
            application_id = %self.application_id,
            %import_id,
            %amount,
            available = %self.available(),
            "Credit released"
        );

        Some(LedgerChange {
            application_id: self.application_id,
            import_id,
            delta: -amount,
            available: self.available(),
            at,
        })
    }

    /// Snapshot of limit, usage and active count.
    #[must_use]
    pub fn summary(&self) -> CreditSummary {
        CreditSummary {
            application_id: self.application_id,
            limit: self.limit,
            used: self.used,
            available: self.available(),
            active_reservations: self.reservations.iter().filter(|r| r.is_active()).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn ledger(limit: Decimal) -> CreditLedger {
        CreditLedger::new(CreditApplicationId::new(), limit)
    }

    #[test]
    fn test_reserve_then_release_scenario() {
        let mut ledger = ledger(dec!(100000));
        let import_a = ImportId::new();
        let import_b = ImportId::new();
        let now = Utc::now();

        let (_, change) = ledger.reserve(import_a, dec!(70000), now).unwrap();
        assert_eq!(change.delta, dec!(70000));
        assert_eq!(change.available, dec!(30000));
        assert_eq!(ledger.available(), dec!(30000));

        assert_eq!(
            ledger.reserve(import_b, dec!(40000), now),
            Err(LedgerError::InsufficientCredit {
                requested: dec!(40000),
                available: dec!(30000),
                shortfall: dec!(10000),
            })
        );

        let released = ledger.release(import_a, now).unwrap();
        assert_eq!(released.delta, dec!(-70000));
        assert_eq!(released.available, dec!(100000));

        assert!(ledger.reserve(import_b, dec!(40000), now).is_ok());
        assert_eq!(ledger.available(), dec!(60000));
    }

    #[test]
    fn test_reserve_exactly_at_capacity() {
        let mut ledger = ledger(dec!(1000));
        let now = Utc::now();
        ledger.reserve(ImportId::new(), dec!(400), now).unwrap();

        assert!(ledger.reserve(ImportId::new(), dec!(600.01), now).is_err());
        assert!(ledger.reserve(ImportId::new(), dec!(600), now).is_ok());
        assert_eq!(ledger.available(), Decimal::ZERO);
    }

    #[test]
    fn test_zero_reservation_allowed() {
        let mut ledger = ledger(dec!(1000));
        let (reservation, _) = ledger.reserve(ImportId::new(), dec!(0), Utc::now()).unwrap();
        assert!(reservation.is_active());
        assert_eq!(ledger.available(), dec!(1000));
        assert_eq!(ledger.summary().active_reservations, 1);
    }

    #[test]
    fn test_negative_reservation_rejected() {
        let mut ledger = ledger(dec!(1000));
        assert_eq!(
            ledger.reserve(ImportId::new(), dec!(-1), Utc::now()),
            Err(LedgerError::NegativeAmount(dec!(-1)))
        );
    }

    #[test]
    fn test_duplicate_reservation_rejected_until_released() {
        let mut ledger = ledger(dec!(1000));
        let import_id = ImportId::new();
        let now = Utc::now();

        ledger.reserve(import_id, dec!(100), now).unwrap();
        assert_eq!(
            ledger.reserve(import_id, dec!(100), now),
            Err(LedgerError::DuplicateReservation(import_id))
        );

        ledger.release(import_id, now);
        assert!(ledger.reserve(import_id, dec!(100), now).is_ok());
    }

    #[test]
    fn test_release_is_idempotent() {
        let mut ledger = ledger(dec!(1000));
        let import_id = ImportId::new();
        let now = Utc::now();

        ledger.reserve(import_id, dec!(250), now).unwrap();
        assert!(ledger.release(import_id, now).is_some());
        assert!(ledger.release(import_id, now).is_none());
        assert!(ledger.release(ImportId::new(), now).is_none());
        assert_eq!(ledger.available(), dec!(1000));
        assert_eq!(ledger.used(), Decimal::ZERO);
    }

    #[test]
    fn test_summary() {
        let mut ledger = ledger(dec!(5000));
        let now = Utc::now();
        let first = ImportId::new();
        ledger.reserve(first, dec!(1000), now).unwrap();
        ledger.reserve(ImportId::new(), dec!(1500), now).unwrap();
        ledger.release(first, now);

        let summary = ledger.summary();
        assert_eq!(summary.limit, dec!(5000));
        assert_eq!(summary.used, dec!(1500));
        assert_eq!(summary.available, dec!(3500));
        assert_eq!(summary.active_reservations, 1);
        assert_eq!(ledger.reservations().len(), 2);
    }
}
