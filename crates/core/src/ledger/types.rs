//! Ledger domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tradeline_shared::types::{CreditApplicationId, ImportId, ReservationId};

/// Credit held by one import against its application's limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    /// Reservation id.
    pub id: ReservationId,
    /// Import holding the credit.
    pub import_id: ImportId,
    /// Financed amount held.
    pub amount: Decimal,
    /// When the credit was reserved.
    pub reserved_at: DateTime<Utc>,
    /// When the credit was released; `None` while active.
    pub released_at: Option<DateTime<Utc>>,
}

impl Reservation {
    /// Returns true while the reservation counts against the limit.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.released_at.is_none()
    }
}

/// A committed change to an application's ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerChange {
    /// Application whose ledger changed.
    pub application_id: CreditApplicationId,
    /// Import that reserved or released.
    pub import_id: ImportId,
    /// Positive on reserve, negative on release.
    pub delta: Decimal,
    /// Available credit after the change.
    pub available: Decimal,
    /// When it happened.
    pub at: DateTime<Utc>,
}

/// Point-in-time view of an application's credit usage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditSummary {
    /// Application the summary is for.
    pub application_id: CreditApplicationId,
    /// Final credit limit.
    pub limit: Decimal,
    /// Sum of active reservations.
    pub used: Decimal,
    /// `limit - used`.
    pub available: Decimal,
    /// Number of active reservations.
    pub active_reservations: usize,
}
