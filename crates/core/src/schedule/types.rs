//! Payment schedule domain types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tradeline_shared::types::{ImportId, PaymentEntryId};

/// What a schedule entry pays for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PaymentKind {
    /// Paid when the import is created.
    DownPayment,
    /// One repayment of the financed amount.
    Installment {
        /// 1-based position.
        sequence: u32,
        /// Total number of installments.
        of: u32,
        /// Days after delivery the installment falls due.
        term_days: u32,
    },
}

/// Status of a schedule entry.
///
/// `Overdue` is derived on read and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Due date still in the future.
    Scheduled,
    /// Due and payable.
    Pending,
    /// Settled. Terminal.
    Paid,
    /// Pending and past its due date.
    Overdue,
    /// Import cancelled before payment. Terminal.
    Cancelled,
}

status_strings!(PaymentStatus {
    Scheduled => "scheduled",
    Pending => "pending",
    Paid => "paid",
    Overdue => "overdue",
    Cancelled => "cancelled",
});

/// One payment obligation of an import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentScheduleEntry {
    /// Entry id.
    pub id: PaymentEntryId,
    /// Import the entry belongs to.
    pub import_id: ImportId,
    /// Down payment or installment.
    pub kind: PaymentKind,
    /// Amount due.
    pub amount: Decimal,
    /// Date the amount falls due.
    pub due_date: NaiveDate,
    /// Stored status.
    pub status: PaymentStatus,
    /// Settlement date, once paid.
    pub paid_on: Option<NaiveDate>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Time of the last change.
    pub updated_at: DateTime<Utc>,
}

impl PaymentScheduleEntry {
    /// Status as seen on `today`.
    ///
    /// A scheduled entry reads `pending` from its due date on; a pending
    /// entry reads `overdue` once the due date has passed.
    #[must_use]
    pub fn effective_status(&self, today: NaiveDate) -> PaymentStatus {
        match self.status {
            PaymentStatus::Scheduled | PaymentStatus::Pending if today > self.due_date => {
                PaymentStatus::Overdue
            }
            PaymentStatus::Scheduled if today == self.due_date => PaymentStatus::Pending,
            other => other,
        }
    }

    /// Returns true while the entry can still be paid, edited or cancelled.
    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self.status, PaymentStatus::Scheduled | PaymentStatus::Pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(status: PaymentStatus, due: NaiveDate) -> PaymentScheduleEntry {
        PaymentScheduleEntry {
            id: PaymentEntryId::new(),
            import_id: ImportId::new(),
            kind: PaymentKind::DownPayment,
            amount: dec!(100),
            due_date: due,
            status,
            paid_on: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[rstest]
    #[case(PaymentStatus::Scheduled, date(2025, 3, 2), PaymentStatus::Scheduled)]
    #[case(PaymentStatus::Scheduled, date(2025, 3, 3), PaymentStatus::Pending)]
    #[case(PaymentStatus::Scheduled, date(2025, 3, 4), PaymentStatus::Overdue)]
    #[case(PaymentStatus::Pending, date(2025, 3, 3), PaymentStatus::Pending)]
    #[case(PaymentStatus::Pending, date(2025, 3, 4), PaymentStatus::Overdue)]
    #[case(PaymentStatus::Paid, date(2025, 6, 1), PaymentStatus::Paid)]
    #[case(PaymentStatus::Cancelled, date(2025, 6, 1), PaymentStatus::Cancelled)]
    fn test_effective_status(
        #[case] stored: PaymentStatus,
        #[case] today: NaiveDate,
        #[case] expected: PaymentStatus,
    ) {
        let entry = entry(stored, date(2025, 3, 3));
        assert_eq!(entry.effective_status(today), expected);
    }

    #[test]
    fn test_open_statuses() {
        let due = date(2025, 1, 1);
        assert!(entry(PaymentStatus::Scheduled, due).is_open());
        assert!(entry(PaymentStatus::Pending, due).is_open());
        assert!(!entry(PaymentStatus::Paid, due).is_open());
        assert!(!entry(PaymentStatus::Cancelled, due).is_open());
    }

    #[test]
    fn test_kind_serialization() {
        let json = serde_json::to_value(PaymentKind::Installment {
            sequence: 1,
            of: 3,
            term_days: 30,
        })
        .unwrap();
        assert_eq!(json["type"], "installment");
        assert_eq!(json["sequence"], 1);

        let json = serde_json::to_value(PaymentKind::DownPayment).unwrap();
        assert_eq!(json["type"], "down_payment");
    }
}
