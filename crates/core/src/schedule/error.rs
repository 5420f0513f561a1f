//! Payment schedule error types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;
use tradeline_shared::types::PaymentEntryId;

use crate::schedule::types::PaymentStatus;

/// Errors that can occur while paying or editing schedule entries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// No entry with this id on the import.
    #[error("Payment entry {0} not found")]
    EntryNotFound(PaymentEntryId),

    /// Paid and cancelled entries are immutable.
    #[error("Payment entry {id} is {status} and can no longer change")]
    EntryClosed {
        /// The entry.
        id: PaymentEntryId,
        /// Its stored status.
        status: PaymentStatus,
    },

    /// Scheduled entries cannot be paid before they fall due.
    #[error("Payment entry {id} is not due until {due_date}")]
    NotYetDue {
        /// The entry.
        id: PaymentEntryId,
        /// Its due date.
        due_date: NaiveDate,
    },

    /// A payment cannot be dated after the day it is recorded.
    #[error("Payment date {paid_on} is after today ({today})")]
    PaidInFuture {
        /// The date the caller gave.
        paid_on: NaiveDate,
        /// The date the payment is recorded on.
        today: NaiveDate,
    },

    /// Entry amounts cannot be negative.
    #[error("Payment amount cannot be negative, got {0}")]
    InvalidAmount(Decimal),

    /// A term pushed the due date past the calendar range.
    #[error("Due date out of range: {days} days after {from}")]
    DateOutOfRange {
        /// Start date.
        from: NaiveDate,
        /// Offset in days.
        days: u32,
    },
}

impl ScheduleError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidAmount(_) | Self::DateOutOfRange { .. } | Self::PaidInFuture { .. } => {
                400
            }
            Self::EntryNotFound(_) => 404,
            Self::EntryClosed { .. } | Self::NotYetDue { .. } => 409,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EntryNotFound(_) => "PAYMENT_ENTRY_NOT_FOUND",
            Self::EntryClosed { .. } => "PAYMENT_ENTRY_CLOSED",
            Self::NotYetDue { .. } => "PAYMENT_NOT_DUE",
            Self::PaidInFuture { .. } => "PAYMENT_DATE_IN_FUTURE",
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::DateOutOfRange { .. } => "DATE_OUT_OF_RANGE",
        }
    }
}
