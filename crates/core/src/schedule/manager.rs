//! Payment schedule manager.
//!
//! Entries are plain values owned by the import's record; the manager
//! creates them and returns updated copies, so a failed operation never
//! leaves a half-edited entry behind.

use chrono::{DateTime, Days, NaiveDate, Utc};
use rust_decimal::Decimal;
use tradeline_shared::types::{ImportId, PaymentEntryId};

use crate::finance::CostBreakdown;
use crate::schedule::allocation::split_evenly;
use crate::schedule::error::ScheduleError;
use crate::schedule::types::{PaymentKind, PaymentScheduleEntry, PaymentStatus};

/// Creates and updates schedule entries at a fixed currency precision.
#[derive(Debug, Clone, Copy)]
pub struct PaymentScheduleManager {
    decimal_places: u32,
}

impl Default for PaymentScheduleManager {
    fn default() -> Self {
        Self::new(2)
    }
}

impl PaymentScheduleManager {
    /// Creates a manager splitting amounts at `decimal_places`.
    #[must_use]
    pub const fn new(decimal_places: u32) -> Self {
        Self { decimal_places }
    }

    /// The single down-payment entry of an import, due on `on`.
    #[must_use]
    pub fn down_payment(
        import_id: ImportId,
        breakdown: &CostBreakdown,
        on: NaiveDate,
        at: DateTime<Utc>,
    ) -> PaymentScheduleEntry {
        PaymentScheduleEntry {
            id: PaymentEntryId::new(),
            import_id,
            kind: PaymentKind::DownPayment,
            amount: breakdown.down_payment,
            due_date: on,
            status: PaymentStatus::Pending,
            paid_on: None,
            created_at: at,
            updated_at: at,
        }
    }

    /// One installment per term, due `term` days after `delivered_on`.
    ///
    /// Amounts split the financed amount so the rows sum to it exactly.
    ///
    /// # Errors
    ///
    /// Returns `DateOutOfRange` if a due date overflows the calendar.
    pub fn installments(
        &self,
        import_id: ImportId,
        breakdown: &CostBreakdown,
        terms: &[u32],
        delivered_on: NaiveDate,
        at: DateTime<Utc>,
    ) -> Result<Vec<PaymentScheduleEntry>, ScheduleError> {
        let amounts = split_evenly(breakdown.financed_amount, terms.len(), self.decimal_places);
        let of = u32::try_from(terms.len()).unwrap_or(u32::MAX);

        terms
            .iter()
            .zip(amounts)
            .zip(1u32..)
            .map(|((&term_days, amount), sequence)| {
                let due_date = delivered_on
                    .checked_add_days(Days::new(u64::from(term_days)))
                    .ok_or(ScheduleError::DateOutOfRange {
                        from: delivered_on,
                        days: term_days,
                    })?;
                Ok(PaymentScheduleEntry {
                    id: PaymentEntryId::new(),
                    import_id,
                    kind: PaymentKind::Installment {
                        sequence,
                        of,
                        term_days,
                    },
                    amount,
                    due_date,
                    status: PaymentStatus::Scheduled,
                    paid_on: None,
                    created_at: at,
                    updated_at: at,
                })
            })
            .collect()
    }

    /// Marks `entry` paid on `paid_on`. Paid is terminal.
    ///
    /// `paid_on` may not lie after the date of `at`.
    ///
    /// # Errors
    ///
    /// - `EntryClosed` if already paid or cancelled
    /// - `PaidInFuture` if `paid_on` is after the date of `at`
    /// - `NotYetDue` if `paid_on` is before the due date of a scheduled entry
    pub fn record_payment(
        entry: &PaymentScheduleEntry,
        paid_on: NaiveDate,
        at: DateTime<Utc>,
    ) -> Result<PaymentScheduleEntry, ScheduleError> {
        Self::ensure_open(entry)?;
        let today = at.date_naive();
        if paid_on > today {
            return Err(ScheduleError::PaidInFuture { paid_on, today });
        }
        if entry.effective_status(paid_on) == PaymentStatus::Scheduled {
            return Err(ScheduleError::NotYetDue {
                id: entry.id,
                due_date: entry.due_date,
            });
        }

        let mut paid = entry.clone();
        paid.status = PaymentStatus::Paid;
        paid.paid_on = Some(paid_on);
        paid.updated_at = at;
        Ok(paid)
    }

    /// Changes the amount and/or due date of an unpaid entry.
    ///
    /// # Errors
    ///
    /// - `EntryClosed` if paid or cancelled
    /// - `InvalidAmount` for a negative amount
    pub fn edit(
        entry: &PaymentScheduleEntry,
        amount: Option<Decimal>,
        due_date: Option<NaiveDate>,
        at: DateTime<Utc>,
    ) -> Result<PaymentScheduleEntry, ScheduleError> {
        Self::ensure_open(entry)?;

        let mut edited = entry.clone();
        if let Some(amount) = amount {
            if amount < Decimal::ZERO {
                return Err(ScheduleError::InvalidAmount(amount));
            }
            edited.amount = amount;
        }
        if let Some(due_date) = due_date {
            edited.due_date = due_date;
        }
        edited.updated_at = at;
        Ok(edited)
    }

    /// Cancels every open entry. Paid entries are left as they are.
    ///
    /// Returns the number of entries cancelled.
    pub fn cancel_unpaid(entries: &mut [PaymentScheduleEntry], at: DateTime<Utc>) -> usize {
        let mut cancelled = 0;
        for entry in entries.iter_mut().filter(|e| e.is_open()) {
            entry.status = PaymentStatus::Cancelled;
            entry.updated_at = at;
            cancelled += 1;
        }
        cancelled
    }

    /// Copies of `entries` with the status each has on `today`, by due date.
    #[must_use]
    pub fn view(entries: &[PaymentScheduleEntry], today: NaiveDate) -> Vec<PaymentScheduleEntry> {
        let mut view: Vec<PaymentScheduleEntry> = entries
            .iter()
            .map(|e| PaymentScheduleEntry {
                status: e.effective_status(today),
                ..e.clone()
            })
            .collect();
        view.sort_by_key(|e| e.due_date);
        view
    }

    fn ensure_open(entry: &PaymentScheduleEntry) -> Result<(), ScheduleError> {
        if entry.is_open() {
            Ok(())
        } else {
            Err(ScheduleError::EntryClosed {
                id: entry.id,
                status: entry.status,
            })
        }
    }
}
