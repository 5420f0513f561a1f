//! Payment schedule for imports.
//!
//! One down-payment entry is created with the import. Installment entries
//! are generated when the import reaches the agent, one per term, due the
//! term's day-count after delivery.
//!
//! - `types` - PaymentKind, PaymentStatus, PaymentScheduleEntry
//! - `allocation` - Splitting the financed amount across installments
//! - `manager` - Generation, payment, editing and cancellation
//! - `error` - Schedule error types

pub mod allocation;
pub mod error;
pub mod manager;
pub mod types;

#[cfg(test)]
mod allocation_props;

pub use allocation::split_evenly;
pub use error::ScheduleError;
pub use manager::PaymentScheduleManager;
pub use types::{PaymentKind, PaymentScheduleEntry, PaymentStatus};
