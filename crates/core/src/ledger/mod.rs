//! Credit ledger: reservations drawn by imports against a finalized limit.
//!
//! - `types` - Reservation, LedgerChange, CreditSummary
//! - `error` - Ledger error types
//! - `credit` - The per-application ledger and its reserve/release rules

pub mod credit;
pub mod error;
pub mod types;

#[cfg(test)]
mod credit_props;

pub use credit::CreditLedger;
pub use error::LedgerError;
pub use types::{CreditSummary, LedgerChange, Reservation};
