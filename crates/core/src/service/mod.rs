//! Business operations over credit applications, imports and schedules.
//!
//! `TradeFinanceService` is the single entry point the HTTP layer calls.
//! Each mutating operation runs under the target application's lock on a
//! working copy, commits only if every step succeeds, then publishes the
//! events it produced.
//!
//! - `trade` - The service, construction and shared helpers
//! - `applications` - Application workflow operations
//! - `imports` - Import, ledger and payment schedule operations
//! - `commands` - Operation inputs and outputs
//! - `clock` - Time source
//! - `error` - TradeError, aggregating every module error

mod applications;
pub mod clock;
pub mod commands;
pub mod error;
mod imports;
pub mod trade;

pub use clock::{Clock, FixedClock, SystemClock};
pub use commands::{FinancialDecision, PaymentEdit, Quote};
pub use error::TradeError;
pub use trade::TradeFinanceService;
