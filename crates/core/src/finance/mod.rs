//! Import financing calculations.
//!
//! Turns an import's FOB value and the application's approved rates into
//! the down payment, financed amount, admin fee and installment value.
//! Every caller derives these numbers here and nowhere else.

pub mod calculator;
pub mod error;
pub mod types;

#[cfg(test)]
mod calculator_props;

pub use calculator::FinancialCalculator;
pub use error::FinanceError;
pub use types::CostBreakdown;
