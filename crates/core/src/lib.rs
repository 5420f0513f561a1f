//! Core business logic for Tradeline.
//!
//! This crate contains the credit allocation and approval engine with ZERO
//! web dependencies. All domain types, validation rules, and calculations
//! live here.
//!
//! # Modules
//!
//! - `finance` - Down payment, financed amount, admin fee and installment calculation
//! - `workflow` - Four-axis status state machine with cross-axis gating
//! - `application` - Credit application aggregate and its terms
//! - `ledger` - Credit reservations against a finalized limit
//! - `import` - Import lifecycle and its financial snapshot
//! - `schedule` - Down payment and installment schedule
//! - `events` - Domain events for downstream collaborators
//! - `store` - Per-application serialized storage
//! - `service` - Business operations

#[macro_use]
mod macros;

pub mod application;
pub mod events;
pub mod finance;
pub mod import;
pub mod ledger;
pub mod schedule;
pub mod service;
pub mod store;
pub mod workflow;

pub use events::{DomainEvent, EventBus};
pub use service::{TradeError, TradeFinanceService};
