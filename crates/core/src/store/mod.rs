//! In-process application storage with per-application serialization.
//!
//! Every mutation of an application, its ledger, its imports and their
//! schedules happens under that application's lock, on a cloned record that
//! replaces the stored one only if the mutation succeeds. Unrelated
//! applications never contend.
//!
//! - `record` - ApplicationRecord and ImportRecord
//! - `memory` - ApplicationStore
//! - `error` - Store error types

pub mod error;
pub mod memory;
pub mod record;

pub use error::StoreError;
pub use memory::ApplicationStore;
pub use record::{ApplicationRecord, ImportRecord};
