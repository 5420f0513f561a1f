//! Credit application aggregate and its progressively populated terms.
//!
//! - `types` - CreditApplication, RequestedTerms, ApprovedTerms, FinalTerms
//! - `error` - Validation errors for terms

pub mod error;
pub mod types;

pub use error::ApplicationError;
pub use types::{ApprovedTerms, CreditApplication, FinalTerms, RequestedTerms};
