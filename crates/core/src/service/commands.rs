//! Inputs and outputs of business operations.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::application::ApprovedTerms;
use crate::finance::CostBreakdown;

/// What the financial institution decided.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum FinancialDecision {
    /// Take the application into review.
    StartReview,
    /// Approve with terms.
    Approve {
        /// Approved amount, rates and terms.
        terms: ApprovedTerms,
    },
    /// Ask the importer for more documents.
    RequestDocuments {
        /// What is missing.
        note: Option<String>,
    },
    /// Refuse the credit. The application is rejected with it.
    Reject {
        /// Why.
        reason: String,
    },
}

/// Admin change to an unpaid schedule entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentEdit {
    /// New amount.
    pub amount: Option<Decimal>,
    /// New due date.
    pub due_date: Option<NaiveDate>,
}

/// Preview of an import's cost against an application's final terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// What the import would cost.
    pub breakdown: CostBreakdown,
    /// Credit free right now.
    pub available_credit: Decimal,
    /// Whether the financed amount fits in the available credit.
    pub within_limit: bool,
}
