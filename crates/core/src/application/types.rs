//! Credit application aggregate.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tradeline_shared::types::{CreditApplicationId, Currency, ImporterId, Money};

use crate::application::error::ApplicationError;
use crate::finance::FinancialCalculator;
use crate::workflow::types::{ApplicationState, StatusChange};

/// What the importer asked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestedTerms {
    /// Requested credit amount.
    pub amount: Money,
    /// Requested installment day-counts.
    pub terms: Vec<u32>,
}

impl RequestedTerms {
    /// Checks the request is complete enough to submit.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        if !self.amount.is_positive() {
            return Err(ApplicationError::NonPositiveAmount {
                field: "requested_amount",
                amount: self.amount.amount,
            });
        }
        FinancialCalculator::validate_terms(&self.terms)?;
        Ok(())
    }
}

/// Terms granted by the financial institution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovedTerms {
    /// Approved credit amount.
    pub amount: Decimal,
    /// Approved installment day-counts.
    pub terms: Vec<u32>,
    /// Down payment rate, in percent.
    pub down_payment_rate: Decimal,
    /// Admin fee rate, in percent.
    pub admin_fee_rate: Decimal,
}

impl ApprovedTerms {
    /// Validates amount, rates and terms.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        if self.amount <= Decimal::ZERO {
            return Err(ApplicationError::NonPositiveAmount {
                field: "approved_amount",
                amount: self.amount,
            });
        }
        FinancialCalculator::validate_rate("down_payment_rate", self.down_payment_rate)?;
        FinancialCalculator::validate_rate("admin_fee_rate", self.admin_fee_rate)?;
        FinancialCalculator::validate_terms(&self.terms)?;
        Ok(())
    }
}

/// Terms published by the admin at finalization. Imports draw against these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalTerms {
    /// Ceiling for the sum of active reservations.
    pub credit_limit: Decimal,
    /// Down payment rate applied to every import, in percent.
    pub down_payment_rate: Decimal,
    /// Admin fee rate applied to every import, in percent.
    pub admin_fee_rate: Decimal,
    /// Installment day-counts applied to every import.
    pub terms: Vec<u32>,
}

impl FinalTerms {
    /// Validates final terms against what the institution approved.
    ///
    /// The limit must be positive and may not exceed the approved amount.
    pub fn validate(&self, approved: Option<&ApprovedTerms>) -> Result<(), ApplicationError> {
        let approved = approved.ok_or(ApplicationError::MissingApprovedTerms)?;
        if self.credit_limit <= Decimal::ZERO {
            return Err(ApplicationError::NonPositiveAmount {
                field: "credit_limit",
                amount: self.credit_limit,
            });
        }
        if self.credit_limit > approved.amount {
            return Err(ApplicationError::LimitExceedsApproved {
                limit: self.credit_limit,
                approved: approved.amount,
            });
        }
        FinancialCalculator::validate_rate("down_payment_rate", self.down_payment_rate)?;
        FinancialCalculator::validate_rate("admin_fee_rate", self.admin_fee_rate)?;
        FinancialCalculator::validate_terms(&self.terms)?;
        Ok(())
    }
}

/// A credit application and everything decided about it so far.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditApplication {
    /// Application id.
    pub id: CreditApplicationId,
    /// Owning importer.
    pub importer_id: ImporterId,
    /// The four status axes.
    pub state: ApplicationState,
    /// Importer's request.
    pub requested: RequestedTerms,
    /// Financial institution's terms, once approved.
    pub approved: Option<ApprovedTerms>,
    /// Admin's final terms, once finalized.
    pub final_terms: Option<FinalTerms>,
    /// Reason given for the last rejection, if any.
    pub rejection_reason: Option<String>,
    /// When pre-analysis handed the application to the financial institution.
    pub submitted_to_financial_at: Option<DateTime<Utc>>,
    /// Every applied transition, oldest first.
    pub history: Vec<StatusChange>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Time of the last change.
    pub updated_at: DateTime<Utc>,
    /// Incremented on every committed change.
    pub version: u64,
}

impl CreditApplication {
    /// Creates a draft application.
    #[must_use]
    pub fn new(importer_id: ImporterId, requested: RequestedTerms, at: DateTime<Utc>) -> Self {
        Self {
            id: CreditApplicationId::new(),
            importer_id,
            state: ApplicationState::default(),
            requested,
            approved: None,
            final_terms: None,
            rejection_reason: None,
            submitted_to_financial_at: None,
            history: Vec::new(),
            created_at: at,
            updated_at: at,
            version: 0,
        }
    }

    /// Currency every amount on this application is expressed in.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.requested.amount.currency
    }

    /// Final credit limit, once published.
    #[must_use]
    pub fn credit_limit(&self) -> Option<Decimal> {
        self.final_terms.as_ref().map(|t| t.credit_limit)
    }
}
