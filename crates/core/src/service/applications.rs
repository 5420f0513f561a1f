//! Application workflow operations.

use tracing::info;
use tradeline_shared::types::CreditApplicationId;

use crate::application::{CreditApplication, FinalTerms, RequestedTerms};
use crate::ledger::CreditLedger;
use crate::service::commands::FinancialDecision;
use crate::service::error::TradeError;
use crate::service::trade::{TradeFinanceService, ensure_role, step};
use crate::store::ApplicationRecord;
use crate::workflow::{
    Actor, ActorRole, AdminStatus, ApplicationStatus, AxisStatus, FinancialStatus,
    PreAnalysisStatus, StatusChange,
};

impl TradeFinanceService {
    /// Creates a draft application for the acting importer.
    pub async fn create_application(
        &self,
        actor: &Actor,
        requested: RequestedTerms,
    ) -> Result<CreditApplication, TradeError> {
        ensure_role(actor, &[ActorRole::Importer])?;
        let importer_id = actor
            .importer_id
            .ok_or_else(|| TradeError::Forbidden("importer account has no importer".to_string()))?;

        let application = CreditApplication::new(importer_id, requested, self.clock.now());
        self.store.insert(ApplicationRecord::new(application.clone()));

        info!(
            application_id = %application.id,
            %importer_id,
            requested = %application.requested.amount,
            "Credit application created"
        );
        Ok(application)
    }

    /// Importer submits a draft: `draft -> pending`.
    pub async fn submit_application(
        &self,
        actor: &Actor,
        id: CreditApplicationId,
        expected_version: Option<u64>,
    ) -> Result<CreditApplication, TradeError> {
        let application = self
            .commit(id, expected_version, "submit_application", |record, at, events| {
                record.application.requested.validate()?;
                step(
                    record,
                    AxisStatus::Application(ApplicationStatus::Pending),
                    actor,
                    at,
                    None,
                    events,
                )?;
                Ok(record.application.clone())
            })
            .await?;

        info!(application_id = %id, "Credit application submitted");
        Ok(application)
    }

    /// Importer withdraws a draft or pending application.
    pub async fn cancel_application(
        &self,
        actor: &Actor,
        id: CreditApplicationId,
        expected_version: Option<u64>,
    ) -> Result<CreditApplication, TradeError> {
        let application = self
            .commit(id, expected_version, "cancel_application", |record, at, events| {
                step(
                    record,
                    AxisStatus::Application(ApplicationStatus::Cancelled),
                    actor,
                    at,
                    None,
                    events,
                )?;
                Ok(record.application.clone())
            })
            .await?;

        info!(application_id = %id, "Credit application cancelled");
        Ok(application)
    }

    /// Reviewer picks up a pending application: `pending -> under_review`.
    pub async fn start_review(
        &self,
        actor: &Actor,
        id: CreditApplicationId,
        expected_version: Option<u64>,
    ) -> Result<CreditApplication, TradeError> {
        let application = self
            .commit(id, expected_version, "start_review", |record, at, events| {
                step(
                    record,
                    AxisStatus::Application(ApplicationStatus::UnderReview),
                    actor,
                    at,
                    None,
                    events,
                )?;
                Ok(record.application.clone())
            })
            .await?;

        info!(application_id = %id, "Review started");
        Ok(application)
    }

    /// Reviewer moves the pre-analysis axis.
    pub async fn record_pre_analysis_decision(
        &self,
        actor: &Actor,
        id: CreditApplicationId,
        to: PreAnalysisStatus,
        note: Option<String>,
        expected_version: Option<u64>,
    ) -> Result<CreditApplication, TradeError> {
        let application = self
            .commit(id, expected_version, "record_pre_analysis_decision", |record, at, events| {
                step(record, AxisStatus::PreAnalysis(to), actor, at, note, events)?;
                Ok(record.application.clone())
            })
            .await?;

        info!(application_id = %id, pre_analysis = %to, "Pre-analysis decision recorded");
        Ok(application)
    }

    /// Reviewer turns the application down: `under_review -> rejected`.
    pub async fn reject_application(
        &self,
        actor: &Actor,
        id: CreditApplicationId,
        reason: String,
        expected_version: Option<u64>,
    ) -> Result<CreditApplication, TradeError> {
        ensure_role(actor, &[ActorRole::Reviewer])?;
        let application = self
            .commit(id, expected_version, "reject_application", |record, at, events| {
                step(
                    record,
                    AxisStatus::Application(ApplicationStatus::Rejected),
                    actor,
                    at,
                    Some(reason),
                    events,
                )?;
                Ok(record.application.clone())
            })
            .await?;

        info!(application_id = %id, "Credit application rejected by review");
        Ok(application)
    }

    /// Financial institution moves the financial axis.
    ///
    /// A rejection also rejects the application in the same commit.
    pub async fn record_financial_decision(
        &self,
        actor: &Actor,
        id: CreditApplicationId,
        decision: FinancialDecision,
        expected_version: Option<u64>,
    ) -> Result<CreditApplication, TradeError> {
        let application = self
            .commit(id, expected_version, "record_financial_decision", |record, at, events| {
                match decision {
                    FinancialDecision::StartReview => step(
                        record,
                        AxisStatus::Financial(FinancialStatus::UnderReviewFinancial),
                        actor,
                        at,
                        None,
                        events,
                    )?,
                    FinancialDecision::Approve { terms } => {
                        step(
                            record,
                            AxisStatus::Financial(FinancialStatus::Approved),
                            actor,
                            at,
                            None,
                            events,
                        )?;
                        terms.validate()?;
                        record.application.approved = Some(terms);
                    }
                    FinancialDecision::RequestDocuments { note } => step(
                        record,
                        AxisStatus::Financial(FinancialStatus::NeedsDocumentsFinancial),
                        actor,
                        at,
                        note,
                        events,
                    )?,
                    FinancialDecision::Reject { reason } => {
                        step(
                            record,
                            AxisStatus::Financial(FinancialStatus::Rejected),
                            actor,
                            at,
                            Some(reason.clone()),
                            events,
                        )?;
                        step(
                            record,
                            AxisStatus::Application(ApplicationStatus::Rejected),
                            actor,
                            at,
                            Some(reason),
                            events,
                        )?;
                    }
                }
                Ok(record.application.clone())
            })
            .await?;

        info!(
            application_id = %id,
            financial = %application.state.financial,
            application = %application.state.application,
            "Financial decision recorded"
        );
        Ok(application)
    }

    /// Admin publishes final terms and opens the credit ledger.
    ///
    /// Finalization and application approval commit together.
    pub async fn finalize_admin(
        &self,
        actor: &Actor,
        id: CreditApplicationId,
        terms: FinalTerms,
        expected_version: Option<u64>,
    ) -> Result<CreditApplication, TradeError> {
        let application = self
            .commit(id, expected_version, "finalize_admin", |record, at, events| {
                step(
                    record,
                    AxisStatus::Admin(AdminStatus::AdminFinalized),
                    actor,
                    at,
                    None,
                    events,
                )?;
                terms.validate(record.application.approved.as_ref())?;
                step(
                    record,
                    AxisStatus::Application(ApplicationStatus::Approved),
                    actor,
                    at,
                    None,
                    events,
                )?;

                record.ledger = Some(CreditLedger::new(id, terms.credit_limit));
                record.application.final_terms = Some(terms);
                Ok(record.application.clone())
            })
            .await?;

        info!(
            application_id = %id,
            credit_limit = ?application.credit_limit(),
            "Application finalized"
        );
        Ok(application)
    }

    /// Reads an application.
    pub async fn application(
        &self,
        actor: &Actor,
        id: CreditApplicationId,
    ) -> Result<CreditApplication, TradeError> {
        Ok(self.visible_record(actor, id).await?.application)
    }

    /// Reads an application's transition history, oldest first.
    pub async fn status_history(
        &self,
        actor: &Actor,
        id: CreditApplicationId,
    ) -> Result<Vec<StatusChange>, TradeError> {
        Ok(self.visible_record(actor, id).await?.application.history)
    }
}
