//! Status workflow engine for credit applications.
//!
//! Validates a requested move against the per-axis transition table, the
//! cross-axis preconditions, and the actor's authority, then applies it to a
//! copy of the application with an audit record attached.
//!
//! ```text
//! application   draft -> pending | cancelled
//!               pending -> under_review | cancelled
//!               under_review -> approved | rejected
//! pre_analysis  pending -> under_review | needs_documents | needs_clarification
//!               under_review -> pre_approved | needs_documents | needs_clarification
//!               pre_approved -> submitted_to_financial
//!               needs_documents | needs_clarification -> under_review
//! financial     pending_financial -> under_review_financial
//!               under_review_financial -> approved | rejected | needs_documents_financial
//!               needs_documents_financial -> under_review_financial
//! admin         pending_admin -> admin_finalized
//! ```

use chrono::{DateTime, Utc};

use crate::application::CreditApplication;
use crate::workflow::approval::{Actor, AxisAuthority};
use crate::workflow::error::{Precondition, WorkflowError};
use crate::workflow::types::{
    AdminStatus, ApplicationState, ApplicationStatus, AxisStatus, FinancialStatus,
    PreAnalysisStatus, StatusAxis, StatusChange,
};

/// Stateless engine for status transitions.
pub struct StatusWorkflowEngine;

impl StatusWorkflowEngine {
    /// Returns true if `from -> to` is an edge of `axis`'s transition table.
    ///
    /// Values belonging to another axis never match.
    #[must_use]
    pub fn can_transition(axis: StatusAxis, from: AxisStatus, to: AxisStatus) -> bool {
        match (axis, from, to) {
            (StatusAxis::Application, AxisStatus::Application(f), AxisStatus::Application(t)) => {
                Self::application_edge(f, t)
            }
            (StatusAxis::PreAnalysis, AxisStatus::PreAnalysis(f), AxisStatus::PreAnalysis(t)) => {
                Self::pre_analysis_edge(f, t)
            }
            (StatusAxis::Financial, AxisStatus::Financial(f), AxisStatus::Financial(t)) => {
                Self::financial_edge(f, t)
            }
            (StatusAxis::Admin, AxisStatus::Admin(f), AxisStatus::Admin(t)) => {
                Self::admin_edge(f, t)
            }
            _ => false,
        }
    }

    /// Returns every value reachable from `from` in one step.
    #[must_use]
    pub fn targets(from: AxisStatus) -> Vec<AxisStatus> {
        AxisStatus::all()
            .filter(|to| Self::can_transition(from.axis(), from, *to))
            .collect()
    }

    /// Checks the cross-axis rules for moving to `to` from `state`.
    ///
    /// # Errors
    ///
    /// Returns the first unmet `Precondition`. The freeze rule is checked
    /// before any axis-specific rule.
    pub fn check_preconditions(
        state: &ApplicationState,
        to: AxisStatus,
    ) -> Result<(), Precondition> {
        if state.application.is_terminal() {
            return Err(Precondition::ApplicationFrozen(state.application));
        }

        match to {
            AxisStatus::Application(ApplicationStatus::Approved)
                if state.admin != AdminStatus::AdminFinalized =>
            {
                Err(Precondition::AdminNotFinalized)
            }
            AxisStatus::Application(ApplicationStatus::Rejected)
                if state.admin == AdminStatus::AdminFinalized =>
            {
                Err(Precondition::AdminAlreadyFinalized)
            }
            AxisStatus::PreAnalysis(_) if state.application != ApplicationStatus::UnderReview => {
                Err(Precondition::ApplicationNotUnderReview(state.application))
            }
            AxisStatus::Financial(_)
                if state.pre_analysis != PreAnalysisStatus::SubmittedToFinancial =>
            {
                Err(Precondition::PreAnalysisNotSubmitted(state.pre_analysis))
            }
            AxisStatus::Admin(AdminStatus::AdminFinalized)
                if state.financial != FinancialStatus::Approved =>
            {
                Err(Precondition::FinancialNotApproved(state.financial))
            }
            _ => Ok(()),
        }
    }

    /// Validates a move without applying it.
    ///
    /// Checks run in order: authority, table edge, cross-axis preconditions,
    /// rejection reason.
    pub fn validate(
        application: &CreditApplication,
        to: AxisStatus,
        actor: &Actor,
        note: Option<&str>,
    ) -> Result<(), WorkflowError> {
        let axis = to.axis();
        let from = application.state.get(axis);

        AxisAuthority::authorize(actor, application.importer_id, to)?;

        if !Self::can_transition(axis, from, to) {
            return Err(WorkflowError::IllegalTransition { axis, from, to });
        }

        Self::check_preconditions(&application.state, to).map_err(|precondition| {
            WorkflowError::PreconditionFailed {
                axis,
                from,
                to,
                precondition,
            }
        })?;

        if Self::requires_reason(to) && note.is_none_or(|n| n.trim().is_empty()) {
            return Err(WorkflowError::ReasonRequired { axis, to });
        }

        Ok(())
    }

    /// Applies a move and returns the updated application.
    ///
    /// The input is left untouched; on error nothing changes.
    pub fn apply_transition(
        application: &CreditApplication,
        to: AxisStatus,
        actor: &Actor,
        at: DateTime<Utc>,
        note: Option<String>,
    ) -> Result<CreditApplication, WorkflowError> {
        Self::validate(application, to, actor, note.as_deref())?;

        let axis = to.axis();
        let from = application.state.get(axis);
        let mut next = application.clone();
        next.state = next.state.with(to);
        next.updated_at = at;

        if Self::requires_reason(to) {
            next.rejection_reason.clone_from(&note);
        }
        if to == AxisStatus::PreAnalysis(PreAnalysisStatus::SubmittedToFinancial) {
            next.submitted_to_financial_at = Some(at);
        }

        next.history.push(StatusChange {
            axis,
            from,
            to,
            actor_id: actor.user_id,
            actor_role: actor.role,
            at,
            note,
        });

        Ok(next)
    }

    fn requires_reason(to: AxisStatus) -> bool {
        matches!(
            to,
            AxisStatus::Application(ApplicationStatus::Rejected)
                | AxisStatus::Financial(FinancialStatus::Rejected)
        )
    }

    fn application_edge(from: ApplicationStatus, to: ApplicationStatus) -> bool {
        use ApplicationStatus::{Approved, Cancelled, Draft, Pending, Rejected, UnderReview};
        matches!(
            (from, to),
            (Draft, Pending | Cancelled)
                | (Pending, UnderReview | Cancelled)
                | (UnderReview, Approved | Rejected)
        )
    }

    fn pre_analysis_edge(from: PreAnalysisStatus, to: PreAnalysisStatus) -> bool {
        use PreAnalysisStatus::{
            NeedsClarification, NeedsDocuments, Pending, PreApproved, SubmittedToFinancial,
            UnderReview,
        };
        matches!(
            (from, to),
            (Pending, UnderReview | NeedsDocuments | NeedsClarification)
                | (UnderReview, PreApproved | NeedsDocuments | NeedsClarification)
                | (PreApproved, SubmittedToFinancial)
                | (NeedsDocuments | NeedsClarification, UnderReview)
        )
    }

    fn financial_edge(from: FinancialStatus, to: FinancialStatus) -> bool {
        use FinancialStatus::{
            Approved, NeedsDocumentsFinancial, PendingFinancial, Rejected, UnderReviewFinancial,
        };
        matches!(
            (from, to),
            (PendingFinancial | NeedsDocumentsFinancial, UnderReviewFinancial)
                | (
                    UnderReviewFinancial,
                    Approved | Rejected | NeedsDocumentsFinancial
                )
        )
    }

    fn admin_edge(from: AdminStatus, to: AdminStatus) -> bool {
        matches!(
            (from, to),
            (AdminStatus::PendingAdmin, AdminStatus::AdminFinalized)
        )
    }
}
