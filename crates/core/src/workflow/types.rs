//! Workflow domain types for credit application status management.
//!
//! A credit application carries four independent status axes. Each axis is
//! a closed enum whose persisted form is the snake_case string listed on the
//! variant; anything else is a data-integrity error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tradeline_shared::types::UserId;

use crate::workflow::approval::ActorRole;

/// Overall application status, owned by the importer and the reviewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    /// Being prepared by the importer.
    Draft,
    /// Submitted, waiting for a reviewer.
    Pending,
    /// A reviewer is working on it.
    UnderReview,
    /// Finalized with a published credit limit.
    Approved,
    /// Turned down at some stage.
    Rejected,
    /// Withdrawn by the importer.
    Cancelled,
}

status_strings!(ApplicationStatus {
    Draft => "draft",
    Pending => "pending",
    UnderReview => "under_review",
    Approved => "approved",
    Rejected => "rejected",
    Cancelled => "cancelled",
});

impl ApplicationStatus {
    /// Returns true once no axis of the application may change.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected | Self::Cancelled)
    }
}

/// Internal pre-analysis status, owned by the reviewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreAnalysisStatus {
    /// Not yet looked at.
    Pending,
    /// Being analysed.
    UnderReview,
    /// Analysis passed.
    PreApproved,
    /// Importer must supply documents.
    NeedsDocuments,
    /// Importer must clarify the request.
    NeedsClarification,
    /// Handed to the financial institution.
    SubmittedToFinancial,
}

status_strings!(PreAnalysisStatus {
    Pending => "pending",
    UnderReview => "under_review",
    PreApproved => "pre_approved",
    NeedsDocuments => "needs_documents",
    NeedsClarification => "needs_clarification",
    SubmittedToFinancial => "submitted_to_financial",
});

/// Financial institution decision status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinancialStatus {
    /// Waiting for the institution.
    PendingFinancial,
    /// The institution is reviewing.
    UnderReviewFinancial,
    /// Credit approved with terms.
    Approved,
    /// Credit refused.
    Rejected,
    /// The institution needs more documents.
    NeedsDocumentsFinancial,
}

status_strings!(FinancialStatus {
    PendingFinancial => "pending_financial",
    UnderReviewFinancial => "under_review_financial",
    Approved => "approved",
    Rejected => "rejected",
    NeedsDocumentsFinancial => "needs_documents_financial",
});

/// Admin finalization status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminStatus {
    /// Waiting for final terms.
    PendingAdmin,
    /// Final terms published.
    AdminFinalized,
}

status_strings!(AdminStatus {
    PendingAdmin => "pending_admin",
    AdminFinalized => "admin_finalized",
});

/// One of the four status axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusAxis {
    /// `application_status`
    Application,
    /// `pre_analysis_status`
    PreAnalysis,
    /// `financial_status`
    Financial,
    /// `admin_status`
    Admin,
}

status_strings!(StatusAxis {
    Application => "application",
    PreAnalysis => "pre_analysis",
    Financial => "financial",
    Admin => "admin",
});

/// A status value tagged with the axis it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "axis", content = "status", rename_all = "snake_case")]
pub enum AxisStatus {
    /// Application axis value.
    Application(ApplicationStatus),
    /// Pre-analysis axis value.
    PreAnalysis(PreAnalysisStatus),
    /// Financial axis value.
    Financial(FinancialStatus),
    /// Admin axis value.
    Admin(AdminStatus),
}

impl AxisStatus {
    /// Returns the axis this value belongs to.
    #[must_use]
    pub fn axis(&self) -> StatusAxis {
        match self {
            Self::Application(_) => StatusAxis::Application,
            Self::PreAnalysis(_) => StatusAxis::PreAnalysis,
            Self::Financial(_) => StatusAxis::Financial,
            Self::Admin(_) => StatusAxis::Admin,
        }
    }

    /// Returns the persisted string of the inner value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Application(s) => s.as_str(),
            Self::PreAnalysis(s) => s.as_str(),
            Self::Financial(s) => s.as_str(),
            Self::Admin(s) => s.as_str(),
        }
    }

    /// Parses a persisted value for the given axis.
    pub fn parse(axis: StatusAxis, s: &str) -> Option<Self> {
        match axis {
            StatusAxis::Application => ApplicationStatus::parse(s).map(Self::Application),
            StatusAxis::PreAnalysis => PreAnalysisStatus::parse(s).map(Self::PreAnalysis),
            StatusAxis::Financial => FinancialStatus::parse(s).map(Self::Financial),
            StatusAxis::Admin => AdminStatus::parse(s).map(Self::Admin),
        }
    }

    /// Every value of every axis.
    pub fn all() -> impl Iterator<Item = Self> {
        ApplicationStatus::ALL
            .iter()
            .copied()
            .map(Self::Application)
            .chain(PreAnalysisStatus::ALL.iter().copied().map(Self::PreAnalysis))
            .chain(FinancialStatus::ALL.iter().copied().map(Self::Financial))
            .chain(AdminStatus::ALL.iter().copied().map(Self::Admin))
    }
}

impl fmt::Display for AxisStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Composite status of a credit application: the product of the four axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationState {
    /// Overall application status.
    pub application: ApplicationStatus,
    /// Internal pre-analysis status.
    pub pre_analysis: PreAnalysisStatus,
    /// Financial institution status.
    pub financial: FinancialStatus,
    /// Admin finalization status.
    pub admin: AdminStatus,
}

impl Default for ApplicationState {
    fn default() -> Self {
        Self {
            application: ApplicationStatus::Draft,
            pre_analysis: PreAnalysisStatus::Pending,
            financial: FinancialStatus::PendingFinancial,
            admin: AdminStatus::PendingAdmin,
        }
    }
}

impl ApplicationState {
    /// Returns the current value on `axis`.
    #[must_use]
    pub fn get(&self, axis: StatusAxis) -> AxisStatus {
        match axis {
            StatusAxis::Application => AxisStatus::Application(self.application),
            StatusAxis::PreAnalysis => AxisStatus::PreAnalysis(self.pre_analysis),
            StatusAxis::Financial => AxisStatus::Financial(self.financial),
            StatusAxis::Admin => AxisStatus::Admin(self.admin),
        }
    }

    /// Returns a copy with one axis replaced.
    #[must_use]
    pub fn with(mut self, value: AxisStatus) -> Self {
        match value {
            AxisStatus::Application(s) => self.application = s,
            AxisStatus::PreAnalysis(s) => self.pre_analysis = s,
            AxisStatus::Financial(s) => self.financial = s,
            AxisStatus::Admin(s) => self.admin = s,
        }
        self
    }

    /// Returns true when imports may draw credit against the application.
    #[must_use]
    pub fn is_open_for_imports(&self) -> bool {
        self.application == ApplicationStatus::Approved
            && self.financial == FinancialStatus::Approved
            && self.admin == AdminStatus::AdminFinalized
    }
}

/// Audit record of one applied transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    /// Axis that moved.
    pub axis: StatusAxis,
    /// Value before the move.
    pub from: AxisStatus,
    /// Value after the move.
    pub to: AxisStatus,
    /// User who performed it.
    pub actor_id: UserId,
    /// Role the user acted in.
    pub actor_role: ActorRole,
    /// When it was applied.
    pub at: DateTime<Utc>,
    /// Free-text note (rejection reason, requested documents, ...).
    pub note: Option<String>,
}
