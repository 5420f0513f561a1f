//! Actor roles and axis ownership.
//!
//! Each status axis is owned by exactly one kind of actor. The application
//! axis is shared: the importer drives submission and cancellation, the
//! reviewer drives review outcomes, and the financial institution and admin
//! move it only as the cascade of their own decisions.

use serde::{Deserialize, Serialize};
use std::fmt;
use tradeline_shared::types::{ImporterId, UserId};

use crate::workflow::error::WorkflowError;
use crate::workflow::types::{ApplicationStatus, AxisStatus};

/// Role a user acts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    /// Requests credit and runs imports.
    Importer,
    /// Internal team performing pre-analysis.
    Reviewer,
    /// Lender deciding on the credit.
    FinancialInstitution,
    /// Publishes final terms.
    Admin,
}

impl ActorRole {
    /// Parse a role from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "importer" => Some(Self::Importer),
            "reviewer" => Some(Self::Reviewer),
            "financial_institution" => Some(Self::FinancialInstitution),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Returns the string representation of the role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Importer => "importer",
            Self::Reviewer => "reviewer",
            Self::FinancialInstitution => "financial_institution",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for ActorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The authenticated user performing an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Acting user.
    pub user_id: UserId,
    /// Role the user acts in.
    pub role: ActorRole,
    /// Importer the user belongs to, for importer accounts.
    pub importer_id: Option<ImporterId>,
}

impl Actor {
    /// Creates an actor for an importer account.
    #[must_use]
    pub fn importer(user_id: UserId, importer_id: ImporterId) -> Self {
        Self {
            user_id,
            role: ActorRole::Importer,
            importer_id: Some(importer_id),
        }
    }

    /// Creates an actor for an internal or lender role.
    #[must_use]
    pub fn staff(user_id: UserId, role: ActorRole) -> Self {
        Self {
            user_id,
            role,
            importer_id: None,
        }
    }

    /// Returns true if this actor may act on data owned by `owner`.
    ///
    /// Only importers are scoped; staff roles see every importer.
    #[must_use]
    pub fn acts_for(&self, owner: ImporterId) -> bool {
        match self.role {
            ActorRole::Importer => self.importer_id == Some(owner),
            _ => true,
        }
    }
}

/// Decides which role may move an axis to a given value.
pub struct AxisAuthority;

impl AxisAuthority {
    /// Returns true if `role` owns the move to `to`.
    #[must_use]
    pub fn may_move(role: ActorRole, to: AxisStatus) -> bool {
        match to {
            AxisStatus::Application(status) => match status {
                ApplicationStatus::Pending | ApplicationStatus::Cancelled => {
                    role == ActorRole::Importer
                }
                ApplicationStatus::UnderReview => role == ActorRole::Reviewer,
                ApplicationStatus::Rejected => {
                    matches!(role, ActorRole::Reviewer | ActorRole::FinancialInstitution)
                }
                ApplicationStatus::Approved => role == ActorRole::Admin,
                ApplicationStatus::Draft => false,
            },
            AxisStatus::PreAnalysis(_) => role == ActorRole::Reviewer,
            AxisStatus::Financial(_) => role == ActorRole::FinancialInstitution,
            AxisStatus::Admin(_) => role == ActorRole::Admin,
        }
    }

    /// Checks that `actor` may move an application owned by `owner` to `to`.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::NotAuthorized` if the role does not own the
    /// move, or `WorkflowError::NotOwner` if an importer acts on another
    /// importer's application.
    pub fn authorize(
        actor: &Actor,
        owner: ImporterId,
        to: AxisStatus,
    ) -> Result<(), WorkflowError> {
        if !Self::may_move(actor.role, to) {
            return Err(WorkflowError::NotAuthorized {
                role: actor.role,
                axis: to.axis(),
                to,
            });
        }
        if !actor.acts_for(owner) {
            return Err(WorkflowError::NotOwner {
                user_id: actor.user_id,
            });
        }
        Ok(())
    }
}
