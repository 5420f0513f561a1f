//! Workflow error types for credit application status management.

use std::fmt;
use thiserror::Error;
use tradeline_shared::types::UserId;

use crate::workflow::approval::ActorRole;
use crate::workflow::types::{
    ApplicationStatus, AxisStatus, FinancialStatus, PreAnalysisStatus, StatusAxis,
};

/// A cross-axis condition that blocked a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precondition {
    /// The application reached a terminal status; every axis is frozen.
    ApplicationFrozen(ApplicationStatus),
    /// Pre-analysis only moves while the application is under review.
    ApplicationNotUnderReview(ApplicationStatus),
    /// The financial axis only moves once pre-analysis handed over.
    PreAnalysisNotSubmitted(PreAnalysisStatus),
    /// Admin finalization needs a financial approval.
    FinancialNotApproved(FinancialStatus),
    /// Application approval needs admin finalization.
    AdminNotFinalized,
    /// A finalized application can no longer be rejected.
    AdminAlreadyFinalized,
}

impl fmt::Display for Precondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ApplicationFrozen(status) => {
                write!(f, "application status is terminal ({status})")
            }
            Self::ApplicationNotUnderReview(status) => {
                write!(f, "application status must be under_review, is {status}")
            }
            Self::PreAnalysisNotSubmitted(status) => {
                write!(
                    f,
                    "pre-analysis status must be submitted_to_financial, is {status}"
                )
            }
            Self::FinancialNotApproved(status) => {
                write!(f, "financial status must be approved, is {status}")
            }
            Self::AdminNotFinalized => f.write_str("admin status must be admin_finalized"),
            Self::AdminAlreadyFinalized => f.write_str("admin status is already admin_finalized"),
        }
    }
}

/// Errors that can occur during workflow operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    /// The edge is not in the axis transition table.
    #[error("Illegal {axis} transition from {from} to {to}")]
    IllegalTransition {
        /// Axis the move was attempted on.
        axis: StatusAxis,
        /// Current value.
        from: AxisStatus,
        /// Requested value.
        to: AxisStatus,
    },

    /// The edge exists but another axis blocks it.
    #[error("Cannot move {axis} from {from} to {to}: {precondition}")]
    PreconditionFailed {
        /// Axis the move was attempted on.
        axis: StatusAxis,
        /// Current value.
        from: AxisStatus,
        /// Requested value.
        to: AxisStatus,
        /// The unmet condition.
        precondition: Precondition,
    },

    /// The role does not own this move.
    #[error("Role {role} may not move {axis} to {to}")]
    NotAuthorized {
        /// Role of the caller.
        role: ActorRole,
        /// Axis the move was attempted on.
        axis: StatusAxis,
        /// Requested value.
        to: AxisStatus,
    },

    /// An importer acted on an application owned by another importer.
    #[error("User {user_id} does not own this application")]
    NotOwner {
        /// The user who attempted the move.
        user_id: UserId,
    },

    /// Rejections must carry a reason.
    #[error("A reason is required to move {axis} to {to}")]
    ReasonRequired {
        /// Axis being rejected.
        axis: StatusAxis,
        /// Requested value.
        to: AxisStatus,
    },
}

impl WorkflowError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::ReasonRequired { .. } => 400,
            Self::NotAuthorized { .. } | Self::NotOwner { .. } => 403,
            Self::IllegalTransition { .. } | Self::PreconditionFailed { .. } => 409,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::IllegalTransition { .. } => "ILLEGAL_TRANSITION",
            Self::PreconditionFailed { .. } => "TRANSITION_PRECONDITION_FAILED",
            Self::NotAuthorized { .. } => "NOT_AUTHORIZED_FOR_AXIS",
            Self::NotOwner { .. } => "NOT_APPLICATION_OWNER",
            Self::ReasonRequired { .. } => "REASON_REQUIRED",
        }
    }
}
