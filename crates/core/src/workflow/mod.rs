//! Credit application status workflow.
//!
//! This module implements the four-axis status state machine, the
//! cross-axis gating rules, and actor ownership of each axis.
//!
//! # Modules
//!
//! - `types` - Status enums, composite state, audit records
//! - `error` - Workflow-specific error types
//! - `service` - Transition table and engine
//! - `approval` - Actor roles and axis authority

pub mod approval;
pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use approval::{Actor, ActorRole, AxisAuthority};
pub use error::{Precondition, WorkflowError};
pub use service::StatusWorkflowEngine;
pub use types::{
    AdminStatus, ApplicationState, ApplicationStatus, AxisStatus, FinancialStatus,
    PreAnalysisStatus, StatusAxis, StatusChange,
};
