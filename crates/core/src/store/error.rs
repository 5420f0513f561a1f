//! Store error types.

use thiserror::Error;
use tradeline_shared::types::{CreditApplicationId, ImportId};

/// Lookup and optimistic-concurrency failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No application with this id.
    #[error("Credit application {0} not found")]
    ApplicationNotFound(CreditApplicationId),

    /// No import with this id.
    #[error("Import {0} not found")]
    ImportNotFound(ImportId),

    /// The caller's view of the application is stale. Retry the whole operation.
    #[error("Application was modified concurrently: expected version {expected}, found {actual}")]
    VersionConflict {
        /// Version the caller read.
        expected: u64,
        /// Version currently stored.
        actual: u64,
    },
}

impl StoreError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::ApplicationNotFound(_) | Self::ImportNotFound(_) => 404,
            Self::VersionConflict { .. } => 409,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ApplicationNotFound(_) => "APPLICATION_NOT_FOUND",
            Self::ImportNotFound(_) => "IMPORT_NOT_FOUND",
            Self::VersionConflict { .. } => "CONCURRENCY_CONFLICT",
        }
    }
}
