//! Import operations drawing on a finalized credit application.
//!
//! - `types` - ImportStage, Import, stage transitions and triggers
//! - `lifecycle` - Sequential stage advance and cancellation
//! - `error` - Import error types

pub mod error;
pub mod lifecycle;
pub mod types;

pub use error::ImportError;
pub use lifecycle::ImportLifecycle;
pub use types::{Import, ImportStage, StageTransition, StageTrigger};
