//! Crate-level error surface: a thin re-export of the orchestration
//! taxonomy so callers can write `pubflow::Result<T>`.

pub use crate::orchestration::errors::{OrchestrationError, OrchestrationResult};

pub type Result<T> = OrchestrationResult<T>;
