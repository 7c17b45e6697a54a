//! # Orchestration Error Taxonomy
//!
//! Structured error types for plan execution using thiserror instead of
//! `Box<dyn Error>` patterns. Steps report the most specific kind they can
//! determine; the sequencer halts the plan and attaches the failing step
//! without reclassifying.
//!
//! Four kinds cover everything a plan can die of:
//!
//! - [`OrchestrationError::TransientBackend`]: network or timeout failure;
//!   the plan converges when re-run.
//! - [`OrchestrationError::PermanentBackend`]: the backend rejected the
//!   request; retrying is pointless.
//! - [`OrchestrationError::MissingSourceArtifact`]: the reuse fast path
//!   found no publication on the source repository; callers fall back to a
//!   full publish.
//! - [`OrchestrationError::InconsistentState`]: local catalog state the
//!   engine cannot reconcile; requires external intervention.

use crate::client::ClientError;
use crate::models::{CatalogError, RepositoryId};
use std::time::Duration;
use thiserror::Error;

/// Terminal classification of a plan-step failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrchestrationError {
    #[error("transient backend failure during {operation}: {message}")]
    TransientBackend { operation: String, message: String },

    #[error("backend permanently rejected {operation}: {message}")]
    PermanentBackend { operation: String, message: String },

    #[error("source repository {source_repository} has no publication artifact to reuse")]
    MissingSourceArtifact { source_repository: RepositoryId },

    #[error("inconsistent local state: {message}")]
    InconsistentState { message: String },
}

impl OrchestrationError {
    /// Create a transient backend error
    pub fn transient(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TransientBackend {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Create a permanent backend error
    pub fn permanent(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::PermanentBackend {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Create a missing-source-artifact error for the reuse fast path
    pub fn missing_source(source_repository: RepositoryId) -> Self {
        Self::MissingSourceArtifact { source_repository }
    }

    /// Create an inconsistent-state error
    pub fn inconsistent(message: impl Into<String>) -> Self {
        Self::InconsistentState {
            message: message.into(),
        }
    }

    /// Create the transient error a step timeout maps to
    pub fn timeout(operation: impl Into<String>, timeout: Duration) -> Self {
        Self::TransientBackend {
            operation: operation.into(),
            message: format!("timed out after {}s", timeout.as_secs()),
        }
    }

    /// Whether re-running the failed step (or the whole plan) may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::TransientBackend { .. })
    }

    /// Short kind label for records and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TransientBackend { .. } => "transient_backend",
            Self::PermanentBackend { .. } => "permanent_backend",
            Self::MissingSourceArtifact { .. } => "missing_source_artifact",
            Self::InconsistentState { .. } => "inconsistent_state",
        }
    }
}

impl From<ClientError> for OrchestrationError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Transient { operation, message } => {
                Self::TransientBackend { operation, message }
            }
            ClientError::Permanent { operation, message } => {
                Self::PermanentBackend { operation, message }
            }
        }
    }
}

/// Catalog failures outside the reuse step's source lookup cannot be
/// reconciled by the engine; the reuse step maps its own source lookup to
/// [`OrchestrationError::MissingSourceArtifact`] before this applies.
impl From<CatalogError> for OrchestrationError {
    fn from(err: CatalogError) -> Self {
        Self::InconsistentState {
            message: err.to_string(),
        }
    }
}

/// Result type alias for orchestration operations
pub type OrchestrationResult<T> = Result<T, OrchestrationError>;
