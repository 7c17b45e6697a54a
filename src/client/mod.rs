//! # Capability Client
//!
//! Typed boundary to a remote content-backend service. The orchestration
//! core sequences calls through this trait and interprets their results; it
//! never implements the backend's publication, guard, or distribution
//! algorithms itself.
//!
//! ## Contract
//!
//! Every operation is treated as idempotent at this boundary: calling a
//! refresh twice is safe, and re-creating a publication yields a fresh
//! handle the catalog is then pointed at. Plan re-execution after a crash
//! relies on this, so real client implementations must preserve it.
//!
//! Errors are pre-classified by the client into transient (network, timeout,
//! backend overload) and permanent (malformed request, unknown repository
//! upstream) so the sequencer never has to guess.

pub mod fake;

use crate::models::{ProxyId, PublicationHandle, RepositoryId};
use thiserror::Error;

pub use fake::{CapabilityCall, FakeCapabilityClient};

/// Failure of a single capability call, classified at the boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Network-level or timeout failure; safe to retry
    #[error("transient backend failure during {operation}: {message}")]
    Transient { operation: String, message: String },

    /// Backend rejected the request as invalid; retrying will not help
    #[error("backend rejected {operation}: {message}")]
    Permanent { operation: String, message: String },
}

impl ClientError {
    pub fn transient(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transient {
            operation: operation.into(),
            message: message.into(),
        }
    }

    pub fn permanent(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Permanent {
            operation: operation.into(),
            message: message.into(),
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Remote operations the engine can sequence against one backend service.
#[async_trait::async_trait]
pub trait CapabilityClient: Send + Sync {
    /// Generate a new publication artifact for a repository via a proxy and
    /// return its handle.
    async fn create_publication(
        &self,
        repository: RepositoryId,
        proxy: ProxyId,
    ) -> ClientResult<PublicationHandle>;

    /// Query the handle of the backend's last-published artifact for a
    /// repository, if any.
    async fn get_publication_handle(
        &self,
        repository: RepositoryId,
    ) -> ClientResult<Option<PublicationHandle>>;

    /// Re-sync the access-control guard in front of the content served by a
    /// proxy.
    async fn refresh_access_guard(&self, proxy: ProxyId) -> ClientResult<()>;

    /// Re-sync the distribution endpoint clients pull from. When
    /// `contents_changed` is false the backend performs the cheaper refresh
    /// that skips content diffing.
    async fn refresh_distribution(
        &self,
        repository: RepositoryId,
        proxy: ProxyId,
        contents_changed: bool,
    ) -> ClientResult<()>;
}
