//! # Repository Model
//!
//! Catalog-owned view of a content repository as the orchestration engine
//! sees it: identity, content type, protection flag, environment binding,
//! current publication handle, and optional lineage to a source repository.
//!
//! The engine only ever writes two of these fields back through the catalog:
//! the publication handle (at most once per successful plan) and the cached
//! proxy sync history (invalidated by the reuse fast path).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier for a repository in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RepositoryId(pub i64);

impl fmt::Display for RepositoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier for a lifecycle environment a repository may be bound to.
///
/// Presence of a binding is what triggers the distribution-refresh step;
/// the engine never inspects the environment beyond that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnvironmentId(pub i64);

impl fmt::Display for EnvironmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque reference to a generated, servable snapshot of a repository's
/// content, as returned by the backend's publication capability.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublicationHandle(pub String);

impl PublicationHandle {
    pub fn new(href: impl Into<String>) -> Self {
        Self(href.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PublicationHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A content repository as read from the persistent catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// Stable catalog identifier
    pub id: RepositoryId,

    /// Human-readable label, used only for logging
    pub name: String,

    /// Content-type key, resolved against the [`ContentTypeRegistry`]
    /// to decide whether publication applies at all
    ///
    /// [`ContentTypeRegistry`]: crate::models::ContentTypeRegistry
    pub content_type: String,

    /// Unprotected repositories skip the access-guard refresh step
    pub unprotected: bool,

    /// Environment binding; presence triggers distribution refresh
    pub environment: Option<EnvironmentId>,

    /// The backend artifact this repository currently points to
    pub publication_handle: Option<PublicationHandle>,

    /// Lineage reference to the repository this one was derived from
    /// (incremental or filtered copy), enabling the reuse fast path
    pub source_repository: Option<RepositoryId>,
}

impl Repository {
    /// Create a protected repository with no environment binding, no
    /// publication handle, and no lineage.
    pub fn new(id: RepositoryId, name: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            content_type: content_type.into(),
            unprotected: false,
            environment: None,
            publication_handle: None,
            source_repository: None,
        }
    }

    pub fn unprotected(mut self, unprotected: bool) -> Self {
        self.unprotected = unprotected;
        self
    }

    pub fn with_environment(mut self, environment: EnvironmentId) -> Self {
        self.environment = Some(environment);
        self
    }

    pub fn with_publication_handle(mut self, handle: PublicationHandle) -> Self {
        self.publication_handle = Some(handle);
        self
    }

    pub fn with_source_repository(mut self, source: RepositoryId) -> Self {
        self.source_repository = Some(source);
        self
    }

    /// Whether the access-guard refresh step applies to this repository.
    pub fn is_protected(&self) -> bool {
        !self.unprotected
    }

    /// Whether the distribution refresh step applies to this repository.
    pub fn has_environment(&self) -> bool {
        self.environment.is_some()
    }
}
