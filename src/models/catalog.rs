//! # Repository Catalog
//!
//! Trait seam to the persistent repository catalog, which owns repository
//! records. The engine reads repositories through it and writes back exactly
//! two things: the publication handle and the cleared proxy sync history.
//!
//! The catalog itself (database, ORM, caching) is an external collaborator;
//! [`InMemoryCatalog`] is the in-tree reference implementation used by unit
//! and scenario tests.

use crate::models::repository::{PublicationHandle, Repository, RepositoryId};
use parking_lot::RwLock;
use std::collections::HashMap;
use thiserror::Error;

/// Errors surfaced by catalog implementations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("repository {0} is not in the catalog")]
    NotFound(RepositoryId),

    #[error("catalog storage failure: {0}")]
    Storage(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Read/write access to repository records.
#[async_trait::async_trait]
pub trait RepositoryCatalog: Send + Sync {
    /// Fetch a repository by id.
    async fn find(&self, id: RepositoryId) -> CatalogResult<Repository>;

    /// Point the repository at a (possibly absent) publication handle.
    ///
    /// Implementations must commit this write atomically: a plan that fails
    /// in a later step leaves the handle committed (partial-commit
    /// semantics, no rollback).
    async fn update_publication_handle(
        &self,
        id: RepositoryId,
        handle: Option<PublicationHandle>,
    ) -> CatalogResult<()>;

    /// Drop the cached per-proxy sync history for a repository.
    ///
    /// Called when a publication-handle change on a primary proxy makes
    /// previously recorded sync state untrustworthy for incremental
    /// decisions.
    async fn clear_proxy_sync_history(&self, id: RepositoryId) -> CatalogResult<()>;
}

#[derive(Debug, Default)]
struct CatalogState {
    repositories: HashMap<RepositoryId, Repository>,
    /// entries of cached sync history per repository
    sync_history: HashMap<RepositoryId, u32>,
    /// how many times each repository's history has been cleared
    clears: HashMap<RepositoryId, u32>,
}

/// In-memory catalog used by tests and examples.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    state: RwLock<CatalogState>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a repository record.
    pub fn insert(&self, repository: Repository) {
        self.state
            .write()
            .repositories
            .insert(repository.id, repository);
    }

    /// Remove a repository, simulating deletion out from under a plan.
    pub fn remove(&self, id: RepositoryId) -> Option<Repository> {
        self.state.write().repositories.remove(&id)
    }

    pub fn get(&self, id: RepositoryId) -> Option<Repository> {
        self.state.read().repositories.get(&id).cloned()
    }

    /// Seed cached sync-history entries for a repository.
    pub fn seed_sync_history(&self, id: RepositoryId, entries: u32) {
        self.state.write().sync_history.insert(id, entries);
    }

    pub fn sync_history_entries(&self, id: RepositoryId) -> u32 {
        self.state.read().sync_history.get(&id).copied().unwrap_or(0)
    }

    /// How many times `clear_proxy_sync_history` has run for a repository.
    pub fn sync_history_clears(&self, id: RepositoryId) -> u32 {
        self.state.read().clears.get(&id).copied().unwrap_or(0)
    }
}

#[async_trait::async_trait]
impl RepositoryCatalog for InMemoryCatalog {
    async fn find(&self, id: RepositoryId) -> CatalogResult<Repository> {
        self.state
            .read()
            .repositories
            .get(&id)
            .cloned()
            .ok_or(CatalogError::NotFound(id))
    }

    async fn update_publication_handle(
        &self,
        id: RepositoryId,
        handle: Option<PublicationHandle>,
    ) -> CatalogResult<()> {
        let mut state = self.state.write();
        let repository = state
            .repositories
            .get_mut(&id)
            .ok_or(CatalogError::NotFound(id))?;
        repository.publication_handle = handle;
        Ok(())
    }

    async fn clear_proxy_sync_history(&self, id: RepositoryId) -> CatalogResult<()> {
        let mut state = self.state.write();
        if !state.repositories.contains_key(&id) {
            return Err(CatalogError::NotFound(id));
        }
        state.sync_history.insert(id, 0);
        *state.clears.entry(id).or_insert(0) += 1;
        Ok(())
    }
}
