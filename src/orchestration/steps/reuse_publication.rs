//! # Reuse-Publication Fast Path
//!
//! Points a target repository at an already-published source repository's
//! artifact instead of recomputing one. This step never calls the backend's
//! publication capability; its whole purpose is to avoid that expensive
//! call for repositories that are variants of a published source
//! (incremental or filtered copies sharing a lineage).
//!
//! Behavior, in order:
//!
//! - Source repository gone or without a handle: fail with the classified
//!   missing-source-artifact error, never a raw lookup failure, so callers
//!   can fall back to a full publish.
//! - Handles already match: no-op, skipping the redundant catalog writes.
//!   This is what makes re-running the step idempotent.
//! - Handles differ on a primary proxy: invalidate the target's cached
//!   proxy sync history first, since a handle change on the authoritative
//!   node means previously recorded sync state must not be trusted for
//!   incremental decisions. Mirrors skip the invalidation.
//! - Point the target at the source's handle.

use crate::models::{CatalogError, RepositoryId};
use crate::orchestration::errors::{OrchestrationError, OrchestrationResult};
use crate::orchestration::steps::{StepContext, StepEffects};
use tracing::{debug, info};

pub async fn apply(
    ctx: &StepContext<'_>,
    source_repository: RepositoryId,
) -> OrchestrationResult<StepEffects> {
    let source = match ctx.catalog.find(source_repository).await {
        Ok(repository) => repository,
        Err(CatalogError::NotFound(_)) => {
            return Err(OrchestrationError::missing_source(source_repository))
        }
        Err(err) => return Err(err.into()),
    };

    let Some(handle) = source.publication_handle else {
        return Err(OrchestrationError::missing_source(source_repository));
    };

    let target = ctx.catalog.find(ctx.repository).await?;

    if target.publication_handle.as_ref() == Some(&handle) {
        debug!(
            repository = %ctx.repository,
            source_repository = %source_repository,
            publication_handle = %handle,
            "target already points at source publication, nothing to do"
        );
        return Ok(StepEffects::published(handle));
    }

    let mut sync_history_cleared = false;
    if ctx.proxy.is_primary() {
        ctx.catalog.clear_proxy_sync_history(ctx.repository).await?;
        sync_history_cleared = true;
    }

    ctx.catalog
        .update_publication_handle(ctx.repository, Some(handle.clone()))
        .await?;

    info!(
        repository = %ctx.repository,
        source_repository = %source_repository,
        proxy = %ctx.proxy.id,
        publication_handle = %handle,
        sync_history_cleared,
        "reused source publication"
    );

    Ok(StepEffects {
        publication_handle: Some(handle),
        sync_history_cleared,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::FakeCapabilityClient;
    use crate::models::{
        ContentProxy, InMemoryCatalog, ProxyId, ProxyRole, PublicationHandle, Repository,
    };

    fn setup(role: ProxyRole) -> (InMemoryCatalog, FakeCapabilityClient, ContentProxy) {
        let catalog = InMemoryCatalog::new();
        catalog.insert(
            Repository::new(RepositoryId(1), "zoo", "yum")
                .with_publication_handle(PublicationHandle::new("h1")),
        );
        catalog.insert(
            Repository::new(RepositoryId(2), "zoo-copy", "yum")
                .with_publication_handle(PublicationHandle::new("h0"))
                .with_source_repository(RepositoryId(1)),
        );
        let proxy = ContentProxy::new(ProxyId(1), "proxy01", role);
        (catalog, FakeCapabilityClient::new(), proxy)
    }

    #[tokio::test]
    async fn test_reuse_clears_history_on_primary_when_handles_differ() {
        let (catalog, client, proxy) = setup(ProxyRole::Primary);
        catalog.seed_sync_history(RepositoryId(2), 5);
        let ctx = StepContext {
            repository: RepositoryId(2),
            proxy: &proxy,
            catalog: &catalog,
            client: &client,
        };

        let effects = apply(&ctx, RepositoryId(1)).await.unwrap();

        assert_eq!(effects.publication_handle, Some(PublicationHandle::new("h1")));
        assert!(effects.sync_history_cleared);
        assert_eq!(catalog.sync_history_entries(RepositoryId(2)), 0);
        assert_eq!(
            catalog.get(RepositoryId(2)).unwrap().publication_handle,
            Some(PublicationHandle::new("h1"))
        );
        // fast path never touches the backend
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_reuse_on_mirror_keeps_history() {
        let (catalog, client, proxy) = setup(ProxyRole::Mirror);
        catalog.seed_sync_history(RepositoryId(2), 5);
        let ctx = StepContext {
            repository: RepositoryId(2),
            proxy: &proxy,
            catalog: &catalog,
            client: &client,
        };

        let effects = apply(&ctx, RepositoryId(1)).await.unwrap();

        assert!(!effects.sync_history_cleared);
        assert_eq!(catalog.sync_history_entries(RepositoryId(2)), 5);
        assert_eq!(
            catalog.get(RepositoryId(2)).unwrap().publication_handle,
            Some(PublicationHandle::new("h1"))
        );
    }

    #[tokio::test]
    async fn test_second_run_is_a_no_op() {
        let (catalog, client, proxy) = setup(ProxyRole::Primary);
        let ctx = StepContext {
            repository: RepositoryId(2),
            proxy: &proxy,
            catalog: &catalog,
            client: &client,
        };

        apply(&ctx, RepositoryId(1)).await.unwrap();
        assert_eq!(catalog.sync_history_clears(RepositoryId(2)), 1);

        // handles now match, so the second run writes nothing
        let effects = apply(&ctx, RepositoryId(1)).await.unwrap();
        assert_eq!(effects.publication_handle, Some(PublicationHandle::new("h1")));
        assert!(!effects.sync_history_cleared);
        assert_eq!(catalog.sync_history_clears(RepositoryId(2)), 1);
    }

    #[tokio::test]
    async fn test_null_source_handle_is_missing_source_artifact() {
        let (catalog, client, proxy) = setup(ProxyRole::Primary);
        catalog.insert(Repository::new(RepositoryId(1), "zoo", "yum")); // handle gone
        let ctx = StepContext {
            repository: RepositoryId(2),
            proxy: &proxy,
            catalog: &catalog,
            client: &client,
        };

        let err = apply(&ctx, RepositoryId(1)).await.unwrap_err();
        assert_eq!(err, OrchestrationError::missing_source(RepositoryId(1)));
        // target untouched
        assert_eq!(
            catalog.get(RepositoryId(2)).unwrap().publication_handle,
            Some(PublicationHandle::new("h0"))
        );
    }

    #[tokio::test]
    async fn test_deleted_source_is_missing_source_artifact_not_lookup_error() {
        let (catalog, client, proxy) = setup(ProxyRole::Primary);
        catalog.remove(RepositoryId(1));
        let ctx = StepContext {
            repository: RepositoryId(2),
            proxy: &proxy,
            catalog: &catalog,
            client: &client,
        };

        let err = apply(&ctx, RepositoryId(1)).await.unwrap_err();
        assert_eq!(err, OrchestrationError::missing_source(RepositoryId(1)));
    }
}
