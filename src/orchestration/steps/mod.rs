//! # Plan Steps
//!
//! One module per remote effect, dispatched over the closed
//! [`PlanStepKind`] enum. Every step exposes the same two-phase interface:
//!
//! - [`validate`]: planning-time predicate deciding whether this step
//!   belongs in the plan at all, given repository metadata and
//!   content-type policy.
//! - [`apply`]: run-time effect against the capability client and catalog.
//!
//! Steps commit their own side effects atomically and report the most
//! specific error kind they can determine. A step must stay idempotent: the
//! sequencer's crash-recovery policy is to re-run whole plans, and re-runs
//! have to converge rather than corrupt.

pub mod publish;
pub mod refresh_access_guard;
pub mod refresh_distribution;
pub mod reuse_publication;

use crate::client::CapabilityClient;
use crate::models::{
    ContentProxy, ContentTypeRegistry, PublicationHandle, Repository, RepositoryCatalog,
    RepositoryId,
};
use crate::orchestration::errors::OrchestrationResult;
use crate::orchestration::types::PlanStepKind;

/// Everything a step needs to run: the targeted repository and proxy plus
/// the two collaborator seams.
pub struct StepContext<'a> {
    pub repository: RepositoryId,
    pub proxy: &'a ContentProxy,
    pub catalog: &'a dyn RepositoryCatalog,
    pub client: &'a dyn CapabilityClient,
}

/// Side effects a step reports back for the outcome record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepEffects {
    /// Handle the repository now points to, for publication steps
    pub publication_handle: Option<PublicationHandle>,

    /// Whether cached proxy sync history was invalidated
    pub sync_history_cleared: bool,
}

impl StepEffects {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn published(handle: PublicationHandle) -> Self {
        Self {
            publication_handle: Some(handle),
            sync_history_cleared: false,
        }
    }
}

/// Planning-time predicate: does this step apply to the repository at all.
pub fn validate(
    kind: &PlanStepKind,
    repository: &Repository,
    content_types: &ContentTypeRegistry,
) -> bool {
    match kind {
        PlanStepKind::Publish | PlanStepKind::ReusePublication { .. } => {
            content_types.publication_required(&repository.content_type)
        }
        PlanStepKind::RefreshAccessGuard => repository.is_protected(),
        PlanStepKind::RefreshDistribution { .. } => repository.has_environment(),
    }
}

/// Run-time dispatch over the closed step set.
pub async fn apply(kind: &PlanStepKind, ctx: &StepContext<'_>) -> OrchestrationResult<StepEffects> {
    match kind {
        PlanStepKind::Publish => publish::apply(ctx).await,
        PlanStepKind::ReusePublication { source_repository } => {
            reuse_publication::apply(ctx, *source_repository).await
        }
        PlanStepKind::RefreshAccessGuard => refresh_access_guard::apply(ctx).await,
        PlanStepKind::RefreshDistribution { contents_changed } => {
            refresh_distribution::apply(ctx, *contents_changed).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContentType, EnvironmentId};

    fn registry() -> ContentTypeRegistry {
        let mut registry = ContentTypeRegistry::new();
        registry.register(ContentType::new("yum", false));
        registry.register(ContentType::new("docker", true));
        registry
    }

    #[test]
    fn test_publication_steps_gate_on_content_type() {
        let publishable = Repository::new(RepositoryId(1), "zoo", "yum");
        let skipped = Repository::new(RepositoryId(2), "registry", "docker");

        assert!(validate(&PlanStepKind::Publish, &publishable, &registry()));
        assert!(!validate(&PlanStepKind::Publish, &skipped, &registry()));
        assert!(!validate(
            &PlanStepKind::ReusePublication {
                source_repository: RepositoryId(1)
            },
            &skipped,
            &registry()
        ));
    }

    #[test]
    fn test_guard_gates_on_protection_and_distribution_on_environment() {
        let repo = Repository::new(RepositoryId(1), "zoo", "yum");
        assert!(validate(&PlanStepKind::RefreshAccessGuard, &repo, &registry()));
        assert!(!validate(
            &PlanStepKind::RefreshDistribution {
                contents_changed: true
            },
            &repo,
            &registry()
        ));

        let repo = repo.unprotected(true).with_environment(EnvironmentId(9));
        assert!(!validate(&PlanStepKind::RefreshAccessGuard, &repo, &registry()));
        assert!(validate(
            &PlanStepKind::RefreshDistribution {
                contents_changed: true
            },
            &repo,
            &registry()
        ));
    }
}
