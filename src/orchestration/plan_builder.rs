//! # Plan Builder
//!
//! Turns "publish repository R via proxy P" into an ordered plan of discrete
//! steps. Pure with respect to remote state: it reads only the repository,
//! proxy, options, and content-type policy it is handed, which keeps plan
//! construction deterministic and unit-testable.
//!
//! ## Branching rules, in evaluation order
//!
//! 1. Publication is required unless the content type is marked
//!    `skip_publication`.
//! 2. With a source repository in the options and publication required,
//!    emit the reuse fast path; otherwise, publication required alone emits
//!    a full publish. The two are mutually exclusive by construction.
//! 3. Protected repositories get an access-guard refresh.
//! 4. Environment-bound repositories get a distribution refresh, always
//!    last, since distribution metadata may depend on the fresh publication
//!    and guard state.

use crate::models::{ContentProxy, ContentTypeRegistry, Repository};
use crate::orchestration::steps::validate;
use crate::orchestration::types::{Plan, PlanOptions, PlanStep, PlanStepKind};
use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

/// Builds dependency-ordered plans from repository and proxy metadata.
#[derive(Debug, Clone)]
pub struct PlanBuilder {
    content_types: ContentTypeRegistry,
}

impl PlanBuilder {
    pub fn new(content_types: ContentTypeRegistry) -> Self {
        Self { content_types }
    }

    /// Build the plan for one (repository, proxy, options) invocation.
    pub fn build(
        &self,
        repository: &Repository,
        proxy: &ContentProxy,
        options: PlanOptions,
    ) -> Plan {
        let publication_required = self
            .content_types
            .publication_required(&repository.content_type);

        let mut steps = Vec::with_capacity(3);

        // reuse and publish are mutually exclusive alternatives, selected
        // once here at build time
        if publication_required {
            if let Some(source_repository) = options.source_repository {
                steps.push(PlanStep::new(PlanStepKind::ReusePublication {
                    source_repository,
                }));
            } else {
                steps.push(PlanStep::new(PlanStepKind::Publish));
            }
        }

        let guard = PlanStepKind::RefreshAccessGuard;
        if validate(&guard, repository, &self.content_types) {
            steps.push(PlanStep::new(guard));
        }

        let distribution = PlanStepKind::RefreshDistribution {
            contents_changed: options.contents_changed(),
        };
        if validate(&distribution, repository, &self.content_types) {
            steps.push(PlanStep::new(distribution));
        }

        let plan = Plan {
            id: Uuid::new_v4(),
            repository: repository.id,
            proxy: proxy.clone(),
            options,
            steps,
            built_at: Utc::now(),
        };

        debug!(
            plan_id = %plan.id,
            repository = %repository.id,
            proxy = %proxy.id,
            publication_required,
            steps = ?plan.steps.iter().map(|s| s.kind.name()).collect::<Vec<_>>(),
            "built publication plan"
        );

        plan
    }
}
