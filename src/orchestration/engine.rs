//! # Orchestration Engine
//!
//! Public facade wiring the plan builder, sequencer, and record store
//! together behind the two-call invocation surface: `plan()` then `run()`.
//! A third entry point, `resume()`, re-runs a plan whose host died mid-way,
//! rebuilt from its durable execution record.

use crate::client::CapabilityClient;
use crate::config::EngineConfig;
use crate::models::{ContentProxy, ContentTypeRegistry, RepositoryCatalog, RepositoryId};
use crate::orchestration::errors::{OrchestrationError, OrchestrationResult};
use crate::orchestration::execution_record::{
    ExecutionRecord, ExecutionRecordStore, InMemoryRecordStore,
};
use crate::orchestration::plan_builder::PlanBuilder;
use crate::orchestration::sequencer::Sequencer;
use crate::orchestration::types::{CancellationFlag, Plan, PlanOptions, PlanOutcome};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

/// Entry point for publication and distribution workflows.
///
/// One engine instance serves any number of plans; plans for different
/// (repository, proxy) pairs may run concurrently on separate tasks. The
/// caller must keep at most one plan in flight per pair.
pub struct OrchestrationEngine {
    catalog: Arc<dyn RepositoryCatalog>,
    records: Arc<dyn ExecutionRecordStore>,
    builder: PlanBuilder,
    sequencer: Sequencer,
}

impl OrchestrationEngine {
    /// Build an engine with the default in-memory execution-record store.
    pub fn new(
        catalog: Arc<dyn RepositoryCatalog>,
        client: Arc<dyn CapabilityClient>,
        content_types: ContentTypeRegistry,
        config: EngineConfig,
    ) -> Self {
        Self::with_record_store(
            catalog,
            client,
            content_types,
            config,
            Arc::new(InMemoryRecordStore::new()),
        )
    }

    /// Build an engine with a caller-supplied record store, for deployments
    /// that persist execution records durably.
    pub fn with_record_store(
        catalog: Arc<dyn RepositoryCatalog>,
        client: Arc<dyn CapabilityClient>,
        content_types: ContentTypeRegistry,
        config: EngineConfig,
        records: Arc<dyn ExecutionRecordStore>,
    ) -> Self {
        let step_timeout = Duration::from_secs(config.step_timeout_seconds);
        let sequencer = Sequencer::new(
            catalog.clone(),
            client,
            records.clone(),
            step_timeout,
        );
        Self {
            catalog,
            records,
            builder: PlanBuilder::new(content_types),
            sequencer,
        }
    }

    /// Build the plan for one repository/proxy invocation.
    ///
    /// Reads the repository from the catalog so the plan reflects current
    /// metadata; remote state is never consulted at planning time.
    pub async fn plan(
        &self,
        repository: RepositoryId,
        proxy: &ContentProxy,
        options: PlanOptions,
    ) -> OrchestrationResult<Plan> {
        let repository = self.catalog.find(repository).await?;
        Ok(self.builder.build(&repository, proxy, options))
    }

    /// Execute a plan to completion or first failure.
    pub async fn run(&self, plan: &Plan) -> OrchestrationResult<PlanOutcome> {
        self.run_with_cancellation(plan, &CancellationFlag::new())
            .await
    }

    /// Execute a plan under a cooperative cancellation flag, checked
    /// between steps.
    pub async fn run_with_cancellation(
        &self,
        plan: &Plan,
        cancel: &CancellationFlag,
    ) -> OrchestrationResult<PlanOutcome> {
        self.sequencer.execute(plan, cancel).await
    }

    /// Re-run a plan from its durable execution record.
    ///
    /// The whole plan is rebuilt from the recorded options and re-executed
    /// from the top; steps that already committed converge as no-ops or
    /// cheap refreshes. The proxy must be supplied again because only its
    /// id is recorded, not its reachability.
    pub async fn resume(
        &self,
        plan_id: Uuid,
        proxy: &ContentProxy,
    ) -> OrchestrationResult<PlanOutcome> {
        let record = self
            .records
            .load(plan_id)
            .await?
            .ok_or_else(|| {
                OrchestrationError::inconsistent(format!(
                    "no execution record for plan {plan_id}"
                ))
            })?;

        if record.proxy != proxy.id {
            return Err(OrchestrationError::inconsistent(format!(
                "plan {plan_id} was recorded against proxy {} but resumed with proxy {}",
                record.proxy, proxy.id
            )));
        }

        let repository = self.catalog.find(record.repository).await?;
        let mut plan = self.builder.build(&repository, proxy, record.options.clone());
        plan.id = record.plan_id;

        info!(
            plan_id = %plan.id,
            repository = %repository.id,
            proxy = %proxy.id,
            "resuming plan by full re-execution"
        );

        self.run(&plan).await
    }

    /// Records still marked running, meaning plans interrupted by a crash.
    pub async fn incomplete_plans(&self) -> OrchestrationResult<Vec<ExecutionRecord>> {
        self.records.list_incomplete().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::FakeCapabilityClient;
    use crate::models::{ContentType, InMemoryCatalog, ProxyId, ProxyRole};

    fn engine(catalog: Arc<InMemoryCatalog>) -> OrchestrationEngine {
        let mut content_types = ContentTypeRegistry::new();
        content_types.register(ContentType::new("yum", false));
        OrchestrationEngine::new(
            catalog,
            Arc::new(FakeCapabilityClient::new()),
            content_types,
            EngineConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_planning_unknown_repository_is_inconsistent_state() {
        let engine = engine(Arc::new(InMemoryCatalog::new()));
        let proxy = ContentProxy::new(ProxyId(1), "proxy01", ProxyRole::Primary);

        let err = engine
            .plan(RepositoryId(404), &proxy, PlanOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, OrchestrationError::InconsistentState { .. }));
    }

    #[tokio::test]
    async fn test_resume_unknown_plan_is_inconsistent_state() {
        let engine = engine(Arc::new(InMemoryCatalog::new()));
        let proxy = ContentProxy::new(ProxyId(1), "proxy01", ProxyRole::Primary);

        let err = engine.resume(Uuid::new_v4(), &proxy).await.unwrap_err();
        assert!(matches!(err, OrchestrationError::InconsistentState { .. }));
    }
}
