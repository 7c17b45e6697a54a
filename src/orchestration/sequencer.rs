//! # Sequencer
//!
//! Executes a built plan strictly in order, one step at a time. A step
//! failure halts the plan immediately: no later step runs with a
//! predecessor in an unknown or failed state.
//!
//! ## Timeouts
//!
//! Every step is a network round-trip, so every step runs under the
//! configured capability-call timeout. A timeout is reported as a transient
//! (retryable) failure; only an explicit backend rejection is permanent.
//!
//! ## Crash recovery
//!
//! The durable execution record is written before each step starts and
//! after it finishes. On resumption the engine re-runs the whole plan
//! rather than skipping completed steps: every step is idempotent at the
//! capability boundary, so full re-execution trades a little redundant
//! remote work for not having to prove per-step checkpoint correctness.
//!
//! ## Concurrency
//!
//! Plans for different (repository, proxy) pairs may run concurrently on
//! separate tasks. Two in-flight plans for the *same* pair are not
//! serialized here; callers must enforce at-most-one in-flight plan per
//! pair, since the publication-handle field is written under that
//! single-writer assumption.

use crate::client::CapabilityClient;
use crate::models::RepositoryCatalog;
use crate::orchestration::errors::{OrchestrationError, OrchestrationResult};
use crate::orchestration::execution_record::{ExecutionRecord, ExecutionRecordStore};
use crate::orchestration::outcome_recorder::OutcomeRecorder;
use crate::orchestration::steps::{self, StepContext, StepEffects};
use crate::orchestration::types::{CancellationFlag, Plan, PlanOutcome};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{info, instrument};

/// In-order plan executor with durable progress tracking.
pub struct Sequencer {
    catalog: Arc<dyn RepositoryCatalog>,
    client: Arc<dyn CapabilityClient>,
    records: Arc<dyn ExecutionRecordStore>,
    recorder: OutcomeRecorder,
    step_timeout: Duration,
}

impl Sequencer {
    pub fn new(
        catalog: Arc<dyn RepositoryCatalog>,
        client: Arc<dyn CapabilityClient>,
        records: Arc<dyn ExecutionRecordStore>,
        step_timeout: Duration,
    ) -> Self {
        let recorder = OutcomeRecorder::new(records.clone());
        Self {
            catalog,
            client,
            records,
            recorder,
            step_timeout,
        }
    }

    /// Execute every step of the plan in order.
    ///
    /// The returned `Err` covers only record-store failures; step failures
    /// are reported inside [`PlanOutcome::Failed`] with the failing step
    /// attached.
    #[instrument(
        skip(self, plan, cancel),
        fields(plan_id = %plan.id, repository = %plan.repository, proxy = %plan.proxy.id)
    )]
    pub async fn execute(
        &self,
        plan: &Plan,
        cancel: &CancellationFlag,
    ) -> OrchestrationResult<PlanOutcome> {
        let mut record = ExecutionRecord::for_plan(plan);
        self.records.save(record.clone()).await?;

        let mut effects = StepEffects::none();

        for (index, step) in plan.steps.iter().enumerate() {
            // cooperative cancellation: checked between steps only, an
            // in-flight call runs to completion or its timeout
            if cancel.is_cancelled() {
                return self
                    .recorder
                    .record_cancelled(record, step.kind.clone())
                    .await;
            }

            record.step_started(index);
            self.records.save(record.clone()).await?;

            info!(step = step.kind.name(), index, "executing plan step");

            let ctx = StepContext {
                repository: plan.repository,
                proxy: &plan.proxy,
                catalog: self.catalog.as_ref(),
                client: self.client.as_ref(),
            };

            let result = match timeout(self.step_timeout, steps::apply(&step.kind, &ctx)).await {
                Ok(result) => result,
                Err(_) => Err(OrchestrationError::timeout(
                    step.kind.name(),
                    self.step_timeout,
                )),
            };

            match result {
                Ok(step_effects) => {
                    if step_effects.publication_handle.is_some() {
                        effects.publication_handle = step_effects.publication_handle;
                    }
                    effects.sync_history_cleared |= step_effects.sync_history_cleared;

                    record.step_succeeded(index);
                    self.records.save(record.clone()).await?;
                }
                Err(error) => {
                    record.step_failed(index, &error);
                    return self
                        .recorder
                        .record_failure(record, step.kind.clone(), error)
                        .await;
                }
            }
        }

        self.recorder.record_success(record, effects).await
    }
}
