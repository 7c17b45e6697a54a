//! # Outcome Recorder
//!
//! Persists the authoritative result of a finished plan. On success the
//! record is marked succeeded with the final publication handle and the
//! sync-history invalidation flag folded in. On failure nothing beyond what
//! individual steps already committed is persisted: steps commit their own
//! side effects atomically and there is no compensating rollback; re-running
//! the plan converges through step idempotence instead.

use crate::orchestration::errors::{OrchestrationError, OrchestrationResult};
use crate::orchestration::execution_record::{ExecutionRecord, ExecutionRecordStore, RecordState};
use crate::orchestration::steps::StepEffects;
use crate::orchestration::types::{PlanOutcome, PlanStepKind};
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

/// Folds step effects into the durable record and produces the outcome
/// reported to the caller.
pub struct OutcomeRecorder {
    records: Arc<dyn ExecutionRecordStore>,
}

impl OutcomeRecorder {
    pub fn new(records: Arc<dyn ExecutionRecordStore>) -> Self {
        Self { records }
    }

    /// All steps committed: persist the final state and report success.
    pub async fn record_success(
        &self,
        mut record: ExecutionRecord,
        effects: StepEffects,
    ) -> OrchestrationResult<PlanOutcome> {
        record.state = RecordState::Succeeded;
        record.publication_handle = effects.publication_handle.clone();
        record.sync_history_cleared = effects.sync_history_cleared;
        record.updated_at = Utc::now();

        info!(
            plan_id = %record.plan_id,
            repository = %record.repository,
            proxy = %record.proxy,
            publication_handle = effects.publication_handle.as_ref().map(|h| h.as_str()),
            sync_history_cleared = effects.sync_history_cleared,
            "plan succeeded"
        );

        self.records.save(record).await?;

        Ok(PlanOutcome::Succeeded {
            publication_handle: effects.publication_handle,
            sync_history_cleared: effects.sync_history_cleared,
        })
    }

    /// A step failed: persist the attributed failure and report it.
    ///
    /// The record's step entries were already updated by the sequencer;
    /// partial progress stays committed and is never presented as success.
    pub async fn record_failure(
        &self,
        record: ExecutionRecord,
        step: PlanStepKind,
        error: OrchestrationError,
    ) -> OrchestrationResult<PlanOutcome> {
        warn!(
            plan_id = %record.plan_id,
            repository = %record.repository,
            step = step.name(),
            error = %error,
            retryable = error.is_retryable(),
            "plan failed"
        );

        self.records.save(record).await?;

        Ok(PlanOutcome::Failed { step, error })
    }

    /// Cancellation observed between steps.
    pub async fn record_cancelled(
        &self,
        mut record: ExecutionRecord,
        before_step: PlanStepKind,
    ) -> OrchestrationResult<PlanOutcome> {
        record.state = RecordState::Cancelled;
        record.updated_at = Utc::now();

        info!(
            plan_id = %record.plan_id,
            repository = %record.repository,
            before_step = before_step.name(),
            "plan cancelled before step"
        );

        self.records.save(record).await?;

        Ok(PlanOutcome::Cancelled { before_step })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ContentProxy, ProxyId, ProxyRole, PublicationHandle, RepositoryId,
    };
    use crate::orchestration::execution_record::InMemoryRecordStore;
    use crate::orchestration::types::{Plan, PlanOptions, PlanStep};
    use uuid::Uuid;

    fn record() -> ExecutionRecord {
        ExecutionRecord::for_plan(&Plan {
            id: Uuid::new_v4(),
            repository: RepositoryId(1),
            proxy: ContentProxy::new(ProxyId(1), "proxy01", ProxyRole::Primary),
            options: PlanOptions::default(),
            steps: vec![PlanStep::new(PlanStepKind::Publish)],
            built_at: Utc::now(),
        })
    }

    #[tokio::test]
    async fn test_success_folds_effects_into_record() {
        let store = Arc::new(InMemoryRecordStore::new());
        let recorder = OutcomeRecorder::new(store.clone());
        let record = record();
        let plan_id = record.plan_id;

        let outcome = recorder
            .record_success(
                record,
                StepEffects {
                    publication_handle: Some(PublicationHandle::new("h1")),
                    sync_history_cleared: true,
                },
            )
            .await
            .unwrap();

        assert!(outcome.is_success());
        let saved = store.load(plan_id).await.unwrap().unwrap();
        assert_eq!(saved.state, RecordState::Succeeded);
        assert_eq!(saved.publication_handle, Some(PublicationHandle::new("h1")));
        assert!(saved.sync_history_cleared);
    }

    #[tokio::test]
    async fn test_failure_reports_step_and_error_unchanged() {
        let store = Arc::new(InMemoryRecordStore::new());
        let recorder = OutcomeRecorder::new(store);
        let error = OrchestrationError::permanent("create_publication", "bad request");

        let outcome = recorder
            .record_failure(record(), PlanStepKind::Publish, error.clone())
            .await
            .unwrap();

        assert_eq!(
            outcome,
            PlanOutcome::Failed {
                step: PlanStepKind::Publish,
                error,
            }
        );
    }
}
