//! # Durable Execution Record
//!
//! Plans are transient; what survives a process restart is the execution
//! record: plan id, ordered step list, and per-step status, written before
//! each step begins and updated after it finishes. Any host can load an
//! incomplete record and resume the plan without relying on in-process
//! call-stack state surviving a crash.
//!
//! The store is a trait seam so deployments can back it with whatever
//! persistence the surrounding system uses; the in-tree implementation is a
//! concurrent in-memory map.

use crate::models::{ProxyId, PublicationHandle, RepositoryId};
use crate::orchestration::errors::{OrchestrationError, OrchestrationResult};
use crate::orchestration::types::{Plan, PlanOptions, PlanStepKind, StepStatus};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Terminal and non-terminal states of a recorded plan execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordState {
    /// Plan is executing, or was when the host died
    Running,
    /// All steps committed and the final state was recorded
    Succeeded,
    /// A step failed; the record names it
    Failed,
    /// Cancellation was observed between steps
    Cancelled,
}

/// Per-step entry in the execution record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    pub kind: PlanStepKind,
    pub status: StepStatus,
    pub error: Option<String>,
    pub retryable: Option<bool>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl StepRecord {
    fn pending(kind: PlanStepKind) -> Self {
        Self {
            kind,
            status: StepStatus::Pending,
            error: None,
            retryable: None,
            started_at: None,
            finished_at: None,
        }
    }
}

/// The durable result of one plan invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionRecord {
    pub plan_id: Uuid,
    pub repository: RepositoryId,
    pub proxy: ProxyId,
    /// Options the plan was built from, kept so resumption can rebuild an
    /// equivalent plan
    pub options: PlanOptions,
    pub state: RecordState,
    pub steps: Vec<StepRecord>,
    /// Final handle, folded in by the outcome recorder on success
    pub publication_handle: Option<PublicationHandle>,
    /// Whether the reuse step invalidated cached sync history
    pub sync_history_cleared: bool,
    /// Display form of the terminal error, on failure
    pub failure: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ExecutionRecord {
    /// Fresh running record mirroring a just-built plan.
    pub fn for_plan(plan: &Plan) -> Self {
        let now = Utc::now();
        Self {
            plan_id: plan.id,
            repository: plan.repository,
            proxy: plan.proxy.id,
            options: plan.options.clone(),
            state: RecordState::Running,
            steps: plan
                .steps
                .iter()
                .map(|s| StepRecord::pending(s.kind.clone()))
                .collect(),
            publication_handle: None,
            sync_history_cleared: false,
            failure: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn step_started(&mut self, index: usize) {
        if let Some(step) = self.steps.get_mut(index) {
            step.started_at = Some(Utc::now());
        }
        self.updated_at = Utc::now();
    }

    pub fn step_succeeded(&mut self, index: usize) {
        if let Some(step) = self.steps.get_mut(index) {
            step.status = StepStatus::Succeeded;
            step.finished_at = Some(Utc::now());
        }
        self.updated_at = Utc::now();
    }

    pub fn step_failed(&mut self, index: usize, error: &OrchestrationError) {
        if let Some(step) = self.steps.get_mut(index) {
            step.status = StepStatus::Failed;
            step.error = Some(error.to_string());
            step.retryable = Some(error.is_retryable());
            step.finished_at = Some(Utc::now());
        }
        self.state = RecordState::Failed;
        self.failure = Some(error.to_string());
        self.updated_at = Utc::now();
    }

    pub fn is_complete(&self) -> bool {
        self.state != RecordState::Running
    }
}

/// Persistence seam for execution records.
#[async_trait::async_trait]
pub trait ExecutionRecordStore: Send + Sync {
    /// Insert or overwrite the record for its plan id.
    async fn save(&self, record: ExecutionRecord) -> OrchestrationResult<()>;

    async fn load(&self, plan_id: Uuid) -> OrchestrationResult<Option<ExecutionRecord>>;

    /// Records still marked running: plans interrupted by a crash that a
    /// supervisor should resume.
    async fn list_incomplete(&self) -> OrchestrationResult<Vec<ExecutionRecord>>;
}

/// Concurrent in-memory record store.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    records: DashMap<Uuid, ExecutionRecord>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ExecutionRecordStore for InMemoryRecordStore {
    async fn save(&self, record: ExecutionRecord) -> OrchestrationResult<()> {
        self.records.insert(record.plan_id, record);
        Ok(())
    }

    async fn load(&self, plan_id: Uuid) -> OrchestrationResult<Option<ExecutionRecord>> {
        Ok(self.records.get(&plan_id).map(|r| r.value().clone()))
    }

    async fn list_incomplete(&self) -> OrchestrationResult<Vec<ExecutionRecord>> {
        Ok(self
            .records
            .iter()
            .filter(|r| !r.value().is_complete())
            .map(|r| r.value().clone())
            .collect())
    }
}
