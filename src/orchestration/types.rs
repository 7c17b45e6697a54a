//! # Orchestration Types
//!
//! Core types shared across the orchestration components: plans, plan steps,
//! options, execution outcomes, and the cooperative cancellation flag.
//!
//! A [`Plan`] is transient: built per invocation, executed once, never
//! persisted. What survives process restarts is the execution record (see
//! [`super::execution_record`]), not the plan itself.

use crate::models::{ContentProxy, PublicationHandle, RepositoryId};
use crate::orchestration::errors::OrchestrationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use uuid::Uuid;

/// The discrete remote effects a plan can be composed of.
///
/// A closed set on purpose: the sequencer dispatches over this enum and
/// stays ignorant of step internals, while new step kinds remain statically
/// checkable additions rather than open subclassing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlanStepKind {
    /// Generate a fresh publication artifact via the backend
    Publish,

    /// Point the target repository at an already-published source artifact
    /// instead of recomputing one
    ReusePublication { source_repository: RepositoryId },

    /// Re-sync the access-control guard in front of the served content
    RefreshAccessGuard,

    /// Re-sync the distribution endpoint clients pull from
    RefreshDistribution { contents_changed: bool },
}

impl PlanStepKind {
    /// Stable name used in logs and execution records.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Publish => "publish",
            Self::ReusePublication { .. } => "reuse_publication",
            Self::RefreshAccessGuard => "refresh_access_guard",
            Self::RefreshDistribution { .. } => "refresh_distribution",
        }
    }

    /// Whether this step establishes the repository's publication handle.
    pub fn is_publication(&self) -> bool {
        matches!(self, Self::Publish | Self::ReusePublication { .. })
    }
}

/// Outcome of a single step within a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepStatus {
    /// Not yet started
    Pending,
    /// Step committed its side effects
    Succeeded,
    /// Step failed; the plan halted here
    Failed,
}

/// A single unit of work inside a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanStep {
    pub kind: PlanStepKind,
    pub status: StepStatus,
}

impl PlanStep {
    pub fn new(kind: PlanStepKind) -> Self {
        Self {
            kind,
            status: StepStatus::Pending,
        }
    }
}

/// Caller-supplied options recognized by `plan()`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanOptions {
    /// Enables the reuse fast path: point the target repository at this
    /// source repository's publication instead of creating one
    pub source_repository: Option<RepositoryId>,

    /// Whether downstream distribution metadata must be regenerated.
    /// Absent means true.
    pub contents_changed: Option<bool>,
}

impl PlanOptions {
    pub fn with_source_repository(mut self, source: RepositoryId) -> Self {
        self.source_repository = Some(source);
        self
    }

    pub fn with_contents_changed(mut self, contents_changed: bool) -> Self {
        self.contents_changed = Some(contents_changed);
        self
    }

    /// The `contents_changed` flag with its documented default of true.
    pub fn contents_changed(&self) -> bool {
        self.contents_changed.unwrap_or(true)
    }
}

/// An ordered composition of steps targeting one (repository, proxy) pair.
///
/// Steps run strictly in `Vec` order; there is no parallelism within a
/// plan because each step may depend on state written by its predecessor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub id: Uuid,
    pub repository: RepositoryId,
    pub proxy: ContentProxy,
    pub options: PlanOptions,
    pub steps: Vec<PlanStep>,
    pub built_at: DateTime<Utc>,
}

impl Plan {
    pub fn step_kinds(&self) -> Vec<&PlanStepKind> {
        self.steps.iter().map(|s| &s.kind).collect()
    }

    pub fn has_step(&self, name: &str) -> bool {
        self.steps.iter().any(|s| s.kind.name() == name)
    }

    /// Number of publication-establishing steps (publish or reuse).
    pub fn publication_step_count(&self) -> usize {
        self.steps.iter().filter(|s| s.kind.is_publication()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Terminal result of running a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanOutcome {
    /// Every step ran and committed; final state persisted
    Succeeded {
        /// Handle the repository now points to, when a publication step ran
        publication_handle: Option<PublicationHandle>,
        /// Whether the reuse step invalidated cached proxy sync history
        sync_history_cleared: bool,
    },

    /// A step failed; later steps never ran. Side effects committed by
    /// earlier steps stay committed, there is no rollback.
    Failed {
        step: PlanStepKind,
        error: OrchestrationError,
    },

    /// Cancellation observed between steps; the named step never started
    Cancelled { before_step: PlanStepKind },
}

impl PlanOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Cooperative cancellation flag, checked by the sequencer before each step.
///
/// A step already in flight runs to completion or until its timeout fires;
/// backends expose no cancel primitive for in-progress operations, so there
/// is no mid-call preemption.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag {
    cancelled: Arc<AtomicBool>,
}

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}
