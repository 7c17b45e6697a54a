//! # Orchestration Core
//!
//! The action planning and execution engine: turns a high-level intent
//! ("publish repository R via proxy P") into a dependency-ordered plan of
//! discrete, independently retryable remote operations, executes them
//! against backend services, and records the result durably.
//!
//! ## Components
//!
//! - [`plan_builder`]: decides which steps a plan needs and in what order
//! - [`steps`]: the closed set of step effects and their dispatch
//! - [`sequencer`]: strict in-order execution with timeouts, cancellation,
//!   and halt-on-first-failure
//! - [`execution_record`]: durable per-plan progress, the basis for crash
//!   recovery
//! - [`outcome_recorder`]: folds step effects into the persisted result
//! - [`engine`]: the `plan()` / `run()` / `resume()` facade
//! - [`errors`]: the four-kind failure taxonomy

pub mod engine;
pub mod errors;
pub mod execution_record;
pub mod outcome_recorder;
pub mod plan_builder;
pub mod sequencer;
pub mod steps;
pub mod types;

pub use engine::OrchestrationEngine;
pub use errors::{OrchestrationError, OrchestrationResult};
pub use execution_record::{
    ExecutionRecord, ExecutionRecordStore, InMemoryRecordStore, RecordState, StepRecord,
};
pub use outcome_recorder::OutcomeRecorder;
pub use plan_builder::PlanBuilder;
pub use sequencer::Sequencer;
pub use steps::{StepContext, StepEffects};
pub use types::{
    CancellationFlag, Plan, PlanOptions, PlanOutcome, PlanStep, PlanStepKind, StepStatus,
};
