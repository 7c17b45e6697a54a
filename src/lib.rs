#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Pubflow
//!
//! Action planning and execution engine for content publication and
//! distribution workflows across fleets of remote content proxies.
//!
//! ## Overview
//!
//! A single logical operation, "make this repository's content available
//! and up to date via proxy P", decomposes into an ordered set of
//! dependent remote actions: generate or reuse a publication artifact,
//! refresh the access-control guard in front of the served content, and
//! refresh the distribution endpoint clients pull from. Pubflow builds that
//! plan from repository metadata and content-type policy, executes it step
//! by step against a backend service, and records progress durably so an
//! interrupted plan can be safely re-run.
//!
//! ## Architecture
//!
//! The engine sequences calls, it never implements backend internals. Two
//! trait seams keep the collaborators external:
//!
//! - [`client::CapabilityClient`]: the remote content-backend service
//! - [`models::RepositoryCatalog`]: the persistent repository catalog
//!
//! Steps are a closed enum with a uniform validate/apply interface, so the
//! sequencer stays ignorant of step internals while new step kinds remain
//! statically checked additions.
//!
//! ## Module Organization
//!
//! - [`models`] - repositories, content-type policy, proxies, catalog seam
//! - [`client`] - capability client trait and the recording test fake
//! - [`orchestration`] - plan builder, sequencer, execution records, engine
//! - [`config`] - engine configuration
//! - [`logging`] - structured logging init
//! - [`error`] - crate-level result alias
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use pubflow::client::FakeCapabilityClient;
//! use pubflow::config::EngineConfig;
//! use pubflow::models::{
//!     ContentProxy, ContentType, ContentTypeRegistry, InMemoryCatalog, ProxyId, ProxyRole,
//!     Repository, RepositoryId,
//! };
//! use pubflow::orchestration::{OrchestrationEngine, PlanOptions};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = Arc::new(InMemoryCatalog::new());
//! catalog.insert(Repository::new(RepositoryId(1), "zoo-rpms", "yum"));
//!
//! let mut content_types = ContentTypeRegistry::new();
//! content_types.register(ContentType::new("yum", false));
//!
//! let engine = OrchestrationEngine::new(
//!     catalog,
//!     Arc::new(FakeCapabilityClient::new()),
//!     content_types,
//!     EngineConfig::default(),
//! );
//!
//! let proxy = ContentProxy::new(ProxyId(1), "proxy01.example.com", ProxyRole::Primary);
//! let plan = engine.plan(RepositoryId(1), &proxy, PlanOptions::default()).await?;
//! let outcome = engine.run(&plan).await?;
//! assert!(outcome.is_success());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod orchestration;

pub use client::{CapabilityClient, ClientError, ClientResult, FakeCapabilityClient};
pub use config::EngineConfig;
pub use error::Result;
pub use models::{
    ContentProxy, ContentType, ContentTypeRegistry, InMemoryCatalog, ProxyId, ProxyRole,
    PublicationHandle, Repository, RepositoryCatalog, RepositoryId,
};
pub use orchestration::{
    CancellationFlag, OrchestrationEngine, OrchestrationError, OrchestrationResult, Plan,
    PlanOptions, PlanOutcome, PlanStepKind,
};
