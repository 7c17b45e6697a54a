//! Shared builders for scenario and property tests.

#![allow(dead_code)]

use std::sync::Arc;

use pubflow::client::FakeCapabilityClient;
use pubflow::config::EngineConfig;
use pubflow::models::{
    ContentProxy, ContentType, ContentTypeRegistry, InMemoryCatalog, ProxyId, ProxyRole,
};
use pubflow::orchestration::{InMemoryRecordStore, OrchestrationEngine};

/// Content-type policy used across tests: `yum` publishes, `docker` skips
/// publication.
pub fn content_types() -> ContentTypeRegistry {
    let mut registry = ContentTypeRegistry::new();
    registry.register(ContentType::new("yum", false));
    registry.register(ContentType::new("docker", true));
    registry
}

pub fn primary_proxy() -> ContentProxy {
    ContentProxy::new(ProxyId(1), "proxy01.example.com", ProxyRole::Primary)
}

pub fn mirror_proxy() -> ContentProxy {
    ContentProxy::new(ProxyId(2), "proxy02.example.com", ProxyRole::Mirror)
}

/// Engine wired with in-memory collaborators, all kept accessible so tests
/// can seed and inspect them.
pub struct TestHarness {
    pub catalog: Arc<InMemoryCatalog>,
    pub client: Arc<FakeCapabilityClient>,
    pub records: Arc<InMemoryRecordStore>,
    pub engine: OrchestrationEngine,
}

pub fn harness() -> TestHarness {
    harness_with_config(EngineConfig::default())
}

pub fn harness_with_config(config: EngineConfig) -> TestHarness {
    let catalog = Arc::new(InMemoryCatalog::new());
    let client = Arc::new(FakeCapabilityClient::new());
    let records = Arc::new(InMemoryRecordStore::new());
    let engine = OrchestrationEngine::with_record_store(
        catalog.clone(),
        client.clone(),
        content_types(),
        config,
        records.clone(),
    );
    TestHarness {
        catalog,
        client,
        records,
        engine,
    }
}
