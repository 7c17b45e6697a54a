//! # Fake Capability Client
//!
//! Scriptable in-memory client used by unit and scenario tests. Records
//! every call with its arguments, hands out sequential publication handles,
//! and supports per-operation failure and hang injection so tests can drive
//! the sequencer through its error and timeout paths.

use crate::client::{CapabilityClient, ClientError, ClientResult};
use crate::models::{ProxyId, PublicationHandle, RepositoryId};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Duration;

/// One recorded capability call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapabilityCall {
    CreatePublication {
        repository: RepositoryId,
        proxy: ProxyId,
    },
    GetPublicationHandle {
        repository: RepositoryId,
    },
    RefreshAccessGuard {
        proxy: ProxyId,
    },
    RefreshDistribution {
        repository: RepositoryId,
        proxy: ProxyId,
        contents_changed: bool,
    },
}

impl CapabilityCall {
    /// Operation name, matching the keys used for failure/hang scripting.
    pub fn operation(&self) -> &'static str {
        match self {
            Self::CreatePublication { .. } => "create_publication",
            Self::GetPublicationHandle { .. } => "get_publication_handle",
            Self::RefreshAccessGuard { .. } => "refresh_access_guard",
            Self::RefreshDistribution { .. } => "refresh_distribution",
        }
    }
}

#[derive(Debug, Default)]
struct FakeState {
    calls: Vec<CapabilityCall>,
    next_handle: u64,
    failures: HashMap<&'static str, ClientError>,
    hangs: HashMap<&'static str, Duration>,
    backend_handles: HashMap<RepositoryId, PublicationHandle>,
}

/// Recording fake with per-operation failure and hang injection.
#[derive(Debug, Default)]
pub struct FakeCapabilityClient {
    state: Mutex<FakeState>,
}

impl FakeCapabilityClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call to `operation` fail with `error`.
    pub fn fail_operation(&self, operation: &'static str, error: ClientError) {
        self.state.lock().failures.insert(operation, error);
    }

    /// Clear a scripted failure.
    pub fn restore_operation(&self, operation: &'static str) {
        self.state.lock().failures.remove(operation);
    }

    /// Make every subsequent call to `operation` sleep for `duration`
    /// before responding, so the sequencer's step timeout fires first.
    pub fn hang_operation(&self, operation: &'static str, duration: Duration) {
        self.state.lock().hangs.insert(operation, duration);
    }

    /// Pre-load the handle the backend reports for a repository.
    pub fn set_backend_handle(&self, repository: RepositoryId, handle: PublicationHandle) {
        self.state.lock().backend_handles.insert(repository, handle);
    }

    /// All calls recorded so far, in order.
    pub fn calls(&self) -> Vec<CapabilityCall> {
        self.state.lock().calls.clone()
    }

    /// Operation names of all recorded calls, in order.
    pub fn call_operations(&self) -> Vec<&'static str> {
        self.state.lock().calls.iter().map(|c| c.operation()).collect()
    }

    async fn record(&self, call: CapabilityCall) -> ClientResult<()> {
        let operation = call.operation();
        let (failure, hang) = {
            let mut state = self.state.lock();
            state.calls.push(call);
            (
                state.failures.get(operation).cloned(),
                state.hangs.get(operation).copied(),
            )
        };
        if let Some(duration) = hang {
            tokio::time::sleep(duration).await;
        }
        match failure {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait::async_trait]
impl CapabilityClient for FakeCapabilityClient {
    async fn create_publication(
        &self,
        repository: RepositoryId,
        proxy: ProxyId,
    ) -> ClientResult<PublicationHandle> {
        self.record(CapabilityCall::CreatePublication { repository, proxy })
            .await?;
        let mut state = self.state.lock();
        state.next_handle += 1;
        let handle = PublicationHandle::new(format!("/pub/fake/{}/", state.next_handle));
        state.backend_handles.insert(repository, handle.clone());
        Ok(handle)
    }

    async fn get_publication_handle(
        &self,
        repository: RepositoryId,
    ) -> ClientResult<Option<PublicationHandle>> {
        self.record(CapabilityCall::GetPublicationHandle { repository })
            .await?;
        Ok(self.state.lock().backend_handles.get(&repository).cloned())
    }

    async fn refresh_access_guard(&self, proxy: ProxyId) -> ClientResult<()> {
        self.record(CapabilityCall::RefreshAccessGuard { proxy }).await
    }

    async fn refresh_distribution(
        &self,
        repository: RepositoryId,
        proxy: ProxyId,
        contents_changed: bool,
    ) -> ClientResult<()> {
        self.record(CapabilityCall::RefreshDistribution {
            repository,
            proxy,
            contents_changed,
        })
        .await
    }
}
