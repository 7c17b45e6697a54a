//! Content proxy model: the remote node a plan targets. Supplied by the
//! caller and immutable for the duration of a plan's execution.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier for a content proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProxyId(pub i64);

impl fmt::Display for ProxyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Topology role of a proxy.
///
/// Only the primary is authoritative: a publication-handle change observed
/// on a primary invalidates previously recorded sync history, a change on a
/// mirror does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProxyRole {
    Primary,
    Mirror,
}

/// A remote content-serving node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentProxy {
    pub id: ProxyId,

    /// Hostname or label, used for logging
    pub name: String,

    pub role: ProxyRole,

    /// Capability endpoint for real clients; fakes ignore it
    pub url: Option<String>,
}

impl ContentProxy {
    pub fn new(id: ProxyId, name: impl Into<String>, role: ProxyRole) -> Self {
        Self {
            id,
            name: name.into(),
            role,
            url: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn is_primary(&self) -> bool {
        self.role == ProxyRole::Primary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_primary_is_authoritative() {
        let primary = ContentProxy::new(ProxyId(1), "proxy01", ProxyRole::Primary);
        let mirror = ContentProxy::new(ProxyId(2), "proxy02", ProxyRole::Mirror);
        assert!(primary.is_primary());
        assert!(!mirror.is_primary());
    }
}
