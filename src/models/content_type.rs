//! # Content-Type Policy
//!
//! Explicit registry of content types and their publication policy. Some
//! backend plugins serve repository content straight from the repository
//! version and never produce a publication artifact; those content types are
//! registered with `skip_publication` set and the plan builder emits no
//! publication or reuse step for them.
//!
//! The registry is passed explicitly into the plan builder so that plan
//! construction stays a pure function of its arguments.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Policy entry for a single content type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentType {
    /// Key the repository's `content_type` field is matched against
    pub key: String,

    /// True for content types whose backend serves directly from the
    /// repository version, making publication inapplicable
    pub skip_publication: bool,
}

impl ContentType {
    pub fn new(key: impl Into<String>, skip_publication: bool) -> Self {
        Self {
            key: key.into(),
            skip_publication,
        }
    }
}

/// Lookup table from content-type key to policy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentTypeRegistry {
    types: HashMap<String, ContentType>,
}

impl ContentTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace a content type.
    pub fn register(&mut self, content_type: ContentType) {
        self.types.insert(content_type.key.clone(), content_type);
    }

    pub fn get(&self, key: &str) -> Option<&ContentType> {
        self.types.get(key)
    }

    /// Whether publication is skipped for the given content-type key.
    ///
    /// Unknown content types default to requiring publication; skipping is
    /// an opt-in policy per type.
    pub fn skip_publication(&self, key: &str) -> bool {
        self.types.get(key).map(|t| t.skip_publication).unwrap_or(false)
    }

    /// Inverse convenience used by the plan builder.
    pub fn publication_required(&self, key: &str) -> bool {
        !self.skip_publication(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_publication_is_opt_in() {
        let mut registry = ContentTypeRegistry::new();
        registry.register(ContentType::new("yum", false));
        registry.register(ContentType::new("docker", true));

        assert!(!registry.skip_publication("yum"));
        assert!(registry.skip_publication("docker"));
        // unknown types require publication
        assert!(registry.publication_required("ostree"));
    }
}
