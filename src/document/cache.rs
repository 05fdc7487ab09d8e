//! In-memory cache of fetched document bodies.
//!
//! The cache exists to avoid repeated network round-trips within a single
//! document-composition session, where the same source document may be
//! referenced many times (nested includes, repeated preview renders). The
//! first body stored for an identifier wins; later inserts for the same
//! identifier are ignored.

use std::collections::HashMap;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// When cached documents are evicted.
///
/// Retention is a stated policy, not an emergent property: entries
/// currently live for the lifetime of the owning cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvictionPolicy {
    /// Never evict. Entries survive until the cache itself is dropped.
    #[default]
    KeepForever,
}

/// Cache of rendered document bodies keyed by document identifier.
///
/// Interior mutability via a sync `RwLock` so the owning service can stay
/// `&self`; the lock is never held across an await point.
pub struct DocumentCache {
    entries: RwLock<HashMap<String, String>>,
    policy: EvictionPolicy,
}

impl DocumentCache {
    pub fn new(policy: EvictionPolicy) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            policy,
        }
    }

    pub fn policy(&self) -> EvictionPolicy {
        self.policy
    }

    /// Get the cached body for a document identifier.
    pub fn get(&self, id: &str) -> Option<String> {
        self.entries.read().get(id).cloned()
    }

    /// Store a body for a document identifier. The first insert for an
    /// identifier wins; a later insert for the same identifier is a no-op.
    pub fn insert(&self, id: impl Into<String>, body: String) {
        match self.policy {
            EvictionPolicy::KeepForever => {
                self.entries.write().entry(id.into()).or_insert(body);
            }
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.read().contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl Default for DocumentCache {
    fn default() -> Self {
        Self::new(EvictionPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing_returns_none() {
        let cache = DocumentCache::default();
        assert!(cache.get("doc-1").is_none());
        assert!(!cache.contains("doc-1"));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_insert_then_get() {
        let cache = DocumentCache::default();
        cache.insert("doc-1", "<p>body</p>".to_string());
        assert_eq!(cache.get("doc-1"), Some("<p>body</p>".to_string()));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_first_insert_wins() {
        let cache = DocumentCache::default();
        cache.insert("doc-1", "first".to_string());
        cache.insert("doc-1", "second".to_string());
        assert_eq!(cache.get("doc-1"), Some("first".to_string()));
    }

    #[test]
    fn test_empty_body_is_a_valid_entry() {
        // The cache does not distinguish an empty body from any other body.
        let cache = DocumentCache::default();
        cache.insert("doc-1", String::new());
        assert!(cache.contains("doc-1"));
        assert_eq!(cache.get("doc-1"), Some(String::new()));
    }

    #[test]
    fn test_policy_round_trips_through_serde() {
        let yaml = serde_yaml_ng::to_string(&EvictionPolicy::KeepForever).unwrap();
        let parsed: EvictionPolicy = serde_yaml_ng::from_str(&yaml).unwrap();
        assert_eq!(parsed, EvictionPolicy::KeepForever);
    }
}
