//! Profile store abstraction.
//!
//! Backends only implement raw reads and writes of the serialized profile;
//! decoding and the read-modify-write upsert live in the provided methods so
//! every backend behaves the same way.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use crate::core::error::StoreError;
use crate::storage::profile::UserProfile;

/// Key-value store of user profiles, keyed by chat identity.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Short backend name for logs (e.g. "redis").
    fn name(&self) -> &str;

    /// Raw serialized profile for `identity`, `None` if never written.
    async fn read_raw(&self, identity: &str) -> Result<Option<String>, StoreError>;

    /// Replaces the serialized profile for `identity`.
    async fn write_raw(&self, identity: &str, value: &str) -> Result<(), StoreError>;

    /// Reads and decodes the profile for `identity`.
    ///
    /// A missing record is `Ok(None)`; only backend failures and malformed
    /// values are errors.
    async fn get(&self, identity: &str) -> Result<Option<UserProfile>, StoreError> {
        match self.read_raw(identity).await? {
            Some(raw) => Ok(Some(UserProfile::decode(identity, &raw)?)),
            None => Ok(None),
        }
    }

    /// Sets one profile field, creating the profile if needed.
    ///
    /// This is a plain read-modify-write with no transaction around it. Two
    /// concurrent upserts for the same identity race and the later write
    /// wins, dropping whatever the other one changed. Callers that need
    /// atomicity have to serialize upserts per identity themselves.
    async fn upsert(&self, identity: &str, field: &str, value: &str) -> Result<(), StoreError> {
        let mut profile = self.get(identity).await?.unwrap_or_default();
        profile.set(field, value);
        let encoded = profile.encode()?;
        self.write_raw(identity, &encoded).await
    }
}

/// In-process profile store.
///
/// Used for tests and for running the bot without redis; can be seeded from a
/// `users_map.json` fixture.
#[derive(Debug, Default)]
pub struct MemoryProfileStore {
    entries: RwLock<HashMap<String, String>>,
}

#[derive(Deserialize)]
struct UsersMap {
    users: Map<String, Value>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store from fixture JSON: `{"users": {"<identity>": {...}}}`.
    ///
    /// Identities are case-folded the same way the scripts fold senders.
    pub fn from_users_json(json: &str) -> Result<Self, StoreError> {
        let map: UsersMap = serde_json::from_str(json).map_err(|e| StoreError::Fixture(e.to_string()))?;

        let mut entries = HashMap::with_capacity(map.users.len());
        for (identity, value) in map.users {
            let identity = identity.to_lowercase();
            let profile = UserProfile::from_value(&identity, value)?;
            entries.insert(identity, profile.encode()?);
        }

        log::debug!("Seeded memory profile store with {} users", entries.len());
        Ok(Self {
            entries: RwLock::new(entries),
        })
    }

    /// Seeds the store from a fixture file on disk.
    pub fn from_users_file(path: &Path) -> Result<Self, StoreError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| StoreError::Fixture(format!("{}: {}", path.display(), e)))?;
        Self::from_users_json(&json)
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn read_raw(&self, identity: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.read().await.get(identity).cloned())
    }

    async fn write_raw(&self, identity: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .write()
            .await
            .insert(identity.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_unknown_identity_is_absent() {
        let store = MemoryProfileStore::new();
        assert!(store.get("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upsert_then_get() {
        let store = MemoryProfileStore::new();
        store.upsert("thor", "lastfm", "Thorium").await.unwrap();

        let profile = store.get("thor").await.unwrap().unwrap();
        assert_eq!(profile.lastfm(), Some("Thorium"));
    }

    #[tokio::test]
    async fn test_repeated_upsert_is_idempotent() {
        let store = MemoryProfileStore::new();
        store.upsert("thor", "lastfm", "Thorium").await.unwrap();
        let first = store.read_raw("thor").await.unwrap();

        store.upsert("thor", "lastfm", "Thorium").await.unwrap();
        store.upsert("thor", "lastfm", "Thorium").await.unwrap();

        assert_eq!(store.read_raw("thor").await.unwrap(), first);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_upsert_keeps_other_fields() {
        let store = MemoryProfileStore::new();
        store.write_raw("thor", r#"{"twitter":"thor"}"#).await.unwrap();
        store.upsert("thor", "lastfm", "Thorium").await.unwrap();

        let profile = store.get("thor").await.unwrap().unwrap();
        assert_eq!(profile.get("twitter"), Some("thor"));
        assert_eq!(profile.lastfm(), Some("Thorium"));
    }

    #[tokio::test]
    async fn test_upsert_over_malformed_value_fails() {
        let store = MemoryProfileStore::new();
        store.write_raw("thor", r#""Thorium""#).await.unwrap();

        let err = store.upsert("thor", "lastfm", "Thorium").await.unwrap_err();
        assert!(matches!(err, StoreError::Malformed { .. }));
        // Nothing was overwritten
        assert_eq!(store.read_raw("thor").await.unwrap().as_deref(), Some(r#""Thorium""#));
    }

    #[tokio::test]
    async fn test_from_users_json() {
        let store = MemoryProfileStore::from_users_json(
            r#"{"users": {"Bob": {"lastfm": "Bob"}, "john": {"lastfm": "John"}}}"#,
        )
        .unwrap();

        assert_eq!(store.len().await, 2);
        assert_eq!(store.get("bob").await.unwrap().unwrap().lastfm(), Some("Bob"));
        assert_eq!(store.get("john").await.unwrap().unwrap().lastfm(), Some("John"));
    }

    #[test]
    fn test_from_users_json_rejects_bad_shape() {
        assert!(matches!(
            MemoryProfileStore::from_users_json(r#"{"people": {}}"#),
            Err(StoreError::Fixture(_))
        ));
        assert!(matches!(
            MemoryProfileStore::from_users_json(r#"{"users": {"bob": "Bob"}}"#),
            Err(StoreError::Malformed { .. })
        ));
    }

    #[test]
    fn test_from_users_file_missing() {
        let err = MemoryProfileStore::from_users_file(Path::new("/nonexistent/users_map.json")).unwrap_err();
        assert!(matches!(err, StoreError::Fixture(_)));
    }

    #[tokio::test]
    async fn test_from_users_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users_map.json");
        std::fs::write(&path, r#"{"users": {"thor": {"lastfm": "Thorium", "team": "ops"}}}"#).unwrap();

        let store = MemoryProfileStore::from_users_file(&path).unwrap();
        let profile = store.get("thor").await.unwrap().unwrap();
        assert_eq!(profile.lastfm(), Some("Thorium"));
        assert_eq!(profile.get("team"), Some("ops"));
    }
}
