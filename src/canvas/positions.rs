//! Persisted per-artifact position overrides.
//!
//! All overrides live under a single key as a JSON object mapping artifact id
//! to `{ "x": .., "y": .. }`. Reads never fail: a missing, unreadable or
//! malformed value is treated as an empty mapping. Writes merge into whatever
//! is already stored so one artifact's save never clobbers another's.

use std::collections::BTreeMap;

use bevy::math::Vec2;
use serde::{Deserialize, Serialize};

use crate::storage::{KeyValueStore, StorageError};

/// Default storage key for the override mapping.
pub const DEFAULT_POSITIONS_KEY: &str = "workbench-positions";

/// Wire form of a persisted position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StoredPosition {
    pub x: f32,
    pub y: f32,
}

impl From<Vec2> for StoredPosition {
    fn from(v: Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<StoredPosition> for Vec2 {
    fn from(p: StoredPosition) -> Self {
        Vec2::new(p.x, p.y)
    }
}

/// Position overrides on top of a key-value backend.
#[derive(Debug)]
pub struct PositionStore<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> PositionStore<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// The persisted override for `id`, if any.
    pub fn load(&self, id: &str) -> Option<Vec2> {
        self.read_all().get(id).copied().map(Vec2::from)
    }

    /// The override for `id` when present, else `computed`.
    pub fn resolve(&self, id: &str, computed: Vec2) -> Vec2 {
        self.load(id).unwrap_or(computed)
    }

    /// Persist an override for `id`, keeping every other stored override.
    ///
    /// Failures are logged and swallowed; the in-session position still applies.
    pub fn save(&mut self, id: &str, position: Vec2) {
        if !position.is_finite() {
            tracing::warn!(id, ?position, "Refusing to persist non-finite position");
            return;
        }
        let mut all = self.read_all();
        all.insert(id.to_string(), position.into());
        if let Err(e) = self.write_all(&all) {
            tracing::warn!(id, error = %e, "Failed to persist artifact position");
        }
    }

    /// Delete the override for `id`. Returns whether one existed.
    pub fn remove(&mut self, id: &str) -> Result<bool, StorageError> {
        let mut all = self.read_all();
        if all.remove(id).is_none() {
            return Ok(false);
        }
        self.write_all(&all)?;
        Ok(true)
    }

    /// Delete every override.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.store.remove(&self.key)
    }

    /// Every stored override, sorted by id.
    pub fn all(&self) -> BTreeMap<String, Vec2> {
        self.read_all()
            .into_iter()
            .map(|(id, p)| (id, p.into()))
            .collect()
    }

    /// Backend access, mainly for inspection.
    pub fn backend(&self) -> &S {
        &self.store
    }

    fn read_all(&self) -> BTreeMap<String, StoredPosition> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return BTreeMap::new(),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Position storage unreadable, treating as empty");
                return BTreeMap::new();
            }
        };

        let value: serde_json::Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Malformed position storage, treating as empty");
                return BTreeMap::new();
            }
        };

        let serde_json::Value::Object(entries) = value else {
            tracing::warn!(key = %self.key, "Position storage is not an object, treating as empty");
            return BTreeMap::new();
        };

        entries
            .into_iter()
            .filter_map(|(id, entry)| match serde_json::from_value::<StoredPosition>(entry) {
                Ok(p) if p.x.is_finite() && p.y.is_finite() => Some((id, p)),
                _ => {
                    tracing::debug!(id = %id, "Skipping malformed stored position");
                    None
                }
            })
            .collect()
    }

    fn write_all(&mut self, all: &BTreeMap<String, StoredPosition>) -> Result<(), StorageError> {
        // Serializing finite f32 pairs into a map cannot fail.
        let raw = serde_json::to_string(all).unwrap_or_else(|_| "{}".to_string());
        self.store.set(&self.key, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn store() -> PositionStore<MemoryStore> {
        PositionStore::new(MemoryStore::new(), DEFAULT_POSITIONS_KEY)
    }

    fn store_with(raw: &str) -> PositionStore<MemoryStore> {
        let mut backend = MemoryStore::new();
        backend.set(DEFAULT_POSITIONS_KEY, raw).unwrap();
        PositionStore::new(backend, DEFAULT_POSITIONS_KEY)
    }

    #[test]
    fn test_save_then_load() {
        let mut positions = store();
        positions.save("X", Vec2::new(10.0, 20.0));
        assert_eq!(positions.load("X"), Some(Vec2::new(10.0, 20.0)));
    }

    #[test]
    fn test_second_save_keeps_first() {
        let mut positions = store();
        positions.save("X", Vec2::new(10.0, 20.0));
        positions.save("Y", Vec2::new(-5.0, 7.5));
        assert_eq!(positions.load("X"), Some(Vec2::new(10.0, 20.0)));
        assert_eq!(positions.load("Y"), Some(Vec2::new(-5.0, 7.5)));
    }

    #[test]
    fn test_resolve_prefers_override() {
        let mut positions = store();
        let computed = Vec2::new(1.0, 2.0);
        assert_eq!(positions.resolve("X", computed), computed);
        positions.save("X", Vec2::new(3.0, 4.0));
        assert_eq!(positions.resolve("X", computed), Vec2::new(3.0, 4.0));
    }

    #[test]
    fn test_wire_format() {
        let mut positions = store();
        positions.save("mock-1", Vec2::new(10.0, 20.0));
        let raw = positions.backend().get(DEFAULT_POSITIONS_KEY).unwrap().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed, serde_json::json!({"mock-1": {"x": 10.0, "y": 20.0}}));
    }

    #[test]
    fn test_malformed_storage_reads_empty() {
        assert_eq!(store_with("not json").load("X"), None);
        assert_eq!(store_with("[1, 2, 3]").load("X"), None);
        assert!(store_with("null").all().is_empty());
    }

    #[test]
    fn test_malformed_entry_skipped() {
        let positions = store_with(r#"{"A": {"x": 1, "y": 2}, "B": "oops", "C": {"x": 3}}"#);
        assert_eq!(positions.load("A"), Some(Vec2::new(1.0, 2.0)));
        assert_eq!(positions.load("B"), None);
        assert_eq!(positions.load("C"), None);
    }

    #[test]
    fn test_save_over_corrupt_storage_recovers() {
        let mut positions = store_with("{{{");
        positions.save("X", Vec2::new(1.0, 1.0));
        assert_eq!(positions.load("X"), Some(Vec2::new(1.0, 1.0)));
    }

    #[test]
    fn test_non_finite_not_persisted() {
        let mut positions = store();
        positions.save("X", Vec2::new(f32::NAN, 0.0));
        assert_eq!(positions.load("X"), None);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut positions = store();
        positions.save("X", Vec2::new(1.0, 1.0));
        positions.save("Y", Vec2::new(2.0, 2.0));

        assert!(positions.remove("X").unwrap());
        assert!(!positions.remove("X").unwrap());
        assert_eq!(positions.load("Y"), Some(Vec2::new(2.0, 2.0)));

        positions.clear().unwrap();
        assert!(positions.all().is_empty());
    }
}
