//! Host-owned collaborators: the per-entity value cache and the
//! entity set that fan-out conditions range over.
//!
//! Both are plain data handed to the engine at construction and
//! replaceable wholesale between evaluations. The engine only ever
//! reads them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Latest known field values: entity id -> field key -> raw value.
///
/// An absent entity or key means the field is currently undefined,
/// which only the presence operations treat as a legitimate value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueCache(pub BTreeMap<String, BTreeMap<String, Value>>);

impl ValueCache {
    pub fn new() -> Self {
        ValueCache(BTreeMap::new())
    }

    pub fn get(&self, entity: &str, key: &str) -> Option<&Value> {
        self.0.get(entity).and_then(|fields| fields.get(key))
    }

    pub fn insert(&mut self, entity: impl Into<String>, key: impl Into<String>, value: Value) {
        self.0
            .entry(entity.into())
            .or_default()
            .insert(key.into(), value);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<BTreeMap<String, BTreeMap<String, Value>>> for ValueCache {
    fn from(map: BTreeMap<String, BTreeMap<String, Value>>) -> Self {
        ValueCache(map)
    }
}

/// The universe of entities addressed by fan-out conditions.
///
/// Descriptor content is host-defined and opaque to the engine; only
/// the id set is read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntitySet(pub BTreeMap<String, serde_json::Value>);

impl EntitySet {
    pub fn new() -> Self {
        EntitySet(BTreeMap::new())
    }

    pub fn insert(&mut self, id: impl Into<String>, descriptor: serde_json::Value) {
        self.0.insert(id.into(), descriptor);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains_key(id)
    }

    /// Entity ids in stable (sorted) order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<BTreeMap<String, serde_json::Value>> for EntitySet {
    fn from(map: BTreeMap<String, serde_json::Value>) -> Self {
        EntitySet(map)
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
