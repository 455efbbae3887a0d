use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use serde_json::{Map, Value};
use tokio::sync::broadcast;

use super::{ChangeSignal, Collection, StoreAdapter, StoreError};

/// Degraded backend used when no backing store is configured or reachable.
///
/// Reads return empty collections, writes return locally synthesized rows
/// that are never persisted, and nothing is fatal: dashboards keep rendering
/// in a disconnected demo mode. Every operation is logged at debug level so
/// the degradation is visible without being noisy.
pub struct OfflineStore {
    sequence: AtomicU64,
    channels: HashMap<Collection, broadcast::Sender<ChangeSignal>>,
}

impl Default for OfflineStore {
    fn default() -> Self {
        Self::new()
    }
}

impl OfflineStore {
    pub fn new() -> Self {
        let mut channels = HashMap::new();
        for collection in Collection::ALL {
            // Senders are held so `watch` can hand out receivers, but no
            // signal is ever sent: nothing persists, so there is nothing to
            // re-fetch.
            let (sender, _) = broadcast::channel(1);
            channels.insert(collection, sender);
        }

        Self {
            sequence: AtomicU64::new(1),
            channels,
        }
    }
}

impl StoreAdapter for OfflineStore {
    fn list(&self, collection: Collection) -> Vec<Value> {
        tracing::debug!(collection = collection.table(), "offline store: empty read");
        Vec::new()
    }

    fn get_by_id(&self, collection: Collection, id: &str) -> Result<Value, StoreError> {
        tracing::debug!(collection = collection.table(), id, "offline store: lookup miss");
        Err(StoreError::NotFound {
            collection: collection.table(),
            id: id.to_string(),
        })
    }

    fn insert(&self, collection: Collection, row: Value) -> Value {
        let mut object = match row {
            Value::Object(map) => map,
            other => {
                let mut map = Map::new();
                map.insert("value".to_string(), other);
                map
            }
        };

        let id = self.sequence.fetch_add(1, Ordering::Relaxed);
        object.insert(
            "id".to_string(),
            Value::String(format!("{}-local-{id:06}", collection.id_prefix())),
        );
        object
            .entry("created_at")
            .or_insert_with(|| Value::String(Utc::now().to_rfc3339()));

        tracing::debug!(
            collection = collection.table(),
            "offline store: write synthesized locally, not persisted"
        );
        Value::Object(object)
    }

    fn insert_unique(
        &self,
        collection: Collection,
        _field: &'static str,
        _value: &str,
        row: Value,
    ) -> Result<Value, StoreError> {
        // Nothing persists, so there is nothing to conflict with.
        Ok(self.insert(collection, row))
    }

    fn update(&self, collection: Collection, id: &str, patch: Value) -> Result<Value, StoreError> {
        tracing::debug!(
            collection = collection.table(),
            id,
            "offline store: update synthesized locally, not persisted"
        );
        let mut object = match patch {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        object.insert("id".to_string(), Value::String(id.to_string()));
        Ok(Value::Object(object))
    }

    fn delete(&self, collection: Collection, id: &str) -> Result<(), StoreError> {
        tracing::debug!(
            collection = collection.table(),
            id,
            "offline store: delete is a no-op"
        );
        Ok(())
    }

    fn watch(&self, collection: Collection) -> broadcast::Receiver<ChangeSignal> {
        self.channels[&collection].subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_are_empty_and_writes_synthesize() {
        let store = OfflineStore::new();
        assert!(store.list(Collection::Workers).is_empty());

        let row = store.insert(Collection::Applications, json!({ "name": "Marco" }));
        let id = row.get("id").and_then(Value::as_str).expect("id synthesized");
        assert!(id.starts_with("app-local-"));

        // The synthesized row was never persisted.
        assert!(store.list(Collection::Applications).is_empty());
        assert!(store.get_by_id(Collection::Applications, id).is_err());
    }

    #[test]
    fn delete_never_fails_offline() {
        let store = OfflineStore::new();
        assert!(store.delete(Collection::JobOffers, "off-000001").is_ok());
    }
}
