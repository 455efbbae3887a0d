use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use chrono::Utc;
use serde_json::{Map, Value};
use tokio::sync::broadcast;

use super::{ChangeSignal, Collection, StoreAdapter, StoreError};

const CHANGE_CHANNEL_CAPACITY: usize = 64;

/// In-process store backend. Source of truth for tests and demo deployments;
/// a remote binding would implement the same [`StoreAdapter`] trait.
pub struct MemoryStore {
    tables: Mutex<HashMap<Collection, Vec<Value>>>,
    sequence: AtomicU64,
    channels: HashMap<Collection, broadcast::Sender<ChangeSignal>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        let mut tables = HashMap::new();
        let mut channels = HashMap::new();
        for collection in Collection::ALL {
            tables.insert(collection, Vec::new());
            let (sender, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
            channels.insert(collection, sender);
        }

        Self {
            tables: Mutex::new(tables),
            sequence: AtomicU64::new(1),
            channels,
        }
    }

    fn next_id(&self, collection: Collection) -> String {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed);
        format!("{}-{id:06}", collection.id_prefix())
    }

    fn notify(&self, collection: Collection) {
        // Err means no live receivers, which is fine.
        let _ = self.channels[&collection].send(ChangeSignal);
    }

    fn prepare_row(&self, collection: Collection, row: Value) -> Value {
        let mut object = match row {
            Value::Object(map) => map,
            other => {
                // Non-object rows are wrapped rather than rejected; the typed
                // repositories never produce them.
                let mut map = Map::new();
                map.insert("value".to_string(), other);
                map
            }
        };

        if !object.get("id").and_then(Value::as_str).is_some_and(|id| !id.is_empty()) {
            object.insert("id".to_string(), Value::String(self.next_id(collection)));
        }
        object
            .entry("created_at")
            .or_insert_with(|| Value::String(Utc::now().to_rfc3339()));

        Value::Object(object)
    }
}

fn row_id(row: &Value) -> Option<&str> {
    row.get("id").and_then(Value::as_str).filter(|id| !id.is_empty())
}

impl StoreAdapter for MemoryStore {
    fn list(&self, collection: Collection) -> Vec<Value> {
        let tables = self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        tables[&collection].clone()
    }

    fn get_by_id(&self, collection: Collection, id: &str) -> Result<Value, StoreError> {
        let tables = self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        tables[&collection]
            .iter()
            .find(|row| row_id(row) == Some(id))
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.table(),
                id: id.to_string(),
            })
    }

    fn insert(&self, collection: Collection, row: Value) -> Value {
        let row = self.prepare_row(collection, row);
        {
            let mut tables = self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            if let Some(rows) = tables.get_mut(&collection) {
                rows.push(row.clone());
            }
        }
        self.notify(collection);
        row
    }

    fn insert_unique(
        &self,
        collection: Collection,
        field: &'static str,
        value: &str,
        row: Value,
    ) -> Result<Value, StoreError> {
        let row = self.prepare_row(collection, row);
        {
            // Conflict scan and push under one lock hold, so racing callers
            // serialize and exactly one insert wins.
            let mut tables = self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            if let Some(rows) = tables.get_mut(&collection) {
                if let Some(existing) = rows
                    .iter()
                    .find(|row| row.get(field).and_then(Value::as_str) == Some(value))
                {
                    return Err(StoreError::Conflict {
                        collection: collection.table(),
                        field,
                        value: value.to_string(),
                        existing_id: row_id(existing).unwrap_or_default().to_string(),
                    });
                }
                rows.push(row.clone());
            }
        }
        self.notify(collection);
        Ok(row)
    }

    fn update(&self, collection: Collection, id: &str, patch: Value) -> Result<Value, StoreError> {
        let updated = {
            let mut tables = self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            let rows = tables.get_mut(&collection).ok_or_else(|| StoreError::NotFound {
                collection: collection.table(),
                id: id.to_string(),
            })?;
            let row = rows
                .iter_mut()
                .find(|row| row_id(row) == Some(id))
                .ok_or_else(|| StoreError::NotFound {
                    collection: collection.table(),
                    id: id.to_string(),
                })?;

            if let (Value::Object(target), Value::Object(fields)) = (&mut *row, patch) {
                for (key, value) in fields {
                    if key == "id" {
                        continue;
                    }
                    target.insert(key, value);
                }
            }
            row.clone()
        };

        self.notify(collection);
        Ok(updated)
    }

    fn delete(&self, collection: Collection, id: &str) -> Result<(), StoreError> {
        {
            let mut tables = self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            let rows = tables.get_mut(&collection).ok_or_else(|| StoreError::NotFound {
                collection: collection.table(),
                id: id.to_string(),
            })?;
            let before = rows.len();
            rows.retain(|row| row_id(row) != Some(id));
            if rows.len() == before {
                return Err(StoreError::NotFound {
                    collection: collection.table(),
                    id: id.to_string(),
                });
            }
        }
        self.notify(collection);
        Ok(())
    }

    fn watch(&self, collection: Collection) -> broadcast::Receiver<ChangeSignal> {
        self.channels[&collection].subscribe()
    }
}
