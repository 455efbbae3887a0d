//! Store adapter: untyped CRUD over the four logical collections plus a
//! row-level change-notification stream per collection.
//!
//! Rows are `serde_json::Value` objects; the typed repositories translate to
//! and from the entity shapes. Change signals carry no payload beyond
//! "something in this collection changed" — subscribers re-fetch.

pub mod memory;
pub mod offline;

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::broadcast;

use crate::config::{StoreBackend, StoreConfig};

pub use memory::MemoryStore;
pub use offline::OfflineStore;

/// Logical collections at the persistence boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Applications,
    Workers,
    CandidateRequests,
    JobOffers,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Applications,
        Collection::Workers,
        Collection::CandidateRequests,
        Collection::JobOffers,
    ];

    pub const fn table(self) -> &'static str {
        match self {
            Collection::Applications => "applications",
            Collection::Workers => "workers",
            Collection::CandidateRequests => "company_candidate_requests",
            Collection::JobOffers => "job_offer_submissions",
        }
    }

    pub(crate) const fn id_prefix(self) -> &'static str {
        match self {
            Collection::Applications => "app",
            Collection::Workers => "wrk",
            Collection::CandidateRequests => "req",
            Collection::JobOffers => "off",
        }
    }
}

/// Unit marker delivered on every mutation of a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeSignal;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("no row with id '{id}' in {collection}")]
    NotFound { collection: &'static str, id: String },
    #[error("{collection} already holds row '{existing_id}' with {field} = '{value}'")]
    Conflict {
        collection: &'static str,
        field: &'static str,
        value: String,
        existing_id: String,
    },
}

/// CRUD plus change notification against the backing store.
///
/// All operations are request/response. `watch` returns immediately; signals
/// are delivered asynchronously on the returned receiver.
pub trait StoreAdapter: Send + Sync {
    fn list(&self, collection: Collection) -> Vec<Value>;
    fn get_by_id(&self, collection: Collection, id: &str) -> Result<Value, StoreError>;
    /// Inserts a row, assigning an id and server-set `created_at` timestamp.
    fn insert(&self, collection: Collection, row: Value) -> Value;
    /// Inserts a row only if no stored row already has `field` equal to
    /// `value`. Check and insert happen as one operation, so two racing
    /// callers cannot both succeed; the loser receives
    /// [`StoreError::Conflict`] naming the existing row.
    fn insert_unique(
        &self,
        collection: Collection,
        field: &'static str,
        value: &str,
        row: Value,
    ) -> Result<Value, StoreError>;
    /// Merges the fields of `patch` into the stored row.
    fn update(&self, collection: Collection, id: &str, patch: Value) -> Result<Value, StoreError>;
    fn delete(&self, collection: Collection, id: &str) -> Result<(), StoreError>;
    fn watch(&self, collection: Collection) -> broadcast::Receiver<ChangeSignal>;
}

/// Select the store backend for the configured mode. Never fails: an
/// unconfigured store degrades to the offline backend so dashboards keep
/// rendering.
pub fn from_config(config: &StoreConfig) -> Arc<dyn StoreAdapter> {
    match config.backend {
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
        StoreBackend::Offline => {
            tracing::warn!("no backing store configured; running in disconnected demo mode");
            Arc::new(OfflineStore::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn offline_config_yields_degraded_store() {
        let store = from_config(&StoreConfig {
            backend: StoreBackend::Offline,
        });
        let row = store.insert(Collection::Workers, json!({ "name": "Jan" }));
        assert!(row
            .get("id")
            .and_then(Value::as_str)
            .is_some_and(|id| id.contains("local")));
        assert!(store.list(Collection::Workers).is_empty());
    }

    #[test]
    fn memory_config_yields_persistent_store() {
        let store = from_config(&StoreConfig {
            backend: StoreBackend::Memory,
        });
        store.insert(Collection::Workers, json!({ "name": "Jan" }));
        assert_eq!(store.list(Collection::Workers).len(), 1);
    }
}
