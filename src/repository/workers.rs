use std::sync::Arc;

use super::{decode_row, decode_rows, encode, RepositoryError};
use crate::domain::Worker;
use crate::store::{Collection, StoreAdapter};

#[derive(Clone)]
pub struct WorkerRepository {
    store: Arc<dyn StoreAdapter>,
}

impl WorkerRepository {
    const COLLECTION: Collection = Collection::Workers;

    pub fn new(store: Arc<dyn StoreAdapter>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Vec<Worker> {
        decode_rows(Self::COLLECTION, self.store.list(Self::COLLECTION))
    }

    pub fn get(&self, id: &str) -> Result<Worker, RepositoryError> {
        decode_row(Self::COLLECTION, self.store.get_by_id(Self::COLLECTION, id)?)
    }

    pub fn insert(&self, worker: &Worker) -> Result<Worker, RepositoryError> {
        let row = encode(Self::COLLECTION, worker)?;
        decode_row(Self::COLLECTION, self.store.insert(Self::COLLECTION, row))
    }

    /// Full-row save for recruiter edits.
    pub fn save(&self, worker: &Worker) -> Result<Worker, RepositoryError> {
        let row = encode(Self::COLLECTION, worker)?;
        decode_row(
            Self::COLLECTION,
            self.store.update(Self::COLLECTION, &worker.id, row)?,
        )
    }

    pub fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        Ok(self.store.delete(Self::COLLECTION, id)?)
    }

    /// Insert enforcing at most one worker per source application. The link
    /// check and the write are a single store operation, so two racing
    /// inserts for the same application resolve to one stored worker and one
    /// [`RepositoryError::Conflict`] naming it.
    pub fn insert_linked(
        &self,
        worker: &Worker,
        application_id: &str,
    ) -> Result<Worker, RepositoryError> {
        let row = encode(Self::COLLECTION, worker)?;
        decode_row(
            Self::COLLECTION,
            self.store
                .insert_unique(Self::COLLECTION, "source_application_id", application_id, row)?,
        )
    }
}
