use std::sync::Arc;

use serde_json::Value;

use super::{decode_row, decode_rows, encode, RepositoryError};
use crate::domain::CompanyCandidateRequest;
use crate::store::{Collection, StoreAdapter};

#[derive(Clone)]
pub struct RequestRepository {
    store: Arc<dyn StoreAdapter>,
}

impl RequestRepository {
    const COLLECTION: Collection = Collection::CandidateRequests;

    pub fn new(store: Arc<dyn StoreAdapter>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Vec<CompanyCandidateRequest> {
        decode_rows(Self::COLLECTION, self.store.list(Self::COLLECTION))
    }

    pub fn get(&self, id: &str) -> Result<CompanyCandidateRequest, RepositoryError> {
        decode_row(Self::COLLECTION, self.store.get_by_id(Self::COLLECTION, id)?)
    }

    pub fn insert(
        &self,
        request: &CompanyCandidateRequest,
    ) -> Result<CompanyCandidateRequest, RepositoryError> {
        let row = encode(Self::COLLECTION, request)?;
        decode_row(Self::COLLECTION, self.store.insert(Self::COLLECTION, row))
    }

    pub fn patch(&self, id: &str, patch: Value) -> Result<CompanyCandidateRequest, RepositoryError> {
        decode_row(Self::COLLECTION, self.store.update(Self::COLLECTION, id, patch)?)
    }

    pub fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        Ok(self.store.delete(Self::COLLECTION, id)?)
    }
}
