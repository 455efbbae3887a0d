use std::sync::Arc;

use serde_json::Value;

use super::{decode_row, decode_rows, encode, RepositoryError};
use crate::domain::JobOfferSubmission;
use crate::store::{Collection, StoreAdapter};

#[derive(Clone)]
pub struct OfferRepository {
    store: Arc<dyn StoreAdapter>,
}

impl OfferRepository {
    const COLLECTION: Collection = Collection::JobOffers;

    pub fn new(store: Arc<dyn StoreAdapter>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Vec<JobOfferSubmission> {
        decode_rows(Self::COLLECTION, self.store.list(Self::COLLECTION))
    }

    pub fn get(&self, id: &str) -> Result<JobOfferSubmission, RepositoryError> {
        decode_row(Self::COLLECTION, self.store.get_by_id(Self::COLLECTION, id)?)
    }

    pub fn insert(&self, offer: &JobOfferSubmission) -> Result<JobOfferSubmission, RepositoryError> {
        let row = encode(Self::COLLECTION, offer)?;
        decode_row(Self::COLLECTION, self.store.insert(Self::COLLECTION, row))
    }

    pub fn patch(&self, id: &str, patch: Value) -> Result<JobOfferSubmission, RepositoryError> {
        decode_row(Self::COLLECTION, self.store.update(Self::COLLECTION, id, patch)?)
    }

    pub fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        Ok(self.store.delete(Self::COLLECTION, id)?)
    }
}
