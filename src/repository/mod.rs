//! Typed CRUD over the store adapter, one repository per collection.
//!
//! Repositories translate between storage rows and entity shapes. Decoding is
//! lenient on reads: a row that fails to decode is skipped with a warning so
//! one malformed row cannot blank an entire dashboard.

mod applications;
mod offers;
mod requests;
mod workers;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::store::{Collection, StoreError};

pub use applications::{ApplicationRepository, DuplicateField};
pub use offers::OfferRepository;
pub use requests::RequestRepository;
pub use workers::WorkerRepository;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("no {collection} record with id '{id}'")]
    NotFound { collection: &'static str, id: String },
    #[error("malformed {collection} row: {source}")]
    Malformed {
        collection: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("{collection} already holds record '{existing_id}' with this {field}")]
    Conflict {
        collection: &'static str,
        field: &'static str,
        existing_id: String,
    },
}

impl From<StoreError> for RepositoryError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound { collection, id } => Self::NotFound { collection, id },
            StoreError::Conflict {
                collection,
                field,
                existing_id,
                ..
            } => Self::Conflict {
                collection,
                field,
                existing_id,
            },
        }
    }
}

fn decode_rows<T: DeserializeOwned>(collection: Collection, rows: Vec<Value>) -> Vec<T> {
    rows.into_iter()
        .filter_map(|row| match serde_json::from_value(row) {
            Ok(entity) => Some(entity),
            Err(error) => {
                tracing::warn!(
                    collection = collection.table(),
                    %error,
                    "skipping row that does not decode"
                );
                None
            }
        })
        .collect()
}

fn decode_row<T: DeserializeOwned>(collection: Collection, row: Value) -> Result<T, RepositoryError> {
    serde_json::from_value(row).map_err(|source| RepositoryError::Malformed {
        collection: collection.table(),
        source,
    })
}

fn encode<T: Serialize>(collection: Collection, entity: &T) -> Result<Value, RepositoryError> {
    serde_json::to_value(entity).map_err(|source| RepositoryError::Malformed {
        collection: collection.table(),
        source,
    })
}
