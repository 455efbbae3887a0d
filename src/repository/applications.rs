use std::fmt;
use std::sync::Arc;

use serde_json::json;

use super::{decode_row, decode_rows, encode, RepositoryError};
use crate::domain::{Application, ApplicationStatus};
use crate::store::{Collection, StoreAdapter};

/// Which unique attribute an incoming submission collided on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateField {
    Email,
    Phone,
}

impl fmt::Display for DuplicateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DuplicateField::Email => write!(f, "email"),
            DuplicateField::Phone => write!(f, "phone"),
        }
    }
}

fn canonical_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

fn canonical_phone(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect()
}

#[derive(Clone)]
pub struct ApplicationRepository {
    store: Arc<dyn StoreAdapter>,
}

impl ApplicationRepository {
    const COLLECTION: Collection = Collection::Applications;

    pub fn new(store: Arc<dyn StoreAdapter>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Vec<Application> {
        let mut applications: Vec<Application> =
            decode_rows(Self::COLLECTION, self.store.list(Self::COLLECTION));
        for application in &mut applications {
            application.normalize();
        }
        applications
    }

    pub fn get(&self, id: &str) -> Result<Application, RepositoryError> {
        let row = self.store.get_by_id(Self::COLLECTION, id)?;
        let mut application: Application = decode_row(Self::COLLECTION, row)?;
        application.normalize();
        Ok(application)
    }

    pub fn insert(&self, application: &Application) -> Result<Application, RepositoryError> {
        let row = encode(Self::COLLECTION, application)?;
        decode_row(Self::COLLECTION, self.store.insert(Self::COLLECTION, row))
    }

    pub fn update_status(
        &self,
        id: &str,
        status: ApplicationStatus,
    ) -> Result<Application, RepositoryError> {
        let patch = json!({ "status": status.label() });
        let row = self.store.update(Self::COLLECTION, id, patch)?;
        let mut application: Application = decode_row(Self::COLLECTION, row)?;
        application.normalize();
        Ok(application)
    }

    pub fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        Ok(self.store.delete(Self::COLLECTION, id)?)
    }

    /// Duplicate detection run at submission, before any write. Email matches
    /// case-insensitively; phone matching ignores spacing and dashes.
    pub fn find_duplicate(&self, email: &str, phone: &str) -> Option<DuplicateField> {
        let email = canonical_email(email);
        let phone = canonical_phone(phone);

        for existing in self.list() {
            if canonical_email(&existing.email) == email {
                return Some(DuplicateField::Email);
            }
            if canonical_phone(&existing.phone) == phone {
                return Some(DuplicateField::Phone);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_canonicalization_strips_formatting() {
        assert_eq!(canonical_phone("+31 6 00-00(00)00"), "+31600000000");
    }

    #[test]
    fn email_canonicalization_lowercases() {
        assert_eq!(canonical_email("  Marco@X.NL "), "marco@x.nl");
    }
}
