//! Entities of the recruitment pipeline and their status vocabularies.
//!
//! Storage rows may arrive in camelCase or snake_case; every field carries a
//! serde alias so either casing normalizes on ingestion, while writes always
//! emit snake_case. Older intake forms pack skills, location, and
//! availability into one free-text annotation; that is parsed exactly once at
//! the boundary (see [`annotation`]) so nothing downstream re-parses text.

pub mod annotation;
pub mod application;
pub mod offer;
pub mod request;
pub mod worker;

use serde::{Deserialize, Serialize};

pub use application::{Application, ApplicationStatus, ApplicationSubmission};
pub use offer::{JobOfferDraft, JobOfferStatus, JobOfferSubmission};
pub use request::{CompanyCandidateRequest, RequestStatus};
pub use worker::{Availability, PortfolioItem, Skill, Worker};

/// Declared availability of a candidate or worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AvailabilityStatus {
    Available,
    PartiallyAvailable,
    Busy,
}

impl AvailabilityStatus {
    pub const fn label(self) -> &'static str {
        match self {
            AvailabilityStatus::Available => "available",
            AvailabilityStatus::PartiallyAvailable => "partially-available",
            AvailabilityStatus::Busy => "busy",
        }
    }

    /// Lenient parse used for annotation text and roster imports.
    pub fn parse_label(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "available" => Some(Self::Available),
            "partially-available" | "partially available" | "partial" => {
                Some(Self::PartiallyAvailable)
            }
            "busy" => Some(Self::Busy),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn availability_labels_round_trip_through_parse() {
        for status in [
            AvailabilityStatus::Available,
            AvailabilityStatus::PartiallyAvailable,
            AvailabilityStatus::Busy,
        ] {
            assert_eq!(AvailabilityStatus::parse_label(status.label()), Some(status));
        }
    }

    #[test]
    fn parse_label_accepts_spaced_variant() {
        assert_eq!(
            AvailabilityStatus::parse_label("Partially Available"),
            Some(AvailabilityStatus::PartiallyAvailable)
        );
        assert_eq!(AvailabilityStatus::parse_label("retired"), None);
    }
}
