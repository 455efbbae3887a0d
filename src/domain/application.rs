use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::annotation;
use super::AvailabilityStatus;

/// Candidate intake payload as submitted from a landing-page form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(alias = "yearsExperience", default)]
    pub years_experience: u32,
    #[serde(alias = "skillTags", default)]
    pub skill_tags: Vec<String>,
    #[serde(alias = "locationText", default)]
    pub location: Option<String>,
    #[serde(alias = "availabilityStatus", default)]
    pub availability: Option<AvailabilityStatus>,
    #[serde(alias = "freeTextMessage", default)]
    pub message: String,
    /// Packed profile annotation from older intake forms; consulted only for
    /// fields the discrete columns leave empty.
    #[serde(default)]
    pub annotation: Option<String>,
    #[serde(alias = "hourlyRateMin", default)]
    pub hourly_rate_min: Option<f32>,
    #[serde(alias = "hourlyRateMax", default)]
    pub hourly_rate_max: Option<f32>,
}

impl ApplicationSubmission {
    /// Fill skills, location, and availability from the packed annotation
    /// where the discrete fields are empty. Runs once on ingestion.
    pub fn into_normalized(mut self) -> Self {
        if let Some(text) = self.annotation.as_deref() {
            let parsed = annotation::parse(text);
            if self.skill_tags.is_empty() {
                self.skill_tags = parsed.skills;
            }
            if self.location.is_none() {
                self.location = parsed.location;
            }
            if self.availability.is_none() {
                self.availability = parsed.availability;
            }
        }
        self
    }
}

/// A stored application, as held in the `applications` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(alias = "yearsExperience", default)]
    pub years_experience: u32,
    #[serde(alias = "skillTags", default)]
    pub skill_tags: Vec<String>,
    #[serde(alias = "locationText", default)]
    pub location: Option<String>,
    #[serde(alias = "availabilityStatus", default)]
    pub availability: Option<AvailabilityStatus>,
    #[serde(alias = "freeTextMessage", default)]
    pub message: String,
    #[serde(default)]
    pub annotation: Option<String>,
    #[serde(alias = "hourlyRateMin", default)]
    pub hourly_rate_min: Option<f32>,
    #[serde(alias = "hourlyRateMax", default)]
    pub hourly_rate_max: Option<f32>,
    /// Set at creation, immutable afterwards.
    #[serde(alias = "submittedDate")]
    pub submitted_at: DateTime<Utc>,
    pub status: ApplicationStatus,
}

impl Application {
    /// Boundary normalization for rows read back from storage, mirroring
    /// [`ApplicationSubmission::into_normalized`].
    pub fn normalize(&mut self) {
        if let Some(text) = self.annotation.as_deref() {
            let parsed = annotation::parse(text);
            if self.skill_tags.is_empty() {
                self.skill_tags = parsed.skills;
            }
            if self.location.is_none() {
                self.location = parsed.location;
            }
            if self.availability.is_none() {
                self.availability = parsed.availability;
            }
        }
    }
}

/// Review pipeline status driven by recruiters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    Reviewed,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Reviewed => "reviewed",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    /// Legal transition table. Approved and rejected are terminal for status
    /// purposes; the row itself can still be deleted.
    pub const fn successors(self) -> &'static [ApplicationStatus] {
        match self {
            ApplicationStatus::Pending => &[
                ApplicationStatus::Reviewed,
                ApplicationStatus::Approved,
                ApplicationStatus::Rejected,
            ],
            ApplicationStatus::Reviewed => {
                &[ApplicationStatus::Approved, ApplicationStatus::Rejected]
            }
            ApplicationStatus::Approved | ApplicationStatus::Rejected => &[],
        }
    }

    pub fn can_transition_to(self, target: ApplicationStatus) -> bool {
        self.successors().contains(&target)
    }
}
