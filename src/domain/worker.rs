use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::AvailabilityStatus;

pub const DEFAULT_RATING: f32 = 4.0;

/// A single skill on a worker profile with its derived proficiency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    /// Proficiency on a 0..=100 scale, derived from years of experience at
    /// profile creation and not retroactively recomputed.
    #[serde(alias = "proficiencyLevel")]
    pub proficiency: u8,
}

/// Availability block shown on worker cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    pub status: AvailabilityStatus,
    #[serde(alias = "availableFromDate", default)]
    pub available_from: Option<NaiveDate>,
    #[serde(default)]
    pub notes: String,
}

impl Default for Availability {
    fn default() -> Self {
        Self {
            status: AvailabilityStatus::Available,
            available_from: None,
            notes: String::new(),
        }
    }
}

/// Prior-work item on a worker portfolio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioItem {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(alias = "imageRef", default)]
    pub image_ref: String,
    #[serde(alias = "completionDate")]
    pub completed_on: NaiveDate,
    #[serde(default)]
    pub client: String,
    #[serde(alias = "skillTags", default)]
    pub skill_tags: Vec<String>,
}

/// An approved, hireable candidate profile visible to companies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worker {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(alias = "yearsExperience", default)]
    pub years_experience: u32,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub availability: Availability,
    #[serde(default)]
    pub portfolio: Vec<PortfolioItem>,
    #[serde(default = "default_rating")]
    pub rating: f32,
    #[serde(alias = "completedProjects", default)]
    pub completed_projects: u32,
    #[serde(alias = "hourlyRateMin", default)]
    pub hourly_rate_min: Option<f32>,
    #[serde(alias = "hourlyRateMax", default)]
    pub hourly_rate_max: Option<f32>,
    /// One-way link to the application this profile was derived from. Absent
    /// for directly seeded workers.
    #[serde(alias = "sourceApplicationId", default)]
    pub source_application_id: Option<String>,
}

fn default_rating() -> f32 {
    DEFAULT_RATING
}

impl Worker {
    pub fn skill_names(&self) -> impl Iterator<Item = &str> {
        self.skills.iter().map(|skill| skill.name.as_str())
    }

    pub fn has_skill(&self, name: &str) -> bool {
        self.skill_names()
            .any(|skill| skill.eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_optional_columns_fall_back_to_defaults() {
        let row = serde_json::json!({
            "id": "wrk-000001",
            "name": "Jan",
            "email": "jan@x.nl",
            "phone": "+31622222222",
        });
        let worker: Worker = serde_json::from_value(row).expect("row decodes");
        assert_eq!(worker.rating, DEFAULT_RATING);
        assert_eq!(worker.completed_projects, 0);
        assert_eq!(worker.availability.status, AvailabilityStatus::Available);
        assert!(worker.source_application_id.is_none());
    }

    #[test]
    fn camel_case_skill_rows_decode() {
        let row = serde_json::json!({
            "id": "wrk-000002",
            "name": "Pieter",
            "email": "pieter@x.nl",
            "phone": "+31633333333",
            "skills": [{ "name": "Electrician", "proficiencyLevel": 82 }],
            "yearsExperience": 4,
            "completedProjects": 12,
            "sourceApplicationId": "app-000009",
        });
        let worker: Worker = serde_json::from_value(row).expect("row decodes");
        assert_eq!(worker.skills[0].proficiency, 82);
        assert_eq!(worker.completed_projects, 12);
        assert_eq!(worker.source_application_id.as_deref(), Some("app-000009"));
        assert!(worker.has_skill("electrician"));
        assert!(!worker.has_skill("Plumber"));
    }
}
