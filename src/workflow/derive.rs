//! Worker profile derivation from an approved application.

use crate::domain::worker::DEFAULT_RATING;
use crate::domain::{Application, Availability, AvailabilityStatus, Skill, Worker};
use crate::roster::WorkerSeed;

/// Location attached to a profile when the application left it blank.
pub const DEFAULT_LOCATION: &str = "Netherlands";
/// Rate band attached unless the application supplies explicit figures.
pub const DEFAULT_RATE_BAND: (f32, f32) = (35.0, 55.0);

const PROFICIENCY_BASE: u32 = 70;
const PROFICIENCY_PER_YEAR: u32 = 3;
const PROFICIENCY_CAP: u32 = 95;

/// Proficiency for a skill at profile-creation time: capped linear growth
/// over years of experience. Not retroactively recomputed.
pub const fn proficiency_for(years_experience: u32) -> u8 {
    let raw = PROFICIENCY_BASE.saturating_add(PROFICIENCY_PER_YEAR.saturating_mul(years_experience));
    if raw > PROFICIENCY_CAP {
        PROFICIENCY_CAP as u8
    } else {
        raw as u8
    }
}

fn skills_for(tags: &[String], years_experience: u32) -> Vec<Skill> {
    let proficiency = proficiency_for(years_experience);
    tags.iter()
        .map(|name| Skill {
            name: name.clone(),
            proficiency,
        })
        .collect()
}

/// Build the worker profile an approval synthesizes. Pure; the engine adds
/// the persisted link check around it.
pub fn worker_from_application(application: &Application) -> Worker {
    let (rate_min, rate_max) = match (application.hourly_rate_min, application.hourly_rate_max) {
        (Some(min), Some(max)) => (min, max),
        _ => DEFAULT_RATE_BAND,
    };

    Worker {
        id: String::new(),
        name: application.name.clone(),
        email: application.email.clone(),
        phone: application.phone.clone(),
        skills: skills_for(&application.skill_tags, application.years_experience),
        years_experience: application.years_experience,
        location: application
            .location
            .clone()
            .unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
        availability: Availability {
            status: application.availability.unwrap_or(AvailabilityStatus::Available),
            available_from: None,
            notes: String::new(),
        },
        portfolio: Vec::new(),
        rating: DEFAULT_RATING,
        completed_projects: 0,
        hourly_rate_min: Some(rate_min),
        hourly_rate_max: Some(rate_max),
        source_application_id: Some(application.id.clone()),
    }
}

/// Build a directly administered worker profile from a roster seed. No
/// application link is recorded.
pub fn worker_from_seed(seed: &WorkerSeed) -> Worker {
    Worker {
        id: String::new(),
        name: seed.name.clone(),
        email: seed.email.clone(),
        phone: seed.phone.clone(),
        skills: skills_for(&seed.skills, seed.years_experience),
        years_experience: seed.years_experience,
        location: seed
            .location
            .clone()
            .unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
        availability: Availability {
            status: seed.availability,
            available_from: None,
            notes: String::new(),
        },
        portfolio: Vec::new(),
        rating: DEFAULT_RATING,
        completed_projects: 0,
        hourly_rate_min: Some(DEFAULT_RATE_BAND.0),
        hourly_rate_max: Some(DEFAULT_RATE_BAND.1),
        source_application_id: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::domain::ApplicationStatus;

    fn application(years_experience: u32) -> Application {
        Application {
            id: "app-000042".to_string(),
            name: "Marco".to_string(),
            email: "marco@x.nl".to_string(),
            phone: "+31600000000".to_string(),
            years_experience,
            skill_tags: vec!["Bricklaying".to_string()],
            location: None,
            availability: None,
            message: String::new(),
            annotation: None,
            hourly_rate_min: None,
            hourly_rate_max: None,
            submitted_at: Utc::now(),
            status: ApplicationStatus::Approved,
        }
    }

    #[test]
    fn proficiency_grows_linearly_and_caps_at_95() {
        assert_eq!(proficiency_for(0), 70);
        assert_eq!(proficiency_for(8), 94);
        assert_eq!(proficiency_for(10), 95);
        assert_eq!(proficiency_for(40), 95);
        // A hostile years figure saturates instead of overflowing.
        assert_eq!(proficiency_for(u32::MAX), 95);
    }

    #[test]
    fn derived_worker_carries_defaults_and_link() {
        let worker = worker_from_application(&application(8));
        assert_eq!(worker.skills, vec![Skill { name: "Bricklaying".to_string(), proficiency: 94 }]);
        assert_eq!(worker.location, DEFAULT_LOCATION);
        assert_eq!(worker.availability.status, AvailabilityStatus::Available);
        assert_eq!(worker.rating, DEFAULT_RATING);
        assert_eq!(worker.completed_projects, 0);
        assert_eq!(worker.hourly_rate_min, Some(35.0));
        assert_eq!(worker.hourly_rate_max, Some(55.0));
        assert_eq!(worker.source_application_id.as_deref(), Some("app-000042"));
    }

    #[test]
    fn explicit_rate_band_survives_derivation() {
        let mut source = application(3);
        source.hourly_rate_min = Some(42.0);
        source.hourly_rate_max = Some(61.0);
        let worker = worker_from_application(&source);
        assert_eq!(worker.hourly_rate_min, Some(42.0));
        assert_eq!(worker.hourly_rate_max, Some(61.0));
    }

    #[test]
    fn parsed_location_and_availability_survive_derivation() {
        let mut source = application(5);
        source.location = Some("Rotterdam".to_string());
        source.availability = Some(AvailabilityStatus::Busy);
        let worker = worker_from_application(&source);
        assert_eq!(worker.location, "Rotterdam");
        assert_eq!(worker.availability.status, AvailabilityStatus::Busy);
    }
}
