//! Multi-predicate worker search used by the company and recruiter
//! dashboards.
//!
//! [`filter_workers`] is a pure function and safe to re-run on every
//! keystroke. Predicates AND across categories; the skill-set predicate is OR
//! within itself. An empty string, zero, or empty set means "no constraint",
//! never "match nothing".

use serde::{Deserialize, Serialize};

use crate::domain::{AvailabilityStatus, Worker};

/// Independently optional predicates over the worker collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkerFilter {
    /// Free text matched against name, location, or any skill name
    /// (case-insensitive substring).
    #[serde(default)]
    pub query: String,
    /// Profession / skill-name filter (case-insensitive substring on skill
    /// names).
    #[serde(default)]
    pub profession: String,
    #[serde(default)]
    pub availability: Option<AvailabilityStatus>,
    /// Minimum rating threshold; 0.0 is unconstrained.
    #[serde(default)]
    pub min_rating: f32,
    /// Worker must have at least one of these skills (OR semantics).
    #[serde(default)]
    pub skills: Vec<String>,
    /// Inclusive minimum years of experience; 0 is unconstrained.
    #[serde(default)]
    pub min_experience: u32,
    /// Inclusive maximum years of experience.
    #[serde(default)]
    pub max_experience: Option<u32>,
    /// Location filter (case-insensitive substring).
    #[serde(default)]
    pub location: String,
}

/// Explicit output ordering for filter results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    RatingDesc,
    ExperienceDesc,
    CompletedProjectsDesc,
    NameAsc,
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn matches(worker: &Worker, filter: &WorkerFilter) -> bool {
    let query = filter.query.trim();
    if !query.is_empty() {
        let hit = contains_ci(&worker.name, query)
            || contains_ci(&worker.location, query)
            || worker.skill_names().any(|skill| contains_ci(skill, query));
        if !hit {
            return false;
        }
    }

    let profession = filter.profession.trim();
    if !profession.is_empty()
        && !worker
            .skill_names()
            .any(|skill| contains_ci(skill, profession))
    {
        return false;
    }

    if let Some(status) = filter.availability {
        if worker.availability.status != status {
            return false;
        }
    }

    if worker.rating < filter.min_rating {
        return false;
    }

    if !filter.skills.is_empty() && !filter.skills.iter().any(|skill| worker.has_skill(skill)) {
        return false;
    }

    if worker.years_experience < filter.min_experience {
        return false;
    }
    if let Some(max) = filter.max_experience {
        if worker.years_experience > max {
            return false;
        }
    }

    let location = filter.location.trim();
    if !location.is_empty() && !contains_ci(&worker.location, location) {
        return false;
    }

    true
}

fn sort_workers(workers: &mut [Worker], sort: SortKey) {
    match sort {
        SortKey::RatingDesc => workers.sort_by(|a, b| {
            b.rating
                .total_cmp(&a.rating)
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        }),
        SortKey::ExperienceDesc => workers.sort_by(|a, b| {
            b.years_experience
                .cmp(&a.years_experience)
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        }),
        SortKey::CompletedProjectsDesc => workers.sort_by(|a, b| {
            b.completed_projects
                .cmp(&a.completed_projects)
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        }),
        SortKey::NameAsc => {
            workers.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        }
    }
}

/// Filter and order the worker collection. Pure: the input is untouched and
/// repeated calls with the same arguments return the same result.
pub fn filter_workers(workers: &[Worker], filter: &WorkerFilter, sort: SortKey) -> Vec<Worker> {
    let mut matched: Vec<Worker> = workers
        .iter()
        .filter(|worker| matches(worker, filter))
        .cloned()
        .collect();
    sort_workers(&mut matched, sort);
    matched
}
