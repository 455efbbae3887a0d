//! CSV roster import for directly administered worker profiles.
//!
//! Recruiters can seed the worker pool without an application on file. The
//! roster is a CSV export with the columns `Name`, `Email`, `Phone`,
//! `Skills` (pipe-separated), `Years`, `Location`, `Availability`.

use std::io::Read;

use serde::{Deserialize, Deserializer};

use crate::domain::AvailabilityStatus;

/// Input shape for a directly administered worker profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerSeed {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub skills: Vec<String>,
    pub years_experience: u32,
    pub location: Option<String>,
    pub availability: AvailabilityStatus,
}

#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("failed to read roster csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("roster row {row} is missing a name")]
    MissingName { row: usize },
    #[error("roster row {row} lists no skills")]
    MissingSkills { row: usize },
}

pub fn load_workers<R: Read>(reader: R) -> Result<Vec<WorkerSeed>, RosterError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut seeds = Vec::new();

    for (index, record) in csv_reader.deserialize::<RosterRow>().enumerate() {
        let row = record?;
        // 1-based and past the header, matching what a spreadsheet shows.
        let row_number = index + 2;

        if row.name.is_empty() {
            return Err(RosterError::MissingName { row: row_number });
        }

        let skills: Vec<String> = row
            .skills
            .split('|')
            .map(|skill| skill.trim().to_string())
            .filter(|skill| !skill.is_empty())
            .collect();
        if skills.is_empty() {
            return Err(RosterError::MissingSkills { row: row_number });
        }

        let availability = row
            .availability
            .as_deref()
            .and_then(AvailabilityStatus::parse_label)
            .unwrap_or(AvailabilityStatus::Available);

        seeds.push(WorkerSeed {
            name: row.name,
            email: row.email,
            phone: row.phone,
            skills,
            years_experience: row.years,
            location: row.location,
            availability,
        });
    }

    Ok(seeds)
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Email", default)]
    email: String,
    #[serde(rename = "Phone", default)]
    phone: String,
    #[serde(rename = "Skills", default)]
    skills: String,
    #[serde(rename = "Years", default)]
    years: u32,
    #[serde(rename = "Location", default, deserialize_with = "empty_string_as_none")]
    location: Option<String>,
    #[serde(
        rename = "Availability",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    availability: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
