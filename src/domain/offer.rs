use serde::{Deserialize, Serialize};

/// Company-authored job posting awaiting recruiter approval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobOfferSubmission {
    #[serde(default)]
    pub id: String,
    #[serde(alias = "companyId")]
    pub company_id: String,
    pub title: String,
    pub category: String,
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: String,
    pub status: JobOfferStatus,
    #[serde(alias = "recruiterNotes", default)]
    pub recruiter_notes: Option<String>,
}

/// Input shape for a new posting. Title, category, and location are
/// mandatory; the workflow engine rejects blank values before insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobOfferDraft {
    #[serde(alias = "companyId")]
    pub company_id: String,
    pub title: String,
    pub category: String,
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: String,
}

/// Moderation status of a posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobOfferStatus {
    Pending,
    Approved,
    Rejected,
    Published,
}

impl JobOfferStatus {
    pub const fn label(self) -> &'static str {
        match self {
            JobOfferStatus::Pending => "pending",
            JobOfferStatus::Approved => "approved",
            JobOfferStatus::Rejected => "rejected",
            JobOfferStatus::Published => "published",
        }
    }

    pub const fn successors(self) -> &'static [JobOfferStatus] {
        match self {
            JobOfferStatus::Pending => &[JobOfferStatus::Approved, JobOfferStatus::Rejected],
            JobOfferStatus::Approved => &[JobOfferStatus::Published],
            JobOfferStatus::Rejected | JobOfferStatus::Published => &[],
        }
    }

    pub fn can_transition_to(self, target: JobOfferStatus) -> bool {
        self.successors().contains(&target)
    }
}
