use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A company's request to be connected with a specific worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyCandidateRequest {
    #[serde(default)]
    pub id: String,
    #[serde(alias = "companyId")]
    pub company_id: String,
    #[serde(alias = "workerId")]
    pub worker_id: String,
    #[serde(alias = "companyNotes", default)]
    pub company_notes: String,
    pub status: RequestStatus,
    #[serde(alias = "recruiterNotes", default)]
    pub recruiter_notes: Option<String>,
    #[serde(alias = "sentToCandidateAt", default)]
    pub sent_to_candidate_at: Option<DateTime<Utc>>,
}

/// Connection-request status. Recruiters drive the pipeline up to
/// `SentToCandidate`; the candidate-side outcome states are reserved in the
/// table so future callers cannot skip them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    SentToCandidate,
    Accepted,
    Declined,
}

impl RequestStatus {
    pub const fn label(self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::SentToCandidate => "sent_to_candidate",
            RequestStatus::Accepted => "accepted",
            RequestStatus::Declined => "declined",
        }
    }

    pub const fn successors(self) -> &'static [RequestStatus] {
        match self {
            RequestStatus::Pending => &[RequestStatus::SentToCandidate],
            RequestStatus::SentToCandidate => {
                &[RequestStatus::Accepted, RequestStatus::Declined]
            }
            RequestStatus::Accepted | RequestStatus::Declined => &[],
        }
    }

    pub fn can_transition_to(self, target: RequestStatus) -> bool {
        self.successors().contains(&target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recruiter_path_stops_at_sent_to_candidate() {
        use RequestStatus::*;
        assert!(Pending.can_transition_to(SentToCandidate));
        assert!(!Pending.can_transition_to(Accepted));
        assert!(!Pending.can_transition_to(Declined));
    }

    #[test]
    fn candidate_outcomes_are_reserved_but_terminal() {
        use RequestStatus::*;
        assert!(SentToCandidate.can_transition_to(Accepted));
        assert!(SentToCandidate.can_transition_to(Declined));
        assert!(Accepted.successors().is_empty());
        assert!(Declined.successors().is_empty());
    }

    #[test]
    fn status_serializes_as_snake_case() {
        let json = serde_json::to_value(RequestStatus::SentToCandidate).expect("serializes");
        assert_eq!(json, serde_json::json!("sent_to_candidate"));
    }
}
