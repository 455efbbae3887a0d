//! Workflow engine: legal status transitions per entity, duplicate detection
//! at intake, and the approval rule that synthesizes a worker profile.
//!
//! Engine operations are synchronous with respect to the store adapter;
//! retries, if any, belong below this layer. Concurrent approvals of one
//! application are resolved by a link-checked insert that is atomic at the
//! store boundary — the backing store stays the source of truth.

pub mod derive;

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;

use crate::domain::{
    Application, ApplicationStatus, ApplicationSubmission, CompanyCandidateRequest, JobOfferDraft,
    JobOfferStatus, JobOfferSubmission, RequestStatus, Worker,
};
use crate::repository::{
    ApplicationRepository, DuplicateField, OfferRepository, RepositoryError, RequestRepository,
    WorkerRepository,
};
use crate::roster::WorkerSeed;
use crate::store::StoreAdapter;

#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("{entity} transition {from} -> {to} is not permitted")]
    InvalidTransition {
        entity: &'static str,
        from: &'static str,
        to: &'static str,
    },
    #[error("an application with this {0} already exists")]
    DuplicateApplication(DuplicateField),
    #[error("application '{application_id}' already produced worker '{worker_id}'")]
    DuplicateWorkerLink {
        application_id: String,
        worker_id: String,
    },
    #[error("{field} is required")]
    MissingField { field: &'static str },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Result of an application transition, including the derived worker when the
/// target was approval.
#[derive(Debug, Clone)]
pub struct ApplicationTransition {
    pub application: Application,
    pub worker: Option<Worker>,
    /// False when an approval was a retry and the linked worker already
    /// existed.
    pub worker_created: bool,
}

pub struct WorkflowEngine {
    applications: ApplicationRepository,
    workers: WorkerRepository,
    requests: RequestRepository,
    offers: OfferRepository,
}

impl WorkflowEngine {
    pub fn new(store: Arc<dyn StoreAdapter>) -> Self {
        Self {
            applications: ApplicationRepository::new(store.clone()),
            workers: WorkerRepository::new(store.clone()),
            requests: RequestRepository::new(store.clone()),
            offers: OfferRepository::new(store),
        }
    }

    pub fn applications(&self) -> &ApplicationRepository {
        &self.applications
    }

    pub fn workers(&self) -> &WorkerRepository {
        &self.workers
    }

    pub fn requests(&self) -> &RequestRepository {
        &self.requests
    }

    pub fn offers(&self) -> &OfferRepository {
        &self.offers
    }

    /// Candidate intake. Duplicate detection runs before any write; the
    /// stored application starts pending with a server-set submission time.
    pub fn submit_application(
        &self,
        submission: ApplicationSubmission,
    ) -> Result<Application, WorkflowError> {
        let submission = submission.into_normalized();

        if submission.name.trim().is_empty() {
            return Err(WorkflowError::MissingField { field: "name" });
        }
        if submission.skill_tags.is_empty() {
            return Err(WorkflowError::MissingField { field: "skill_tags" });
        }
        if let Some(field) = self
            .applications
            .find_duplicate(&submission.email, &submission.phone)
        {
            return Err(WorkflowError::DuplicateApplication(field));
        }

        let application = Application {
            id: String::new(),
            name: submission.name,
            email: submission.email,
            phone: submission.phone,
            years_experience: submission.years_experience,
            skill_tags: submission.skill_tags,
            location: submission.location,
            availability: submission.availability,
            message: submission.message,
            annotation: submission.annotation,
            hourly_rate_min: submission.hourly_rate_min,
            hourly_rate_max: submission.hourly_rate_max,
            submitted_at: Utc::now(),
            status: ApplicationStatus::Pending,
        };

        let stored = self.applications.insert(&application)?;
        tracing::info!(id = %stored.id, "application submitted");
        Ok(stored)
    }

    /// Drive an application through the review pipeline. Approval synthesizes
    /// a worker profile exactly once; re-approving an already approved
    /// application is an idempotent success that creates nothing.
    pub fn transition_application(
        &self,
        id: &str,
        target: ApplicationStatus,
    ) -> Result<ApplicationTransition, WorkflowError> {
        let application = self.applications.get(id)?;

        if target == ApplicationStatus::Approved
            && application.status == ApplicationStatus::Approved
        {
            return self.finish_approval(application, true);
        }

        if !application.status.can_transition_to(target) {
            return Err(WorkflowError::InvalidTransition {
                entity: "application",
                from: application.status.label(),
                to: target.label(),
            });
        }

        let updated = self.applications.update_status(id, target)?;

        if target == ApplicationStatus::Approved {
            return self.finish_approval(updated, false);
        }

        Ok(ApplicationTransition {
            application: updated,
            worker: None,
            worker_created: false,
        })
    }

    fn finish_approval(
        &self,
        application: Application,
        retry: bool,
    ) -> Result<ApplicationTransition, WorkflowError> {
        match self.derive_worker(&application) {
            Ok(worker) => {
                tracing::info!(
                    application = %application.id,
                    worker = %worker.id,
                    "worker profile derived from approved application"
                );
                Ok(ApplicationTransition {
                    application,
                    worker: Some(worker),
                    worker_created: true,
                })
            }
            Err(WorkflowError::DuplicateWorkerLink { worker_id, .. }) => {
                // Approval retry or race: the link already exists, so the
                // worker it points at is the outcome.
                if retry {
                    tracing::debug!(
                        application = %application.id,
                        worker = %worker_id,
                        "approval retry; linked worker already exists"
                    );
                }
                let worker = self.workers.get(&worker_id)?;
                Ok(ApplicationTransition {
                    application,
                    worker: Some(worker),
                    worker_created: false,
                })
            }
            Err(other) => Err(other),
        }
    }

    /// Synthesize the worker profile for an approved application. The link
    /// check and the insert are one store operation, so racing approvals of
    /// the same application produce at most one profile. Surfaces
    /// [`WorkflowError::DuplicateWorkerLink`] when the application already
    /// produced one; [`Self::transition_application`] treats that as a benign
    /// retry.
    pub fn derive_worker(&self, application: &Application) -> Result<Worker, WorkflowError> {
        let worker = derive::worker_from_application(application);
        match self.workers.insert_linked(&worker, &application.id) {
            Ok(stored) => Ok(stored),
            Err(RepositoryError::Conflict { existing_id, .. }) => {
                Err(WorkflowError::DuplicateWorkerLink {
                    application_id: application.id.clone(),
                    worker_id: existing_id,
                })
            }
            Err(other) => Err(other.into()),
        }
    }

    /// Hard delete, permitted from any application state.
    pub fn delete_application(&self, id: &str) -> Result<(), WorkflowError> {
        Ok(self.applications.delete(id)?)
    }

    /// Direct administrative worker creation (roster seeding).
    pub fn register_worker(&self, seed: &WorkerSeed) -> Result<Worker, WorkflowError> {
        let worker = derive::worker_from_seed(seed);
        let stored = self.workers.insert(&worker)?;
        tracing::info!(id = %stored.id, "worker registered directly");
        Ok(stored)
    }

    pub fn save_worker(&self, worker: &Worker) -> Result<Worker, WorkflowError> {
        Ok(self.workers.save(worker)?)
    }

    pub fn delete_worker(&self, id: &str) -> Result<(), WorkflowError> {
        Ok(self.workers.delete(id)?)
    }

    /// Company action: request a connection with a worker. The worker must
    /// exist; otherwise nothing is persisted.
    pub fn create_candidate_request(
        &self,
        company_id: &str,
        worker_id: &str,
        company_notes: &str,
    ) -> Result<CompanyCandidateRequest, WorkflowError> {
        self.workers.get(worker_id)?;

        let request = CompanyCandidateRequest {
            id: String::new(),
            company_id: company_id.to_string(),
            worker_id: worker_id.to_string(),
            company_notes: company_notes.to_string(),
            status: RequestStatus::Pending,
            recruiter_notes: None,
            sent_to_candidate_at: None,
        };
        Ok(self.requests.insert(&request)?)
    }

    /// Recruiter action on a connection request. Entering `SentToCandidate`
    /// stamps the send time; notes, when given, overwrite the stored ones.
    pub fn transition_request(
        &self,
        id: &str,
        target: RequestStatus,
        recruiter_notes: Option<&str>,
    ) -> Result<CompanyCandidateRequest, WorkflowError> {
        let request = self.requests.get(id)?;

        if !request.status.can_transition_to(target) {
            return Err(WorkflowError::InvalidTransition {
                entity: "candidate_request",
                from: request.status.label(),
                to: target.label(),
            });
        }

        let mut patch = json!({ "status": target.label() });
        if target == RequestStatus::SentToCandidate {
            patch["sent_to_candidate_at"] = json!(Utc::now().to_rfc3339());
        }
        if let Some(notes) = recruiter_notes {
            patch["recruiter_notes"] = json!(notes);
        }

        Ok(self.requests.patch(id, patch)?)
    }

    /// Company action: submit a job posting for moderation. Title, category,
    /// and location are mandatory.
    pub fn submit_job_offer(&self, draft: JobOfferDraft) -> Result<JobOfferSubmission, WorkflowError> {
        for (field, value) in [
            ("title", &draft.title),
            ("category", &draft.category),
            ("location", &draft.location),
        ] {
            if value.trim().is_empty() {
                return Err(WorkflowError::MissingField { field });
            }
        }

        let offer = JobOfferSubmission {
            id: String::new(),
            company_id: draft.company_id,
            title: draft.title,
            category: draft.category,
            location: draft.location,
            description: draft.description,
            requirements: draft.requirements,
            status: JobOfferStatus::Pending,
            recruiter_notes: None,
        };
        Ok(self.offers.insert(&offer)?)
    }

    /// Recruiter moderation of a posting; optional notes overwrite stored
    /// notes.
    pub fn transition_offer(
        &self,
        id: &str,
        target: JobOfferStatus,
        recruiter_notes: Option<&str>,
    ) -> Result<JobOfferSubmission, WorkflowError> {
        let offer = self.offers.get(id)?;

        if !offer.status.can_transition_to(target) {
            return Err(WorkflowError::InvalidTransition {
                entity: "job_offer",
                from: offer.status.label(),
                to: target.label(),
            });
        }

        let mut patch = json!({ "status": target.label() });
        if let Some(notes) = recruiter_notes {
            patch["recruiter_notes"] = json!(notes);
        }

        Ok(self.offers.patch(id, patch)?)
    }
}
