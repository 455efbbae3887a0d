//! Recruitment pipeline and dashboard synchronization core for a staffing
//! agency platform.
//!
//! The crate is a library consumed by UI code. It covers the four pipeline
//! entities (applications, workers, company candidate requests, job offer
//! submissions), the recruiter workflows that move a candidate from
//! submission to a hireable worker profile, the multi-criteria worker search,
//! and the change-notification layer that keeps open dashboards consistent
//! with the backing store. Presentation, authentication, and file handling
//! live outside this crate.

pub mod config;
pub mod domain;
pub mod repository;
pub mod roster;
pub mod search;
pub mod store;
pub mod sync;
pub mod telemetry;
pub mod workflow;

pub use domain::{
    Application, ApplicationStatus, ApplicationSubmission, Availability, AvailabilityStatus,
    CompanyCandidateRequest, JobOfferDraft, JobOfferStatus, JobOfferSubmission, PortfolioItem,
    RequestStatus, Skill, Worker,
};
pub use repository::{DuplicateField, RepositoryError};
pub use search::{filter_workers, SortKey, WorkerFilter};
pub use store::{Collection, MemoryStore, OfflineStore, StoreAdapter, StoreError};
pub use sync::{SubscriptionHandle, SyncBroadcaster};
pub use workflow::{ApplicationTransition, WorkflowEngine, WorkflowError};
