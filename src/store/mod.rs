pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::models::application::{
    Application, ApplicationStatus, ApplicationWithApplicant, ApplicationWithJob, NewApplication,
};
use crate::models::job::{Job, JobWithCompany, NewJob};
use crate::models::user::{NewUser, User};

/// Storage abstraction so the services can be exercised against an
/// in-memory backend in tests and Postgres in production.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record already exists")]
    Conflict,

    #[error("record not found")]
    NotFound,

    #[error("invalid record: {0}")]
    Invalid(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Conflict when the email is already taken.
    async fn insert(&self, user: NewUser) -> StoreResult<User>;
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;
    /// Persists the snapshot; Conflict when the email collides with another
    /// user, NotFound when the user no longer exists.
    async fn update(&self, user: &User) -> StoreResult<User>;
}

#[async_trait]
pub trait JobStore: Send + Sync {
    async fn insert(&self, job: NewJob) -> StoreResult<Job>;
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Job>>;
    /// Active jobs only, newest first, owning company joined in.
    async fn list_active(&self) -> StoreResult<Vec<JobWithCompany>>;
    /// All jobs owned by the company, newest first.
    async fn list_by_company(&self, company_id: Uuid) -> StoreResult<Vec<Job>>;
    async fn update(&self, job: &Job) -> StoreResult<Job>;
    /// Hard removal; the job's applications go with it.
    async fn delete(&self, id: Uuid) -> StoreResult<()>;
}

#[async_trait]
pub trait ApplicationStore: Send + Sync {
    /// Conflict when an application for (job_id, applicant_id) already
    /// exists. The uniqueness check must be atomic with the insert.
    async fn insert(&self, application: NewApplication) -> StoreResult<Application>;
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Application>>;
    async fn list_by_applicant(&self, applicant_id: Uuid) -> StoreResult<Vec<ApplicationWithJob>>;
    async fn list_by_job(&self, job_id: Uuid) -> StoreResult<Vec<ApplicationWithApplicant>>;
    async fn list_by_company(&self, company_id: Uuid)
        -> StoreResult<Vec<ApplicationWithApplicant>>;
    async fn update_status(
        &self,
        id: Uuid,
        status: ApplicationStatus,
    ) -> StoreResult<Application>;
}

/// Bundle handed to the services. Cloning shares the backend.
#[derive(Clone)]
pub struct Store {
    pub users: Arc<dyn UserStore>,
    pub jobs: Arc<dyn JobStore>,
    pub applications: Arc<dyn ApplicationStore>,
}

impl Store {
    pub fn postgres(pool: sqlx::PgPool) -> Self {
        let backend = Arc::new(postgres::PgStore::new(pool));
        Self {
            users: backend.clone(),
            jobs: backend.clone(),
            applications: backend,
        }
    }

    pub fn in_memory() -> Self {
        let backend = Arc::new(memory::MemoryStore::new());
        Self {
            users: backend.clone(),
            jobs: backend.clone(),
            applications: backend,
        }
    }
}
