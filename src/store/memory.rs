use async_trait::async_trait;
use chrono::Utc;
use std::sync::Mutex;
use uuid::Uuid;

use crate::models::application::{
    Application, ApplicationStatus, ApplicationWithApplicant, ApplicationWithJob, NewApplication,
};
use crate::models::job::{Job, JobWithCompany, NewJob};
use crate::models::user::{NewUser, User};

use super::{ApplicationStore, JobStore, StoreError, StoreResult, UserStore};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    jobs: Vec<Job>,
    applications: Vec<Application>,
}

/// In-memory backend for tests. Vectors keep insertion order, so
/// "newest first" is a reverse scan; uniqueness checks happen under the
/// table lock, giving the same atomicity the Postgres constraints provide.
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            tables: Mutex::new(Tables::default()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert(&self, user: NewUser) -> StoreResult<User> {
        let mut tables = self.tables.lock().expect("memory store mutex poisoned");
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::Conflict);
        }
        let now = Utc::now();
        let record = User {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
            profile_image: None,
            resume_path: None,
            created_at: now,
            updated_at: now,
        };
        tables.users.push(record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        let tables = self.tables.lock().expect("memory store mutex poisoned");
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.lock().expect("memory store mutex poisoned");
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn update(&self, user: &User) -> StoreResult<User> {
        let mut tables = self.tables.lock().expect("memory store mutex poisoned");
        if tables
            .users
            .iter()
            .any(|u| u.email == user.email && u.id != user.id)
        {
            return Err(StoreError::Conflict);
        }
        let slot = tables
            .users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(StoreError::NotFound)?;
        let mut updated = user.clone();
        updated.updated_at = Utc::now();
        *slot = updated.clone();
        Ok(updated)
    }
}

#[async_trait]
impl JobStore for MemoryStore {
    async fn insert(&self, job: NewJob) -> StoreResult<Job> {
        let mut tables = self.tables.lock().expect("memory store mutex poisoned");
        let now = Utc::now();
        let record = Job {
            id: Uuid::new_v4(),
            title: job.title,
            description: job.description,
            location: job.location,
            salary_range: job.salary_range,
            work_mode: job.work_mode,
            employment_type: job.employment_type,
            company_id: job.company_id,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        tables.jobs.push(record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Job>> {
        let tables = self.tables.lock().expect("memory store mutex poisoned");
        Ok(tables.jobs.iter().find(|j| j.id == id).cloned())
    }

    async fn list_active(&self) -> StoreResult<Vec<JobWithCompany>> {
        let tables = self.tables.lock().expect("memory store mutex poisoned");
        Ok(tables
            .jobs
            .iter()
            .rev()
            .filter(|j| j.is_active)
            .filter_map(|j| {
                let company = tables.users.iter().find(|u| u.id == j.company_id)?;
                Some(JobWithCompany {
                    job: j.clone(),
                    company: company.into(),
                })
            })
            .collect())
    }

    async fn list_by_company(&self, company_id: Uuid) -> StoreResult<Vec<Job>> {
        let tables = self.tables.lock().expect("memory store mutex poisoned");
        Ok(tables
            .jobs
            .iter()
            .rev()
            .filter(|j| j.company_id == company_id)
            .cloned()
            .collect())
    }

    async fn update(&self, job: &Job) -> StoreResult<Job> {
        let mut tables = self.tables.lock().expect("memory store mutex poisoned");
        let slot = tables
            .jobs
            .iter_mut()
            .find(|j| j.id == job.id)
            .ok_or(StoreError::NotFound)?;
        let mut updated = job.clone();
        updated.updated_at = Utc::now();
        *slot = updated.clone();
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> StoreResult<()> {
        let mut tables = self.tables.lock().expect("memory store mutex poisoned");
        let before = tables.jobs.len();
        tables.jobs.retain(|j| j.id != id);
        if tables.jobs.len() == before {
            return Err(StoreError::NotFound);
        }
        // Cascade, mirroring the FK in the Postgres schema.
        tables.applications.retain(|a| a.job_id != id);
        Ok(())
    }
}

#[async_trait]
impl ApplicationStore for MemoryStore {
    async fn insert(&self, application: NewApplication) -> StoreResult<Application> {
        let mut tables = self.tables.lock().expect("memory store mutex poisoned");
        if tables
            .applications
            .iter()
            .any(|a| a.job_id == application.job_id && a.applicant_id == application.applicant_id)
        {
            return Err(StoreError::Conflict);
        }
        let now = Utc::now();
        let record = Application {
            id: Uuid::new_v4(),
            job_id: application.job_id,
            applicant_id: application.applicant_id,
            status: ApplicationStatus::Applied,
            created_at: now,
            updated_at: now,
        };
        tables.applications.push(record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Application>> {
        let tables = self.tables.lock().expect("memory store mutex poisoned");
        Ok(tables.applications.iter().find(|a| a.id == id).cloned())
    }

    async fn list_by_applicant(
        &self,
        applicant_id: Uuid,
    ) -> StoreResult<Vec<ApplicationWithJob>> {
        let tables = self.tables.lock().expect("memory store mutex poisoned");
        Ok(tables
            .applications
            .iter()
            .rev()
            .filter(|a| a.applicant_id == applicant_id)
            .filter_map(|a| {
                let job = tables.jobs.iter().find(|j| j.id == a.job_id)?;
                let company = tables.users.iter().find(|u| u.id == job.company_id)?;
                Some(ApplicationWithJob {
                    application: a.clone(),
                    job: job.clone(),
                    company: company.into(),
                })
            })
            .collect())
    }

    async fn list_by_job(&self, job_id: Uuid) -> StoreResult<Vec<ApplicationWithApplicant>> {
        let tables = self.tables.lock().expect("memory store mutex poisoned");
        Ok(tables
            .applications
            .iter()
            .rev()
            .filter(|a| a.job_id == job_id)
            .filter_map(|a| with_applicant(&tables, a))
            .collect())
    }

    async fn list_by_company(
        &self,
        company_id: Uuid,
    ) -> StoreResult<Vec<ApplicationWithApplicant>> {
        let tables = self.tables.lock().expect("memory store mutex poisoned");
        Ok(tables
            .applications
            .iter()
            .rev()
            .filter(|a| {
                tables
                    .jobs
                    .iter()
                    .any(|j| j.id == a.job_id && j.company_id == company_id)
            })
            .filter_map(|a| with_applicant(&tables, a))
            .collect())
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: ApplicationStatus,
    ) -> StoreResult<Application> {
        let mut tables = self.tables.lock().expect("memory store mutex poisoned");
        let slot = tables
            .applications
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(StoreError::NotFound)?;
        slot.status = status;
        slot.updated_at = Utc::now();
        Ok(slot.clone())
    }
}

fn with_applicant(tables: &Tables, application: &Application) -> Option<ApplicationWithApplicant> {
    let job = tables.jobs.iter().find(|j| j.id == application.job_id)?;
    let applicant = tables
        .users
        .iter()
        .find(|u| u.id == application.applicant_id)?;
    Some(ApplicationWithApplicant {
        application: application.clone(),
        job: job.clone(),
        applicant: applicant.into(),
    })
}
