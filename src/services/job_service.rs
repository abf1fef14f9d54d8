use std::sync::Arc;
use uuid::Uuid;

use crate::dto::job_dto::{CreateJobPayload, UpdateJobPayload};
use crate::error::{Error, Result};
use crate::middleware::auth::authorize_owner;
use crate::models::job::{Job, JobWithCompany, NewJob, DEFAULT_SALARY_RANGE};
use crate::store::{JobStore, StoreError};

#[derive(Clone)]
pub struct JobService {
    jobs: Arc<dyn JobStore>,
}

impl JobService {
    pub fn new(jobs: Arc<dyn JobStore>) -> Self {
        Self { jobs }
    }

    pub async fn create(&self, company_id: Uuid, payload: CreateJobPayload) -> Result<Job> {
        let title = payload
            .title
            .ok_or_else(|| Error::BadRequest("Job title is required".to_string()))?;
        let description = payload
            .description
            .ok_or_else(|| Error::BadRequest("Job description is required".to_string()))?;
        let work_mode = payload
            .work_mode
            .ok_or_else(|| Error::BadRequest("Work mode is required".to_string()))?
            .parse()
            .map_err(Error::BadRequest)?;
        let employment_type = payload
            .employment_type
            .ok_or_else(|| Error::BadRequest("Employment type is required".to_string()))?
            .parse()
            .map_err(Error::BadRequest)?;
        let salary_range = match payload.salary_range {
            Some(s) if !s.trim().is_empty() => s,
            _ => DEFAULT_SALARY_RANGE.to_string(),
        };

        let job = self
            .jobs
            .insert(NewJob {
                title,
                description,
                location: payload.location.unwrap_or_default(),
                salary_range,
                work_mode,
                employment_type,
                company_id,
            })
            .await?;
        Ok(job)
    }

    pub async fn list_active(&self) -> Result<Vec<JobWithCompany>> {
        Ok(self.jobs.list_active().await?)
    }

    pub async fn list_owned(&self, company_id: Uuid) -> Result<Vec<Job>> {
        Ok(self.jobs.list_by_company(company_id).await?)
    }

    /// Applicant view: an inactive job is indistinguishable from a missing
    /// one, so closed listings never leak.
    pub async fn get_for_applicant(&self, job_id: Uuid) -> Result<Job> {
        match self.jobs.find_by_id(job_id).await? {
            Some(job) if job.is_active => Ok(job),
            _ => Err(Error::NotFound("Job not found".to_string())),
        }
    }

    /// Company view: the owner sees the job regardless of active state;
    /// everyone else is refused.
    pub async fn get_for_company(&self, company_id: Uuid, job_id: Uuid) -> Result<Job> {
        self.owned_job(company_id, job_id).await
    }

    pub async fn update(
        &self,
        company_id: Uuid,
        job_id: Uuid,
        payload: UpdateJobPayload,
    ) -> Result<Job> {
        let mut job = self.owned_job(company_id, job_id).await?;

        if let Some(title) = payload.title {
            job.title = title;
        }
        if let Some(description) = payload.description {
            job.description = description;
        }
        if let Some(location) = payload.location {
            job.location = location;
        }
        if let Some(salary_range) = payload.salary_range {
            job.salary_range = salary_range;
        }
        if let Some(work_mode) = payload.work_mode {
            job.work_mode = work_mode.parse().map_err(Error::BadRequest)?;
        }
        if let Some(employment_type) = payload.employment_type {
            job.employment_type = employment_type.parse().map_err(Error::BadRequest)?;
        }
        if let Some(is_active) = payload.is_active {
            job.is_active = is_active;
        }

        Ok(self.jobs.update(&job).await?)
    }

    /// Idempotent: closing an already-closed job succeeds silently.
    pub async fn close(&self, company_id: Uuid, job_id: Uuid) -> Result<()> {
        let mut job = self.owned_job(company_id, job_id).await?;
        job.is_active = false;
        self.jobs.update(&job).await?;
        Ok(())
    }

    pub async fn delete(&self, company_id: Uuid, job_id: Uuid) -> Result<()> {
        let job = self.owned_job(company_id, job_id).await?;
        match self.jobs.delete(job.id).await {
            Ok(()) | Err(StoreError::NotFound) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn owned_job(&self, company_id: Uuid, job_id: Uuid) -> Result<Job> {
        let job = self
            .jobs
            .find_by_id(job_id)
            .await?
            .ok_or_else(|| Error::NotFound("Job not found".to_string()))?;
        authorize_owner(company_id, job.company_id)?;
        Ok(job)
    }
}
