use std::sync::Arc;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::middleware::auth::authorize_owner;
use crate::models::application::{
    Application, ApplicationStatus, ApplicationWithApplicant, ApplicationWithJob, NewApplication,
};
use crate::store::{ApplicationStore, JobStore, StoreError};

#[derive(Clone)]
pub struct ApplicationService {
    jobs: Arc<dyn JobStore>,
    applications: Arc<dyn ApplicationStore>,
}

impl ApplicationService {
    pub fn new(jobs: Arc<dyn JobStore>, applications: Arc<dyn ApplicationStore>) -> Self {
        Self { jobs, applications }
    }

    /// A closed job reads as missing here, same as the applicant job view.
    /// The (job, applicant) uniqueness lives in the store so concurrent
    /// applies cannot both pass a pre-check.
    pub async fn apply(&self, applicant_id: Uuid, job_id: Uuid) -> Result<Application> {
        match self.jobs.find_by_id(job_id).await? {
            Some(job) if job.is_active => {}
            _ => return Err(Error::NotFound("Job not found or closed".to_string())),
        }

        self.applications
            .insert(NewApplication {
                job_id,
                applicant_id,
            })
            .await
            .map_err(|e| match e {
                StoreError::Conflict => {
                    Error::Conflict("You have already applied to this job".to_string())
                }
                other => other.into(),
            })
    }

    pub async fn list_mine(&self, applicant_id: Uuid) -> Result<Vec<ApplicationWithJob>> {
        Ok(self.applications.list_by_applicant(applicant_id).await?)
    }

    pub async fn list_for_job(
        &self,
        company_id: Uuid,
        job_id: Uuid,
    ) -> Result<Vec<ApplicationWithApplicant>> {
        let job = self
            .jobs
            .find_by_id(job_id)
            .await?
            .ok_or_else(|| Error::NotFound("Job not found".to_string()))?;
        authorize_owner(company_id, job.company_id)?;
        Ok(self.applications.list_by_job(job_id).await?)
    }

    pub async fn list_for_company(
        &self,
        company_id: Uuid,
    ) -> Result<Vec<ApplicationWithApplicant>> {
        Ok(self.applications.list_by_company(company_id).await?)
    }

    /// Status is assigned directly by the owning company; any enumerated
    /// value is accepted at any time.
    pub async fn update_status(
        &self,
        company_id: Uuid,
        application_id: Uuid,
        status: &str,
    ) -> Result<Application> {
        let status: ApplicationStatus = status.parse().map_err(Error::BadRequest)?;

        let application = self
            .applications
            .find_by_id(application_id)
            .await?
            .ok_or_else(|| Error::NotFound("Application not found".to_string()))?;

        let job = self
            .jobs
            .find_by_id(application.job_id)
            .await?
            .ok_or_else(|| Error::NotFound("Job not found".to_string()))?;
        authorize_owner(company_id, job.company_id)?;

        Ok(self
            .applications
            .update_status(application_id, status)
            .await?)
    }
}
