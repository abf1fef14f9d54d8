use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::dto::job_dto::CompanySummaryResponse;
use crate::models::application::{Application, ApplicationWithApplicant, ApplicationWithJob};
use crate::models::job::Job;
use crate::models::user::ApplicantSummary;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateApplicationStatusPayload {
    /// One of applied, shortlisted, interview, selected, rejected.
    #[validate(length(min = 1))]
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApplicationResponse {
    pub id: Uuid,
    pub job_id: Uuid,
    pub applicant_id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Job fields worth showing inside an application row.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct JobBriefResponse {
    pub id: Uuid,
    pub title: String,
    pub location: String,
    pub salary_range: String,
    pub work_mode: String,
    pub employment_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApplicantSummaryResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub resume_path: Option<String>,
    pub profile_image: Option<String>,
}

/// Applicant-side row: own application with job and company joined.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MyApplicationResponse {
    pub id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub job: JobBriefResponse,
    pub company: CompanySummaryResponse,
}

/// Company-side row: application with job title and applicant joined.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CompanyApplicationResponse {
    pub id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub job: JobBriefResponse,
    pub applicant: ApplicantSummaryResponse,
}

impl From<Application> for ApplicationResponse {
    fn from(application: Application) -> Self {
        Self {
            id: application.id,
            job_id: application.job_id,
            applicant_id: application.applicant_id,
            status: application.status.as_str().to_string(),
            created_at: application.created_at,
        }
    }
}

impl From<Job> for JobBriefResponse {
    fn from(job: Job) -> Self {
        Self {
            id: job.id,
            title: job.title,
            location: job.location,
            salary_range: job.salary_range,
            work_mode: job.work_mode.as_str().to_string(),
            employment_type: job.employment_type.as_str().to_string(),
        }
    }
}

impl From<ApplicantSummary> for ApplicantSummaryResponse {
    fn from(applicant: ApplicantSummary) -> Self {
        Self {
            id: applicant.id,
            name: applicant.name,
            email: applicant.email,
            resume_path: applicant.resume_path,
            profile_image: applicant.profile_image,
        }
    }
}

impl From<ApplicationWithJob> for MyApplicationResponse {
    fn from(value: ApplicationWithJob) -> Self {
        Self {
            id: value.application.id,
            status: value.application.status.as_str().to_string(),
            created_at: value.application.created_at,
            job: value.job.into(),
            company: value.company.into(),
        }
    }
}

impl From<ApplicationWithApplicant> for CompanyApplicationResponse {
    fn from(value: ApplicationWithApplicant) -> Self {
        Self {
            id: value.application.id,
            status: value.application.status.as_str().to_string(),
            created_at: value.application.created_at,
            job: value.job.into(),
            applicant: value.applicant.into(),
        }
    }
}
