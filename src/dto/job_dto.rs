use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::job::{Job, JobWithCompany};
use crate::models::user::CompanySummary;

/// Required fields are optional here so their absence surfaces as a 400
/// from the service, not a deserializer rejection.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema, Default)]
#[serde(default)]
pub struct CreateJobPayload {
    #[validate(length(min = 3, max = 200))]
    pub title: Option<String>,
    #[validate(length(min = 10, max = 5000))]
    pub description: Option<String>,
    #[validate(length(max = 200))]
    pub location: Option<String>,
    #[validate(length(max = 100))]
    pub salary_range: Option<String>,
    /// "remote", "hybrid" or "onsite"; parsed against the enum.
    pub work_mode: Option<String>,
    /// "full-time", "part-time", "contract" or "internship".
    pub employment_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema, Default)]
#[serde(default)]
pub struct UpdateJobPayload {
    #[validate(length(min = 3, max = 200))]
    pub title: Option<String>,
    #[validate(length(min = 10, max = 5000))]
    pub description: Option<String>,
    #[validate(length(min = 2, max = 200))]
    pub location: Option<String>,
    #[validate(length(max = 100))]
    pub salary_range: Option<String>,
    pub work_mode: Option<String>,
    pub employment_type: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct JobResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub salary_range: String,
    pub work_mode: String,
    pub employment_type: String,
    pub company_id: Uuid,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CompanySummaryResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub profile_image: Option<String>,
}

/// Listing row for the applicant-facing board, company joined in.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ActiveJobResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub salary_range: String,
    pub work_mode: String,
    pub employment_type: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub company: CompanySummaryResponse,
}

impl From<Job> for JobResponse {
    fn from(job: Job) -> Self {
        Self {
            id: job.id,
            title: job.title,
            description: job.description,
            location: job.location,
            salary_range: job.salary_range,
            work_mode: job.work_mode.as_str().to_string(),
            employment_type: job.employment_type.as_str().to_string(),
            company_id: job.company_id,
            is_active: job.is_active,
            created_at: job.created_at,
            updated_at: job.updated_at,
        }
    }
}

impl From<CompanySummary> for CompanySummaryResponse {
    fn from(company: CompanySummary) -> Self {
        Self {
            id: company.id,
            name: company.name,
            email: company.email,
            profile_image: company.profile_image,
        }
    }
}

impl From<JobWithCompany> for ActiveJobResponse {
    fn from(value: JobWithCompany) -> Self {
        Self {
            id: value.job.id,
            title: value.job.title,
            description: value.job.description,
            location: value.job.location,
            salary_range: value.job.salary_range,
            work_mode: value.job.work_mode.as_str().to_string(),
            employment_type: value.job.employment_type.as_str().to_string(),
            is_active: value.job.is_active,
            created_at: value.job.created_at,
            company: value.company.into(),
        }
    }
}
