use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::models::application::{
    Application, ApplicationStatus, ApplicationWithApplicant, ApplicationWithJob, NewApplication,
};
use crate::models::job::{Job, JobWithCompany, NewJob};
use crate::models::user::{ApplicantSummary, CompanySummary, NewUser, User};

use super::{ApplicationStore, JobStore, StoreError, StoreResult, UserStore};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_insert_err(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::Conflict,
        _ => StoreError::Database(err),
    }
}

#[derive(FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    role: String,
    profile_image: Option<String>,
    resume_path: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = StoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: row.id,
            name: row.name,
            email: row.email,
            password_hash: row.password_hash,
            role: row.role.parse().map_err(StoreError::Invalid)?,
            profile_image: row.profile_image,
            resume_path: row.resume_path,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(FromRow)]
struct JobRow {
    id: Uuid,
    title: String,
    description: String,
    location: String,
    salary_range: String,
    work_mode: String,
    employment_type: String,
    company_id: Uuid,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<JobRow> for Job {
    type Error = StoreError;

    fn try_from(row: JobRow) -> Result<Self, Self::Error> {
        Ok(Job {
            id: row.id,
            title: row.title,
            description: row.description,
            location: row.location,
            salary_range: row.salary_range,
            work_mode: row.work_mode.parse().map_err(StoreError::Invalid)?,
            employment_type: row.employment_type.parse().map_err(StoreError::Invalid)?,
            company_id: row.company_id,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(FromRow)]
struct ApplicationRow {
    id: Uuid,
    job_id: Uuid,
    applicant_id: Uuid,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ApplicationRow> for Application {
    type Error = StoreError;

    fn try_from(row: ApplicationRow) -> Result<Self, Self::Error> {
        Ok(Application {
            id: row.id,
            job_id: row.job_id,
            applicant_id: row.applicant_id,
            status: row.status.parse().map_err(StoreError::Invalid)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Job columns with the owning company aliased in.
#[derive(FromRow)]
struct JobCompanyRow {
    id: Uuid,
    title: String,
    description: String,
    location: String,
    salary_range: String,
    work_mode: String,
    employment_type: String,
    company_id: Uuid,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    company_name: String,
    company_email: String,
    company_image: Option<String>,
}

impl TryFrom<JobCompanyRow> for JobWithCompany {
    type Error = StoreError;

    fn try_from(row: JobCompanyRow) -> Result<Self, Self::Error> {
        let company = CompanySummary {
            id: row.company_id,
            name: row.company_name,
            email: row.company_email,
            profile_image: row.company_image,
        };
        let job = Job {
            id: row.id,
            title: row.title,
            description: row.description,
            location: row.location,
            salary_range: row.salary_range,
            work_mode: row.work_mode.parse().map_err(StoreError::Invalid)?,
            employment_type: row.employment_type.parse().map_err(StoreError::Invalid)?,
            company_id: row.company_id,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        };
        Ok(JobWithCompany { job, company })
    }
}

/// Application columns with its job and the job's company aliased in.
#[derive(FromRow)]
struct ApplicationJobRow {
    id: Uuid,
    job_id: Uuid,
    applicant_id: Uuid,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    job_title: String,
    job_description: String,
    job_location: String,
    job_salary_range: String,
    job_work_mode: String,
    job_employment_type: String,
    job_is_active: bool,
    job_created_at: DateTime<Utc>,
    job_updated_at: DateTime<Utc>,
    company_id: Uuid,
    company_name: String,
    company_email: String,
    company_image: Option<String>,
}

impl TryFrom<ApplicationJobRow> for ApplicationWithJob {
    type Error = StoreError;

    fn try_from(row: ApplicationJobRow) -> Result<Self, Self::Error> {
        Ok(ApplicationWithJob {
            application: Application {
                id: row.id,
                job_id: row.job_id,
                applicant_id: row.applicant_id,
                status: row.status.parse().map_err(StoreError::Invalid)?,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            job: Job {
                id: row.job_id,
                title: row.job_title,
                description: row.job_description,
                location: row.job_location,
                salary_range: row.job_salary_range,
                work_mode: row.job_work_mode.parse().map_err(StoreError::Invalid)?,
                employment_type: row
                    .job_employment_type
                    .parse()
                    .map_err(StoreError::Invalid)?,
                company_id: row.company_id,
                is_active: row.job_is_active,
                created_at: row.job_created_at,
                updated_at: row.job_updated_at,
            },
            company: CompanySummary {
                id: row.company_id,
                name: row.company_name,
                email: row.company_email,
                profile_image: row.company_image,
            },
        })
    }
}

/// Application columns with its job and the applicant aliased in.
#[derive(FromRow)]
struct ApplicationApplicantRow {
    id: Uuid,
    job_id: Uuid,
    applicant_id: Uuid,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    job_title: String,
    job_description: String,
    job_location: String,
    job_salary_range: String,
    job_work_mode: String,
    job_employment_type: String,
    job_company_id: Uuid,
    job_is_active: bool,
    job_created_at: DateTime<Utc>,
    job_updated_at: DateTime<Utc>,
    applicant_name: String,
    applicant_email: String,
    applicant_resume: Option<String>,
    applicant_image: Option<String>,
}

impl TryFrom<ApplicationApplicantRow> for ApplicationWithApplicant {
    type Error = StoreError;

    fn try_from(row: ApplicationApplicantRow) -> Result<Self, Self::Error> {
        Ok(ApplicationWithApplicant {
            application: Application {
                id: row.id,
                job_id: row.job_id,
                applicant_id: row.applicant_id,
                status: row.status.parse().map_err(StoreError::Invalid)?,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            job: Job {
                id: row.job_id,
                title: row.job_title,
                description: row.job_description,
                location: row.job_location,
                salary_range: row.job_salary_range,
                work_mode: row.job_work_mode.parse().map_err(StoreError::Invalid)?,
                employment_type: row
                    .job_employment_type
                    .parse()
                    .map_err(StoreError::Invalid)?,
                company_id: row.job_company_id,
                is_active: row.job_is_active,
                created_at: row.job_created_at,
                updated_at: row.job_updated_at,
            },
            applicant: ApplicantSummary {
                id: row.applicant_id,
                name: row.applicant_name,
                email: row.applicant_email,
                resume_path: row.applicant_resume,
                profile_image: row.applicant_image,
            },
        })
    }
}

const USER_COLUMNS: &str =
    "id, name, email, password_hash, role, profile_image, resume_path, created_at, updated_at";

const JOB_COLUMNS: &str = "id, title, description, location, salary_range, work_mode, \
     employment_type, company_id, is_active, created_at, updated_at";

const APPLICATION_COLUMNS: &str = "id, job_id, applicant_id, status, created_at, updated_at";

const APPLICATION_APPLICANT_SELECT: &str = "SELECT a.id, a.job_id, a.applicant_id, a.status, a.created_at, a.updated_at, \
     j.title AS job_title, j.description AS job_description, j.location AS job_location, \
     j.salary_range AS job_salary_range, j.work_mode AS job_work_mode, \
     j.employment_type AS job_employment_type, j.company_id AS job_company_id, \
     j.is_active AS job_is_active, j.created_at AS job_created_at, j.updated_at AS job_updated_at, \
     u.name AS applicant_name, u.email AS applicant_email, \
     u.resume_path AS applicant_resume, u.profile_image AS applicant_image \
     FROM applications a \
     JOIN jobs j ON j.id = a.job_id \
     JOIN users u ON u.id = a.applicant_id";

#[async_trait]
impl UserStore for PgStore {
    async fn insert(&self, user: NewUser) -> StoreResult<User> {
        let query = format!(
            "INSERT INTO users (name, email, password_hash, role) \
             VALUES ($1, $2, $3, $4) RETURNING {USER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.role.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(map_insert_err)?;
        row.try_into()
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        row.map(User::try_from).transpose()
    }

    async fn update(&self, user: &User) -> StoreResult<User> {
        let query = format!(
            "UPDATE users SET name = $2, email = $3, password_hash = $4, \
             profile_image = $5, resume_path = $6, updated_at = NOW() \
             WHERE id = $1 RETURNING {USER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(user.id)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.profile_image)
            .bind(&user.resume_path)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_insert_err)?;
        row.ok_or(StoreError::NotFound)?.try_into()
    }
}

#[async_trait]
impl JobStore for PgStore {
    async fn insert(&self, job: NewJob) -> StoreResult<Job> {
        let query = format!(
            "INSERT INTO jobs (title, description, location, salary_range, work_mode, \
             employment_type, company_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {JOB_COLUMNS}"
        );
        let row = sqlx::query_as::<_, JobRow>(&query)
            .bind(&job.title)
            .bind(&job.description)
            .bind(&job.location)
            .bind(&job.salary_range)
            .bind(job.work_mode.as_str())
            .bind(job.employment_type.as_str())
            .bind(job.company_id)
            .fetch_one(&self.pool)
            .await?;
        row.try_into()
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Job>> {
        let query = format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1");
        let row = sqlx::query_as::<_, JobRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Job::try_from).transpose()
    }

    async fn list_active(&self) -> StoreResult<Vec<JobWithCompany>> {
        let rows = sqlx::query_as::<_, JobCompanyRow>(
            "SELECT j.id, j.title, j.description, j.location, j.salary_range, j.work_mode, \
             j.employment_type, j.company_id, j.is_active, j.created_at, j.updated_at, \
             u.name AS company_name, u.email AS company_email, u.profile_image AS company_image \
             FROM jobs j \
             JOIN users u ON u.id = j.company_id \
             WHERE j.is_active \
             ORDER BY j.created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(JobWithCompany::try_from).collect()
    }

    async fn list_by_company(&self, company_id: Uuid) -> StoreResult<Vec<Job>> {
        let query = format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE company_id = $1 ORDER BY created_at DESC"
        );
        let rows = sqlx::query_as::<_, JobRow>(&query)
            .bind(company_id)
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(Job::try_from).collect()
    }

    async fn update(&self, job: &Job) -> StoreResult<Job> {
        let query = format!(
            "UPDATE jobs SET title = $2, description = $3, location = $4, salary_range = $5, \
             work_mode = $6, employment_type = $7, is_active = $8, updated_at = NOW() \
             WHERE id = $1 RETURNING {JOB_COLUMNS}"
        );
        let row = sqlx::query_as::<_, JobRow>(&query)
            .bind(job.id)
            .bind(&job.title)
            .bind(&job.description)
            .bind(&job.location)
            .bind(&job.salary_range)
            .bind(job.work_mode.as_str())
            .bind(job.employment_type.as_str())
            .bind(job.is_active)
            .fetch_optional(&self.pool)
            .await?;
        row.ok_or(StoreError::NotFound)?.try_into()
    }

    async fn delete(&self, id: Uuid) -> StoreResult<()> {
        let res = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl ApplicationStore for PgStore {
    async fn insert(&self, application: NewApplication) -> StoreResult<Application> {
        let query = format!(
            "INSERT INTO applications (job_id, applicant_id) \
             VALUES ($1, $2) RETURNING {APPLICATION_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ApplicationRow>(&query)
            .bind(application.job_id)
            .bind(application.applicant_id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_insert_err)?;
        row.try_into()
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Application>> {
        let query = format!("SELECT {APPLICATION_COLUMNS} FROM applications WHERE id = $1");
        let row = sqlx::query_as::<_, ApplicationRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Application::try_from).transpose()
    }

    async fn list_by_applicant(
        &self,
        applicant_id: Uuid,
    ) -> StoreResult<Vec<ApplicationWithJob>> {
        let rows = sqlx::query_as::<_, ApplicationJobRow>(
            "SELECT a.id, a.job_id, a.applicant_id, a.status, a.created_at, a.updated_at, \
             j.title AS job_title, j.description AS job_description, j.location AS job_location, \
             j.salary_range AS job_salary_range, j.work_mode AS job_work_mode, \
             j.employment_type AS job_employment_type, j.is_active AS job_is_active, \
             j.created_at AS job_created_at, j.updated_at AS job_updated_at, \
             u.id AS company_id, u.name AS company_name, u.email AS company_email, \
             u.profile_image AS company_image \
             FROM applications a \
             JOIN jobs j ON j.id = a.job_id \
             JOIN users u ON u.id = j.company_id \
             WHERE a.applicant_id = $1 \
             ORDER BY a.created_at DESC",
        )
        .bind(applicant_id)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(ApplicationWithJob::try_from).collect()
    }

    async fn list_by_job(&self, job_id: Uuid) -> StoreResult<Vec<ApplicationWithApplicant>> {
        let query = format!(
            "{APPLICATION_APPLICANT_SELECT} WHERE a.job_id = $1 ORDER BY a.created_at DESC"
        );
        let rows = sqlx::query_as::<_, ApplicationApplicantRow>(&query)
            .bind(job_id)
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter()
            .map(ApplicationWithApplicant::try_from)
            .collect()
    }

    async fn list_by_company(
        &self,
        company_id: Uuid,
    ) -> StoreResult<Vec<ApplicationWithApplicant>> {
        let query = format!(
            "{APPLICATION_APPLICANT_SELECT} WHERE j.company_id = $1 ORDER BY a.created_at DESC"
        );
        let rows = sqlx::query_as::<_, ApplicationApplicantRow>(&query)
            .bind(company_id)
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter()
            .map(ApplicationWithApplicant::try_from)
            .collect()
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: ApplicationStatus,
    ) -> StoreResult<Application> {
        let query = format!(
            "UPDATE applications SET status = $2, updated_at = NOW() \
             WHERE id = $1 RETURNING {APPLICATION_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ApplicationRow>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(&self.pool)
            .await?;
        row.ok_or(StoreError::NotFound)?.try_into()
    }
}
