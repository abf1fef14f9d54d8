use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::job_dto::{ActiveJobResponse, CreateJobPayload, JobResponse, UpdateJobPayload},
    error::{Error, Result},
    middleware::auth::{authorize_roles, Identity},
    models::user::Role,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/jobs",
    responses(
        (status = 200, description = "Active jobs, newest first", body = Vec<ActiveJobResponse>),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Caller is not an applicant")
    )
)]
#[axum::debug_handler]
pub async fn list_active_jobs(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<impl IntoResponse> {
    authorize_roles(&identity, &[Role::Applicant])?;
    let jobs = state.job_service.list_active().await?;
    let items: Vec<ActiveJobResponse> = jobs.into_iter().map(Into::into).collect();
    Ok(Json(items))
}

#[utoipa::path(
    get,
    path = "/api/jobs/me",
    responses(
        (status = 200, description = "Jobs owned by the calling company", body = Vec<JobResponse>),
        (status = 403, description = "Caller is not a company")
    )
)]
#[axum::debug_handler]
pub async fn list_my_jobs(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<impl IntoResponse> {
    authorize_roles(&identity, &[Role::Company])?;
    let jobs = state.job_service.list_owned(identity.id).await?;
    let items: Vec<JobResponse> = jobs.into_iter().map(Into::into).collect();
    Ok(Json(items))
}

#[utoipa::path(
    post,
    path = "/api/jobs",
    request_body = CreateJobPayload,
    responses(
        (status = 201, description = "Job created", body = JobResponse),
        (status = 400, description = "Invalid payload"),
        (status = 403, description = "Caller is not a company")
    )
)]
#[axum::debug_handler]
pub async fn create_job(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(payload): Json<CreateJobPayload>,
) -> Result<impl IntoResponse> {
    authorize_roles(&identity, &[Role::Company])?;
    payload.validate()?;
    let job = state.job_service.create(identity.id, payload).await?;
    Ok((StatusCode::CREATED, Json(JobResponse::from(job))))
}

#[utoipa::path(
    get,
    path = "/api/jobs/{id}",
    params(
        ("id" = Uuid, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Job found", body = JobResponse),
        (status = 403, description = "Not the owning company"),
        (status = 404, description = "Job missing, or inactive for applicants")
    )
)]
#[axum::debug_handler]
pub async fn get_job(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let job = match identity.role {
        Role::Applicant => state.job_service.get_for_applicant(id).await?,
        Role::Company => state.job_service.get_for_company(identity.id, id).await?,
        Role::Admin => {
            return Err(Error::Forbidden(
                "Access denied: Insufficient permissions".to_string(),
            ))
        }
    };
    Ok(Json(JobResponse::from(job)))
}

#[utoipa::path(
    put,
    path = "/api/jobs/{id}",
    params(
        ("id" = Uuid, Path, description = "Job ID")
    ),
    request_body = UpdateJobPayload,
    responses(
        (status = 200, description = "Job updated", body = JobResponse),
        (status = 400, description = "Invalid payload"),
        (status = 403, description = "Not the owning company"),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn update_job(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateJobPayload>,
) -> Result<impl IntoResponse> {
    authorize_roles(&identity, &[Role::Company])?;
    payload.validate()?;
    let job = state.job_service.update(identity.id, id, payload).await?;
    Ok(Json(JobResponse::from(job)))
}

#[utoipa::path(
    patch,
    path = "/api/jobs/{id}/close",
    params(
        ("id" = Uuid, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Job closed (idempotent)"),
        (status = 403, description = "Not the owning company"),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn close_job(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    authorize_roles(&identity, &[Role::Company])?;
    state.job_service.close(identity.id, id).await?;
    Ok(Json(
        serde_json::json!({ "message": "Job closed successfully" }),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/jobs/{id}",
    params(
        ("id" = Uuid, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Job deleted"),
        (status = 403, description = "Not the owning company"),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_job(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    authorize_roles(&identity, &[Role::Company])?;
    state.job_service.delete(identity.id, id).await?;
    Ok(Json(
        serde_json::json!({ "message": "Job deleted successfully" }),
    ))
}
