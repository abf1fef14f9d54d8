use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::application_dto::{
        ApplicationResponse, CompanyApplicationResponse, MyApplicationResponse,
        UpdateApplicationStatusPayload,
    },
    error::Result,
    middleware::auth::{authorize_roles, Identity},
    models::user::Role,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/jobs/{job_id}/applications",
    params(
        ("job_id" = Uuid, Path, description = "Job ID")
    ),
    responses(
        (status = 201, description = "Applied", body = ApplicationResponse),
        (status = 403, description = "Caller is not an applicant"),
        (status = 404, description = "Job missing or closed"),
        (status = 409, description = "Already applied to this job")
    )
)]
#[axum::debug_handler]
pub async fn apply(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    authorize_roles(&identity, &[Role::Applicant])?;
    let application = state
        .application_service
        .apply(identity.id, job_id)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApplicationResponse::from(application)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/applications/me",
    responses(
        (status = 200, description = "Own applications, newest first", body = Vec<MyApplicationResponse>),
        (status = 403, description = "Caller is not an applicant")
    )
)]
#[axum::debug_handler]
pub async fn list_my_applications(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<impl IntoResponse> {
    authorize_roles(&identity, &[Role::Applicant])?;
    let applications = state.application_service.list_mine(identity.id).await?;
    let items: Vec<MyApplicationResponse> = applications.into_iter().map(Into::into).collect();
    Ok(Json(items))
}

#[utoipa::path(
    get,
    path = "/api/jobs/{job_id}/applications",
    params(
        ("job_id" = Uuid, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Applications for the job, newest first", body = Vec<CompanyApplicationResponse>),
        (status = 403, description = "Not the owning company"),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn list_applications_for_job(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    authorize_roles(&identity, &[Role::Company])?;
    let applications = state
        .application_service
        .list_for_job(identity.id, job_id)
        .await?;
    let items: Vec<CompanyApplicationResponse> = applications.into_iter().map(Into::into).collect();
    Ok(Json(items))
}

#[utoipa::path(
    get,
    path = "/api/applications/recruiter",
    responses(
        (status = 200, description = "Applications across all owned jobs, newest first", body = Vec<CompanyApplicationResponse>),
        (status = 403, description = "Caller is not a company")
    )
)]
#[axum::debug_handler]
pub async fn list_recruiter_applications(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<impl IntoResponse> {
    authorize_roles(&identity, &[Role::Company])?;
    let applications = state
        .application_service
        .list_for_company(identity.id)
        .await?;
    let items: Vec<CompanyApplicationResponse> = applications.into_iter().map(Into::into).collect();
    Ok(Json(items))
}

#[utoipa::path(
    patch,
    path = "/api/applications/{id}",
    params(
        ("id" = Uuid, Path, description = "Application ID")
    ),
    request_body = UpdateApplicationStatusPayload,
    responses(
        (status = 200, description = "Status updated", body = ApplicationResponse),
        (status = 400, description = "Status not in the enumerated set"),
        (status = 403, description = "Application's job is not owned by the caller"),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler]
pub async fn update_application_status(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateApplicationStatusPayload>,
) -> Result<impl IntoResponse> {
    authorize_roles(&identity, &[Role::Company])?;
    payload.validate()?;
    let application = state
        .application_service
        .update_status(identity.id, id, &payload.status)
        .await?;
    Ok(Json(ApplicationResponse::from(application)))
}
