use axum::{
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use bytes::Bytes;
use validator::Validate;

use crate::{
    dto::auth_dto::{LoginPayload, RegisterPayload, UpdateProfilePayload, UserResponse},
    error::{Error, Result},
    middleware::auth::Identity,
    utils::token::{issue_token, TOKEN_TTL_SECONDS},
    utils::uploads::{IMAGE_EXTS, RESUME_EXTS},
    AppState,
};

fn auth_cookie(token: &str) -> String {
    format!(
        "token={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
        token, TOKEN_TTL_SECONDS
    )
}

fn clear_cookie() -> String {
    "token=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0".to_string()
}

#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user = state.user_service.register(payload).await?;
    let token = issue_token(user.id, &crate::config::get_config().jwt_secret)?;
    Ok((
        StatusCode::CREATED,
        [(header::SET_COOKIE, auth_cookie(&token))],
        Json(UserResponse::from(user)),
    ))
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user = state
        .user_service
        .login(&payload.email, &payload.password)
        .await?;
    let token = issue_token(user.id, &crate::config::get_config().jwt_secret)?;
    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, auth_cookie(&token))],
        Json(UserResponse::from(user)),
    ))
}

#[axum::debug_handler]
pub async fn logout() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::SET_COOKIE, clear_cookie())],
        Json(serde_json::json!({ "message": "Logged out successfully" })),
    )
}

#[axum::debug_handler]
pub async fn me(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<impl IntoResponse> {
    let user = state.user_service.get(identity.id).await?;
    Ok(Json(UserResponse::from(user)))
}

#[axum::debug_handler]
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(payload): Json<UpdateProfilePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user = state
        .user_service
        .update_profile(identity.id, payload)
        .await?;
    Ok(Json(UserResponse::from(user)))
}

async fn read_upload_field(multipart: &mut Multipart, field_name: &str) -> Result<(String, Bytes)> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(field_name) {
            let filename = field.file_name().unwrap_or("upload.bin").to_string();
            let data = field.bytes().await?;
            if !data.is_empty() {
                return Ok((filename, data));
            }
        }
    }
    Err(Error::BadRequest(format!(
        "No {} file uploaded",
        field_name
    )))
}

#[axum::debug_handler]
pub async fn upload_profile_image(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse> {
    let (filename, data) = read_upload_field(&mut multipart, "profile_image").await?;
    let path = state
        .blob_store
        .save("profile-images", &filename, IMAGE_EXTS, &data)
        .await?;

    let (user, old) = state
        .user_service
        .set_profile_image(identity.id, path.clone())
        .await?;
    if let Some(old) = old.filter(|old| old != &path) {
        state.blob_store.remove(&old).await;
    }
    Ok(Json(UserResponse::from(user)))
}

#[axum::debug_handler]
pub async fn upload_resume(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse> {
    let (filename, data) = read_upload_field(&mut multipart, "resume").await?;
    let path = state
        .blob_store
        .save("resumes", &filename, RESUME_EXTS, &data)
        .await?;

    let (user, old) = state
        .user_service
        .set_resume(identity.id, path.clone())
        .await?;
    if let Some(old) = old.filter(|old| old != &path) {
        state.blob_store.remove(&old).await;
    }
    Ok(Json(UserResponse::from(user)))
}
