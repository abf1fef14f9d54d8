use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::user::Role;
use crate::utils::token::verify_token;
use crate::AppState;

/// Request-scoped identity established by `require_auth`. Handlers receive
/// it via extensions; there is no ambient user state.
#[derive(Debug, Clone, Copy)]
pub struct Identity {
    pub id: Uuid,
    pub role: Role,
}

/// Verifies the `token` cookie and loads the referenced user. A token whose
/// user no longer exists is as invalid as a bad signature.
pub async fn require_auth(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let Some(cookie_header) = req
        .headers()
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
    else {
        return unauthorized("Not authorized, no token");
    };

    let Some(token) = cookie_header
        .split(';')
        .find_map(|c| c.trim().strip_prefix("token="))
    else {
        return unauthorized("Not authorized, no token");
    };

    let config = crate::config::get_config();
    let user_id = match verify_token(token, &config.jwt_secret) {
        Ok(id) => id,
        Err(_) => return unauthorized("Not authorized, token failed"),
    };

    let user = match state.store.users.find_by_id(user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => return unauthorized("User not found"),
        Err(e) => return Error::from(e).into_response(),
    };

    req.extensions_mut().insert(Identity {
        id: user.id,
        role: user.role,
    });
    next.run(req).await
}

fn unauthorized(msg: &str) -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({ "error": msg }))).into_response()
}

/// Pure role check; every sensitive operation names its allowed set
/// explicitly. There is no implicit admin bypass.
pub fn authorize_roles(identity: &Identity, allowed: &[Role]) -> Result<()> {
    if allowed.contains(&identity.role) {
        Ok(())
    } else {
        Err(Error::Forbidden(
            "Access denied: Insufficient permissions".to_string(),
        ))
    }
}

/// Pure ownership check against the resource's owning-user id.
pub fn authorize_owner(caller_id: Uuid, owner_id: Uuid) -> Result<()> {
    if caller_id == owner_id {
        Ok(())
    } else {
        Err(Error::Forbidden("Access denied".to_string()))
    }
}
