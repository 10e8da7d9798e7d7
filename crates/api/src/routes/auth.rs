//! Admin sign-in and sign-out.
//!
//! Credential verification happens here, once: the session gate middleware
//! only ever checks for the cookie afterwards.

use axum::{extract::State, http::HeaderMap, Json};
use serde_json::json;
use validator::Validate;

use domain::models::admin::{AdminResponse, SignInRequest};
use persistence::repositories::AdminRepository;
use shared::{password::verify_password, session::generate_token};

use crate::app::AppState;
use crate::error::{ApiError, MutationError, MutationSuccess};
use crate::services::cookies::SessionCookies;

/// POST /api/admin/auth/sign-in
pub async fn sign_in(
    State(state): State<AppState>,
    Json(request): Json<SignInRequest>,
) -> Result<(HeaderMap, Json<MutationSuccess<AdminResponse>>), MutationError> {
    request.validate()?;

    let repo = AdminRepository::new(state.pool.clone());
    let admin = repo
        .find_by_email(&request.email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid email or password".into()))?;

    let verified =
        verify_password(&request.password, &admin.password_hash).map_err(ApiError::from)?;
    if !verified {
        return Err(ApiError::Unauthorized("Invalid email or password".into()).into());
    }

    let token = generate_token();
    let mut headers = HeaderMap::new();
    SessionCookies::new(state.config.session.clone()).add_session_cookie(&mut headers, &token);

    tracing::info!(admin_id = admin.id, "Admin signed in");
    Ok((headers, MutationSuccess::respond(AdminResponse::from(admin))))
}

/// POST /api/admin/auth/sign-out
pub async fn sign_out(
    State(state): State<AppState>,
) -> (HeaderMap, Json<MutationSuccess<serde_json::Value>>) {
    let mut headers = HeaderMap::new();
    SessionCookies::new(state.config.session.clone()).add_clear_cookie(&mut headers);
    (headers, MutationSuccess::respond(json!({"signed_out": true})))
}

/// GET /api/admin/session — reachable only through the session gate, so a
/// 200 here means a session cookie is present.
pub async fn session() -> Json<serde_json::Value> {
    Json(json!({"authenticated": true}))
}
