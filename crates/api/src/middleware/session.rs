//! Admin session gate.
//!
//! The gate inspects the session cookie's mere presence, not its validity:
//! credential verification happens once, in the sign-in handler. Requests
//! without a cookie are turned away from admin routes; requests that
//! already carry one are redirected away from the sign-in route.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::app::AppState;
use crate::error::ApiError;
use crate::services::cookies::SessionCookies;

/// Middleware guarding admin routes: reject requests without a session
/// cookie.
pub async fn require_session(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let cookies = SessionCookies::new(state.config.session.clone());
    if cookies.extract_session(req.headers()).is_some() {
        next.run(req).await
    } else {
        ApiError::Unauthorized("Sign in required".into()).into_response()
    }
}

/// Middleware on the sign-in route: requests that already carry a session
/// cookie are redirected to the admin session endpoint.
pub async fn redirect_signed_in(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let cookies = SessionCookies::new(state.config.session.clone());
    if cookies.extract_session(req.headers()).is_some() {
        Redirect::to("/api/admin/session").into_response()
    } else {
        next.run(req).await
    }
}
