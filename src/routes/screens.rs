//! Screen routes for the landing page, login and role dashboards.
//!
//! Dashboards are rendered as JSON documents; the gate decides whether a
//! screen renders, shows a loading placeholder, or redirects.

use axum::extract::State;
use axum::response::{IntoResponse, Json, Redirect, Response};
use serde_json::json;

use super::auth::CurrentSession;
use super::gate::guard_screen;
use super::status::dashboard_error_to_status;
use crate::gate::Role;
use crate::services::dashboard;
use crate::state::AppState;

/// `GET /`: landing screen. Signed-in users with a known role go straight
/// to their dashboard.
pub async fn index(current: CurrentSession) -> Response {
    if let Some(role) = current
        .user
        .as_ref()
        .and_then(|u| u.role.as_ref())
        .filter(|r| r.is_known())
    {
        return Redirect::temporary(role.home_route()).into_response();
    }

    Json(json!({
        "screen": "landing",
        "roles": ["student", "company", "placement_head"],
        "sign_in": "/auth",
    }))
    .into_response()
}

/// `GET /auth`: login screen.
pub async fn auth_screen(current: CurrentSession) -> Json<serde_json::Value> {
    Json(json!({
        "screen": "auth",
        "signed_in": current.user.is_some(),
        "request_code": "/api/auth/email/request-code",
        "verify_code": "/api/auth/email/verify-code",
        "roles": ["student", "company", "placement_head"],
    }))
}

/// `GET /student`
pub async fn student(State(state): State<AppState>, current: CurrentSession) -> Response {
    let user = match guard_screen(&state, current, &[Role::Student]) {
        Ok(user) => user,
        Err(response) => return response,
    };
    match dashboard::load_student(&state.pool, user.id).await {
        Ok(doc) => Json(doc).into_response(),
        Err(e) => dashboard_error_to_status(&e).into_response(),
    }
}

/// `GET /company`
pub async fn company(State(state): State<AppState>, current: CurrentSession) -> Response {
    let user = match guard_screen(&state, current, &[Role::Company]) {
        Ok(user) => user,
        Err(response) => return response,
    };
    match dashboard::load_company(&state.pool, user.id).await {
        Ok(doc) => Json(doc).into_response(),
        Err(e) => dashboard_error_to_status(&e).into_response(),
    }
}

/// `GET /placement-head`
pub async fn placement_head(State(state): State<AppState>, current: CurrentSession) -> Response {
    let user = match guard_screen(&state, current, &[Role::PlacementHead]) {
        Ok(user) => user,
        Err(response) => return response,
    };
    match dashboard::load_placement_head(&state.pool, user.id).await {
        Ok(doc) => Json(doc).into_response(),
        Err(e) => dashboard_error_to_status(&e).into_response(),
    }
}
