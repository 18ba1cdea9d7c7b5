//! Announcement routes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;

use super::auth::{AuthUser, CurrentSession};
use super::gate::guard_api;
use super::status::announcement_error_to_status;
use crate::gate::Role;
use crate::services::announcement::{self, Announcement, AnnouncementBody};
use crate::state::AppState;

/// `GET /api/announcements`: active announcements for the caller's role.
/// Any signed-in user may read; an unresolved role sees only broadcasts.
pub async fn list(State(state): State<AppState>, auth: AuthUser) -> Result<Json<Vec<Announcement>>, StatusCode> {
    let rows = announcement::list_visible(&state.pool, auth.user.role.as_ref())
        .await
        .map_err(|e| announcement_error_to_status(&e))?;
    Ok(Json(rows))
}

/// `POST /api/announcements`: publish (placement heads only).
pub async fn create(
    State(state): State<AppState>,
    current: CurrentSession,
    Json(body): Json<AnnouncementBody>,
) -> Result<(StatusCode, Json<Announcement>), StatusCode> {
    let user = guard_api(&state, current, &[Role::PlacementHead])?;
    let new = body.parse().map_err(|e| announcement_error_to_status(&e))?;
    let row = announcement::create(&state.pool, user.id, &new)
        .await
        .map_err(|e| announcement_error_to_status(&e))?;
    Ok((StatusCode::CREATED, Json(row)))
}
