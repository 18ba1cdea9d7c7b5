//! Application status updates shared by companies and the placement office.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use uuid::Uuid;

use super::auth::CurrentSession;
use super::gate::guard_api;
use super::status::{application_error_to_status, profile_error_to_status};
use crate::gate::Role;
use crate::services::application::{self, ApplicationStatus, StatusActor};
use crate::services::profile;
use crate::state::AppState;

const REVIEWERS: &[Role] = &[Role::Company, Role::PlacementHead];

#[derive(Debug, Deserialize)]
pub struct StatusBody {
    pub status: String,
}

/// `PATCH /api/applications/:id/status`
pub async fn update_status(
    State(state): State<AppState>,
    current: CurrentSession,
    Path(application_id): Path<Uuid>,
    Json(body): Json<StatusBody>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let user = guard_api(&state, current, REVIEWERS)?;
    let status = body
        .status
        .parse::<ApplicationStatus>()
        .map_err(|e| application_error_to_status(&e))?;

    let actor = match user.role {
        Some(Role::PlacementHead) => StatusActor::PlacementHead,
        _ => {
            let company = profile::company_for_user(&state.pool, user.id)
                .await
                .map_err(|e| profile_error_to_status(&e))?;
            StatusActor::Company(company.id)
        }
    };

    application::update_status(&state.pool, actor, application_id, status)
        .await
        .map_err(|e| application_error_to_status(&e))?;
    Ok(Json(serde_json::json!({ "ok": true, "status": status })))
}

#[cfg(test)]
#[path = "applications_test.rs"]
mod tests;
