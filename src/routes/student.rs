//! Student API: skills and job applications.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use uuid::Uuid;

use super::auth::CurrentSession;
use super::gate::guard_api;
use super::status::{application_error_to_status, job_error_to_status, profile_error_to_status};
use crate::gate::Role;
use crate::services::application::{self, StudentApplication};
use crate::services::job::{self, JobListing};
use crate::services::profile;
use crate::state::AppState;

const STUDENT: &[Role] = &[Role::Student];

#[derive(Deserialize)]
pub struct SkillBody {
    pub skill: String,
}

/// `POST /api/student/skills`: add a skill to the caller's profile.
pub async fn add_skill(
    State(state): State<AppState>,
    current: CurrentSession,
    Json(body): Json<SkillBody>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let user = guard_api(&state, current, STUDENT)?;
    let skills = profile::add_skill(&state.pool, user.id, &body.skill)
        .await
        .map_err(|e| profile_error_to_status(&e))?;
    Ok(Json(serde_json::json!({ "skills": skills })))
}

/// `DELETE /api/student/skills`: remove a skill from the caller's profile.
pub async fn remove_skill(
    State(state): State<AppState>,
    current: CurrentSession,
    Json(body): Json<SkillBody>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let user = guard_api(&state, current, STUDENT)?;
    let skills = profile::remove_skill(&state.pool, user.id, &body.skill)
        .await
        .map_err(|e| profile_error_to_status(&e))?;
    Ok(Json(serde_json::json!({ "skills": skills })))
}

/// `GET /api/student/jobs`: active postings.
pub async fn list_jobs(
    State(state): State<AppState>,
    current: CurrentSession,
) -> Result<Json<Vec<JobListing>>, StatusCode> {
    guard_api(&state, current, STUDENT)?;
    let jobs = job::list_active_jobs(&state.pool)
        .await
        .map_err(|e| job_error_to_status(&e))?;
    Ok(Json(jobs))
}

/// `GET /api/student/applications`: the caller's applications.
pub async fn list_applications(
    State(state): State<AppState>,
    current: CurrentSession,
) -> Result<Json<Vec<StudentApplication>>, StatusCode> {
    let user = guard_api(&state, current, STUDENT)?;
    let profile = profile::student_for_user(&state.pool, user.id)
        .await
        .map_err(|e| profile_error_to_status(&e))?;
    let rows = application::list_for_student(&state.pool, profile.id)
        .await
        .map_err(|e| application_error_to_status(&e))?;
    Ok(Json(rows))
}

/// `POST /api/student/jobs/:id/apply`: apply to an active posting.
pub async fn apply(
    State(state): State<AppState>,
    current: CurrentSession,
    Path(job_id): Path<Uuid>,
) -> Result<(StatusCode, Json<serde_json::Value>), StatusCode> {
    let user = guard_api(&state, current, STUDENT)?;
    let profile = profile::student_for_user(&state.pool, user.id)
        .await
        .map_err(|e| profile_error_to_status(&e))?;
    let id = application::apply(&state.pool, profile.id, job_id)
        .await
        .map_err(|e| application_error_to_status(&e))?;
    Ok((StatusCode::CREATED, Json(serde_json::json!({ "id": id }))))
}
