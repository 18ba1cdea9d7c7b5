//! Placement-office API: oversight lists and verification.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use uuid::Uuid;

use super::auth::CurrentSession;
use super::gate::guard_api;
use super::status::{application_error_to_status, job_error_to_status, profile_error_to_status};
use crate::gate::Role;
use crate::services::application::{self, ApplicationOverview};
use crate::services::job::{self, JobListing};
use crate::services::profile::{self, CompanyProfile, StudentProfile};
use crate::state::AppState;

const PLACEMENT_HEAD: &[Role] = &[Role::PlacementHead];

/// `GET /api/placement-head/students`
pub async fn list_students(
    State(state): State<AppState>,
    current: CurrentSession,
) -> Result<Json<Vec<StudentProfile>>, StatusCode> {
    guard_api(&state, current, PLACEMENT_HEAD)?;
    let rows = profile::list_students(&state.pool)
        .await
        .map_err(|e| profile_error_to_status(&e))?;
    Ok(Json(rows))
}

/// `GET /api/placement-head/companies`
pub async fn list_companies(
    State(state): State<AppState>,
    current: CurrentSession,
) -> Result<Json<Vec<CompanyProfile>>, StatusCode> {
    guard_api(&state, current, PLACEMENT_HEAD)?;
    let rows = profile::list_companies(&state.pool)
        .await
        .map_err(|e| profile_error_to_status(&e))?;
    Ok(Json(rows))
}

/// `GET /api/placement-head/jobs`
pub async fn list_jobs(
    State(state): State<AppState>,
    current: CurrentSession,
) -> Result<Json<Vec<JobListing>>, StatusCode> {
    guard_api(&state, current, PLACEMENT_HEAD)?;
    let rows = job::list_all_jobs(&state.pool)
        .await
        .map_err(|e| job_error_to_status(&e))?;
    Ok(Json(rows))
}

/// `GET /api/placement-head/applications`
pub async fn list_applications(
    State(state): State<AppState>,
    current: CurrentSession,
) -> Result<Json<Vec<ApplicationOverview>>, StatusCode> {
    guard_api(&state, current, PLACEMENT_HEAD)?;
    let rows = application::list_all(&state.pool)
        .await
        .map_err(|e| application_error_to_status(&e))?;
    Ok(Json(rows))
}

#[derive(Deserialize)]
pub struct VerifyBody {
    pub verified: bool,
}

#[derive(Deserialize)]
pub struct PlacedBody {
    pub placed: bool,
}

/// `PATCH /api/placement-head/students/:id/verify`
pub async fn verify_student(
    State(state): State<AppState>,
    current: CurrentSession,
    Path(profile_id): Path<Uuid>,
    Json(body): Json<VerifyBody>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    guard_api(&state, current, PLACEMENT_HEAD)?;
    profile::set_student_verified(&state.pool, profile_id, body.verified)
        .await
        .map_err(|e| profile_error_to_status(&e))?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

/// `PATCH /api/placement-head/students/:id/placed`
pub async fn mark_placed(
    State(state): State<AppState>,
    current: CurrentSession,
    Path(profile_id): Path<Uuid>,
    Json(body): Json<PlacedBody>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    guard_api(&state, current, PLACEMENT_HEAD)?;
    profile::set_student_placed(&state.pool, profile_id, body.placed)
        .await
        .map_err(|e| profile_error_to_status(&e))?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

/// `PATCH /api/placement-head/companies/:id/verify`
pub async fn verify_company(
    State(state): State<AppState>,
    current: CurrentSession,
    Path(profile_id): Path<Uuid>,
    Json(body): Json<VerifyBody>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    guard_api(&state, current, PLACEMENT_HEAD)?;
    profile::set_company_verified(&state.pool, profile_id, body.verified)
        .await
        .map_err(|e| profile_error_to_status(&e))?;
    Ok(Json(serde_json::json!({ "ok": true })))
}
