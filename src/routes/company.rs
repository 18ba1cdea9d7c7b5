//! Company API: job postings and applicant review.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use uuid::Uuid;

use super::auth::CurrentSession;
use super::gate::guard_api;
use super::status::{application_error_to_status, job_error_to_status, profile_error_to_status};
use crate::gate::Role;
use crate::services::application::{self, CompanyApplication};
use crate::services::job::{self, JobForm, JobPosting};
use crate::services::profile::{self, CompanyProfile};
use crate::state::AppState;

const COMPANY: &[Role] = &[Role::Company];

async fn own_profile(state: &AppState, current: CurrentSession) -> Result<CompanyProfile, StatusCode> {
    let user = guard_api(state, current, COMPANY)?;
    profile::company_for_user(&state.pool, user.id)
        .await
        .map_err(|e| profile_error_to_status(&e))
}

/// `GET /api/company/jobs`: the caller's postings.
pub async fn list_jobs(
    State(state): State<AppState>,
    current: CurrentSession,
) -> Result<Json<Vec<JobPosting>>, StatusCode> {
    let company = own_profile(&state, current).await?;
    let jobs = job::list_company_jobs(&state.pool, company.id)
        .await
        .map_err(|e| job_error_to_status(&e))?;
    Ok(Json(jobs))
}

/// `POST /api/company/jobs`: post a new opening.
pub async fn create_job(
    State(state): State<AppState>,
    current: CurrentSession,
    Json(form): Json<JobForm>,
) -> Result<(StatusCode, Json<JobPosting>), StatusCode> {
    let company = own_profile(&state, current).await?;
    let new_job = form.parse().map_err(|e| job_error_to_status(&e))?;
    let row = job::create_job(&state.pool, company.id, &new_job)
        .await
        .map_err(|e| job_error_to_status(&e))?;
    Ok((StatusCode::CREATED, Json(row)))
}

#[derive(Deserialize)]
pub struct UpdateJobBody {
    pub is_active: bool,
}

/// `PATCH /api/company/jobs/:id`: open or close one of the caller's postings.
pub async fn update_job(
    State(state): State<AppState>,
    current: CurrentSession,
    Path(job_id): Path<Uuid>,
    Json(body): Json<UpdateJobBody>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let company = own_profile(&state, current).await?;
    job::set_job_active(&state.pool, company.id, job_id, body.is_active)
        .await
        .map_err(|e| job_error_to_status(&e))?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

/// `GET /api/company/applications`: applications to the caller's postings.
pub async fn list_applications(
    State(state): State<AppState>,
    current: CurrentSession,
) -> Result<Json<Vec<CompanyApplication>>, StatusCode> {
    let company = own_profile(&state, current).await?;
    let rows = application::list_for_company(&state.pool, company.id)
        .await
        .map_err(|e| application_error_to_status(&e))?;
    Ok(Json(rows))
}
