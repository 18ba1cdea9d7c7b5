//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Role dashboards (`/student`, `/company`, `/placement-head`) and the JSON
//! API share one Axum router. Every protected handler runs the access gate
//! first; screens answer with redirects, API endpoints with status codes.

pub mod announcements;
pub mod applications;
pub mod auth;
pub mod company;
pub mod gate;
pub mod placement_head;
pub mod screens;
pub mod status;
pub mod student;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, patch, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(screens::index))
        .route("/auth", get(screens::auth_screen))
        .route("/student", get(screens::student))
        .route("/company", get(screens::company))
        .route("/placement-head", get(screens::placement_head))
        .route("/api/gate/evaluate", post(gate::evaluate))
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/email/request-code", post(auth::request_email_code))
        .route("/api/auth/email/verify-code", post(auth::verify_email_code))
        .route(
            "/api/student/skills",
            post(student::add_skill).delete(student::remove_skill),
        )
        .route("/api/student/jobs", get(student::list_jobs))
        .route("/api/student/jobs/{id}/apply", post(student::apply))
        .route("/api/student/applications", get(student::list_applications))
        .route("/api/company/jobs", get(company::list_jobs).post(company::create_job))
        .route("/api/company/jobs/{id}", patch(company::update_job))
        .route("/api/company/applications", get(company::list_applications))
        .route("/api/applications/{id}/status", patch(applications::update_status))
        .route("/api/placement-head/students", get(placement_head::list_students))
        .route("/api/placement-head/students/{id}/verify", patch(placement_head::verify_student))
        .route("/api/placement-head/students/{id}/placed", patch(placement_head::mark_placed))
        .route("/api/placement-head/companies", get(placement_head::list_companies))
        .route("/api/placement-head/companies/{id}/verify", patch(placement_head::verify_company))
        .route("/api/placement-head/jobs", get(placement_head::list_jobs))
        .route("/api/placement-head/applications", get(placement_head::list_applications))
        .route(
            "/api/announcements",
            get(announcements::list).post(announcements::create),
        )
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "router_test.rs"]
mod tests;
