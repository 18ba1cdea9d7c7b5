//! Service error to HTTP status mapping.
//!
//! Database failures are logged here so handlers can stay on the happy path.

use axum::http::StatusCode;
use tracing::error;

use crate::services::announcement::AnnouncementError;
use crate::services::application::ApplicationError;
use crate::services::dashboard::DashboardError;
use crate::services::email_auth::EmailAuthError;
use crate::services::job::JobError;
use crate::services::profile::ProfileError;

fn internal(err: &sqlx::Error) -> StatusCode {
    error!(error = %err, "database error");
    StatusCode::INTERNAL_SERVER_ERROR
}

pub(crate) fn profile_error_to_status(err: &ProfileError) -> StatusCode {
    match err {
        ProfileError::NotFound(_) => StatusCode::NOT_FOUND,
        ProfileError::Database(e) => internal(e),
    }
}

pub(crate) fn job_error_to_status(err: &JobError) -> StatusCode {
    match err {
        JobError::MissingTitle => StatusCode::BAD_REQUEST,
        JobError::NotFound(_) => StatusCode::NOT_FOUND,
        JobError::Database(e) => internal(e),
    }
}

pub(crate) fn application_error_to_status(err: &ApplicationError) -> StatusCode {
    match err {
        ApplicationError::InvalidStatus(_) => StatusCode::BAD_REQUEST,
        ApplicationError::NotFound(_) | ApplicationError::JobNotFound(_) => StatusCode::NOT_FOUND,
        ApplicationError::JobClosed(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ApplicationError::AlreadyApplied(_) => StatusCode::CONFLICT,
        ApplicationError::Database(e) => internal(e),
    }
}

pub(crate) fn announcement_error_to_status(err: &AnnouncementError) -> StatusCode {
    match err {
        AnnouncementError::MissingField | AnnouncementError::InvalidAudience(_) => StatusCode::BAD_REQUEST,
        AnnouncementError::Database(e) => internal(e),
    }
}

pub(crate) fn dashboard_error_to_status(err: &DashboardError) -> StatusCode {
    match err {
        DashboardError::Profile(e) => profile_error_to_status(e),
        DashboardError::Job(e) => job_error_to_status(e),
        DashboardError::Application(e) => application_error_to_status(e),
        DashboardError::Announcement(e) => announcement_error_to_status(e),
    }
}

pub(crate) fn email_auth_error_to_status(err: &EmailAuthError) -> StatusCode {
    match err {
        EmailAuthError::InvalidEmail | EmailAuthError::InvalidCode | EmailAuthError::InvalidRole(_) => {
            StatusCode::BAD_REQUEST
        }
        EmailAuthError::VerificationFailed => StatusCode::UNAUTHORIZED,
        EmailAuthError::EmailDelivery(_) => StatusCode::BAD_GATEWAY,
        EmailAuthError::Db(e) => internal(e),
    }
}

#[cfg(test)]
#[path = "status_test.rs"]
mod tests;
