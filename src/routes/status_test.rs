use super::*;
use uuid::Uuid;

#[test]
fn profile_errors() {
    assert_eq!(profile_error_to_status(&ProfileError::NotFound(Uuid::nil())), StatusCode::NOT_FOUND);
    assert_eq!(
        profile_error_to_status(&ProfileError::Database(sqlx::Error::RowNotFound)),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[test]
fn job_errors() {
    assert_eq!(job_error_to_status(&JobError::MissingTitle), StatusCode::BAD_REQUEST);
    assert_eq!(job_error_to_status(&JobError::NotFound(Uuid::nil())), StatusCode::NOT_FOUND);
}

#[test]
fn application_errors() {
    let id = Uuid::nil();
    assert_eq!(
        application_error_to_status(&ApplicationError::InvalidStatus("x".into())),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(application_error_to_status(&ApplicationError::NotFound(id)), StatusCode::NOT_FOUND);
    assert_eq!(application_error_to_status(&ApplicationError::JobNotFound(id)), StatusCode::NOT_FOUND);
    assert_eq!(application_error_to_status(&ApplicationError::JobClosed(id)), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(application_error_to_status(&ApplicationError::AlreadyApplied(id)), StatusCode::CONFLICT);
}

#[test]
fn announcement_errors() {
    assert_eq!(announcement_error_to_status(&AnnouncementError::MissingField), StatusCode::BAD_REQUEST);
    assert_eq!(
        announcement_error_to_status(&AnnouncementError::InvalidAudience("x".into())),
        StatusCode::BAD_REQUEST
    );
}

#[test]
fn dashboard_errors_delegate() {
    let err = DashboardError::Profile(ProfileError::NotFound(Uuid::nil()));
    assert_eq!(dashboard_error_to_status(&err), StatusCode::NOT_FOUND);
    let err = DashboardError::Job(JobError::Database(sqlx::Error::PoolTimedOut));
    assert_eq!(dashboard_error_to_status(&err), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn email_auth_errors() {
    assert_eq!(email_auth_error_to_status(&EmailAuthError::InvalidEmail), StatusCode::BAD_REQUEST);
    assert_eq!(email_auth_error_to_status(&EmailAuthError::InvalidCode), StatusCode::BAD_REQUEST);
    assert_eq!(email_auth_error_to_status(&EmailAuthError::InvalidRole("x".into())), StatusCode::BAD_REQUEST);
    assert_eq!(email_auth_error_to_status(&EmailAuthError::VerificationFailed), StatusCode::UNAUTHORIZED);
    assert_eq!(
        email_auth_error_to_status(&EmailAuthError::EmailDelivery("down".into())),
        StatusCode::BAD_GATEWAY
    );
}
