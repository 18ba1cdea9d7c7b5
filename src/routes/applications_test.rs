use super::*;

fn status_of(raw: &str) -> Result<ApplicationStatus, StatusCode> {
    let body: StatusBody = serde_json::from_value(serde_json::json!({ "status": raw })).unwrap();
    body.status.parse::<ApplicationStatus>().map_err(|e| application_error_to_status(&e))
}

#[test]
fn known_status_tags_parse() {
    assert_eq!(status_of("interview_scheduled"), Ok(ApplicationStatus::InterviewScheduled));
    assert_eq!(status_of(" rejected "), Ok(ApplicationStatus::Rejected));
}

#[test]
fn unknown_status_tag_is_bad_request() {
    assert_eq!(status_of("hired"), Err(StatusCode::BAD_REQUEST));
    assert_eq!(status_of(""), Err(StatusCode::BAD_REQUEST));
}

#[test]
fn status_body_requires_status_field() {
    assert!(serde_json::from_str::<StatusBody>("{}").is_err());
}

#[test]
fn reviewers_are_companies_and_placement_heads() {
    assert!(REVIEWERS.contains(&Role::Company));
    assert!(REVIEWERS.contains(&Role::PlacementHead));
    assert!(!REVIEWERS.contains(&Role::Student));
}
