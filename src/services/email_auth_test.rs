use super::*;

#[test]
fn normalize_email_accepts_basic_address() {
    assert_eq!(normalize_email("  USER@Example.edu "), Some("user@example.edu".to_owned()));
}

#[test]
fn normalize_email_rejects_invalid_values() {
    assert_eq!(normalize_email(""), None);
    assert_eq!(normalize_email("user"), None);
    assert_eq!(normalize_email("@example.edu"), None);
    assert_eq!(normalize_email("user@"), None);
    assert_eq!(normalize_email("a@b@c"), None);
}

#[test]
fn normalize_code_accepts_upper_and_normalizes() {
    let code = generate_access_code();
    assert_eq!(normalize_code(&code), Some(code.clone()));
    assert_eq!(normalize_code(" abc234 "), Some("ABC234".to_owned()));
}

#[test]
fn normalize_code_rejects_bad_shapes() {
    assert_eq!(normalize_code("abc23"), None);
    assert_eq!(normalize_code("abc2345"), None);
    assert_eq!(normalize_code("ABC1I0"), None);
    assert_eq!(normalize_code("ABC23!"), None);
}

#[test]
fn generate_access_code_shape() {
    let code = generate_access_code();
    assert_eq!(code.len(), 6);
    assert!(code.bytes().all(|c| CODE_ALPHABET.contains(&c)));
}

#[test]
fn hash_access_code_is_stable_hex() {
    let a = hash_access_code("ABC234");
    assert_eq!(a, hash_access_code("ABC234"));
    assert_ne!(a, hash_access_code("ABC235"));
    assert_eq!(a.len(), 64);
}

#[test]
fn display_name_prefers_supplied_name() {
    assert_eq!(display_name(Some("  Grace Hopper "), "gh@example.edu"), "Grace Hopper");
}

#[test]
fn display_name_falls_back_to_local_part() {
    assert_eq!(display_name(None, "gh@example.edu"), "gh");
    assert_eq!(display_name(Some("   "), "gh@example.edu"), "gh");
}

#[test]
fn parse_signup_role_accepts_known_roles() {
    assert_eq!(parse_signup_role(Some("student")).unwrap(), Some(Role::Student));
    assert_eq!(parse_signup_role(Some("company")).unwrap(), Some(Role::Company));
    assert_eq!(parse_signup_role(Some("placement_head")).unwrap(), Some(Role::PlacementHead));
}

#[test]
fn parse_signup_role_treats_blank_as_absent() {
    assert_eq!(parse_signup_role(None).unwrap(), None);
    assert_eq!(parse_signup_role(Some("  ")).unwrap(), None);
}

#[test]
fn parse_signup_role_rejects_unknown() {
    let err = parse_signup_role(Some("dean")).unwrap_err();
    assert!(matches!(err, EmailAuthError::InvalidRole(ref tag) if tag == "dean"));
}

#[test]
fn access_code_request_deserializes_optional_fields() {
    let req: AccessCodeRequest = serde_json::from_str(r#"{"email":"a@b.edu"}"#).unwrap();
    assert_eq!(req.email, "a@b.edu");
    assert!(req.full_name.is_none());
    assert!(req.role.is_none());
}

#[test]
fn render_template_injects_email_and_code() {
    let html = render_email_auth_template("user@example.edu", "ABC234");
    assert!(html.contains("user@example.edu"));
    assert!(html.contains("ABC234"));
    assert!(!html.contains("{{EMAIL}}"));
    assert!(!html.contains("{{CODE}}"));
}

// =============================================================================
// Live database
// =============================================================================

#[cfg(feature = "live-db-tests")]
async fn role_of(pool: &PgPool, email: &str) -> Option<String> {
    sqlx::query_scalar(
        r"SELECT r.role::text
          FROM user_roles r
          JOIN users u ON u.id = r.user_id
          WHERE u.email = $1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await
    .expect("role lookup should succeed")
}

#[cfg(feature = "live-db-tests")]
fn request(email: &str, role: Option<&str>) -> AccessCodeRequest {
    AccessCodeRequest { email: email.to_owned(), full_name: Some("Pat".into()), role: role.map(str::to_owned) }
}

#[cfg(feature = "live-db-tests")]
fn wrong_code_for(code: &str) -> &'static str {
    if code == "AAAAAA" { "BBBBBB" } else { "AAAAAA" }
}

#[cfg(feature = "live-db-tests")]
#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL/live Postgres"]
async fn requested_role_is_only_applied_after_verification() {
    let pool = crate::state::test_helpers::live_pool().await;
    let email = format!("pending-{}@example.edu", Uuid::new_v4());

    let issued = request_access_code(&pool, &request(&email.to_uppercase(), Some("company")))
        .await
        .expect("request should succeed");
    assert_eq!(issued.email, email, "issued for the normalized address");

    let users: i64 = sqlx::query_scalar("SELECT count(*) FROM users WHERE email = $1")
        .bind(&email)
        .fetch_one(&pool)
        .await
        .expect("count should succeed");
    assert_eq!(users, 0, "no account before verification");
    assert_eq!(role_of(&pool, &email).await, None);

    let user_id = verify_access_code(&pool, &email, &issued.code)
        .await
        .expect("verify should succeed");
    assert_eq!(role_of(&pool, &email).await.as_deref(), Some("company"));
    let company = profile::company_for_user(&pool, user_id)
        .await
        .expect("company profile should exist");
    assert_eq!(company.email, email);
}

#[cfg(feature = "live-db-tests")]
#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL/live Postgres"]
async fn role_is_assigned_once() {
    let pool = crate::state::test_helpers::live_pool().await;
    let email = format!("once-{}@example.edu", Uuid::new_v4());

    let first = request_access_code(&pool, &request(&email, Some("student")))
        .await
        .expect("request should succeed");
    let user_id = verify_access_code(&pool, &email, &first.code)
        .await
        .expect("verify should succeed");

    // An unverified request naming another role leaves the account alone.
    let second = request_access_code(&pool, &request(&email, Some("company")))
        .await
        .expect("request should succeed");
    assert_eq!(role_of(&pool, &email).await.as_deref(), Some("student"));

    // Verifying it signs the user in but does not replace the role.
    let again = verify_access_code(&pool, &email, &second.code)
        .await
        .expect("verify should succeed");
    assert_eq!(again, user_id);
    assert_eq!(role_of(&pool, &email).await.as_deref(), Some("student"));
    assert!(matches!(
        profile::company_for_user(&pool, user_id).await,
        Err(profile::ProfileError::NotFound(_))
    ));
}

#[cfg(feature = "live-db-tests")]
#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL/live Postgres"]
async fn code_is_burned_after_five_failed_attempts() {
    let pool = crate::state::test_helpers::live_pool().await;
    let email = format!("burn-{}@example.edu", Uuid::new_v4());

    let issued = request_access_code(&pool, &request(&email, None))
        .await
        .expect("request should succeed");
    let wrong = wrong_code_for(&issued.code);

    for _ in 0..MAX_FAILED_ATTEMPTS {
        let result = verify_access_code(&pool, &email, wrong).await;
        assert!(matches!(result, Err(EmailAuthError::VerificationFailed)));
    }

    let result = verify_access_code(&pool, &email, &issued.code).await;
    assert!(matches!(result, Err(EmailAuthError::VerificationFailed)));
}

#[cfg(feature = "live-db-tests")]
#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL/live Postgres"]
async fn correct_code_still_works_before_the_limit() {
    let pool = crate::state::test_helpers::live_pool().await;
    let email = format!("retry-{}@example.edu", Uuid::new_v4());

    let issued = request_access_code(&pool, &request(&email, None))
        .await
        .expect("request should succeed");
    let wrong = wrong_code_for(&issued.code);

    for _ in 1..MAX_FAILED_ATTEMPTS {
        assert!(verify_access_code(&pool, &email, wrong).await.is_err());
    }
    verify_access_code(&pool, &email, &issued.code)
        .await
        .expect("fifth try with the right code should succeed");
    assert_eq!(role_of(&pool, &email).await, None);
}
