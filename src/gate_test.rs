use super::*;

fn signed_in(role: &str) -> Session {
    Session::authenticated("u1", Some(Role::from_tag(role)))
}

// =============================================================================
// evaluate: decision order
// =============================================================================

#[test]
fn loading_session_is_pending() {
    assert_eq!(evaluate(&Session::loading(), &[Role::Student]), Decision::Pending);
}

#[test]
fn loading_wins_over_every_other_field() {
    let session = Session { user_identity: Some("u1".into()), role: Some(Role::Company), loading: true };
    assert_eq!(evaluate(&session, &[Role::Student]), Decision::Pending);
    assert_eq!(evaluate(&session, &[]), Decision::Pending);
    assert_eq!(evaluate_with(GatePolicy::DenyUnresolved, &session, &[Role::Student]), Decision::Pending);
}

#[test]
fn anonymous_session_redirects_to_auth() {
    assert_eq!(evaluate(&Session::anonymous(), &[Role::Student]), Decision::Redirect("/auth"));
    assert_eq!(evaluate(&Session::anonymous(), &[]), Decision::Redirect("/auth"));
}

#[test]
fn role_without_identity_still_redirects_to_auth() {
    let session = Session { user_identity: None, role: Some(Role::Student), loading: false };
    assert_eq!(evaluate(&session, &[Role::Student]), Decision::Redirect("/auth"));
}

#[test]
fn matching_role_is_allowed() {
    assert_eq!(evaluate(&signed_in("student"), &[Role::Student]), Decision::Allow);
}

#[test]
fn role_in_multi_role_set_is_allowed() {
    let required = [Role::Company, Role::PlacementHead];
    assert_eq!(evaluate(&signed_in("placement_head"), &required), Decision::Allow);
    assert_eq!(evaluate(&signed_in("company"), &required), Decision::Allow);
}

#[test]
fn student_on_company_screen_goes_home() {
    assert_eq!(evaluate(&signed_in("student"), &[Role::Company]), Decision::Redirect("/student"));
}

#[test]
fn company_on_student_screen_goes_home() {
    assert_eq!(evaluate(&signed_in("company"), &[Role::Student]), Decision::Redirect("/company"));
}

#[test]
fn placement_head_on_student_screen_goes_home() {
    assert_eq!(evaluate(&signed_in("placement_head"), &[Role::Student]), Decision::Redirect("/placement-head"));
}

#[test]
fn unknown_role_falls_back_to_root() {
    assert_eq!(evaluate(&signed_in("unknown_role"), &[Role::Student]), Decision::Redirect("/"));
}

#[test]
fn empty_required_set_redirects_every_known_role_home() {
    assert_eq!(evaluate(&signed_in("student"), &[]), Decision::Redirect("/student"));
    assert_eq!(evaluate(&signed_in("company"), &[]), Decision::Redirect("/company"));
}

#[test]
fn unresolved_role_is_allowed_under_permissive_policy() {
    let session = Session::authenticated("u1", None);
    assert_eq!(evaluate(&session, &[Role::PlacementHead]), Decision::Allow);
}

#[test]
fn unresolved_role_is_sent_to_root_under_deny_policy() {
    let session = Session::authenticated("u1", None);
    assert_eq!(
        evaluate_with(GatePolicy::DenyUnresolved, &session, &[Role::PlacementHead]),
        Decision::Redirect("/")
    );
}

#[test]
fn deny_policy_does_not_change_resolved_roles() {
    let policy = GatePolicy::DenyUnresolved;
    assert_eq!(evaluate_with(policy, &signed_in("student"), &[Role::Student]), Decision::Allow);
    assert_eq!(evaluate_with(policy, &signed_in("student"), &[Role::Company]), Decision::Redirect("/student"));
    assert_eq!(evaluate_with(policy, &Session::anonymous(), &[Role::Company]), Decision::Redirect("/auth"));
}

#[test]
fn evaluation_is_repeatable() {
    let cases = [
        (Session::loading(), vec![Role::Student]),
        (Session::anonymous(), vec![Role::Company]),
        (signed_in("company"), vec![Role::Student]),
        (signed_in("student"), vec![Role::Student]),
        (Session::authenticated("u1", None), vec![]),
    ];
    for (session, required) in &cases {
        let first = evaluate(session, required);
        for _ in 0..5 {
            assert_eq!(evaluate(session, required), first);
        }
    }
}

#[test]
fn is_allowed_only_for_allow() {
    assert!(Decision::Allow.is_allowed());
    assert!(!Decision::Pending.is_allowed());
    assert!(!Decision::Redirect("/auth").is_allowed());
}

// =============================================================================
// Role
// =============================================================================

#[test]
fn role_home_routes() {
    assert_eq!(Role::Student.home_route(), "/student");
    assert_eq!(Role::Company.home_route(), "/company");
    assert_eq!(Role::PlacementHead.home_route(), "/placement-head");
    assert_eq!(Role::Unrecognized("admin".into()).home_route(), "/");
}

#[test]
fn role_from_tag_parses_known_and_keeps_unknown() {
    assert_eq!(Role::from_tag("student"), Role::Student);
    assert_eq!(Role::from_tag(" company "), Role::Company);
    assert_eq!(Role::from_tag("placement_head"), Role::PlacementHead);
    assert_eq!(Role::from_tag("Student"), Role::Unrecognized("Student".into()));
}

#[test]
fn role_known_rejects_unrecognized() {
    assert_eq!(Role::known("company"), Some(Role::Company));
    assert_eq!(Role::known("recruiter"), None);
    assert_eq!(Role::known(""), None);
}

#[test]
fn role_as_str_matches_tag() {
    for tag in ["student", "company", "placement_head", "alumni"] {
        assert_eq!(Role::from_tag(tag).as_str(), tag);
    }
}

#[test]
fn role_serializes_as_plain_tag() {
    assert_eq!(serde_json::to_string(&Role::PlacementHead).unwrap(), r#""placement_head""#);
    let role: Role = serde_json::from_str(r#""intern""#).unwrap();
    assert_eq!(role, Role::Unrecognized("intern".into()));
}

// =============================================================================
// Session / GatePolicy
// =============================================================================

#[test]
fn session_deserializes_with_defaults() {
    let session: Session = serde_json::from_str(r#"{"user_identity":"abc"}"#).unwrap();
    assert_eq!(session.user_identity.as_deref(), Some("abc"));
    assert!(session.role.is_none());
    assert!(!session.loading);
    assert!(session.is_authenticated());
}

#[test]
fn session_blank_role_is_unresolved() {
    let cases = [
        r#"{"user_identity":"abc","role":""}"#,
        r#"{"user_identity":"abc","role":"  "}"#,
        r#"{"user_identity":"abc","role":null}"#,
    ];
    for raw in cases {
        let session: Session = serde_json::from_str(raw).unwrap();
        assert!(session.role.is_none(), "{raw}");
        assert_eq!(evaluate(&session, &[Role::Student]), Decision::Allow, "{raw}");
    }
}

#[test]
fn session_unknown_role_is_kept() {
    let session: Session = serde_json::from_str(r#"{"user_identity":"abc","role":"alumni"}"#).unwrap();
    assert_eq!(session.role, Some(Role::Unrecognized("alumni".into())));
    assert_eq!(evaluate(&session, &[Role::Student]), Decision::Redirect("/"));
}

#[test]
fn gate_policy_parse() {
    assert_eq!(GatePolicy::parse("permissive"), Some(GatePolicy::Permissive));
    assert_eq!(GatePolicy::parse(" DENY_UNRESOLVED "), Some(GatePolicy::DenyUnresolved));
    assert_eq!(GatePolicy::parse("strict"), Some(GatePolicy::DenyUnresolved));
    assert_eq!(GatePolicy::parse("maybe"), None);
    assert_eq!(GatePolicy::default(), GatePolicy::Permissive);
}
