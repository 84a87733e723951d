use super::*;

fn session(access: Option<&str>, refresh: Option<&str>) -> Session {
    Session::new(access.map(ToOwned::to_owned), refresh.map(ToOwned::to_owned))
}

#[test]
fn authorization_formats_bearer() {
    assert_eq!(session(Some("abc"), None).authorization().as_deref(), Some("Bearer abc"));
    assert_eq!(session(None, None).authorization(), None);
}

#[test]
fn new_drops_blank_tokens() {
    let s = session(Some("  "), Some(""));
    assert_eq!(s, Session::default());
    assert!(!s.can_refresh());
}

#[test]
fn success_is_accepted_on_first_attempt() {
    assert_eq!(AuthAttempt::Initial.next_step(200, true), AuthStep::Accept);
    assert_eq!(AuthAttempt::Initial.next_step(404, true), AuthStep::Accept);
}

#[test]
fn first_401_with_refresh_token_refreshes() {
    assert_eq!(AuthAttempt::Initial.next_step(401, true), AuthStep::RefreshAndRetry);
}

#[test]
fn first_401_without_refresh_token_fails() {
    assert_eq!(AuthAttempt::Initial.next_step(401, false), AuthStep::Unauthorized);
}

#[test]
fn second_401_fails_even_with_refresh_token() {
    assert_eq!(AuthAttempt::Retry.next_step(401, true), AuthStep::Unauthorized);
}

#[test]
fn retry_accepts_any_other_status() {
    assert_eq!(AuthAttempt::Retry.next_step(200, true), AuthStep::Accept);
    assert_eq!(AuthAttempt::Retry.next_step(500, true), AuthStep::Accept);
}

#[test]
fn sequence_is_finite() {
    // Walk the sequence with a server that always answers 401.
    let mut attempt = AuthAttempt::Initial;
    let mut sends = 0;
    loop {
        sends += 1;
        match attempt.next_step(401, true) {
            AuthStep::RefreshAndRetry => attempt = AuthAttempt::Retry,
            AuthStep::Accept | AuthStep::Unauthorized => break,
        }
    }
    assert_eq!(sends, 2);
}

#[test]
fn apply_keeps_old_refresh_token_when_absent() {
    let mut s = session(Some("old"), Some("r1"));
    s.apply(RefreshedTokens { access_token: "new".to_owned(), refresh_token: None });
    assert_eq!(s.access_token.as_deref(), Some("new"));
    assert_eq!(s.refresh_token.as_deref(), Some("r1"));

    s.apply(RefreshedTokens { access_token: "newer".to_owned(), refresh_token: Some("r2".to_owned()) });
    assert_eq!(s.refresh_token.as_deref(), Some("r2"));
}

#[test]
fn refresh_request_serializes_camel_case() {
    let body = session(None, Some("r1")).refresh_request().unwrap();
    assert_eq!(serde_json::to_value(body).unwrap(), serde_json::json!({"refreshToken": "r1"}));
}

#[test]
fn clear_forgets_tokens() {
    let mut s = session(Some("a"), Some("r"));
    s.clear();
    assert_eq!(s, Session::default());
}
