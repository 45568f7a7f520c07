use super::*;
use crate::net::types::Method;
use crate::test_support::{FakeBackend, demo_user};

fn signed_in_store() -> SessionStore {
    let store = SessionStore::new();
    store.set_session("tok-123".to_owned(), demo_user());
    store
}

// =============================================================================
// authorize
// =============================================================================

#[test]
fn login_request_never_gets_authorization_header() {
    let authorizer = RequestAuthorizer::new(signed_in_store());
    let request = ApiRequest::new(Method::Post, "http://localhost:3000/api/auth/login");
    let authorized = authorizer.authorize(&request);
    assert_eq!(authorized.header(AUTHORIZATION), None);
    assert_eq!(authorized, request);
}

#[test]
fn register_request_never_gets_authorization_header() {
    let authorizer = RequestAuthorizer::new(signed_in_store());
    let request = ApiRequest::new(Method::Post, "http://localhost:3000/api/auth/register");
    assert_eq!(authorizer.authorize(&request).header(AUTHORIZATION), None);
}

#[test]
fn other_request_gets_bearer_token() {
    let authorizer = RequestAuthorizer::new(signed_in_store());
    let request = ApiRequest::new(Method::Get, "http://localhost:3000/api/projects");
    let authorized = authorizer.authorize(&request);
    assert_eq!(authorized.header(AUTHORIZATION), Some("Bearer tok-123"));
    // The caller's request is untouched.
    assert_eq!(request.header(AUTHORIZATION), None);
}

#[test]
fn other_request_without_token_is_forwarded_unmodified() {
    let authorizer = RequestAuthorizer::new(SessionStore::new());
    let request = ApiRequest::new(Method::Post, "http://localhost:3000/auth/refresh");
    assert_eq!(authorizer.authorize(&request), request);
}

#[test]
fn existing_authorization_header_is_replaced() {
    let authorizer = RequestAuthorizer::new(signed_in_store());
    let mut request = ApiRequest::new(Method::Get, "http://localhost:3000/api/me");
    request.set_header("authorization", "Basic Zm9vOmJhcg==");
    let authorized = authorizer.authorize(&request);
    assert_eq!(authorized.headers.len(), 1);
    assert_eq!(authorized.header(AUTHORIZATION), Some("Bearer tok-123"));
}

#[test]
fn public_match_is_substring_based() {
    let authorizer = RequestAuthorizer::new(SessionStore::new());
    assert!(authorizer.is_public("https://x/v2/auth/login?next=/"));
    assert!(!authorizer.is_public("https://x/auth/logout"));
    assert!(!authorizer.is_public("https://x/auth/signin"));
}

#[test]
fn custom_public_endpoints_override_defaults() {
    let authorizer = RequestAuthorizer::with_public_endpoints(signed_in_store(), ["/auth/signin"]);
    assert!(authorizer.is_public("http://x/api/auth/signin"));
    assert!(!authorizer.is_public("http://x/api/auth/login"));
}

// =============================================================================
// AuthorizingTransport
// =============================================================================

#[tokio::test]
async fn transport_forwards_authorized_copy() {
    let backend = FakeBackend::new();
    let transport = AuthorizingTransport::new(backend.clone(), RequestAuthorizer::new(signed_in_store()));

    transport
        .send(ApiRequest::new(Method::Post, "http://localhost:3000/auth/logout"))
        .await
        .unwrap();
    transport
        .send(ApiRequest::new(Method::Post, "http://localhost:3000/api/auth/login"))
        .await
        .unwrap();

    let sent = backend.requests();
    assert_eq!(sent[0].header(AUTHORIZATION), Some("Bearer tok-123"));
    assert_eq!(sent[1].header(AUTHORIZATION), None);
}

#[tokio::test]
async fn transport_reads_token_at_send_time() {
    let backend = FakeBackend::new();
    let session = SessionStore::new();
    let transport = AuthorizingTransport::new(backend.clone(), RequestAuthorizer::new(session));

    transport
        .send(ApiRequest::new(Method::Get, "http://localhost:3000/api/projects"))
        .await
        .unwrap();
    session.set_session("late".to_owned(), demo_user());
    transport
        .send(ApiRequest::new(Method::Get, "http://localhost:3000/api/projects"))
        .await
        .unwrap();

    let sent = backend.requests();
    assert_eq!(sent[0].header(AUTHORIZATION), None);
    assert_eq!(sent[1].header(AUTHORIZATION), Some("Bearer late"));
}
