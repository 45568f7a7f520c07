use super::*;
use crate::test_support::{DEMO_LOGIN, DEMO_PASSWORD, FakeBackend};

fn client(backend: &Rc<FakeBackend>) -> ApiClient {
    ApiClient::new(Endpoints::default(), backend.clone())
}

fn demo_credentials() -> Credentials {
    Credentials { login: DEMO_LOGIN.to_owned(), password: DEMO_PASSWORD.to_owned() }
}

// =============================================================================
// Endpoints
// =============================================================================

#[test]
fn url_joins_base_and_path() {
    let endpoints = Endpoints { base_url: "http://api.test/".to_owned(), ..Endpoints::default() };
    assert_eq!(endpoints.url("/api/auth/login"), "http://api.test/api/auth/login");
    assert_eq!(endpoints.url("auth/refresh"), "http://api.test/auth/refresh");
}

#[test]
fn default_endpoints_match_backend_contract() {
    let endpoints = Endpoints::default();
    assert_eq!(endpoints.base_url, "http://localhost:3000");
    assert_eq!(endpoints.login, "/api/auth/login");
    assert_eq!(endpoints.register, "/api/auth/register");
    assert_eq!(endpoints.refresh, "/auth/refresh");
    assert_eq!(endpoints.logout, "/auth/logout");
}

// =============================================================================
// error_message
// =============================================================================

#[test]
fn error_message_prefers_message_then_error_field() {
    assert_eq!(error_message(&json!({ "message": "nope", "error": "x" })), "nope");
    assert_eq!(error_message(&json!({ "error": "bad" })), "bad");
    assert_eq!(error_message(&json!("plain")), "plain");
    assert_eq!(error_message(&Value::Null), "");
}

// =============================================================================
// Calls
// =============================================================================

#[tokio::test]
async fn login_posts_credentials_and_decodes_response() {
    let backend = FakeBackend::new();
    let response = client(&backend).login(&demo_credentials()).await.unwrap();
    assert_eq!(response.user.email, DEMO_LOGIN);
    assert!(!response.token.is_empty());

    let sent = backend.last_request().unwrap();
    assert_eq!(sent.method, Method::Post);
    assert_eq!(sent.url, "http://localhost:3000/api/auth/login");
    assert_eq!(sent.body, Some(json!({ "login": DEMO_LOGIN, "password": DEMO_PASSWORD })));
}

#[tokio::test]
async fn login_with_wrong_password_is_invalid_credentials() {
    let backend = FakeBackend::new();
    let creds = Credentials { login: DEMO_LOGIN.to_owned(), password: "wrong".to_owned() };
    let err = client(&backend).login(&creds).await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
}

#[tokio::test]
async fn register_conflict_is_rejected_with_server_message() {
    let backend = FakeBackend::new();
    let data = RegisterRequest {
        email: "t@example.com".to_owned(),
        login: "taken".to_owned(),
        password: "secret1".to_owned(),
    };
    let err = client(&backend).register(&data).await.unwrap_err();
    match err {
        AuthError::Rejected { status, message } => {
            assert_eq!(status, 409);
            assert_eq!(message, "Login already in use");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn offline_backend_is_network_error() {
    let backend = FakeBackend::new();
    backend.set_offline(true);
    let err = client(&backend).login(&demo_credentials()).await.unwrap_err();
    assert!(matches!(err, AuthError::Network(TransportError::Connection { .. })));
}

#[tokio::test]
async fn logout_posts_empty_object() {
    let backend = FakeBackend::new();
    client(&backend).logout().await.unwrap();
    let sent = backend.last_request().unwrap();
    assert_eq!(sent.url, "http://localhost:3000/auth/logout");
    assert_eq!(sent.body, Some(json!({})));
}

#[test]
fn decode_rejects_empty_token() {
    let response = ApiResponse::new(
        200,
        json!({ "token": "", "user": { "id": "1", "email": "a@b.c", "login": "a" } }),
    );
    let err = decode_auth_response(response).unwrap_err();
    assert!(matches!(err, AuthError::Network(TransportError::Decode(_))));
}

#[test]
fn decode_rejects_missing_user() {
    let response = ApiResponse::new(200, json!({ "token": "t" }));
    assert!(decode_auth_response(response).is_err());
}
