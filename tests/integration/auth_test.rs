//! Integration tests for the authentication flow.

use http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_register_creates_client() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "name": "New Client",
                "email": "client@example.com",
                "password": "password123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    assert_eq!(
        response.body.pointer("/data/user/role").unwrap(),
        &serde_json::json!("client")
    );
    assert!(response.body.pointer("/data/access_token").is_some());
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_login_success() {
    let app = TestApp::new().await;
    app.create_test_user("Test User", "login@example.com", "password123", "client")
        .await;

    let token = app.login("login@example.com", "password123").await;
    assert!(!token.is_empty());
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_login_invalid_password() {
    let app = TestApp::new().await;
    app.create_test_user("Test User", "badpass@example.com", "password123", "client")
        .await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "badpass@example.com",
                "password": "wrongpassword",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_me_requires_token() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/auth/me", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_duplicate_email_conflicts() {
    let app = TestApp::new().await;
    app.create_test_user("First", "dupe@example.com", "password123", "client")
        .await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "name": "Second",
                "email": "dupe@example.com",
                "password": "password123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}
