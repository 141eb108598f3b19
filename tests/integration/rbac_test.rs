//! Integration tests for role gating of staff-only endpoints.

use http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_client_cannot_reach_staff_endpoints() {
    let app = TestApp::new().await;
    app.create_test_user("Client", "c1@example.com", "password123", "client")
        .await;
    let token = app.login("c1@example.com", "password123").await;

    for path in [
        "/api/admin/stats",
        "/api/sessions",
        "/api/users",
        "/api/assignments/coordinators",
        "/api/assignments/workload",
        "/api/automations",
    ] {
        let response = app.request("GET", path, None, Some(&token)).await;
        assert_eq!(
            response.status,
            StatusCode::FORBIDDEN,
            "expected 403 for {path}, got {:?}",
            response.status
        );
        // No data leaks alongside the denial.
        assert!(response.body.get("data").is_none());
    }
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_coordinator_cannot_assign() {
    let app = TestApp::new().await;
    let client = app
        .create_test_user("Client", "c2@example.com", "password123", "client")
        .await;
    let coordinator = app
        .create_test_user("Coord", "co2@example.com", "password123", "coordinator")
        .await;
    let case_id = app.create_test_case(client).await;

    let token = app.login("co2@example.com", "password123").await;
    let response = app
        .request(
            "POST",
            "/api/assignments",
            Some(serde_json::json!({
                "application_id": case_id,
                "coordinator_id": coordinator,
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_staff_can_view_stats() {
    let app = TestApp::new().await;
    app.create_test_user("Coord", "co3@example.com", "password123", "coordinator")
        .await;
    let token = app.login("co3@example.com", "password123").await;

    let response = app.request("GET", "/api/admin/stats", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert!(response.body.pointer("/data/users/total").is_some());
    assert!(response.body.pointer("/data/cases/by_status").is_some());
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_case_delete_is_admin_only() {
    let app = TestApp::new().await;
    let client = app
        .create_test_user("Client", "c4@example.com", "password123", "client")
        .await;
    app.create_test_user("Manager", "m4@example.com", "password123", "manager")
        .await;
    app.create_test_user("Admin", "a4@example.com", "password123", "admin")
        .await;
    let case_id = app.create_test_case(client).await;

    let manager_token = app.login("m4@example.com", "password123").await;
    let response = app
        .request(
            "DELETE",
            &format!("/api/cases/{case_id}"),
            None,
            Some(&manager_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let admin_token = app.login("a4@example.com", "password123").await;
    let response = app
        .request(
            "DELETE",
            &format!("/api/cases/{case_id}"),
            None,
            Some(&admin_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
}
