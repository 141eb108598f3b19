//! Integration tests for consultation session booking and transitions.

use http::StatusCode;

use crate::helpers::TestApp;

async fn setup(app: &TestApp) -> (uuid::Uuid, uuid::Uuid, String) {
    let client = app
        .create_test_user("Client", "sclient@example.com", "password123", "client")
        .await;
    let coordinator = app
        .create_test_user("Coord", "scoord@example.com", "password123", "coordinator")
        .await;
    let token = app.login("scoord@example.com", "password123").await;
    (client, coordinator, token)
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_create_and_confirm_session() {
    let app = TestApp::new().await;
    let (client, coordinator, token) = setup(&app).await;

    let created = app
        .request(
            "POST",
            "/api/sessions",
            Some(serde_json::json!({
                "client_id": client,
                "coordinator_id": coordinator,
                "scheduled_date": "2026-09-01",
                "time_slot": "10:00-10:30",
                "duration_minutes": 30,
            })),
            Some(&token),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED, "{:?}", created.body);
    assert_eq!(
        created.body.pointer("/data/status").unwrap(),
        &serde_json::json!("pending")
    );

    let id = created.body.pointer("/data/id").unwrap().as_str().unwrap().to_string();
    let confirmed = app
        .request(
            "PUT",
            &format!("/api/sessions/{id}"),
            Some(serde_json::json!({"status": "confirmed", "meeting_link": "https://meet/x"})),
            Some(&token),
        )
        .await;
    assert_eq!(confirmed.status, StatusCode::OK, "{:?}", confirmed.body);
    assert_eq!(
        confirmed.body.pointer("/data/status").unwrap(),
        &serde_json::json!("confirmed")
    );
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_pending_cannot_jump_to_completed() {
    let app = TestApp::new().await;
    let (client, _coordinator, token) = setup(&app).await;

    let created = app
        .request(
            "POST",
            "/api/sessions",
            Some(serde_json::json!({
                "client_id": client,
                "scheduled_date": "2026-09-02",
                "time_slot": "11:00-11:30",
            })),
            Some(&token),
        )
        .await;
    let id = created.body.pointer("/data/id").unwrap().as_str().unwrap().to_string();

    let response = app
        .request(
            "PUT",
            &format!("/api/sessions/{id}"),
            Some(serde_json::json!({"status": "completed"})),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_session_with_unknown_coordinator_rejected() {
    let app = TestApp::new().await;
    let (client, _coordinator, token) = setup(&app).await;

    let response = app
        .request(
            "POST",
            "/api/sessions",
            Some(serde_json::json!({
                "client_id": client,
                "coordinator_id": uuid::Uuid::new_v4(),
                "scheduled_date": "2026-09-03",
                "time_slot": "12:00-12:30",
            })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
