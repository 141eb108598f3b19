//! Integration tests for automation execution semantics.

use http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_execute_runs_actions_in_order() {
    let app = TestApp::new().await;
    let client = app
        .create_test_user("Client", "auto1@example.com", "password123", "client")
        .await;
    let coordinator = app
        .create_test_user("Coord", "autoco1@example.com", "password123", "coordinator")
        .await;
    app.create_test_user("Admin", "autoadmin1@example.com", "password123", "admin")
        .await;
    let case_id = app.create_test_case(client).await;
    let token = app.login("autoadmin1@example.com", "password123").await;

    let created = app
        .request(
            "POST",
            "/api/automations",
            Some(serde_json::json!({
                "name": "Intake",
                "trigger_type": "manual",
                "actions": [
                    {"type": "assign_coordinator", "config": {"assignee_role": "coordinator"}},
                    {"type": "update_status", "config": {"new_status": "under_review"}},
                ],
            })),
            Some(&token),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED, "{:?}", created.body);
    let automation_id = created.body.pointer("/data/id").unwrap().as_str().unwrap().to_string();

    let executed = app
        .request(
            "POST",
            &format!("/api/automations/{automation_id}/execute"),
            Some(serde_json::json!({"case_id": case_id})),
            Some(&token),
        )
        .await;
    assert_eq!(executed.status, StatusCode::OK, "{:?}", executed.body);
    assert_eq!(
        executed.body.pointer("/data/case/status").unwrap(),
        &serde_json::json!("under_review")
    );
    assert_eq!(
        executed.body.pointer("/data/case/assigned_coordinator").unwrap(),
        &serde_json::json!(coordinator)
    );

    // Successful execution advances the bookkeeping.
    let fetched = app
        .request(
            "GET",
            &format!("/api/automations/{automation_id}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(
        fetched.body.pointer("/data/execution_count").unwrap(),
        &serde_json::json!(1)
    );
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_partial_failure_keeps_earlier_effects() {
    let app = TestApp::new().await;
    let client = app
        .create_test_user("Client", "auto2@example.com", "password123", "client")
        .await;
    let coordinator = app
        .create_test_user("Coord", "autoco2@example.com", "password123", "coordinator")
        .await;
    app.create_test_user("Admin", "autoadmin2@example.com", "password123", "admin")
        .await;
    let case_id = app.create_test_case(client).await;
    let token = app.login("autoadmin2@example.com", "password123").await;

    // Action 2 fails: the configured status is not a valid case status.
    let created = app
        .request(
            "POST",
            "/api/automations",
            Some(serde_json::json!({
                "name": "Broken",
                "trigger_type": "manual",
                "actions": [
                    {"type": "assign_coordinator", "config": {"assignee_role": "coordinator"}},
                    {"type": "update_status", "config": {"new_status": "not_a_status"}},
                    {"type": "update_status", "config": {"new_status": "approved"}},
                ],
            })),
            Some(&token),
        )
        .await;
    let automation_id = created.body.pointer("/data/id").unwrap().as_str().unwrap().to_string();

    let executed = app
        .request(
            "POST",
            &format!("/api/automations/{automation_id}/execute"),
            Some(serde_json::json!({"case_id": case_id})),
            Some(&token),
        )
        .await;
    assert_eq!(executed.status, StatusCode::BAD_REQUEST);

    // Action 1's effect stands; action 3 never ran.
    let (assigned, status): (Option<uuid::Uuid>, String) =
        sqlx::query_as("SELECT assigned_coordinator, status::text FROM cases WHERE id = $1")
            .bind(case_id)
            .fetch_one(&app.db_pool)
            .await
            .unwrap();
    assert_eq!(assigned, Some(coordinator));
    assert_eq!(status, "draft");

    // Bookkeeping is untouched on failure.
    let fetched = app
        .request(
            "GET",
            &format!("/api/automations/{automation_id}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(
        fetched.body.pointer("/data/execution_count").unwrap(),
        &serde_json::json!(0)
    );
    assert!(fetched.body.pointer("/data/last_executed").unwrap().is_null());
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_unknown_actions_are_skipped() {
    let app = TestApp::new().await;
    let client = app
        .create_test_user("Client", "auto3@example.com", "password123", "client")
        .await;
    app.create_test_user("Admin", "autoadmin3@example.com", "password123", "admin")
        .await;
    let case_id = app.create_test_case(client).await;
    let token = app.login("autoadmin3@example.com", "password123").await;

    let created = app
        .request(
            "POST",
            "/api/automations",
            Some(serde_json::json!({
                "name": "Mixed",
                "trigger_type": "manual",
                "actions": [
                    {"type": "send_reminder", "config": {"reminder_days": 3}},
                    {"type": "escalate_to_legal", "config": {}},
                    {"type": "update_status", "config": {"new_status": "submitted"}},
                ],
            })),
            Some(&token),
        )
        .await;
    let automation_id = created.body.pointer("/data/id").unwrap().as_str().unwrap().to_string();

    let executed = app
        .request(
            "POST",
            &format!("/api/automations/{automation_id}/execute"),
            Some(serde_json::json!({"case_id": case_id})),
            Some(&token),
        )
        .await;
    assert_eq!(executed.status, StatusCode::OK, "{:?}", executed.body);
    assert_eq!(
        executed.body.pointer("/data/actions_skipped").unwrap(),
        &serde_json::json!(2)
    );
    assert_eq!(
        executed.body.pointer("/data/case/status").unwrap(),
        &serde_json::json!("submitted")
    );
}
