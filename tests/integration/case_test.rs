//! Integration tests for case creation, listing, notes, and assignment.

use http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_one_case_per_client() {
    let app = TestApp::new().await;
    app.create_test_user("Client", "one@example.com", "password123", "client")
        .await;
    let token = app.login("one@example.com", "password123").await;

    let body = serde_json::json!({
        "visa_type": "student",
        "details": {"destination_country": "Canada"},
    });

    let first = app
        .request("POST", "/api/applications", Some(body.clone()), Some(&token))
        .await;
    assert_eq!(first.status, StatusCode::CREATED, "{:?}", first.body);
    let first_id = first.body.pointer("/data/id").unwrap().clone();

    let second = app
        .request("POST", "/api/applications", Some(body), Some(&token))
        .await;
    assert_eq!(second.status, StatusCode::CONFLICT);

    // The original case is unmodified.
    let mine = app
        .request("GET", "/api/applications/my-application", None, Some(&token))
        .await;
    assert_eq!(mine.status, StatusCode::OK);
    assert_eq!(mine.body.pointer("/data/id").unwrap(), &first_id);
    assert_eq!(
        mine.body.pointer("/data/visa_type").unwrap(),
        &serde_json::json!("student")
    );
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_pagination_window() {
    let app = TestApp::new().await;
    app.create_test_user("Admin", "pager@example.com", "password123", "admin")
        .await;

    // 25 clients, one case each.
    for i in 0..25 {
        let client = app
            .create_test_user(
                &format!("Client {i}"),
                &format!("pager{i}@example.com"),
                "password123",
                "client",
            )
            .await;
        app.create_test_case(client).await;
    }

    let token = app.login("pager@example.com", "password123").await;
    let response = app
        .request(
            "GET",
            "/api/applications?limit=10&page=2",
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    let items = response.body.pointer("/data/items").unwrap().as_array().unwrap();
    assert_eq!(items.len(), 10);
    assert_eq!(
        response.body.pointer("/data/total").unwrap(),
        &serde_json::json!(25)
    );
    assert_eq!(
        response.body.pointer("/data/pages").unwrap(),
        &serde_json::json!(3)
    );
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_client_listing_is_scoped_to_own_case() {
    let app = TestApp::new().await;
    let mine = app
        .create_test_user("Me", "scoped@example.com", "password123", "client")
        .await;
    let other = app
        .create_test_user("Other", "other@example.com", "password123", "client")
        .await;
    let my_case = app.create_test_case(mine).await;
    app.create_test_case(other).await;

    let token = app.login("scoped@example.com", "password123").await;
    let response = app
        .request("GET", "/api/applications", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let items = response.body.pointer("/data/items").unwrap().as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(
        items[0].get("id").unwrap(),
        &serde_json::json!(my_case)
    );
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_note_content_is_required_and_verbatim() {
    let app = TestApp::new().await;
    let client = app
        .create_test_user("Client", "notes@example.com", "password123", "client")
        .await;
    app.create_test_user("Coord", "noteco@example.com", "password123", "coordinator")
        .await;
    let case_id = app.create_test_case(client).await;

    let token = app.login("noteco@example.com", "password123").await;

    let blank = app
        .request(
            "POST",
            &format!("/api/cases/{case_id}/notes"),
            Some(serde_json::json!({"content": "   "})),
            Some(&token),
        )
        .await;
    assert_eq!(blank.status, StatusCode::BAD_REQUEST);

    let ok = app
        .request(
            "POST",
            &format!("/api/cases/{case_id}/notes"),
            Some(serde_json::json!({"content": "Passport received"})),
            Some(&token),
        )
        .await;
    assert_eq!(ok.status, StatusCode::CREATED, "{:?}", ok.body);

    let notes = app
        .request(
            "GET",
            &format!("/api/cases/{case_id}/notes"),
            None,
            Some(&token),
        )
        .await;
    let items = notes.body.pointer("/data").unwrap().as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(
        items[0].get("content").unwrap(),
        &serde_json::json!("Passport received")
    );
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_assigning_non_coordinator_is_rejected() {
    let app = TestApp::new().await;
    let client = app
        .create_test_user("Client", "assign@example.com", "password123", "client")
        .await;
    let not_coordinator = app
        .create_test_user("Peer", "peer@example.com", "password123", "client")
        .await;
    app.create_test_user("Manager", "mgr@example.com", "password123", "manager")
        .await;
    let case_id = app.create_test_case(client).await;

    let token = app.login("mgr@example.com", "password123").await;
    let response = app
        .request(
            "POST",
            "/api/assignments",
            Some(serde_json::json!({
                "application_id": case_id,
                "coordinator_id": not_coordinator,
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);

    // The case's assignment is unchanged.
    let (assigned,): (Option<uuid::Uuid>,) =
        sqlx::query_as("SELECT assigned_coordinator FROM cases WHERE id = $1")
            .bind(case_id)
            .fetch_one(&app.db_pool)
            .await
            .unwrap();
    assert_eq!(assigned, None);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_coordinator_sees_unassigned_pool() {
    let app = TestApp::new().await;
    let c1 = app
        .create_test_user("C1", "pool1@example.com", "password123", "client")
        .await;
    let c2 = app
        .create_test_user("C2", "pool2@example.com", "password123", "client")
        .await;
    let _coordinator = app
        .create_test_user("Coord", "poolco@example.com", "password123", "coordinator")
        .await;
    let other_coordinator = app
        .create_test_user("Other", "poolother@example.com", "password123", "coordinator")
        .await;

    let visible = app.create_test_case(c1).await; // unassigned
    let hidden = app.create_test_case(c2).await; // assigned elsewhere
    sqlx::query("UPDATE cases SET assigned_coordinator = $1 WHERE id = $2")
        .bind(other_coordinator)
        .bind(hidden)
        .execute(&app.db_pool)
        .await
        .unwrap();

    let token = app.login("poolco@example.com", "password123").await;
    let response = app
        .request("GET", "/api/applications", None, Some(&token))
        .await;

    let items = response.body.pointer("/data/items").unwrap().as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].get("id").unwrap(), &serde_json::json!(visible));
}
