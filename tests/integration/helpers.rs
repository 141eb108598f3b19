//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use glojourn_core::config::AppConfig;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Database pool for direct queries
    pub db_pool: PgPool,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application against a clean database.
    pub async fn new() -> Self {
        let config = AppConfig::load("test").expect("Failed to load test config");

        let db = glojourn_database::connection::DatabasePool::connect(&config.database)
            .await
            .expect("Failed to connect to test database");
        let db_pool = db.into_pool();

        glojourn_database::migration::run_migrations(&db_pool)
            .await
            .expect("Failed to run migrations");

        Self::clean_database(&db_pool).await;

        let storage_root = std::env::temp_dir().join(format!("glojourn-test-{}", Uuid::new_v4()));
        let storage = Arc::new(
            glojourn_storage::providers::local::LocalStorageProvider::new(
                storage_root.to_str().unwrap(),
            )
            .await
            .expect("Failed to init storage"),
        ) as Arc<dyn glojourn_storage::StorageProvider>;

        let user_repo = Arc::new(glojourn_database::repositories::user::UserRepository::new(
            db_pool.clone(),
        ));
        let case_repo = Arc::new(glojourn_database::repositories::case::CaseRepository::new(
            db_pool.clone(),
        ));
        let session_repo = Arc::new(
            glojourn_database::repositories::session::SessionRepository::new(db_pool.clone()),
        );
        let automation_repo = Arc::new(
            glojourn_database::repositories::automation::AutomationRepository::new(db_pool.clone()),
        );
        let document_repo = Arc::new(
            glojourn_database::repositories::document::DocumentRepository::new(db_pool.clone()),
        );

        let password_hasher = Arc::new(glojourn_auth::password::PasswordHasher::new());
        let jwt_encoder = Arc::new(glojourn_auth::jwt::JwtEncoder::new(&config.auth));
        let jwt_decoder = Arc::new(glojourn_auth::jwt::JwtDecoder::new(&config.auth));
        let rbac_enforcer = Arc::new(glojourn_auth::rbac::RbacEnforcer::new());

        let auth_service = Arc::new(glojourn_service::auth::AuthService::new(
            Arc::clone(&user_repo),
            Arc::clone(&password_hasher),
            Arc::clone(&jwt_encoder),
            Arc::clone(&jwt_decoder),
            config.auth.clone(),
        ));
        let case_service = Arc::new(glojourn_service::case::CaseService::new(
            Arc::clone(&case_repo),
            Arc::clone(&user_repo),
            Arc::clone(&rbac_enforcer),
        ));
        let session_service = Arc::new(glojourn_service::session::SessionService::new(
            Arc::clone(&session_repo),
            Arc::clone(&user_repo),
            Arc::clone(&rbac_enforcer),
        ));
        let assignment_service = Arc::new(glojourn_service::assignment::AssignmentService::new(
            Arc::clone(&case_repo),
            Arc::clone(&user_repo),
            Arc::clone(&rbac_enforcer),
        ));
        let automation_service = Arc::new(glojourn_service::automation::AutomationService::new(
            Arc::clone(&automation_repo),
            Arc::clone(&case_repo),
            glojourn_service::automation::AutomationExecutor::new(
                Arc::clone(&case_repo),
                Arc::clone(&user_repo),
            ),
            Arc::clone(&rbac_enforcer),
        ));
        let user_service = Arc::new(glojourn_service::user::UserService::new(
            Arc::clone(&user_repo),
            Arc::clone(&password_hasher),
            Arc::clone(&rbac_enforcer),
        ));
        let stats_service = Arc::new(glojourn_service::admin::StatsService::new(
            Arc::clone(&user_repo),
            Arc::clone(&case_repo),
            Arc::clone(&session_repo),
            Arc::clone(&rbac_enforcer),
        ));
        let document_service = Arc::new(glojourn_service::document::DocumentService::new(
            Arc::clone(&document_repo),
            Arc::clone(&case_repo),
            Arc::clone(&storage),
            Arc::clone(&rbac_enforcer),
        ));

        let app_state = glojourn_api::state::AppState {
            config: Arc::new(config.clone()),
            db_pool: db_pool.clone(),
            jwt_decoder,
            rbac_enforcer,
            user_repo,
            case_repo,
            session_repo,
            automation_repo,
            document_repo,
            auth_service,
            case_service,
            session_service,
            assignment_service,
            automation_service,
            user_service,
            stats_service,
            document_service,
        };

        let router = glojourn_api::router::build_router(app_state);

        Self {
            router,
            db_pool,
            config,
        }
    }

    /// Clean all test data from the database
    async fn clean_database(pool: &PgPool) {
        let tables = [
            "automations",
            "document_requests",
            "documents",
            "case_notes",
            "sessions",
            "cases",
            "users",
        ];

        for table in &tables {
            let query = format!("DELETE FROM {}", table);
            let _ = sqlx::query(&query).execute(pool).await;
        }
    }

    /// Create a test user and return their ID
    pub async fn create_test_user(&self, name: &str, email: &str, password: &str, role: &str) -> Uuid {
        let hasher = glojourn_auth::password::PasswordHasher::new();
        let hash = hasher.hash_password(password).expect("Failed to hash password");
        let id = Uuid::new_v4();

        sqlx::query(
            r#"INSERT INTO users (id, name, email, password_hash, role, is_active)
               VALUES ($1, $2, $3, $4, $5::user_role, TRUE)"#,
        )
        .bind(id)
        .bind(name)
        .bind(email)
        .bind(&hash)
        .bind(role)
        .execute(&self.db_pool)
        .await
        .expect("Failed to create test user");

        id
    }

    /// Create a case owned by the given client directly in the database.
    pub async fn create_test_case(&self, client_id: Uuid) -> Uuid {
        let id = Uuid::new_v4();
        sqlx::query(
            r#"INSERT INTO cases (id, client_id, visa_type, details)
               VALUES ($1, $2, 'tourist'::visa_type, '{}'::jsonb)"#,
        )
        .bind(id)
        .bind(client_id)
        .execute(&self.db_pool)
        .await
        .expect("Failed to create test case");
        id
    }

    /// Login and return a JWT access token
    pub async fn login(&self, email: &str, password: &str) -> String {
        let body = serde_json::json!({
            "email": email,
            "password": password,
        });

        let response = self
            .request("POST", "/api/auth/login", Some(body), None)
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response
            .body
            .pointer("/data/access_token")
            .and_then(|v| v.as_str())
            .expect("No access_token in login response")
            .to_string()
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}
