//! Glojourn Server — case-management backend for an immigration
//! consulting business.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use glojourn_core::config::AppConfig;
use glojourn_core::error::AppError;

#[tokio::main]
async fn main() {
    let env = std::env::var("GLOJOURN_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Glojourn v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db = glojourn_database::connection::DatabasePool::connect(&config.database).await?;
    let db_pool = db.into_pool();

    glojourn_database::migration::run_migrations(&db_pool).await?;

    // ── Step 2: Document storage ─────────────────────────────────
    let storage = Arc::new(
        glojourn_storage::providers::local::LocalStorageProvider::new(
            &config.storage.upload_root,
        )
        .await?,
    ) as Arc<dyn glojourn_storage::StorageProvider>;
    tracing::info!(root = %config.storage.upload_root, "Document storage initialized");

    // ── Step 3: Repositories ─────────────────────────────────────
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

    // ── Step 4: Auth system ──────────────────────────────────────
    let password_hasher = Arc::new(glojourn_auth::password::PasswordHasher::new());
    let jwt_encoder = Arc::new(glojourn_auth::jwt::JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(glojourn_auth::jwt::JwtDecoder::new(&config.auth));
    let rbac_enforcer = Arc::new(glojourn_auth::rbac::RbacEnforcer::new());

    // ── Step 5: Services ─────────────────────────────────────────
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

    tracing::info!("Services initialized");

    // ── Step 6: Build and start HTTP server ──────────────────────
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

    let app = glojourn_api::router::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("Glojourn server listening on {}", addr);

    // ── Step 7: Graceful shutdown ────────────────────────────────
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    tracing::info!("Glojourn server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
