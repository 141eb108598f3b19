//! Route definitions for the Glojourn HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`; uploaded
//! document bytes are served statically under `/uploads`. The router
//! receives `AppState` and passes it to all handlers via Axum's `State`
//! extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, patch, post, put},
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_upload = state.config.storage.max_upload_size_bytes as usize;

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(application_routes())
        .merge(case_routes())
        .merge(assignment_routes())
        .merge(session_routes())
        .merge(user_routes())
        .merge(automation_routes())
        .merge(document_routes())
        .merge(admin_routes())
        .merge(health_routes());

    let uploads = ServeDir::new(&state.config.storage.upload_root);

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .nest_service("/uploads", uploads)
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Auth endpoints: register, login, refresh, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/me", get(handlers::auth::me))
}

/// Application endpoints (client-facing view of the case collection)
fn application_routes() -> Router<AppState> {
    Router::new()
        .route("/applications", get(handlers::case::list))
        .route("/applications", post(handlers::case::create))
        .route(
            "/applications/my-application",
            get(handlers::case::get_mine),
        )
        .route("/applications/{id}", put(handlers::case::update))
}

/// Case endpoints (staff-facing view of the same collection)
fn case_routes() -> Router<AppState> {
    Router::new()
        .route("/cases", get(handlers::case::list))
        .route("/cases", post(handlers::case::create))
        .route("/cases/{id}", get(handlers::case::get))
        .route("/cases/{id}", put(handlers::case::update))
        .route("/cases/{id}", delete(handlers::case::delete))
        .route("/cases/{id}/notes", post(handlers::case::add_note))
        .route("/cases/{id}/notes", get(handlers::case::list_notes))
}

/// Coordinator assignment endpoints
fn assignment_routes() -> Router<AppState> {
    Router::new()
        .route("/assignments", post(handlers::assignment::assign))
        .route(
            "/assignments/coordinators",
            get(handlers::assignment::coordinators),
        )
        .route(
            "/assignments/workload",
            get(handlers::assignment::workload),
        )
}

/// Consultation session endpoints
fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/sessions", get(handlers::session::list))
        .route("/sessions", post(handlers::session::create))
        .route("/sessions/{id}", put(handlers::session::update))
}

/// User management endpoints
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(handlers::user::list))
        .route("/users", post(handlers::user::create))
        .route("/users/{id}", get(handlers::user::get))
        .route("/users/{id}", put(handlers::user::update))
        .route("/users/{id}", delete(handlers::user::delete))
        .route("/users/{id}/status", patch(handlers::user::toggle_status))
}

/// Automation endpoints
fn automation_routes() -> Router<AppState> {
    Router::new()
        .route("/automations", get(handlers::automation::list))
        .route("/automations", post(handlers::automation::create))
        .route("/automations/{id}", get(handlers::automation::get))
        .route("/automations/{id}", put(handlers::automation::update))
        .route("/automations/{id}", delete(handlers::automation::delete))
        .route(
            "/automations/{id}/execute",
            post(handlers::automation::execute),
        )
}

/// Document upload and request endpoints
fn document_routes() -> Router<AppState> {
    Router::new()
        .route("/documents", post(handlers::document::upload))
        .route("/documents", get(handlers::document::list))
        .route(
            "/document-requests",
            post(handlers::document::create_request),
        )
        .route(
            "/document-requests",
            get(handlers::document::list_requests),
        )
}

/// Admin endpoints
fn admin_routes() -> Router<AppState> {
    Router::new().route("/admin/stats", get(handlers::admin::stats))
}

/// Health check endpoints (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health_check))
}

/// Build CORS layer from configuration
fn build_cors_layer(state: &AppState) -> tower_http::cors::CorsLayer {
    use axum::http::Method;
    use tower_http::cors::{Any, CorsLayer};

    let cors_config = &state.config.server.cors;

    let mut cors = CorsLayer::new();

    if cors_config.allowed_origins.contains(&"*".to_string()) {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<axum::http::HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    let methods: Vec<Method> = cors_config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    cors = cors.allow_methods(methods);

    if cors_config.allowed_headers.contains(&"*".to_string()) {
        cors = cors.allow_headers(Any);
    }

    cors = cors.max_age(std::time::Duration::from_secs(cors_config.max_age_seconds));

    cors
}
