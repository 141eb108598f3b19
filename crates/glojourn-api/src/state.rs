//! Application state shared across all handlers and extractors.

use std::sync::Arc;

use sqlx::PgPool;

use glojourn_auth::jwt::JwtDecoder;
use glojourn_auth::rbac::RbacEnforcer;
use glojourn_core::config::AppConfig;

use glojourn_database::repositories::automation::AutomationRepository;
use glojourn_database::repositories::case::CaseRepository;
use glojourn_database::repositories::document::DocumentRepository;
use glojourn_database::repositories::session::SessionRepository;
use glojourn_database::repositories::user::UserRepository;

use glojourn_service::admin::StatsService;
use glojourn_service::assignment::AssignmentService;
use glojourn_service::auth::AuthService;
use glojourn_service::automation::AutomationService;
use glojourn_service::case::CaseService;
use glojourn_service::document::DocumentService;
use glojourn_service::session::SessionService;
use glojourn_service::user::UserService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL connection pool
    pub db_pool: PgPool,

    // ── Auth ─────────────────────────────────────────────────
    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Capability policy enforcer
    pub rbac_enforcer: Arc<RbacEnforcer>,

    // ── Repositories ─────────────────────────────────────────
    /// User repository
    pub user_repo: Arc<UserRepository>,
    /// Case repository
    pub case_repo: Arc<CaseRepository>,
    /// Session repository
    pub session_repo: Arc<SessionRepository>,
    /// Automation repository
    pub automation_repo: Arc<AutomationRepository>,
    /// Document repository
    pub document_repo: Arc<DocumentRepository>,

    // ── Services ─────────────────────────────────────────────
    /// Authentication service
    pub auth_service: Arc<AuthService>,
    /// Case service
    pub case_service: Arc<CaseService>,
    /// Session service
    pub session_service: Arc<SessionService>,
    /// Assignment service
    pub assignment_service: Arc<AssignmentService>,
    /// Automation service
    pub automation_service: Arc<AutomationService>,
    /// User management service
    pub user_service: Arc<UserService>,
    /// Statistics service
    pub stats_service: Arc<StatsService>,
    /// Document service
    pub document_service: Arc<DocumentService>,
}
