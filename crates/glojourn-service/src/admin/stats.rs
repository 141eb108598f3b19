//! Dashboard statistics aggregation.

use std::sync::Arc;

use serde::Serialize;

use glojourn_auth::rbac::{Capability, RbacEnforcer};
use glojourn_core::result::AppResult;
use glojourn_database::repositories::case::{BucketCount, CaseRepository};
use glojourn_database::repositories::session::SessionRepository;
use glojourn_database::repositories::user::{RoleCount, UserRepository};
use glojourn_entity::case::Case;

use crate::context::RequestContext;

/// User-related aggregate counts.
#[derive(Debug, Clone, Serialize)]
pub struct UserStats {
    /// Total users.
    pub total: u64,
    /// Active users.
    pub active: u64,
    /// Per-role counts.
    pub by_role: Vec<RoleCount>,
}

/// Case-related aggregate counts.
#[derive(Debug, Clone, Serialize)]
pub struct CaseStats {
    /// Total cases.
    pub total: u64,
    /// Per-status counts.
    pub by_status: Vec<BucketCount>,
    /// Per-priority counts.
    pub by_priority: Vec<BucketCount>,
    /// The ten most recently created cases.
    pub recent: Vec<Case>,
}

/// Session-related aggregate counts.
#[derive(Debug, Clone, Serialize)]
pub struct SessionStats {
    /// Total sessions.
    pub total: u64,
    /// Sessions scheduled today or later.
    pub upcoming: u64,
}

/// The full staff dashboard payload.
#[derive(Debug, Clone, Serialize)]
pub struct AdminStats {
    /// User aggregates.
    pub users: UserStats,
    /// Case aggregates.
    pub cases: CaseStats,
    /// Session aggregates.
    pub sessions: SessionStats,
}

/// Computes staff dashboard statistics.
#[derive(Debug, Clone)]
pub struct StatsService {
    user_repo: Arc<UserRepository>,
    case_repo: Arc<CaseRepository>,
    session_repo: Arc<SessionRepository>,
    rbac: Arc<RbacEnforcer>,
}

impl StatsService {
    /// Creates a new stats service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        case_repo: Arc<CaseRepository>,
        session_repo: Arc<SessionRepository>,
        rbac: Arc<RbacEnforcer>,
    ) -> Self {
        Self {
            user_repo,
            case_repo,
            session_repo,
            rbac,
        }
    }

    /// Gather the dashboard aggregates (staff only).
    pub async fn gather(&self, ctx: &RequestContext) -> AppResult<AdminStats> {
        self.rbac.require(ctx.role, Capability::StatsView)?;

        let users = UserStats {
            total: self.user_repo.count().await?,
            active: self.user_repo.count_active().await?,
            by_role: self.user_repo.count_by_role().await?,
        };

        let cases = CaseStats {
            total: self.case_repo.count().await?,
            by_status: self.case_repo.count_by_status().await?,
            by_priority: self.case_repo.count_by_priority().await?,
            recent: self.case_repo.recent(10).await?,
        };

        let sessions = SessionStats {
            total: self.session_repo.count().await?,
            upcoming: self.session_repo.count_upcoming().await?,
        };

        Ok(AdminStats {
            users,
            cases,
            sessions,
        })
    }
}
