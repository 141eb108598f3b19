//! Assignment operations — coordinator assignment, directory, and workload.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use glojourn_auth::rbac::{Capability, RbacEnforcer};
use glojourn_core::error::AppError;
use glojourn_core::result::AppResult;
use glojourn_database::repositories::case::{CaseRepository, CoordinatorWorkload};
use glojourn_database::repositories::user::UserRepository;
use glojourn_entity::case::Case;
use glojourn_entity::user::{User, UserRole};

use crate::context::RequestContext;

/// Handles coordinator assignment and workload reporting.
#[derive(Debug, Clone)]
pub struct AssignmentService {
    /// Case repository.
    case_repo: Arc<CaseRepository>,
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Capability policy enforcer.
    rbac: Arc<RbacEnforcer>,
}

impl AssignmentService {
    /// Creates a new assignment service.
    pub fn new(
        case_repo: Arc<CaseRepository>,
        user_repo: Arc<UserRepository>,
        rbac: Arc<RbacEnforcer>,
    ) -> Self {
        Self {
            case_repo,
            user_repo,
            rbac,
        }
    }

    /// Assign a coordinator to a case, or clear the assignment.
    ///
    /// The referenced user must exist and hold the coordinator role; the
    /// case is left unmodified otherwise.
    pub async fn assign(
        &self,
        ctx: &RequestContext,
        application_id: Uuid,
        coordinator_id: Option<Uuid>,
    ) -> AppResult<Case> {
        self.rbac.require(ctx.role, Capability::CaseAssign)?;

        // Verify the application exists before touching anything.
        self.case_repo
            .find_by_id(application_id)
            .await?
            .ok_or_else(|| AppError::not_found("Application not found"))?;

        if let Some(coordinator_id) = coordinator_id {
            match self.user_repo.find_by_id(coordinator_id).await? {
                Some(user) if user.role == UserRole::Coordinator => {}
                _ => return Err(AppError::not_found("Coordinator not found")),
            }
        }

        let case = self
            .case_repo
            .set_coordinator(application_id, coordinator_id)
            .await?;

        info!(
            case_id = %application_id,
            coordinator = ?coordinator_id,
            assigned_by = %ctx.user_id,
            "Application assigned"
        );
        Ok(case)
    }

    /// List active coordinators.
    pub async fn coordinators(&self, ctx: &RequestContext) -> AppResult<Vec<User>> {
        self.rbac.require(ctx.role, Capability::CoordinatorList)?;
        self.user_repo
            .find_active_by_role(UserRole::Coordinator)
            .await
    }

    /// Open-case counts per active coordinator.
    pub async fn workload(&self, ctx: &RequestContext) -> AppResult<Vec<CoordinatorWorkload>> {
        self.rbac.require(ctx.role, Capability::WorkloadView)?;
        self.case_repo.coordinator_workload().await
    }
}
