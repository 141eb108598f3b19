//! Case operations — creation, role-scoped listing, allow-listed patching,
//! deletion, and note appending.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use glojourn_auth::rbac::{Capability, RbacEnforcer};
use glojourn_core::error::AppError;
use glojourn_core::result::AppResult;
use glojourn_core::types::pagination::{PageRequest, PageResponse};
use glojourn_database::repositories::case::{CaseListFilter, CaseRepository, CaseScope};
use glojourn_database::repositories::user::UserRepository;
use glojourn_entity::case::{
    Case, CaseNote, CasePatch, CasePriority, CaseStatus, CreateCase, VisaType,
};
use glojourn_entity::user::UserRole;

use crate::context::RequestContext;

/// Optional equality filters for case listing.
#[derive(Debug, Clone, Copy, Default)]
pub struct CaseListQuery {
    /// Restrict to a single status.
    pub status: Option<CaseStatus>,
    /// Restrict to a single priority.
    pub priority: Option<CasePriority>,
}

/// Handles case CRUD and notes.
#[derive(Debug, Clone)]
pub struct CaseService {
    /// Case repository.
    case_repo: Arc<CaseRepository>,
    /// User repository, for assignment role checks.
    user_repo: Arc<UserRepository>,
    /// Capability policy enforcer.
    rbac: Arc<RbacEnforcer>,
}

impl CaseService {
    /// Creates a new case service.
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

    /// Derive the listing scope from the caller's role.
    pub fn scope_for(ctx: &RequestContext) -> CaseScope {
        match ctx.role {
            UserRole::Client => CaseScope::OwnCase(ctx.user_id),
            UserRole::Coordinator => CaseScope::CoordinatorPool(ctx.user_id),
            UserRole::Manager => CaseScope::ManagerTeam(ctx.user_id),
            UserRole::Admin => CaseScope::All,
        }
    }

    /// List cases visible to the caller, newest first.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        query: CaseListQuery,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Case>> {
        self.rbac.require(ctx.role, Capability::CaseList)?;

        let filter = CaseListFilter {
            scope: Self::scope_for(ctx),
            status: query.status,
            priority: query.priority,
        };
        self.case_repo.list(&filter, page).await
    }

    /// Fetch a single case; the owning client or any staff role may view it.
    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> AppResult<Case> {
        let case = self
            .case_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Application not found"))?;

        if case.client_id != ctx.user_id {
            self.rbac.require(ctx.role, Capability::CaseReadAny)?;
        }
        Ok(case)
    }

    /// Fetch the caller's own case.
    pub async fn get_my_case(&self, ctx: &RequestContext) -> AppResult<Case> {
        self.case_repo
            .find_by_client(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Application not found"))
    }

    /// Create a new case owned by the caller, in draft status.
    ///
    /// Rejects with a conflict if the caller already owns a case. The
    /// pre-check gives a friendly message; the unique constraint on
    /// `client_id` backstops the check-then-act race.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        visa_type: VisaType,
        details: serde_json::Value,
        priority: CasePriority,
    ) -> AppResult<Case> {
        self.rbac.require(ctx.role, Capability::CaseCreate)?;

        if self.case_repo.find_by_client(ctx.user_id).await?.is_some() {
            return Err(AppError::conflict("You already have an application"));
        }

        let case = self
            .case_repo
            .create(&CreateCase {
                client_id: ctx.user_id,
                visa_type,
                details,
                priority,
            })
            .await?;

        info!(case_id = %case.id, client_id = %ctx.user_id, "Case created");
        Ok(case)
    }

    /// Apply an allow-listed patch to a case.
    ///
    /// The owning client or any staff role may update; assignment fields
    /// are role-checked against the referenced user before anything is
    /// written.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        patch: CasePatch,
    ) -> AppResult<Case> {
        let case = self
            .case_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Application not found"))?;

        if case.client_id != ctx.user_id {
            self.rbac.require(ctx.role, Capability::CaseUpdateAny)?;
        }

        if let Some(Some(coordinator_id)) = patch.assigned_coordinator {
            self.ensure_role(coordinator_id, UserRole::Coordinator, "Coordinator")
                .await?;
        }
        if let Some(Some(manager_id)) = patch.assigned_manager {
            self.ensure_role(manager_id, UserRole::Manager, "Manager")
                .await?;
        }

        let updated = self.case_repo.apply_patch(id, &patch).await?;
        info!(case_id = %id, user_id = %ctx.user_id, "Case updated");
        Ok(updated)
    }

    /// Hard-delete a case (admin only).
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        self.rbac.require(ctx.role, Capability::CaseDelete)?;

        if !self.case_repo.delete(id).await? {
            return Err(AppError::not_found("Application not found"));
        }
        info!(case_id = %id, user_id = %ctx.user_id, "Case deleted");
        Ok(())
    }

    /// Append a note to a case. Content must be non-empty after trimming.
    pub async fn add_note(
        &self,
        ctx: &RequestContext,
        case_id: Uuid,
        content: &str,
    ) -> AppResult<CaseNote> {
        let content = content.trim();
        if content.is_empty() {
            return Err(AppError::validation("Note content is required"));
        }

        let case = self
            .case_repo
            .find_by_id(case_id)
            .await?
            .ok_or_else(|| AppError::not_found("Application not found"))?;

        if case.client_id != ctx.user_id {
            self.rbac.require(ctx.role, Capability::CaseNoteAdd)?;
        }

        self.case_repo.add_note(case_id, ctx.user_id, content).await
    }

    /// List a case's notes, oldest first.
    pub async fn list_notes(&self, ctx: &RequestContext, case_id: Uuid) -> AppResult<Vec<CaseNote>> {
        // Same visibility rule as reading the case itself.
        self.get(ctx, case_id).await?;
        self.case_repo.list_notes(case_id).await
    }

    /// Verify that the referenced user exists, is active, and holds the
    /// expected role.
    async fn ensure_role(&self, user_id: Uuid, role: UserRole, label: &str) -> AppResult<()> {
        match self.user_repo.find_by_id(user_id).await? {
            Some(user) if user.role == role && user.is_active => Ok(()),
            _ => Err(AppError::not_found(format!("{label} not found"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(role: UserRole) -> RequestContext {
        RequestContext::new(Uuid::new_v4(), role, "test".to_string())
    }

    #[test]
    fn test_scope_follows_role() {
        let client = ctx(UserRole::Client);
        assert_eq!(
            CaseService::scope_for(&client),
            CaseScope::OwnCase(client.user_id)
        );

        let coordinator = ctx(UserRole::Coordinator);
        assert_eq!(
            CaseService::scope_for(&coordinator),
            CaseScope::CoordinatorPool(coordinator.user_id)
        );

        let manager = ctx(UserRole::Manager);
        assert_eq!(
            CaseService::scope_for(&manager),
            CaseScope::ManagerTeam(manager.user_id)
        );

        assert_eq!(CaseService::scope_for(&ctx(UserRole::Admin)), CaseScope::All);
    }
}
