//! User management operations for staff.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use glojourn_auth::password::PasswordHasher;
use glojourn_auth::rbac::{Capability, RbacEnforcer};
use glojourn_core::error::AppError;
use glojourn_core::result::AppResult;
use glojourn_core::types::pagination::{PageRequest, PageResponse};
use glojourn_database::repositories::user::UserRepository;
use glojourn_entity::user::model::CreateUser;
use glojourn_entity::user::{User, UserRole};

use crate::context::RequestContext;

/// Data for an admin-created staff account.
#[derive(Debug, Clone)]
pub struct CreateStaffRequest {
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Plaintext password (hashed by the service).
    pub password: String,
    /// Staff role to grant.
    pub role: UserRole,
    /// Reporting manager for coordinators.
    pub manager_id: Option<Uuid>,
}

/// Handles user listing and management.
#[derive(Debug, Clone)]
pub struct UserService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Capability policy enforcer.
    rbac: Arc<RbacEnforcer>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        rbac: Arc<RbacEnforcer>,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            rbac,
        }
    }

    /// List users with pagination.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        page: &PageRequest,
    ) -> AppResult<PageResponse<User>> {
        self.rbac.require(ctx.role, Capability::UserList)?;
        self.user_repo.find_all(page).await
    }

    /// Fetch a single user.
    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> AppResult<User> {
        self.rbac.require(ctx.role, Capability::UserRead)?;
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Update a user's profile fields.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        name: Option<String>,
        email: Option<String>,
        manager_id: Option<Option<Uuid>>,
    ) -> AppResult<User> {
        self.rbac.require(ctx.role, Capability::UserUpdate)?;

        if let Some(email) = &email {
            if !email.contains('@') {
                return Err(AppError::validation("Invalid email format"));
            }
        }

        let user = self
            .user_repo
            .update_profile(id, name.as_deref(), email.as_deref(), manager_id)
            .await?;

        info!(user_id = %id, updated_by = %ctx.user_id, "User updated");
        Ok(user)
    }

    /// Flip a user's active flag.
    pub async fn toggle_status(&self, ctx: &RequestContext, id: Uuid) -> AppResult<User> {
        self.rbac.require(ctx.role, Capability::UserToggleStatus)?;

        let user = self
            .user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        let updated = self.user_repo.set_active(id, !user.is_active).await?;
        info!(
            user_id = %id,
            is_active = updated.is_active,
            changed_by = %ctx.user_id,
            "User status toggled"
        );
        Ok(updated)
    }

    /// Delete a user (admin only).
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        self.rbac.require(ctx.role, Capability::UserDelete)?;

        if id == ctx.user_id {
            return Err(AppError::validation("You cannot delete your own account"));
        }
        if !self.user_repo.delete(id).await? {
            return Err(AppError::not_found("User not found"));
        }
        info!(user_id = %id, deleted_by = %ctx.user_id, "User deleted");
        Ok(())
    }

    /// Create a staff account (admin only). Roles are fixed at creation;
    /// this is the only path to a non-client account.
    pub async fn create_staff(
        &self,
        ctx: &RequestContext,
        req: CreateStaffRequest,
    ) -> AppResult<User> {
        self.rbac.require(ctx.role, Capability::UserCreateStaff)?;

        if !req.role.is_staff() {
            return Err(AppError::validation(
                "Staff accounts must be coordinator, manager, or admin",
            ));
        }

        let password_hash = self.hasher.hash_password(&req.password)?;
        let user = self
            .user_repo
            .create(&CreateUser {
                name: req.name,
                email: req.email,
                password_hash,
                role: req.role,
                manager_id: req.manager_id,
            })
            .await?;

        info!(user_id = %user.id, role = %user.role, created_by = %ctx.user_id, "Staff user created");
        Ok(user)
    }
}
