//! Consultation session operations — staff-only CRUD with enforced status
//! transitions.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;
use uuid::Uuid;

use glojourn_auth::rbac::{Capability, RbacEnforcer};
use glojourn_core::error::AppError;
use glojourn_core::result::AppResult;
use glojourn_database::repositories::session::SessionRepository;
use glojourn_database::repositories::user::UserRepository;
use glojourn_entity::session::model::CreateSession;
use glojourn_entity::session::{Session, SessionStatus};
use glojourn_entity::user::UserRole;

use crate::context::RequestContext;

/// Fields accepted by a session update.
#[derive(Debug, Clone)]
pub struct SessionUpdate {
    /// Target status.
    pub status: SessionStatus,
    /// Replacement notes, if provided.
    pub notes: Option<String>,
    /// Replacement meeting link, if provided.
    pub meeting_link: Option<String>,
}

/// Handles consultation session booking and status changes.
#[derive(Debug, Clone)]
pub struct SessionService {
    /// Session repository.
    session_repo: Arc<SessionRepository>,
    /// User repository, for participant role checks.
    user_repo: Arc<UserRepository>,
    /// Capability policy enforcer.
    rbac: Arc<RbacEnforcer>,
}

impl SessionService {
    /// Creates a new session service.
    pub fn new(
        session_repo: Arc<SessionRepository>,
        user_repo: Arc<UserRepository>,
        rbac: Arc<RbacEnforcer>,
    ) -> Self {
        Self {
            session_repo,
            user_repo,
            rbac,
        }
    }

    /// List all sessions, most recent consultation date first.
    pub async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<Session>> {
        self.rbac.require(ctx.role, Capability::SessionList)?;
        self.session_repo.find_all().await
    }

    /// Create a new session in pending status.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        client_id: Uuid,
        coordinator_id: Option<Uuid>,
        scheduled_date: NaiveDate,
        time_slot: String,
        duration_minutes: Option<i32>,
    ) -> AppResult<Session> {
        self.rbac.require(ctx.role, Capability::SessionCreate)?;

        match self.user_repo.find_by_id(client_id).await? {
            Some(user) if user.role == UserRole::Client => {}
            _ => return Err(AppError::not_found("Client not found")),
        }

        if let Some(coordinator_id) = coordinator_id {
            match self.user_repo.find_by_id(coordinator_id).await? {
                Some(user) if user.role == UserRole::Coordinator => {}
                _ => return Err(AppError::not_found("Coordinator not found")),
            }
        }

        let session = self
            .session_repo
            .create(&CreateSession {
                client_id,
                coordinator_id,
                scheduled_date,
                time_slot,
                duration_minutes,
                created_by: ctx.user_id,
            })
            .await?;

        info!(session_id = %session.id, created_by = %ctx.user_id, "Session created");
        Ok(session)
    }

    /// Update a session's status (and optional free-text fields).
    ///
    /// Transitions must be legal: pending sessions can be confirmed or
    /// cancelled, confirmed sessions completed or cancelled.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        update: SessionUpdate,
    ) -> AppResult<Session> {
        self.rbac.require(ctx.role, Capability::SessionUpdate)?;

        let session = self
            .session_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Session not found"))?;

        if !session.status.can_transition_to(update.status) {
            return Err(AppError::validation(format!(
                "Cannot change session status from '{}' to '{}'",
                session.status, update.status
            )));
        }

        let updated = self
            .session_repo
            .update(
                id,
                update.status,
                update.notes.as_deref(),
                update.meeting_link.as_deref(),
            )
            .await?;

        info!(session_id = %id, status = %updated.status, "Session updated");
        Ok(updated)
    }
}
