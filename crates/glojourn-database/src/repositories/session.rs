//! Consultation session repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use glojourn_core::error::{AppError, ErrorKind};
use glojourn_core::result::AppResult;
use glojourn_entity::session::model::CreateSession;
use glojourn_entity::session::{Session, SessionStatus};

/// Repository for consultation session CRUD.
#[derive(Debug, Clone)]
pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    /// Create a new session repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a session by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Session>> {
        sqlx::query_as::<_, Session>("SELECT * FROM sessions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find session", e))
    }

    /// List all sessions, most recent consultation date first.
    pub async fn find_all(&self) -> AppResult<Vec<Session>> {
        sqlx::query_as::<_, Session>(
            "SELECT * FROM sessions ORDER BY scheduled_date DESC, time_slot DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list sessions", e))
    }

    /// Create a new session in pending status.
    pub async fn create(&self, data: &CreateSession) -> AppResult<Session> {
        sqlx::query_as::<_, Session>(
            "INSERT INTO sessions \
                 (client_id, coordinator_id, scheduled_date, time_slot, duration_minutes, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING *",
        )
        .bind(data.client_id)
        .bind(data.coordinator_id)
        .bind(data.scheduled_date)
        .bind(&data.time_slot)
        .bind(data.duration_minutes)
        .bind(data.created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create session", e))
    }

    /// Update a session's status and optional free-text fields.
    pub async fn update(
        &self,
        id: Uuid,
        status: SessionStatus,
        notes: Option<&str>,
        meeting_link: Option<&str>,
    ) -> AppResult<Session> {
        sqlx::query_as::<_, Session>(
            "UPDATE sessions SET status = $2, \
                                 notes = COALESCE($3, notes), \
                                 meeting_link = COALESCE($4, meeting_link), \
                                 updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .bind(notes)
        .bind(meeting_link)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update session", e))?
        .ok_or_else(|| AppError::not_found(format!("Session {id} not found")))
    }

    /// Count total sessions.
    pub async fn count(&self) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sessions")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count sessions", e)
            })?;
        Ok(count as u64)
    }

    /// Count sessions scheduled for today or later.
    pub async fn count_upcoming(&self) -> AppResult<u64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM sessions WHERE scheduled_date >= CURRENT_DATE")
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count upcoming sessions", e)
                })?;
        Ok(count as u64)
    }
}
