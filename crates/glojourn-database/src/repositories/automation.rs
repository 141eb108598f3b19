//! Automation repository implementation.

use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use glojourn_core::error::{AppError, ErrorKind};
use glojourn_core::result::AppResult;
use glojourn_entity::automation::model::CreateAutomation;
use glojourn_entity::automation::{Automation, AutomationAction, TriggerConditions};

/// Repository for automation document CRUD and execution bookkeeping.
#[derive(Debug, Clone)]
pub struct AutomationRepository {
    pool: PgPool,
}

impl AutomationRepository {
    /// Create a new automation repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an automation by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Automation>> {
        sqlx::query_as::<_, Automation>("SELECT * FROM automations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find automation", e))
    }

    /// List all automations, newest first.
    pub async fn find_all(&self) -> AppResult<Vec<Automation>> {
        sqlx::query_as::<_, Automation>("SELECT * FROM automations ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list automations", e)
            })
    }

    /// Create a new automation.
    pub async fn create(&self, data: &CreateAutomation) -> AppResult<Automation> {
        sqlx::query_as::<_, Automation>(
            "INSERT INTO automations \
                 (name, description, trigger_type, trigger_conditions, actions, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.trigger_type)
        .bind(Json(&data.trigger_conditions))
        .bind(Json(&data.actions))
        .bind(data.created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create automation", e))
    }

    /// Update an automation's definition fields.
    pub async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        description: Option<&str>,
        trigger_conditions: Option<&TriggerConditions>,
        actions: Option<&Vec<AutomationAction>>,
        is_active: Option<bool>,
    ) -> AppResult<Automation> {
        sqlx::query_as::<_, Automation>(
            "UPDATE automations SET name = COALESCE($2, name), \
                                    description = COALESCE($3, description), \
                                    trigger_conditions = COALESCE($4, trigger_conditions), \
                                    actions = COALESCE($5, actions), \
                                    is_active = COALESCE($6, is_active), \
                                    updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .bind(trigger_conditions.map(Json))
        .bind(actions.map(Json))
        .bind(is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update automation", e))?
        .ok_or_else(|| AppError::not_found(format!("Automation {id} not found")))
    }

    /// Delete an automation by ID.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM automations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete automation", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    /// Record a successful execution: stamp the time and bump the counter.
    ///
    /// Callers must only invoke this after every action succeeded.
    pub async fn record_execution(&self, id: Uuid) -> AppResult<()> {
        sqlx::query(
            "UPDATE automations SET last_executed = NOW(), \
                                    execution_count = execution_count + 1, \
                                    updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to record execution", e)
        })?;
        Ok(())
    }
}
