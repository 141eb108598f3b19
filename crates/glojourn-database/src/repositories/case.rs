//! Case repository — CRUD, notes, and the role-scoped listing query.

use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use glojourn_core::error::{AppError, ErrorKind};
use glojourn_core::result::AppResult;
use glojourn_core::types::pagination::{PageRequest, PageResponse};
use glojourn_entity::case::{Case, CaseNote, CasePatch, CasePriority, CaseStatus, CreateCase};

/// Visibility scope for case listing, derived from the caller's role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseScope {
    /// No restriction (admin).
    All,
    /// Only the caller's own case (client).
    OwnCase(Uuid),
    /// Cases assigned to the caller plus the unassigned pool (coordinator).
    CoordinatorPool(Uuid),
    /// Cases assigned to the caller or to coordinators reporting to the
    /// caller (manager).
    ManagerTeam(Uuid),
}

/// Filter for case listing: a role scope plus optional equality filters.
#[derive(Debug, Clone, Copy)]
pub struct CaseListFilter {
    /// Role-derived visibility scope.
    pub scope: CaseScope,
    /// Restrict to a single status.
    pub status: Option<CaseStatus>,
    /// Restrict to a single priority.
    pub priority: Option<CasePriority>,
}

/// Append the WHERE clause for a [`CaseListFilter`] to a query builder.
///
/// The scope predicate always comes first; status/priority filters are
/// ANDed onto it.
fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &CaseListFilter) {
    qb.push(" WHERE ");
    match filter.scope {
        CaseScope::All => {
            qb.push("TRUE");
        }
        CaseScope::OwnCase(client_id) => {
            qb.push("client_id = ").push_bind(client_id);
        }
        CaseScope::CoordinatorPool(coordinator_id) => {
            qb.push("(assigned_coordinator = ")
                .push_bind(coordinator_id)
                .push(" OR assigned_coordinator IS NULL)");
        }
        CaseScope::ManagerTeam(manager_id) => {
            qb.push("(assigned_manager = ")
                .push_bind(manager_id)
                .push(
                    " OR assigned_coordinator IN \
                     (SELECT id FROM users WHERE role = 'coordinator' AND manager_id = ",
                )
                .push_bind(manager_id)
                .push("))");
        }
    }

    if let Some(status) = filter.status {
        qb.push(" AND status = ").push_bind(status);
    }
    if let Some(priority) = filter.priority {
        qb.push(" AND priority = ").push_bind(priority);
    }
}

/// Per-status (or per-priority) case count row for statistics.
#[derive(Debug, Clone, serde::Serialize, sqlx::FromRow)]
pub struct BucketCount {
    /// The bucket label (status or priority string).
    pub bucket: String,
    /// Number of cases in it.
    pub count: i64,
}

/// Per-coordinator open-case count row for the workload report.
#[derive(Debug, Clone, serde::Serialize, sqlx::FromRow)]
pub struct CoordinatorWorkload {
    /// Coordinator user ID.
    pub coordinator_id: Uuid,
    /// Coordinator name.
    pub name: String,
    /// Coordinator email.
    pub email: String,
    /// Number of assigned cases still in an open status.
    pub assigned_cases: i64,
}

/// Repository for case CRUD, notes, and scoped listing.
#[derive(Debug, Clone)]
pub struct CaseRepository {
    pool: PgPool,
}

impl CaseRepository {
    /// Create a new case repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a case by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Case>> {
        sqlx::query_as::<_, Case>("SELECT * FROM cases WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find case", e))
    }

    /// Find the case owned by the given client, if one exists.
    pub async fn find_by_client(&self, client_id: Uuid) -> AppResult<Option<Case>> {
        sqlx::query_as::<_, Case>("SELECT * FROM cases WHERE client_id = $1")
            .bind(client_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find case by client", e)
            })
    }

    /// List cases matching the filter, newest-created first.
    pub async fn list(
        &self,
        filter: &CaseListFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Case>> {
        let mut count_qb: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM cases");
        push_filter(&mut count_qb, filter);

        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count cases", e))?;

        let mut qb: QueryBuilder<'_, Postgres> = QueryBuilder::new("SELECT * FROM cases");
        push_filter(&mut qb, filter);
        qb.push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(page.limit() as i64)
            .push(" OFFSET ")
            .push_bind(page.offset() as i64);

        let cases = qb
            .build_query_as::<Case>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list cases", e))?;

        Ok(PageResponse::new(
            cases,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Create a new case in draft status.
    pub async fn create(&self, data: &CreateCase) -> AppResult<Case> {
        sqlx::query_as::<_, Case>(
            "INSERT INTO cases (client_id, visa_type, details, priority) \
             VALUES ($1, $2, $3, $4) \
             RETURNING *",
        )
        .bind(data.client_id)
        .bind(data.visa_type)
        .bind(&data.details)
        .bind(data.priority)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("cases_client_id_key") =>
            {
                AppError::conflict("You already have an application".to_string())
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create case", e),
        })
    }

    /// Apply an allow-listed patch to a case.
    pub async fn apply_patch(&self, id: Uuid, patch: &CasePatch) -> AppResult<Case> {
        if patch.is_empty() {
            return self
                .find_by_id(id)
                .await?
                .ok_or_else(|| AppError::not_found(format!("Case {id} not found")));
        }

        let mut qb: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("UPDATE cases SET updated_at = NOW()");
        if let Some(visa_type) = patch.visa_type {
            qb.push(", visa_type = ").push_bind(visa_type);
        }
        if let Some(details) = &patch.details {
            qb.push(", details = ").push_bind(details);
        }
        if let Some(priority) = patch.priority {
            qb.push(", priority = ").push_bind(priority);
        }
        if let Some(status) = patch.status {
            qb.push(", status = ").push_bind(status);
        }
        if let Some(coordinator) = patch.assigned_coordinator {
            qb.push(", assigned_coordinator = ").push_bind(coordinator);
        }
        if let Some(manager) = patch.assigned_manager {
            qb.push(", assigned_manager = ").push_bind(manager);
        }
        qb.push(" WHERE id = ").push_bind(id).push(" RETURNING *");

        qb.build_query_as::<Case>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update case", e))?
            .ok_or_else(|| AppError::not_found(format!("Case {id} not found")))
    }

    /// Set or clear the assigned coordinator.
    pub async fn set_coordinator(&self, id: Uuid, coordinator: Option<Uuid>) -> AppResult<Case> {
        sqlx::query_as::<_, Case>(
            "UPDATE cases SET assigned_coordinator = $2, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(coordinator)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to assign coordinator", e))?
        .ok_or_else(|| AppError::not_found(format!("Case {id} not found")))
    }

    /// Set or clear the assigned manager.
    pub async fn set_manager(&self, id: Uuid, manager: Option<Uuid>) -> AppResult<Case> {
        sqlx::query_as::<_, Case>(
            "UPDATE cases SET assigned_manager = $2, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(manager)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to assign manager", e))?
        .ok_or_else(|| AppError::not_found(format!("Case {id} not found")))
    }

    /// Set the case status.
    pub async fn set_status(&self, id: Uuid, status: CaseStatus) -> AppResult<Case> {
        sqlx::query_as::<_, Case>(
            "UPDATE cases SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to set case status", e))?
        .ok_or_else(|| AppError::not_found(format!("Case {id} not found")))
    }

    /// Delete a case by ID.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM cases WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete case", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// Append a note to a case.
    pub async fn add_note(&self, case_id: Uuid, author_id: Uuid, content: &str) -> AppResult<CaseNote> {
        sqlx::query_as::<_, CaseNote>(
            "INSERT INTO case_notes (case_id, author_id, content) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(case_id)
        .bind(author_id)
        .bind(content)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to add note", e))
    }

    /// List a case's notes, oldest first.
    pub async fn list_notes(&self, case_id: Uuid) -> AppResult<Vec<CaseNote>> {
        sqlx::query_as::<_, CaseNote>(
            "SELECT * FROM case_notes WHERE case_id = $1 ORDER BY created_at ASC",
        )
        .bind(case_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list notes", e))
    }

    /// Count total cases.
    pub async fn count(&self) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cases")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count cases", e))?;
        Ok(count as u64)
    }

    /// Count cases grouped by status.
    pub async fn count_by_status(&self) -> AppResult<Vec<BucketCount>> {
        sqlx::query_as::<_, BucketCount>(
            "SELECT status::text AS bucket, COUNT(*) AS count FROM cases GROUP BY status",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count cases by status", e)
        })
    }

    /// Count cases grouped by priority.
    pub async fn count_by_priority(&self) -> AppResult<Vec<BucketCount>> {
        sqlx::query_as::<_, BucketCount>(
            "SELECT priority::text AS bucket, COUNT(*) AS count FROM cases GROUP BY priority",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count cases by priority", e)
        })
    }

    /// The most recently created cases.
    pub async fn recent(&self, limit: i64) -> AppResult<Vec<Case>> {
        sqlx::query_as::<_, Case>("SELECT * FROM cases ORDER BY created_at DESC LIMIT $1")
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list recent cases", e)
            })
    }

    /// Open-workload counts for every active coordinator.
    ///
    /// Open means draft, submitted, or under_review.
    pub async fn coordinator_workload(&self) -> AppResult<Vec<CoordinatorWorkload>> {
        sqlx::query_as::<_, CoordinatorWorkload>(
            "SELECT u.id AS coordinator_id, u.name, u.email, \
                    COUNT(c.id) FILTER (WHERE c.status IN ('draft', 'submitted', 'under_review')) \
                        AS assigned_cases \
             FROM users u \
             LEFT JOIN cases c ON c.assigned_coordinator = u.id \
             WHERE u.role = 'coordinator' AND u.is_active \
             GROUP BY u.id, u.name, u.email \
             ORDER BY u.name ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to compute workload", e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(filter: &CaseListFilter) -> String {
        let mut qb: QueryBuilder<'_, Postgres> = QueryBuilder::new("SELECT COUNT(*) FROM cases");
        push_filter(&mut qb, filter);
        qb.sql().to_string()
    }

    #[test]
    fn test_admin_scope_is_unrestricted() {
        let sql = rendered(&CaseListFilter {
            scope: CaseScope::All,
            status: None,
            priority: None,
        });
        assert!(sql.ends_with("WHERE TRUE"));
    }

    #[test]
    fn test_client_scope_restricts_to_owner() {
        let sql = rendered(&CaseListFilter {
            scope: CaseScope::OwnCase(Uuid::new_v4()),
            status: None,
            priority: None,
        });
        assert!(sql.contains("client_id = $1"));
    }

    #[test]
    fn test_coordinator_scope_includes_unassigned_pool() {
        let sql = rendered(&CaseListFilter {
            scope: CaseScope::CoordinatorPool(Uuid::new_v4()),
            status: None,
            priority: None,
        });
        assert!(sql.contains("assigned_coordinator = $1"));
        assert!(sql.contains("assigned_coordinator IS NULL"));
    }

    #[test]
    fn test_manager_scope_covers_team() {
        let sql = rendered(&CaseListFilter {
            scope: CaseScope::ManagerTeam(Uuid::new_v4()),
            status: None,
            priority: None,
        });
        assert!(sql.contains("assigned_manager = $1"));
        assert!(sql.contains("manager_id = $2"));
    }

    #[test]
    fn test_equality_filters_are_anded() {
        let sql = rendered(&CaseListFilter {
            scope: CaseScope::OwnCase(Uuid::new_v4()),
            status: Some(CaseStatus::Submitted),
            priority: Some(CasePriority::High),
        });
        assert!(sql.contains(" AND status = $2"));
        assert!(sql.contains(" AND priority = $3"));
    }
}
