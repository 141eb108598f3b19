//! Case (visa application) entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::priority::CasePriority;
use super::status::CaseStatus;
use super::visa_type::VisaType;

/// A client's visa application, tracked through its status lifecycle.
///
/// Each client owns at most one case (enforced by a unique constraint on
/// `client_id`). `assigned_coordinator` and `assigned_manager` are weak
/// references: they are role-checked when written but carry no further
/// referential guarantee.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Case {
    /// Unique case identifier.
    pub id: Uuid,
    /// The owning client.
    pub client_id: Uuid,
    /// The category of visa applied for.
    pub visa_type: VisaType,
    /// Free-form application details (destination, purpose of visit, ...).
    pub details: serde_json::Value,
    /// Processing priority.
    pub priority: CasePriority,
    /// Current lifecycle status.
    pub status: CaseStatus,
    /// Coordinator handling this case, if assigned.
    pub assigned_coordinator: Option<Uuid>,
    /// Manager overseeing this case, if assigned.
    pub assigned_manager: Option<Uuid>,
    /// When the case was created.
    pub created_at: DateTime<Utc>,
    /// When the case was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCase {
    /// The owning client.
    pub client_id: Uuid,
    /// The category of visa applied for.
    pub visa_type: VisaType,
    /// Free-form application details.
    pub details: serde_json::Value,
    /// Processing priority (defaults to medium).
    pub priority: CasePriority,
}

/// Allow-listed partial update for a case.
///
/// Only the fields present here can ever be patched; anything else in a
/// request body is ignored at the DTO boundary. The assignment fields use a
/// nested `Option` so that `Some(None)` explicitly clears an assignment
/// while `None` leaves it untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CasePatch {
    /// New visa type.
    pub visa_type: Option<VisaType>,
    /// Replacement application details.
    pub details: Option<serde_json::Value>,
    /// New priority.
    pub priority: Option<CasePriority>,
    /// New status.
    pub status: Option<CaseStatus>,
    /// New coordinator assignment (`Some(None)` clears it).
    pub assigned_coordinator: Option<Option<Uuid>>,
    /// New manager assignment (`Some(None)` clears it).
    pub assigned_manager: Option<Option<Uuid>>,
}

impl CasePatch {
    /// Whether the patch carries no changes at all.
    pub fn is_empty(&self) -> bool {
        self.visa_type.is_none()
            && self.details.is_none()
            && self.priority.is_none()
            && self.status.is_none()
            && self.assigned_coordinator.is_none()
            && self.assigned_manager.is_none()
    }
}
