//! Automation entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use uuid::Uuid;

use super::action::AutomationAction;
use super::trigger::{AutomationTriggerType, TriggerConditions};

/// A stored trigger + action-list document executed against a case.
///
/// Execution bookkeeping (`last_executed`, `execution_count`) is only
/// advanced when every action in the list succeeds.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Automation {
    /// Unique automation identifier.
    pub id: Uuid,
    /// Human-readable name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// What causes this automation to fire.
    pub trigger_type: AutomationTriggerType,
    /// Loosely-typed trigger condition fields.
    pub trigger_conditions: Json<TriggerConditions>,
    /// Ordered list of actions, executed sequentially without atomicity.
    pub actions: Json<Vec<AutomationAction>>,
    /// Whether the automation may be executed.
    pub is_active: bool,
    /// The user who created the automation.
    pub created_by: Uuid,
    /// When the automation last completed successfully.
    pub last_executed: Option<DateTime<Utc>>,
    /// Number of successful executions.
    pub execution_count: i32,
    /// When the automation was created.
    pub created_at: DateTime<Utc>,
    /// When the automation was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new automation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAutomation {
    /// Human-readable name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// What causes this automation to fire.
    pub trigger_type: AutomationTriggerType,
    /// Trigger condition fields.
    pub trigger_conditions: TriggerConditions,
    /// Ordered action list.
    pub actions: Vec<AutomationAction>,
    /// The creating user.
    pub created_by: Uuid,
}
