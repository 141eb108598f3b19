//! Automation trigger type and conditions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What causes an automation to be considered for execution.
///
/// Only `manual` is wired to an execution path today (the on-demand execute
/// endpoint); the remaining variants are stored metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "automation_trigger", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AutomationTriggerType {
    StatusChange,
    DeadlineApproaching,
    DocumentUploaded,
    CaseCreated,
    Manual,
}

impl AutomationTriggerType {
    /// Return the trigger type as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StatusChange => "status_change",
            Self::DeadlineApproaching => "deadline_approaching",
            Self::DocumentUploaded => "document_uploaded",
            Self::CaseCreated => "case_created",
            Self::Manual => "manual",
        }
    }
}

impl fmt::Display for AutomationTriggerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AutomationTriggerType {
    type Err = glojourn_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "status_change" => Ok(Self::StatusChange),
            "deadline_approaching" => Ok(Self::DeadlineApproaching),
            "document_uploaded" => Ok(Self::DocumentUploaded),
            "case_created" => Ok(Self::CaseCreated),
            "manual" => Ok(Self::Manual),
            _ => Err(glojourn_core::AppError::validation(format!(
                "Invalid automation trigger: '{s}'"
            ))),
        }
    }
}

/// Loosely-typed trigger condition fields; which ones are meaningful
/// depends on the trigger type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriggerConditions {
    /// Status value for `status_change` triggers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Day threshold for `deadline_approaching` triggers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_before_deadline: Option<i32>,
    /// Document type for `document_uploaded` triggers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_type: Option<String>,
}
