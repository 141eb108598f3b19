//! Automation action list entries.

use serde::{Deserialize, Serialize};

/// Well-known action type strings.
///
/// The action `type` field is deliberately an open string rather than an
/// enum: stored automations may carry action types this build does not
/// understand, and the executor skips those silently instead of failing
/// to deserialize the whole document.
pub mod kind {
    pub const ASSIGN_COORDINATOR: &str = "assign_coordinator";
    pub const ASSIGN_MANAGER: &str = "assign_manager";
    pub const SEND_EMAIL: &str = "send_email";
    pub const UPDATE_STATUS: &str = "update_status";
    pub const CREATE_NOTIFICATION: &str = "create_notification";
    pub const SEND_REMINDER: &str = "send_reminder";
}

/// A single entry in an automation's ordered action list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutomationAction {
    /// Action type (see [`kind`]).
    #[serde(rename = "type")]
    pub kind: String,
    /// Per-action configuration.
    #[serde(default)]
    pub config: ActionConfig,
}

/// Loosely-typed per-action configuration; which fields are meaningful
/// depends on the action type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionConfig {
    /// Target role for assignment actions ("coordinator" or "manager").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_role: Option<String>,
    /// Template name for `send_email`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_template: Option<String>,
    /// Target status for `update_status`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_status: Option<String>,
    /// Message text for `create_notification`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_message: Option<String>,
    /// Day offset for `send_reminder`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_days: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_kind_still_deserializes() {
        let action: AutomationAction =
            serde_json::from_str(r#"{"type": "escalate_to_legal", "config": {}}"#).unwrap();
        assert_eq!(action.kind, "escalate_to_legal");
    }

    #[test]
    fn test_config_defaults_when_missing() {
        let action: AutomationAction =
            serde_json::from_str(r#"{"type": "send_email"}"#).unwrap();
        assert!(action.config.email_template.is_none());
    }

    #[test]
    fn test_update_status_config() {
        let action: AutomationAction = serde_json::from_str(
            r#"{"type": "update_status", "config": {"new_status": "under_review"}}"#,
        )
        .unwrap();
        assert_eq!(action.kind, kind::UPDATE_STATUS);
        assert_eq!(action.config.new_status.as_deref(), Some("under_review"));
    }
}
