//! Request DTOs with validation.
//!
//! Enum-valued fields arrive as strings and are parsed in the handlers so
//! that invalid values produce a 400 with a field message rather than a
//! body-rejection.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;
use validator::Validate;

use glojourn_entity::automation::{AutomationAction, TriggerConditions};

/// Deserialize a field that distinguishes "absent" from "explicit null":
/// absent → `None`, null → `Some(None)`, value → `Some(Some(v))`.
fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(de).map(Some)
}

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Full name.
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    /// Email address.
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token refresh request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// Refresh token.
    pub refresh_token: String,
}

/// Create application/case request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateApplicationRequest {
    /// Visa type (tourist, business, student, work, family, other).
    #[validate(length(min = 1, message = "Visa type is required"))]
    pub visa_type: String,
    /// Free-form application details.
    #[serde(default)]
    pub details: Option<serde_json::Value>,
    /// Priority (low, medium, high, urgent); defaults to medium.
    pub priority: Option<String>,
}

/// Update application/case request — the allow-listed patch surface.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateApplicationRequest {
    /// New visa type.
    pub visa_type: Option<String>,
    /// Replacement application details.
    pub details: Option<serde_json::Value>,
    /// New priority.
    pub priority: Option<String>,
    /// New status.
    pub status: Option<String>,
    /// Coordinator assignment (`null` clears it).
    #[serde(default, deserialize_with = "double_option")]
    pub assigned_coordinator: Option<Option<Uuid>>,
    /// Manager assignment (`null` clears it).
    #[serde(default, deserialize_with = "double_option")]
    pub assigned_manager: Option<Option<Uuid>>,
}

/// Case note request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateNoteRequest {
    /// Note content; must be non-empty after trimming.
    #[validate(length(min = 1, message = "Note content is required"))]
    pub content: String,
}

/// Coordinator assignment request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignRequest {
    /// The application to (re)assign.
    pub application_id: Uuid,
    /// The coordinator to assign; omit to clear the assignment.
    pub coordinator_id: Option<Uuid>,
}

/// Session creation request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateSessionRequest {
    /// The attending client.
    pub client_id: Uuid,
    /// The conducting coordinator, if known.
    pub coordinator_id: Option<Uuid>,
    /// Consultation date.
    pub scheduled_date: NaiveDate,
    /// Time slot label.
    #[validate(length(min = 1, message = "Time slot is required"))]
    pub time_slot: String,
    /// Planned duration in minutes.
    pub duration_minutes: Option<i32>,
}

/// Session update request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateSessionRequest {
    /// Target status (pending, confirmed, completed, cancelled).
    #[validate(length(min = 1, message = "Status is required"))]
    pub status: String,
    /// Replacement notes.
    pub notes: Option<String>,
    /// Replacement meeting link.
    pub meeting_link: Option<String>,
}

/// Staff account creation request (admin).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// Full name.
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    /// Email address.
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    /// Staff role (coordinator, manager, admin).
    pub role: String,
    /// Reporting manager for coordinators.
    pub manager_id: Option<Uuid>,
}

/// User profile update request (staff).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    /// New name.
    pub name: Option<String>,
    /// New email.
    pub email: Option<String>,
    /// Reporting manager (`null` clears it).
    #[serde(default, deserialize_with = "double_option")]
    pub manager_id: Option<Option<Uuid>>,
}

/// Automation creation request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateAutomationRequest {
    /// Automation name.
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Trigger type.
    #[validate(length(min = 1, message = "Trigger type is required"))]
    pub trigger_type: String,
    /// Trigger conditions.
    #[serde(default)]
    pub trigger_conditions: Option<TriggerConditions>,
    /// Ordered action list.
    #[serde(default)]
    pub actions: Vec<AutomationAction>,
}

/// Automation update request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAutomationRequest {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// Replacement trigger conditions.
    pub trigger_conditions: Option<TriggerConditions>,
    /// Replacement action list.
    pub actions: Option<Vec<AutomationAction>>,
    /// Enable/disable flag.
    pub is_active: Option<bool>,
}

/// Automation execution request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecuteAutomationRequest {
    /// The case to execute against.
    pub case_id: Uuid,
}

/// Staff document request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateDocumentRequestRequest {
    /// The application the document is requested for.
    pub application_id: Uuid,
    /// What kind of document is requested.
    #[validate(length(min = 1, message = "Document type is required"))]
    pub document_type: String,
    /// Optional message to the client.
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_option_distinguishes_null_from_absent() {
        let absent: UpdateApplicationRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.assigned_coordinator, None);

        let null: UpdateApplicationRequest =
            serde_json::from_str(r#"{"assigned_coordinator": null}"#).unwrap();
        assert_eq!(null.assigned_coordinator, Some(None));

        let id = Uuid::new_v4();
        let set: UpdateApplicationRequest =
            serde_json::from_str(&format!(r#"{{"assigned_coordinator": "{id}"}}"#)).unwrap();
        assert_eq!(set.assigned_coordinator, Some(Some(id)));
    }

    #[test]
    fn test_register_validation() {
        use validator::Validate;

        let bad = RegisterRequest {
            name: String::new(),
            email: "not-an-email".to_string(),
            password: "short".to_string(),
        };
        assert!(bad.validate().is_err());

        let good = RegisterRequest {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "long enough".to_string(),
        };
        assert!(good.validate().is_ok());
    }
}
