//! Consultation session status enumeration and transition rules.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status of a scheduled consultation session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "session_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// Booked but not yet confirmed by staff.
    Pending,
    /// Confirmed and scheduled.
    Confirmed,
    /// The consultation took place.
    Completed,
    /// The booking was cancelled.
    Cancelled,
}

impl SessionStatus {
    /// Whether a transition from `self` to `next` is legal.
    ///
    /// Pending sessions can be confirmed or cancelled; confirmed sessions can
    /// be completed or cancelled. Completed and cancelled are terminal.
    /// Writing the current status again is a no-op and always allowed.
    pub fn can_transition_to(&self, next: SessionStatus) -> bool {
        if *self == next {
            return true;
        }
        matches!(
            (self, next),
            (Self::Pending, Self::Confirmed)
                | (Self::Pending, Self::Cancelled)
                | (Self::Confirmed, Self::Completed)
                | (Self::Confirmed, Self::Cancelled)
        )
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SessionStatus {
    type Err = glojourn_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(glojourn_core::AppError::validation(format!(
                "Invalid session status: '{s}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legal_transitions() {
        assert!(SessionStatus::Pending.can_transition_to(SessionStatus::Confirmed));
        assert!(SessionStatus::Pending.can_transition_to(SessionStatus::Cancelled));
        assert!(SessionStatus::Confirmed.can_transition_to(SessionStatus::Completed));
        assert!(SessionStatus::Confirmed.can_transition_to(SessionStatus::Cancelled));
    }

    #[test]
    fn test_illegal_transitions() {
        assert!(!SessionStatus::Pending.can_transition_to(SessionStatus::Completed));
        assert!(!SessionStatus::Completed.can_transition_to(SessionStatus::Pending));
        assert!(!SessionStatus::Cancelled.can_transition_to(SessionStatus::Confirmed));
    }

    #[test]
    fn test_same_status_is_noop() {
        assert!(SessionStatus::Completed.can_transition_to(SessionStatus::Completed));
    }
}
