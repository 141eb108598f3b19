//! Case priority enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Processing priority of a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "case_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CasePriority {
    /// No urgency.
    Low,
    /// Default priority.
    Medium,
    /// Elevated priority.
    High,
    /// Time-critical.
    Urgent,
}

impl CasePriority {
    /// Return the priority as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

impl Default for CasePriority {
    fn default() -> Self {
        Self::Medium
    }
}

impl fmt::Display for CasePriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CasePriority {
    type Err = glojourn_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "urgent" => Ok(Self::Urgent),
            _ => Err(glojourn_core::AppError::validation(format!(
                "Invalid priority: '{s}'"
            ))),
        }
    }
}
