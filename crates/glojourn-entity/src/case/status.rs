//! Case lifecycle status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a visa application case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "case_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    /// Created by the client, not yet submitted.
    Draft,
    /// Submitted for staff review.
    Submitted,
    /// A staff member is reviewing the application.
    UnderReview,
    /// The application is being processed with the authorities.
    Processing,
    /// The visa was approved.
    Approved,
    /// The visa was rejected.
    Rejected,
    /// The case is closed.
    Completed,
}

impl CaseStatus {
    /// Return the status as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
            Self::UnderReview => "under_review",
            Self::Processing => "processing",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Completed => "completed",
        }
    }

    /// Statuses that count toward a coordinator's open workload.
    pub fn is_open_workload(&self) -> bool {
        matches!(self, Self::Draft | Self::Submitted | Self::UnderReview)
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CaseStatus {
    type Err = glojourn_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(Self::Draft),
            "submitted" => Ok(Self::Submitted),
            "under_review" => Ok(Self::UnderReview),
            "processing" => Ok(Self::Processing),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "completed" => Ok(Self::Completed),
            _ => Err(glojourn_core::AppError::validation(format!(
                "Invalid case status: '{s}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!(
            "under_review".parse::<CaseStatus>().unwrap(),
            CaseStatus::UnderReview
        );
        assert!("archived".parse::<CaseStatus>().is_err());
    }

    #[test]
    fn test_open_workload() {
        assert!(CaseStatus::Submitted.is_open_workload());
        assert!(!CaseStatus::Approved.is_open_workload());
    }
}
