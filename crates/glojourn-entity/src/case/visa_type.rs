//! Visa type enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The category of visa being applied for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "visa_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum VisaType {
    Tourist,
    Business,
    Student,
    Work,
    Family,
    Other,
}

impl VisaType {
    /// Return the visa type as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tourist => "tourist",
            Self::Business => "business",
            Self::Student => "student",
            Self::Work => "work",
            Self::Family => "family",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for VisaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for VisaType {
    type Err = glojourn_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tourist" => Ok(Self::Tourist),
            "business" => Ok(Self::Business),
            "student" => Ok(Self::Student),
            "work" => Ok(Self::Work),
            "family" => Ok(Self::Family),
            "other" => Ok(Self::Other),
            _ => Err(glojourn_core::AppError::validation(format!(
                "Invalid visa type: '{s}'"
            ))),
        }
    }
}
