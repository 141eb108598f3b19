//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles available in the system.
///
/// Staff roles (coordinator, manager, admin) have progressively broader
/// visibility over cases; clients only ever see their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// A client with a single visa application.
    Client,
    /// Staff member handling assigned cases plus the unassigned pool.
    Coordinator,
    /// Staff member overseeing coordinators and their cases.
    Manager,
    /// Full system administrator.
    Admin,
}

impl UserRole {
    /// Check if this role is a staff role (coordinator or above).
    pub fn is_staff(&self) -> bool {
        matches!(self, Self::Coordinator | Self::Manager | Self::Admin)
    }

    /// Check if this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Coordinator => "coordinator",
            Self::Manager => "manager",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = glojourn_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "client" => Ok(Self::Client),
            "coordinator" => Ok(Self::Coordinator),
            "manager" => Ok(Self::Manager),
            "admin" => Ok(Self::Admin),
            _ => Err(glojourn_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: client, coordinator, manager, admin"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staff_roles() {
        assert!(!UserRole::Client.is_staff());
        assert!(UserRole::Coordinator.is_staff());
        assert!(UserRole::Manager.is_staff());
        assert!(UserRole::Admin.is_staff());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("client".parse::<UserRole>().unwrap(), UserRole::Client);
        assert_eq!("ADMIN".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert!("superuser".parse::<UserRole>().is_err());
    }
}
