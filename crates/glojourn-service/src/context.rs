//! Request context carrying the authenticated user.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use glojourn_entity::user::UserRole;

/// Context for the current authenticated request.
///
/// Extracted by the API layer and passed into service methods so that
/// every operation knows *who* is acting and with *which* role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The user's role, re-read from the database at request time.
    pub role: UserRole,
    /// The user's name (convenience field).
    pub name: String,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: Uuid, role: UserRole, name: String) -> Self {
        Self {
            user_id,
            role,
            name,
        }
    }

    /// Returns whether the current user is an admin.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Returns whether the current user holds a staff role.
    pub fn is_staff(&self) -> bool {
        self.role.is_staff()
    }
}
