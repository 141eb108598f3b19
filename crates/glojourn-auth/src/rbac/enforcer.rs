//! RBAC enforcement logic — checks whether a role holds a capability.

use glojourn_core::error::AppError;
use glojourn_entity::user::UserRole;

use super::policies::{Capability, RbacPolicies};

/// Enforces the capability policy for system operations.
#[derive(Debug, Clone)]
pub struct RbacEnforcer {
    /// The policy configuration.
    policies: RbacPolicies,
}

impl RbacEnforcer {
    /// Creates a new enforcer with the default policy set.
    pub fn new() -> Self {
        Self {
            policies: RbacPolicies::new(),
        }
    }

    /// Creates an enforcer with custom policies.
    pub fn with_policies(policies: RbacPolicies) -> Self {
        Self { policies }
    }

    /// Checks whether the given role holds the required capability.
    ///
    /// Returns `Ok(())` if allowed, or a forbidden error if denied. The
    /// error message deliberately carries no detail about the missing grant.
    pub fn require(&self, role: UserRole, capability: Capability) -> Result<(), AppError> {
        if self.policies.has_capability(role, capability) {
            Ok(())
        } else {
            Err(AppError::forbidden("Access denied"))
        }
    }

    /// Checks whether the role holds the capability (returns bool).
    pub fn has_capability(&self, role: UserRole, capability: Capability) -> bool {
        self.policies.has_capability(role, capability)
    }

    /// Returns a reference to the underlying policies.
    pub fn policies(&self) -> &RbacPolicies {
        &self.policies
    }
}

impl Default for RbacEnforcer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glojourn_core::error::ErrorKind;

    #[test]
    fn test_require_denies_with_generic_message() {
        let enforcer = RbacEnforcer::new();
        let err = enforcer
            .require(UserRole::Client, Capability::SessionList)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
        assert_eq!(err.message, "Access denied");
    }

    #[test]
    fn test_require_allows_granted_capability() {
        let enforcer = RbacEnforcer::new();
        assert!(enforcer
            .require(UserRole::Coordinator, Capability::SessionList)
            .is_ok());
    }
}
