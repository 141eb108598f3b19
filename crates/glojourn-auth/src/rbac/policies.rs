//! Role-to-capability mapping definitions.
//!
//! Every endpoint checks exactly one capability; the per-role grant sets
//! below are the single source of truth for what each role may do.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use glojourn_entity::user::UserRole;

/// An operation a role may be granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    // Case operations
    /// List cases within the caller's visibility scope.
    CaseList,
    /// Read any case (clients read their own via the scope instead).
    CaseReadAny,
    /// Create a case (one per client).
    CaseCreate,
    /// Update any case (clients update their own via ownership instead).
    CaseUpdateAny,
    /// Hard-delete a case.
    CaseDelete,
    /// Set or clear a case's coordinator assignment.
    CaseAssign,
    /// Append a note to a case.
    CaseNoteAdd,

    // Session operations
    /// List consultation sessions.
    SessionList,
    /// Create a consultation session.
    SessionCreate,
    /// Update a consultation session.
    SessionUpdate,

    // User management
    /// List users.
    UserList,
    /// Read a user profile.
    UserRead,
    /// Update a user profile.
    UserUpdate,
    /// Delete a user.
    UserDelete,
    /// Toggle a user's active flag.
    UserToggleStatus,
    /// Create a staff account.
    UserCreateStaff,

    // Reporting
    /// View the admin statistics dashboard.
    StatsView,
    /// View per-coordinator workload.
    WorkloadView,
    /// List available coordinators.
    CoordinatorList,

    // Automations
    /// Create/update/delete automation documents.
    AutomationManage,
    /// Execute an automation against a case.
    AutomationExecute,

    // Documents
    /// Upload a document to a case.
    DocumentUpload,
    /// Request a document from a client.
    DocumentRequest,
}

/// Defines the mapping from each role to its set of allowed capabilities.
#[derive(Debug, Clone)]
pub struct RbacPolicies {
    /// Role → set of capabilities.
    policies: HashMap<UserRole, HashSet<Capability>>,
}

impl RbacPolicies {
    /// Creates the default policy set.
    pub fn new() -> Self {
        let mut policies = HashMap::new();

        // Client: owns exactly one case; listing is allowed but the query
        // scope restricts it to that case.
        let client: HashSet<Capability> = [
            Capability::CaseList,
            Capability::CaseCreate,
            Capability::DocumentUpload,
        ]
        .into_iter()
        .collect();
        policies.insert(UserRole::Client, client);

        // Coordinator: day-to-day case handling.
        let coordinator: HashSet<Capability> = [
            Capability::CaseList,
            Capability::CaseReadAny,
            Capability::CaseUpdateAny,
            Capability::CaseNoteAdd,
            Capability::SessionList,
            Capability::SessionCreate,
            Capability::SessionUpdate,
            Capability::UserList,
            Capability::UserRead,
            Capability::UserUpdate,
            Capability::UserToggleStatus,
            Capability::StatsView,
            Capability::DocumentUpload,
            Capability::DocumentRequest,
        ]
        .into_iter()
        .collect();
        policies.insert(UserRole::Coordinator, coordinator.clone());

        // Manager: coordinator plus assignment and workload oversight.
        let mut manager = coordinator;
        manager.insert(Capability::CaseAssign);
        manager.insert(Capability::WorkloadView);
        manager.insert(Capability::CoordinatorList);
        policies.insert(UserRole::Manager, manager.clone());

        // Admin: everything.
        let mut admin = manager;
        admin.insert(Capability::CaseCreate);
        admin.insert(Capability::CaseDelete);
        admin.insert(Capability::UserDelete);
        admin.insert(Capability::UserCreateStaff);
        admin.insert(Capability::AutomationManage);
        admin.insert(Capability::AutomationExecute);
        admin.insert(Capability::DocumentUpload);
        policies.insert(UserRole::Admin, admin);

        Self { policies }
    }

    /// Returns the set of capabilities for the given role.
    pub fn capabilities_for_role(&self, role: UserRole) -> HashSet<Capability> {
        self.policies.get(&role).cloned().unwrap_or_default()
    }

    /// Checks whether the given role has the specified capability.
    pub fn has_capability(&self, role: UserRole, capability: Capability) -> bool {
        self.policies
            .get(&role)
            .map(|caps| caps.contains(&capability))
            .unwrap_or(false)
    }
}

impl Default for RbacPolicies {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_cannot_reach_staff_operations() {
        let policies = RbacPolicies::new();
        for cap in [
            Capability::CaseReadAny,
            Capability::SessionList,
            Capability::StatsView,
            Capability::UserList,
            Capability::CaseAssign,
            Capability::AutomationExecute,
        ] {
            assert!(
                !policies.has_capability(UserRole::Client, cap),
                "client unexpectedly granted {cap:?}"
            );
        }
    }

    #[test]
    fn test_assignment_is_manager_and_above() {
        let policies = RbacPolicies::new();
        assert!(!policies.has_capability(UserRole::Coordinator, Capability::CaseAssign));
        assert!(policies.has_capability(UserRole::Manager, Capability::CaseAssign));
        assert!(policies.has_capability(UserRole::Admin, Capability::CaseAssign));
    }

    #[test]
    fn test_destructive_operations_are_admin_only() {
        let policies = RbacPolicies::new();
        for role in [UserRole::Client, UserRole::Coordinator, UserRole::Manager] {
            assert!(!policies.has_capability(role, Capability::CaseDelete));
            assert!(!policies.has_capability(role, Capability::UserDelete));
            assert!(!policies.has_capability(role, Capability::AutomationManage));
        }
        assert!(policies.has_capability(UserRole::Admin, Capability::CaseDelete));
    }

    #[test]
    fn test_staff_grants_widen_monotonically() {
        // Coordinator ⊆ Manager ⊆ Admin.
        let policies = RbacPolicies::new();
        let coordinator = policies.capabilities_for_role(UserRole::Coordinator);
        let manager = policies.capabilities_for_role(UserRole::Manager);
        let admin = policies.capabilities_for_role(UserRole::Admin);

        assert!(coordinator.is_subset(&manager));
        assert!(manager.is_subset(&admin));
    }
}
