//! Automation action execution.
//!
//! Actions run sequentially with no atomicity: when an action fails, the
//! effects of earlier actions stand, later actions never run, and the
//! error propagates to the caller (which then skips the execution
//! bookkeeping). Unknown action types are skipped silently.

use std::str::FromStr;
use std::sync::Arc;

use tracing::{debug, info, warn};

use glojourn_core::result::AppResult;
use glojourn_database::repositories::case::CaseRepository;
use glojourn_database::repositories::user::UserRepository;
use glojourn_entity::automation::action::kind;
use glojourn_entity::automation::{ActionConfig, Automation};
use glojourn_entity::case::{Case, CaseStatus};
use glojourn_entity::user::UserRole;

/// Result of running an automation's action list to completion.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ExecutionOutcome {
    /// The case after all actions took effect.
    pub case: Case,
    /// Number of actions that ran.
    pub actions_run: usize,
    /// Number of actions skipped (unknown or unhandled types).
    pub actions_skipped: usize,
}

/// Executes an automation's action list against a case.
#[derive(Debug, Clone)]
pub struct AutomationExecutor {
    /// Case repository, for assignment and status writes.
    case_repo: Arc<CaseRepository>,
    /// User repository, for assignee lookup.
    user_repo: Arc<UserRepository>,
}

impl AutomationExecutor {
    /// Creates a new executor.
    pub fn new(case_repo: Arc<CaseRepository>, user_repo: Arc<UserRepository>) -> Self {
        Self {
            case_repo,
            user_repo,
        }
    }

    /// Run every action in list order against the target case.
    pub async fn execute(&self, automation: &Automation, case: Case) -> AppResult<ExecutionOutcome> {
        let mut case = case;
        let mut actions_run = 0usize;
        let mut actions_skipped = 0usize;

        for action in automation.actions.0.iter() {
            match action.kind.as_str() {
                kind::ASSIGN_COORDINATOR => {
                    case = self
                        .assign_first_active(case, &action.config, UserRole::Coordinator)
                        .await?;
                    actions_run += 1;
                }
                kind::ASSIGN_MANAGER => {
                    case = self
                        .assign_first_active(case, &action.config, UserRole::Manager)
                        .await?;
                    actions_run += 1;
                }
                kind::UPDATE_STATUS => {
                    if let Some(new_status) = parse_new_status(&action.config)? {
                        case = self.case_repo.set_status(case.id, new_status).await?;
                    }
                    actions_run += 1;
                }
                kind::SEND_EMAIL => {
                    // No delivery subsystem exists; the intent is logged.
                    info!(
                        case_id = %case.id,
                        template = action.config.email_template.as_deref().unwrap_or("(none)"),
                        "Sending email"
                    );
                    actions_run += 1;
                }
                kind::CREATE_NOTIFICATION => {
                    info!(
                        case_id = %case.id,
                        message = action.config.notification_message.as_deref().unwrap_or("(none)"),
                        "Creating notification"
                    );
                    actions_run += 1;
                }
                other => {
                    debug!(action_type = other, "Skipping unhandled automation action");
                    actions_skipped += 1;
                }
            }
        }

        Ok(ExecutionOutcome {
            case,
            actions_run,
            actions_skipped,
        })
    }

    /// Assign the first active user of the configured role to the case.
    ///
    /// The action is a no-op when the configured assignee role does not
    /// match the action's target role or when no candidate exists.
    async fn assign_first_active(
        &self,
        case: Case,
        config: &ActionConfig,
        role: UserRole,
    ) -> AppResult<Case> {
        if config.assignee_role.as_deref() != Some(role.as_str()) {
            return Ok(case);
        }

        match self.user_repo.find_first_active_by_role(role).await? {
            Some(user) => {
                let updated = match role {
                    UserRole::Manager => self.case_repo.set_manager(case.id, Some(user.id)).await?,
                    _ => self.case_repo.set_coordinator(case.id, Some(user.id)).await?,
                };
                info!(case_id = %case.id, assignee = %user.id, role = %role, "Auto-assigned");
                Ok(updated)
            }
            None => {
                warn!(case_id = %case.id, role = %role, "No active user available to assign");
                Ok(case)
            }
        }
    }
}

/// Parse the configured target status, if any.
///
/// A missing `new_status` makes the action a no-op; an invalid one is an
/// execution failure.
fn parse_new_status(config: &ActionConfig) -> AppResult<Option<CaseStatus>> {
    match config.new_status.as_deref() {
        None => Ok(None),
        Some(raw) => CaseStatus::from_str(raw).map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_new_status_absent_is_noop() {
        assert!(parse_new_status(&ActionConfig::default()).unwrap().is_none());
    }

    #[test]
    fn test_parse_new_status_valid() {
        let config = ActionConfig {
            new_status: Some("under_review".to_string()),
            ..Default::default()
        };
        assert_eq!(
            parse_new_status(&config).unwrap(),
            Some(CaseStatus::UnderReview)
        );
    }

    #[test]
    fn test_parse_new_status_invalid_fails_execution() {
        let config = ActionConfig {
            new_status: Some("destroyed".to_string()),
            ..Default::default()
        };
        assert!(parse_new_status(&config).is_err());
    }
}
