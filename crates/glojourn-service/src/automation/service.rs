//! Automation document management and on-demand execution.

use std::sync::Arc;

use tracing::{error, info};
use uuid::Uuid;

use glojourn_auth::rbac::{Capability, RbacEnforcer};
use glojourn_core::error::AppError;
use glojourn_core::result::AppResult;
use glojourn_database::repositories::automation::AutomationRepository;
use glojourn_database::repositories::case::CaseRepository;
use glojourn_entity::automation::model::CreateAutomation;
use glojourn_entity::automation::{
    Automation, AutomationAction, AutomationTriggerType, TriggerConditions,
};

use super::executor::{AutomationExecutor, ExecutionOutcome};
use crate::context::RequestContext;

/// Fields accepted by an automation update.
#[derive(Debug, Clone, Default)]
pub struct AutomationPatch {
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

/// Handles automation CRUD and execution.
#[derive(Debug, Clone)]
pub struct AutomationService {
    /// Automation repository.
    automation_repo: Arc<AutomationRepository>,
    /// Case repository, for resolving the execution target.
    case_repo: Arc<CaseRepository>,
    /// The action executor.
    executor: AutomationExecutor,
    /// Capability policy enforcer.
    rbac: Arc<RbacEnforcer>,
}

impl AutomationService {
    /// Creates a new automation service.
    pub fn new(
        automation_repo: Arc<AutomationRepository>,
        case_repo: Arc<CaseRepository>,
        executor: AutomationExecutor,
        rbac: Arc<RbacEnforcer>,
    ) -> Self {
        Self {
            automation_repo,
            case_repo,
            executor,
            rbac,
        }
    }

    /// List all automations, newest first.
    pub async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<Automation>> {
        self.rbac.require(ctx.role, Capability::AutomationManage)?;
        self.automation_repo.find_all().await
    }

    /// Fetch a single automation.
    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> AppResult<Automation> {
        self.rbac.require(ctx.role, Capability::AutomationManage)?;
        self.automation_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Automation not found"))
    }

    /// Create a new automation.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        name: String,
        description: Option<String>,
        trigger_type: AutomationTriggerType,
        trigger_conditions: TriggerConditions,
        actions: Vec<AutomationAction>,
    ) -> AppResult<Automation> {
        self.rbac.require(ctx.role, Capability::AutomationManage)?;

        if name.trim().is_empty() {
            return Err(AppError::validation("Automation name is required"));
        }

        let automation = self
            .automation_repo
            .create(&CreateAutomation {
                name,
                description,
                trigger_type,
                trigger_conditions,
                actions,
                created_by: ctx.user_id,
            })
            .await?;

        info!(automation_id = %automation.id, created_by = %ctx.user_id, "Automation created");
        Ok(automation)
    }

    /// Update an automation's definition.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        patch: AutomationPatch,
    ) -> AppResult<Automation> {
        self.rbac.require(ctx.role, Capability::AutomationManage)?;
        self.automation_repo
            .update(
                id,
                patch.name.as_deref(),
                patch.description.as_deref(),
                patch.trigger_conditions.as_ref(),
                patch.actions.as_ref(),
                patch.is_active,
            )
            .await
    }

    /// Delete an automation.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        self.rbac.require(ctx.role, Capability::AutomationManage)?;
        if !self.automation_repo.delete(id).await? {
            return Err(AppError::not_found("Automation not found"));
        }
        Ok(())
    }

    /// Execute an automation against a target case, on demand.
    ///
    /// Bookkeeping (`last_executed`, `execution_count`) only advances when
    /// every action succeeded; a mid-list failure leaves earlier effects in
    /// place and surfaces the triggering error.
    pub async fn execute(
        &self,
        ctx: &RequestContext,
        automation_id: Uuid,
        case_id: Uuid,
    ) -> AppResult<ExecutionOutcome> {
        self.rbac.require(ctx.role, Capability::AutomationExecute)?;

        let automation = self
            .automation_repo
            .find_by_id(automation_id)
            .await?
            .ok_or_else(|| AppError::not_found("Automation not found"))?;

        if !automation.is_active {
            return Err(AppError::validation("Automation is disabled"));
        }

        let case = self
            .case_repo
            .find_by_id(case_id)
            .await?
            .ok_or_else(|| AppError::not_found("Application not found"))?;

        match self.executor.execute(&automation, case).await {
            Ok(outcome) => {
                self.automation_repo.record_execution(automation_id).await?;
                info!(
                    automation_id = %automation_id,
                    case_id = %case_id,
                    actions_run = outcome.actions_run,
                    "Automation executed"
                );
                Ok(outcome)
            }
            Err(e) => {
                error!(
                    automation_id = %automation_id,
                    case_id = %case_id,
                    error = %e,
                    "Automation execution failed"
                );
                Err(e)
            }
        }
    }
}
