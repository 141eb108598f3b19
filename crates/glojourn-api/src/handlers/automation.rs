//! Automation handlers.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use glojourn_core::error::AppError;
use glojourn_entity::automation::{Automation, AutomationTriggerType};
use glojourn_service::automation::{AutomationPatch, ExecutionOutcome};

use crate::dto::request::{
    CreateAutomationRequest, ExecuteAutomationRequest, UpdateAutomationRequest,
};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::dto::validate_request;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/automations
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<Automation>>>, AppError> {
    let automations = state.automation_service.list(&auth).await?;
    Ok(Json(ApiResponse::ok(automations)))
}

/// GET /api/automations/:id
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Automation>>, AppError> {
    let automation = state.automation_service.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(automation)))
}

/// POST /api/automations
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateAutomationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Automation>>), AppError> {
    validate_request(&req)?;

    let trigger_type = AutomationTriggerType::from_str(&req.trigger_type)?;
    let automation = state
        .automation_service
        .create(
            &auth,
            req.name,
            req.description,
            trigger_type,
            req.trigger_conditions.unwrap_or_default(),
            req.actions,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(automation))))
}

/// PUT /api/automations/:id
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateAutomationRequest>,
) -> Result<Json<ApiResponse<Automation>>, AppError> {
    let automation = state
        .automation_service
        .update(
            &auth,
            id,
            AutomationPatch {
                name: req.name,
                description: req.description,
                trigger_conditions: req.trigger_conditions,
                actions: req.actions,
                is_active: req.is_active,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(automation)))
}

/// DELETE /api/automations/:id
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state.automation_service.delete(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Automation deleted",
    ))))
}

/// POST /api/automations/:id/execute
pub async fn execute(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<ExecuteAutomationRequest>,
) -> Result<Json<ApiResponse<ExecutionOutcome>>, AppError> {
    let outcome = state
        .automation_service
        .execute(&auth, id, req.case_id)
        .await?;
    Ok(Json(ApiResponse::ok(outcome)))
}
