//! Coordinator assignment handlers.

use axum::Json;
use axum::extract::State;

use glojourn_core::error::AppError;
use glojourn_database::repositories::case::CoordinatorWorkload;
use glojourn_entity::case::Case;

use crate::dto::request::AssignRequest;
use crate::dto::response::{ApiResponse, CoordinatorResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/assignments
pub async fn assign(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<AssignRequest>,
) -> Result<Json<ApiResponse<Case>>, AppError> {
    let case = state
        .assignment_service
        .assign(&auth, req.application_id, req.coordinator_id)
        .await?;
    Ok(Json(ApiResponse::ok(case)))
}

/// GET /api/assignments/coordinators
pub async fn coordinators(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<CoordinatorResponse>>>, AppError> {
    let coordinators = state.assignment_service.coordinators(&auth).await?;
    Ok(Json(ApiResponse::ok(
        coordinators.into_iter().map(Into::into).collect(),
    )))
}

/// GET /api/assignments/workload
pub async fn workload(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<CoordinatorWorkload>>>, AppError> {
    let workload = state.assignment_service.workload(&auth).await?;
    Ok(Json(ApiResponse::ok(workload)))
}
