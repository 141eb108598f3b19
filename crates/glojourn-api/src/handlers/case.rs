//! Case/application handlers.
//!
//! The `/api/applications` and `/api/cases` route families both operate on
//! the same collection; the router mounts these handlers under both
//! prefixes.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use uuid::Uuid;

use glojourn_core::error::AppError;
use glojourn_core::types::pagination::PageResponse;
use glojourn_entity::case::{Case, CaseNote, CasePatch, CasePriority, CaseStatus, VisaType};
use glojourn_service::case::CaseListQuery;

use crate::dto::request::{CreateApplicationRequest, CreateNoteRequest, UpdateApplicationRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::dto::validate_request;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// Query parameters for case listing.
#[derive(Debug, Clone, Deserialize)]
pub struct CaseListParams {
    /// Status filter.
    pub status: Option<String>,
    /// Priority filter.
    pub priority: Option<String>,
    /// Page number (1-based).
    pub page: Option<u64>,
    /// Items per page.
    pub limit: Option<u64>,
}

/// GET /api/applications (and /api/cases)
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<CaseListParams>,
) -> Result<Json<ApiResponse<PageResponse<Case>>>, AppError> {
    let query = CaseListQuery {
        status: params
            .status
            .as_deref()
            .map(CaseStatus::from_str)
            .transpose()?,
        priority: params
            .priority
            .as_deref()
            .map(CasePriority::from_str)
            .transpose()?,
    };

    let page = PaginationParams {
        page: params.page.unwrap_or(1),
        limit: params.limit.unwrap_or(10),
    }
    .into_page_request();
    let result = state.case_service.list(&auth, query, &page).await?;
    Ok(Json(ApiResponse::ok(result)))
}

/// GET /api/applications/my-application
pub async fn get_mine(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Case>>, AppError> {
    let case = state.case_service.get_my_case(&auth).await?;
    Ok(Json(ApiResponse::ok(case)))
}

/// GET /api/cases/:id
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Case>>, AppError> {
    let case = state.case_service.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(case)))
}

/// POST /api/applications (and /api/cases)
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateApplicationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Case>>), AppError> {
    validate_request(&req)?;

    let visa_type = VisaType::from_str(&req.visa_type)?;
    let priority = req
        .priority
        .as_deref()
        .map(CasePriority::from_str)
        .transpose()?
        .unwrap_or_default();
    let details = req.details.unwrap_or_else(|| serde_json::json!({}));

    let case = state
        .case_service
        .create(&auth, visa_type, details, priority)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(case))))
}

/// PUT /api/applications/:id (and /api/cases/:id)
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateApplicationRequest>,
) -> Result<Json<ApiResponse<Case>>, AppError> {
    let patch = CasePatch {
        visa_type: req.visa_type.as_deref().map(VisaType::from_str).transpose()?,
        details: req.details,
        priority: req
            .priority
            .as_deref()
            .map(CasePriority::from_str)
            .transpose()?,
        status: req.status.as_deref().map(CaseStatus::from_str).transpose()?,
        assigned_coordinator: req.assigned_coordinator,
        assigned_manager: req.assigned_manager,
    };

    let case = state.case_service.update(&auth, id, patch).await?;
    Ok(Json(ApiResponse::ok(case)))
}

/// DELETE /api/cases/:id
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state.case_service.delete(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Application deleted",
    ))))
}

/// POST /api/cases/:id/notes
pub async fn add_note(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<CreateNoteRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CaseNote>>), AppError> {
    validate_request(&req)?;
    let note = state.case_service.add_note(&auth, id, &req.content).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(note))))
}

/// GET /api/cases/:id/notes
pub async fn list_notes(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<CaseNote>>>, AppError> {
    let notes = state.case_service.list_notes(&auth, id).await?;
    Ok(Json(ApiResponse::ok(notes)))
}
