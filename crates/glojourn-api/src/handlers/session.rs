//! Consultation session handlers.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use glojourn_core::error::AppError;
use glojourn_entity::session::{Session, SessionStatus};
use glojourn_service::session::SessionUpdate;

use crate::dto::request::{CreateSessionRequest, UpdateSessionRequest};
use crate::dto::response::ApiResponse;
use crate::dto::validate_request;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/sessions
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<Session>>>, AppError> {
    let sessions = state.session_service.list(&auth).await?;
    Ok(Json(ApiResponse::ok(sessions)))
}

/// POST /api/sessions
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateSessionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Session>>), AppError> {
    validate_request(&req)?;

    let session = state
        .session_service
        .create(
            &auth,
            req.client_id,
            req.coordinator_id,
            req.scheduled_date,
            req.time_slot,
            req.duration_minutes,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(session))))
}

/// PUT /api/sessions/:id
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateSessionRequest>,
) -> Result<Json<ApiResponse<Session>>, AppError> {
    validate_request(&req)?;

    let status = SessionStatus::from_str(&req.status)?;
    let session = state
        .session_service
        .update(
            &auth,
            id,
            SessionUpdate {
                status,
                notes: req.notes,
                meeting_link: req.meeting_link,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(session)))
}
