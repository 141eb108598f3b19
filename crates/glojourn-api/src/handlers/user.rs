//! User management handlers.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use glojourn_core::error::AppError;
use glojourn_core::types::pagination::PageResponse;
use glojourn_entity::user::UserRole;
use glojourn_service::user::CreateStaffRequest;

use crate::dto::request::{CreateUserRequest, UpdateUserRequest};
use crate::dto::response::{ApiResponse, MessageResponse, UserResponse};
use crate::dto::validate_request;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/users
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<UserResponse>>>, AppError> {
    let page = params.into_page_request();
    let users = state.user_service.list(&auth, &page).await?;
    Ok(Json(ApiResponse::ok(users.map(Into::into))))
}

/// GET /api/users/:id
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let user = state.user_service.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}

/// POST /api/users — admin-only staff account creation.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), AppError> {
    validate_request(&req)?;

    let role = UserRole::from_str(&req.role)?;
    let user = state
        .user_service
        .create_staff(
            &auth,
            CreateStaffRequest {
                name: req.name,
                email: req.email,
                password: req.password,
                role,
                manager_id: req.manager_id,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(user.into()))))
}

/// PUT /api/users/:id
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let user = state
        .user_service
        .update(&auth, id, req.name, req.email, req.manager_id)
        .await?;
    Ok(Json(ApiResponse::ok(user.into())))
}

/// PATCH /api/users/:id/status
pub async fn toggle_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let user = state.user_service.toggle_status(&auth, id).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}

/// DELETE /api/users/:id
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state.user_service.delete(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("User deleted"))))
}
