//! Admin dashboard handlers.

use axum::Json;
use axum::extract::State;

use glojourn_core::error::AppError;
use glojourn_service::admin::AdminStats;

use crate::dto::response::ApiResponse;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/admin/stats
pub async fn stats(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<AdminStats>>, AppError> {
    let stats = state.stats_service.gather(&auth).await?;
    Ok(Json(ApiResponse::ok(stats)))
}
