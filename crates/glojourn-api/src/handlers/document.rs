//! Document upload and request handlers.

use axum::Json;
use axum::extract::{Multipart, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use uuid::Uuid;

use glojourn_core::error::AppError;
use glojourn_entity::document::{Document, DocumentRequest};

use crate::dto::request::CreateDocumentRequestRequest;
use crate::dto::response::ApiResponse;
use crate::dto::validate_request;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// Query parameter selecting a case.
#[derive(Debug, Clone, Deserialize)]
pub struct CaseIdParams {
    /// The case to list for.
    pub case_id: Uuid,
}

/// POST /api/documents — multipart with a `case_id` field and a `file` part.
pub async fn upload(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<Document>>), AppError> {
    let mut case_id: Option<Uuid> = None;
    let mut file_name: Option<String> = None;
    let mut data: Option<bytes::Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("case_id") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(format!("Invalid case_id field: {e}")))?;
                case_id = Some(
                    text.parse()
                        .map_err(|_| AppError::validation("Invalid case_id"))?,
                );
            }
            Some("file") => {
                file_name = field.file_name().map(str::to_string);
                data = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| AppError::validation(format!("Failed to read file: {e}")))?,
                );
            }
            _ => {}
        }
    }

    let case_id = case_id.ok_or_else(|| AppError::validation("case_id is required"))?;
    let file_name = file_name.ok_or_else(|| AppError::validation("File name is required"))?;
    let data = data.ok_or_else(|| AppError::validation("File is required"))?;

    let document = state
        .document_service
        .upload(&auth, case_id, &file_name, data)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(document))))
}

/// GET /api/documents?case_id=
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<CaseIdParams>,
) -> Result<Json<ApiResponse<Vec<Document>>>, AppError> {
    let documents = state.document_service.list(&auth, params.case_id).await?;
    Ok(Json(ApiResponse::ok(documents)))
}

/// POST /api/document-requests
pub async fn create_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateDocumentRequestRequest>,
) -> Result<(StatusCode, Json<ApiResponse<DocumentRequest>>), AppError> {
    validate_request(&req)?;

    let request = state
        .document_service
        .request_document(
            &auth,
            req.application_id,
            &req.document_type,
            req.message.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(request))))
}

/// GET /api/document-requests?case_id=
pub async fn list_requests(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<CaseIdParams>,
) -> Result<Json<ApiResponse<Vec<DocumentRequest>>>, AppError> {
    let requests = state
        .document_service
        .list_requests(&auth, params.case_id)
        .await?;
    Ok(Json(ApiResponse::ok(requests)))
}
