//! Uploaded document and document-request repository.

use sqlx::PgPool;
use uuid::Uuid;

use glojourn_core::error::{AppError, ErrorKind};
use glojourn_core::result::AppResult;
use glojourn_entity::document::model::CreateDocument;
use glojourn_entity::document::{Document, DocumentRequest};

/// Repository for document metadata and document requests.
#[derive(Debug, Clone)]
pub struct DocumentRepository {
    pool: PgPool,
}

impl DocumentRepository {
    /// Create a new document repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record an uploaded document.
    pub async fn create(&self, data: &CreateDocument) -> AppResult<Document> {
        sqlx::query_as::<_, Document>(
            "INSERT INTO documents \
                 (case_id, uploaded_by, file_name, storage_path, mime_type, size_bytes) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING *",
        )
        .bind(data.case_id)
        .bind(data.uploaded_by)
        .bind(&data.file_name)
        .bind(&data.storage_path)
        .bind(&data.mime_type)
        .bind(data.size_bytes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to record document", e))
    }

    /// Find a document by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Document>> {
        sqlx::query_as::<_, Document>("SELECT * FROM documents WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find document", e))
    }

    /// List a case's documents, newest first.
    pub async fn list_by_case(&self, case_id: Uuid) -> AppResult<Vec<Document>> {
        sqlx::query_as::<_, Document>(
            "SELECT * FROM documents WHERE case_id = $1 ORDER BY created_at DESC",
        )
        .bind(case_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list documents", e))
    }

    /// Create a staff document request.
    pub async fn create_request(
        &self,
        case_id: Uuid,
        requested_by: Uuid,
        document_type: &str,
        message: Option<&str>,
    ) -> AppResult<DocumentRequest> {
        sqlx::query_as::<_, DocumentRequest>(
            "INSERT INTO document_requests (case_id, requested_by, document_type, message) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(case_id)
        .bind(requested_by)
        .bind(document_type)
        .bind(message)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create document request", e)
        })
    }

    /// List a case's document requests, newest first.
    pub async fn list_requests_by_case(&self, case_id: Uuid) -> AppResult<Vec<DocumentRequest>> {
        sqlx::query_as::<_, DocumentRequest>(
            "SELECT * FROM document_requests WHERE case_id = $1 ORDER BY created_at DESC",
        )
        .bind(case_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list document requests", e)
        })
    }
}
