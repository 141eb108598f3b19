//! Uploaded document entity models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Metadata for a file uploaded against a case. The bytes live on local
/// disk under the configured upload root.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Document {
    /// Unique document identifier.
    pub id: Uuid,
    /// The case this document belongs to.
    pub case_id: Uuid,
    /// The user who uploaded it.
    pub uploaded_by: Uuid,
    /// Original file name.
    pub file_name: String,
    /// Relative path under the upload root; also the `/uploads` URL path.
    pub storage_path: String,
    /// MIME type, if known.
    pub mime_type: Option<String>,
    /// File size in bytes.
    pub size_bytes: i64,
    /// When the document was uploaded.
    pub created_at: DateTime<Utc>,
}

/// Data required to record an uploaded document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDocument {
    pub case_id: Uuid,
    pub uploaded_by: Uuid,
    pub file_name: String,
    pub storage_path: String,
    pub mime_type: Option<String>,
    pub size_bytes: i64,
}

/// Status of a staff request for a client document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "document_request_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DocumentRequestStatus {
    Pending,
    Fulfilled,
}

/// A staff request asking a client to provide a document.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DocumentRequest {
    /// Unique request identifier.
    pub id: Uuid,
    /// The case the document is requested for.
    pub case_id: Uuid,
    /// The staff member who made the request.
    pub requested_by: Uuid,
    /// What kind of document is being requested.
    pub document_type: String,
    /// Optional message to the client.
    pub message: Option<String>,
    /// Whether the request has been fulfilled.
    pub status: DocumentRequestStatus,
    /// When the request was created.
    pub created_at: DateTime<Utc>,
}
