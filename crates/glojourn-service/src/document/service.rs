//! Case document uploads and staff document requests.

use std::sync::Arc;

use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use glojourn_auth::rbac::{Capability, RbacEnforcer};
use glojourn_core::error::AppError;
use glojourn_core::result::AppResult;
use glojourn_database::repositories::case::CaseRepository;
use glojourn_database::repositories::document::DocumentRepository;
use glojourn_entity::case::Case;
use glojourn_entity::document::model::CreateDocument;
use glojourn_entity::document::{Document, DocumentRequest};
use glojourn_storage::StorageProvider;
use glojourn_storage::providers::local::mime_from_path;

use crate::context::RequestContext;

/// Handles document uploads and document requests.
#[derive(Clone)]
pub struct DocumentService {
    /// Document metadata repository.
    document_repo: Arc<DocumentRepository>,
    /// Case repository, for ownership checks.
    case_repo: Arc<CaseRepository>,
    /// Byte storage.
    storage: Arc<dyn StorageProvider>,
    /// Capability policy enforcer.
    rbac: Arc<RbacEnforcer>,
}

impl std::fmt::Debug for DocumentService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentService").finish()
    }
}

impl DocumentService {
    /// Creates a new document service.
    pub fn new(
        document_repo: Arc<DocumentRepository>,
        case_repo: Arc<CaseRepository>,
        storage: Arc<dyn StorageProvider>,
        rbac: Arc<RbacEnforcer>,
    ) -> Self {
        Self {
            document_repo,
            case_repo,
            storage,
            rbac,
        }
    }

    /// Upload a document for a case.
    ///
    /// Clients may only upload against their own case; staff may upload
    /// against any case.
    pub async fn upload(
        &self,
        ctx: &RequestContext,
        case_id: Uuid,
        file_name: &str,
        data: Bytes,
    ) -> AppResult<Document> {
        self.rbac.require(ctx.role, Capability::DocumentUpload)?;

        let case = self.visible_case(ctx, case_id).await?;

        let file_name = sanitize_file_name(file_name);
        if file_name.is_empty() {
            return Err(AppError::validation("File name is required"));
        }
        if data.is_empty() {
            return Err(AppError::validation("File is empty"));
        }

        let storage_path = format!("cases/{}/{}_{}", case.id, Uuid::new_v4(), file_name);
        self.storage.write(&storage_path, data.clone()).await?;

        let document = self
            .document_repo
            .create(&CreateDocument {
                case_id: case.id,
                uploaded_by: ctx.user_id,
                mime_type: mime_from_path(&file_name),
                size_bytes: data.len() as i64,
                file_name,
                storage_path,
            })
            .await?;

        info!(
            document_id = %document.id,
            case_id = %case.id,
            uploaded_by = %ctx.user_id,
            "Document uploaded"
        );
        Ok(document)
    }

    /// List a case's documents, newest first.
    pub async fn list(&self, ctx: &RequestContext, case_id: Uuid) -> AppResult<Vec<Document>> {
        self.visible_case(ctx, case_id).await?;
        self.document_repo.list_by_case(case_id).await
    }

    /// Create a staff request for a client document.
    pub async fn request_document(
        &self,
        ctx: &RequestContext,
        case_id: Uuid,
        document_type: &str,
        message: Option<&str>,
    ) -> AppResult<DocumentRequest> {
        self.rbac.require(ctx.role, Capability::DocumentRequest)?;

        if document_type.trim().is_empty() {
            return Err(AppError::validation("Document type is required"));
        }

        self.case_repo
            .find_by_id(case_id)
            .await?
            .ok_or_else(|| AppError::not_found("Application not found"))?;

        self.document_repo
            .create_request(case_id, ctx.user_id, document_type.trim(), message)
            .await
    }

    /// List a case's document requests, newest first.
    pub async fn list_requests(
        &self,
        ctx: &RequestContext,
        case_id: Uuid,
    ) -> AppResult<Vec<DocumentRequest>> {
        self.visible_case(ctx, case_id).await?;
        self.document_repo.list_requests_by_case(case_id).await
    }

    /// Fetch a case, requiring it to be the caller's own unless the caller
    /// holds a staff role.
    async fn visible_case(&self, ctx: &RequestContext, case_id: Uuid) -> AppResult<Case> {
        let case = self
            .case_repo
            .find_by_id(case_id)
            .await?
            .ok_or_else(|| AppError::not_found("Application not found"))?;

        if case.client_id != ctx.user_id && !ctx.is_staff() {
            return Err(AppError::forbidden("Access denied"));
        }
        Ok(case)
    }
}

/// Strip path separators and control characters from an uploaded name.
fn sanitize_file_name(name: &str) -> String {
    name.trim()
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or("")
        .chars()
        .filter(|c| !c.is_control())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_directories() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\docs\\visa.pdf"), "visa.pdf");
        assert_eq!(sanitize_file_name("passport.pdf"), "passport.pdf");
    }

    #[test]
    fn test_sanitize_empty() {
        assert_eq!(sanitize_file_name("  "), "");
        assert_eq!(sanitize_file_name("a/"), "");
    }
}
