//! Uploaded document and document-request entities.

pub mod model;

pub use model::{CreateDocument, Document, DocumentRequest, DocumentRequestStatus};
