//! Document upload and request service.

pub mod service;

pub use service::DocumentService;
