//! Coordinator assignment service.

pub mod service;

pub use service::AssignmentService;
