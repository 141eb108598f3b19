//! Consultation session service.

pub mod service;

pub use service::{SessionService, SessionUpdate};
