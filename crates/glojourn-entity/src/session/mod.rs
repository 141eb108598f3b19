//! Consultation session entity and status enumeration.

pub mod model;
pub mod status;

pub use model::{CreateSession, Session};
pub use status::SessionStatus;
