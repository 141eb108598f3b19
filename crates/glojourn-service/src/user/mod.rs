//! User management service.

pub mod service;

pub use service::{CreateStaffRequest, UserService};
