//! Case service: role-scoped listing and mutations.

pub mod service;

pub use service::{CaseListQuery, CaseService};
