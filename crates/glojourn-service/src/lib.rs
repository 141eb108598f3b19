//! # glojourn-service
//!
//! Business logic services for Glojourn. Each service orchestrates
//! repositories (and for documents, the storage provider) on behalf of an
//! authenticated [`context::RequestContext`], enforcing the capability
//! policy before touching data.

pub mod admin;
pub mod assignment;
pub mod auth;
pub mod automation;
pub mod case;
pub mod context;
pub mod document;
pub mod session;
pub mod user;

pub use context::RequestContext;
