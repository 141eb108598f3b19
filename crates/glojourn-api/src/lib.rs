//! # glojourn-api
//!
//! HTTP API layer for Glojourn built on Axum.
//!
//! Provides all REST endpoints, extractors, DTOs, and static serving of
//! uploaded documents. Domain errors map to HTTP responses via the
//! `IntoResponse` impl on `glojourn_core::AppError`.

pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
