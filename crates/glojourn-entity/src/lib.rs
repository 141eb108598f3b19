//! # glojourn-entity
//!
//! Domain entity models for Glojourn. Every struct in this crate
//! represents a database table row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and database
//! entities additionally derive `sqlx::FromRow`.

pub mod automation;
pub mod case;
pub mod document;
pub mod session;
pub mod user;
