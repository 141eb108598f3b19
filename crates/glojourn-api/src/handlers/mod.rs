//! HTTP request handlers.

pub mod admin;
pub mod assignment;
pub mod auth;
pub mod automation;
pub mod case;
pub mod document;
pub mod health;
pub mod session;
pub mod user;
