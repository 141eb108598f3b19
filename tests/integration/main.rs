//! Integration tests for the Glojourn HTTP API.
//!
//! These drive the full router against a real PostgreSQL database and are
//! `#[ignore]`d by default; run them with `cargo test -- --ignored` once a
//! database matching `config/default.toml` (or `GLOJOURN__DATABASE__URL`)
//! is provisioned.

mod helpers;

mod auth_test;
mod automation_test;
mod case_test;
mod rbac_test;
mod session_test;
