//! # glojourn-auth
//!
//! Authentication and authorization for Glojourn: JWT token issuing and
//! validation, Argon2id password hashing, and the capability-based RBAC
//! policy evaluated once per request.

pub mod jwt;
pub mod password;
pub mod rbac;

pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenPair};
pub use password::PasswordHasher;
pub use rbac::{Capability, RbacEnforcer, RbacPolicies};
