//! # glojourn-storage
//!
//! Storage layer for uploaded case documents. A single local-filesystem
//! provider lives behind the [`StorageProvider`] trait seam.

pub mod providers;

use async_trait::async_trait;
use bytes::Bytes;

use glojourn_core::result::AppResult;

pub use providers::local::LocalStorageProvider;

/// Abstraction over document byte storage.
#[async_trait]
pub trait StorageProvider: Send + Sync {
    /// Provider type identifier.
    fn provider_type(&self) -> &str;

    /// Write the given bytes at a relative path, creating parent directories.
    async fn write(&self, path: &str, data: Bytes) -> AppResult<()>;

    /// Read the full contents at a relative path.
    async fn read_bytes(&self, path: &str) -> AppResult<Bytes>;

    /// Delete the file at a relative path (missing files are not an error).
    async fn delete(&self, path: &str) -> AppResult<()>;

    /// Whether a file exists at the relative path.
    async fn exists(&self, path: &str) -> AppResult<bool>;
}
