//! Uploaded-document storage configuration.

use serde::{Deserialize, Serialize};

/// Storage configuration for uploaded case documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory for uploaded document files.
    #[serde(default = "default_upload_root")]
    pub upload_root: String,
    /// Maximum upload size in bytes (default 10 MB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_root: default_upload_root(),
            max_upload_size_bytes: default_max_upload(),
        }
    }
}

fn default_upload_root() -> String {
    "./data/uploads".to_string()
}

fn default_max_upload() -> u64 {
    10_485_760 // 10 MB
}
