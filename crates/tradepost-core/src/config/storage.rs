//! Listing image storage configuration.

use serde::{Deserialize, Serialize};

/// Object storage configuration for listing photos.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory for stored objects; each bucket is a sub-directory.
    #[serde(default = "default_data_root")]
    pub data_root: String,
    /// Bucket holding listing images.
    #[serde(default = "default_image_bucket")]
    pub image_bucket: String,
    /// Base URL under which buckets are publicly served.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
    /// Maximum request body size in bytes (covers multipart uploads).
    #[serde(default = "default_max_upload")]
    pub max_upload_bytes: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_root: default_data_root(),
            image_bucket: default_image_bucket(),
            public_base_url: default_public_base_url(),
            max_upload_bytes: default_max_upload(),
        }
    }
}

fn default_data_root() -> String {
    "./data/storage".to_string()
}

fn default_image_bucket() -> String {
    "listing-images".to_string()
}

fn default_public_base_url() -> String {
    "http://localhost:8080/media".to_string()
}

fn default_max_upload() -> u64 {
    83_886_080 // 80 MB: eight photos of up to 10 MB each
}
