//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use blog_infra::LocalStorageConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub storage: LocalStorageConfig,
    /// Largest accepted image upload, in bytes.
    pub max_upload_bytes: usize,
}

impl AppConfig {
    pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = LocalStorageConfig::default();

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            storage: LocalStorageConfig {
                base_dir: env::var("UPLOAD_DIR")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.base_dir),
                url_prefix: env::var("UPLOAD_URL_PREFIX").unwrap_or(defaults.url_prefix),
            },
            max_upload_bytes: env::var("MAX_UPLOAD_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Self::DEFAULT_MAX_UPLOAD_BYTES),
        }
    }
}
