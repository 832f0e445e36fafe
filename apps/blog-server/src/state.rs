//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::ports::{ContentStore, FileStorage};
use blog_infra::{InMemoryContentStore, InMemoryFileStorage, LocalFileStorage};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ContentStore>,
    pub files: Arc<dyn FileStorage>,
    pub max_upload_bytes: usize,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    ///
    /// Falls back to in-memory image storage when the upload directory
    /// cannot be prepared.
    pub async fn new(config: &AppConfig) -> Self {
        let files: Arc<dyn FileStorage> = match LocalFileStorage::init(config.storage.clone()).await
        {
            Ok(local) => Arc::new(local),
            Err(e) => {
                tracing::error!(
                    "{}. Using in-memory image storage; uploaded images will not be served over HTTP.",
                    e
                );
                Arc::new(InMemoryFileStorage::new())
            }
        };

        tracing::info!("Application state initialized");

        Self::with_storage(files, config.max_upload_bytes)
    }

    /// State around a given storage backend, with an empty content store.
    pub fn with_storage(files: Arc<dyn FileStorage>, max_upload_bytes: usize) -> Self {
        Self {
            store: Arc::new(InMemoryContentStore::new(files.clone())),
            files,
            max_upload_bytes,
        }
    }
}
