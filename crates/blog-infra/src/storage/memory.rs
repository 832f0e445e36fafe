//! In-memory file storage - used when the upload directory is unavailable.
//! Note: Files are lost on process restart, and `memory://` references are
//! not served by any route.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use blog_core::ports::{FileStorage, StorageError, StoredFile, is_image};

pub struct InMemoryFileStorage {
    files: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryFileStorage {
    pub fn new() -> Self {
        Self {
            files: RwLock::new(HashMap::new()),
        }
    }

    pub async fn contains(&self, reference: &str) -> bool {
        self.files.read().await.contains_key(reference)
    }

    pub async fn get(&self, reference: &str) -> Option<Vec<u8>> {
        self.files.read().await.get(reference).cloned()
    }
}

impl Default for InMemoryFileStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FileStorage for InMemoryFileStorage {
    async fn store(
        &self,
        _file_name: Option<&str>,
        content_type: &str,
        data: &[u8],
    ) -> Result<StoredFile, StorageError> {
        if !is_image(content_type) {
            return Err(StorageError::InvalidMedia(content_type.to_string()));
        }

        let reference = format!("memory://{}", Uuid::new_v4());
        self.files
            .write()
            .await
            .insert(reference.clone(), data.to_vec());

        Ok(StoredFile {
            reference,
            size: data.len() as u64,
            content_type: content_type.to_string(),
        })
    }

    async fn remove(&self, reference: &str) -> Result<(), StorageError> {
        self.files.write().await.remove(reference);
        Ok(())
    }
}
