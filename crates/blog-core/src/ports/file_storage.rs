use async_trait::async_trait;

/// File storage trait - abstraction over where uploaded images live.
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Store an image and return its public reference.
    ///
    /// Fails with [`StorageError::InvalidMedia`] unless `content_type` is an
    /// `image/*` type.
    async fn store(
        &self,
        file_name: Option<&str>,
        content_type: &str,
        data: &[u8],
    ) -> Result<StoredFile, StorageError>;

    /// Remove the resource behind a reference. Missing resources are not an error.
    async fn remove(&self, reference: &str) -> Result<(), StorageError>;
}

/// Metadata of a stored file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Public reference (URL path) handed back to clients.
    pub reference: String,
    pub size: u64,
    pub content_type: String,
}

/// Whether a content type names an image.
pub fn is_image(content_type: &str) -> bool {
    content_type.trim().to_ascii_lowercase().starts_with("image/")
}

/// File storage errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("File must be an image, got {0}")]
    InvalidMedia(String),

    #[error("Storage I/O failed: {0}")]
    Io(String),
}
