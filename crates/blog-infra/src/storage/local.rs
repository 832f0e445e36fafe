//! Local filesystem storage for uploaded images.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use blog_core::ports::{FileStorage, StorageError, StoredFile, is_image};

/// Local storage configuration.
#[derive(Debug, Clone)]
pub struct LocalStorageConfig {
    /// Directory the files are written to.
    pub base_dir: PathBuf,
    /// URL prefix the directory is served under, e.g. `/uploads`.
    pub url_prefix: String,
}

impl Default for LocalStorageConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("uploads"),
            url_prefix: "/uploads".to_string(),
        }
    }
}

/// Writes uploads as `<base_dir>/<uuid>.<ext>` and hands out
/// `<url_prefix>/<uuid>.<ext>` references.
pub struct LocalFileStorage {
    base_dir: PathBuf,
    url_prefix: String,
}

impl LocalFileStorage {
    /// Create the upload directory if needed.
    pub async fn init(config: LocalStorageConfig) -> Result<Self, StorageError> {
        tokio::fs::create_dir_all(&config.base_dir)
            .await
            .map_err(|e| {
                StorageError::Io(format!(
                    "Failed to create {}: {e}",
                    config.base_dir.display()
                ))
            })?;

        tracing::info!(dir = %config.base_dir.display(), "Local file storage ready");

        Ok(Self {
            base_dir: config.base_dir,
            url_prefix: config.url_prefix.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn public_url(&self, name: &str) -> String {
        format!("{}/{}", self.url_prefix, name)
    }

    /// Map a reference back to a path inside `base_dir`.
    fn path_for(&self, reference: &str) -> Option<PathBuf> {
        let name = reference.rsplit('/').next()?;
        if name.is_empty() || name == "." || name == ".." || name.contains('\\') {
            return None;
        }
        Some(self.base_dir.join(name))
    }
}

/// Extension of the client file name, kept only when it is plain ASCII
/// alphanumerics.
fn extension(file_name: Option<&str>) -> Option<String> {
    let ext = Path::new(file_name?).extension()?.to_str()?;
    if ext.is_empty() || ext.len() > 10 || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

async fn write_file(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut file = tokio::fs::File::create(path).await?;
    file.write_all(data).await?;
    file.flush().await?;
    Ok(())
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn store(
        &self,
        file_name: Option<&str>,
        content_type: &str,
        data: &[u8],
    ) -> Result<StoredFile, StorageError> {
        if !is_image(content_type) {
            return Err(StorageError::InvalidMedia(content_type.to_string()));
        }

        let name = match extension(file_name) {
            Some(ext) => format!("{}.{}", Uuid::new_v4(), ext),
            None => Uuid::new_v4().to_string(),
        };
        let path = self.base_dir.join(&name);

        if let Err(e) = write_file(&path, data).await {
            // Never leave a partial file behind.
            if let Err(cleanup) = tokio::fs::remove_file(&path).await {
                if cleanup.kind() != ErrorKind::NotFound {
                    tracing::warn!(path = %path.display(), "Failed to clean up partial upload: {}", cleanup);
                }
            }
            return Err(StorageError::Io(format!("Failed to write file: {e}")));
        }

        tracing::debug!(file = %name, size = data.len(), "Image stored");

        Ok(StoredFile {
            reference: self.public_url(&name),
            size: data.len() as u64,
            content_type: content_type.to_string(),
        })
    }

    async fn remove(&self, reference: &str) -> Result<(), StorageError> {
        let Some(path) = self.path_for(reference) else {
            tracing::debug!(reference, "Ignoring reference outside upload directory");
            return Ok(());
        };

        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(format!("Failed to delete file: {e}"))),
        }
    }
}
