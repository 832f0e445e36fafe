//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod content_store;
mod file_storage;

pub use content_store::ContentStore;
pub use file_storage::{FileStorage, StorageError, StoredFile, is_image};
