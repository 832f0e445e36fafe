//! File storage implementations - local filesystem and in-memory fallback.

mod local;
mod memory;

pub use local::{LocalFileStorage, LocalStorageConfig};
pub use memory::InMemoryFileStorage;
