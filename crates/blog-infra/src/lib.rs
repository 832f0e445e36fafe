//! # Blog Infrastructure
//!
//! Concrete implementations of the ports defined in `blog-core`:
//! the in-memory content store and the image storage backends.

pub mod storage;
pub mod store;

pub use storage::{InMemoryFileStorage, LocalFileStorage, LocalStorageConfig};
pub use store::InMemoryContentStore;
