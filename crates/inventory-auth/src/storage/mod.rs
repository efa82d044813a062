//! Durable session storage backends.

pub mod file;
pub mod memory;

use std::sync::Arc;

use inventory_core::config::session::{SessionConfig, StorageBackend};
use inventory_core::traits::SessionStorage;

pub use file::FileSessionStorage;
pub use memory::MemorySessionStorage;

/// Builds the storage backend selected by configuration.
pub fn from_config(config: &SessionConfig) -> Arc<dyn SessionStorage> {
    match config.storage {
        StorageBackend::File => Arc::new(FileSessionStorage::new(&config.path)),
        StorageBackend::Memory => Arc::new(MemorySessionStorage::new()),
    }
}
