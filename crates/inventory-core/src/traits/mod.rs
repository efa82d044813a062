//! Core traits defined in `inventory-core` and implemented by other crates.

pub mod session_storage;

pub use session_storage::SessionStorage;
