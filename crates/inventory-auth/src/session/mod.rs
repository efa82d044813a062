//! The client session store.

pub mod store;

pub use store::SessionStore;
