//! # inventory-api
//!
//! HTTP layer for the inventory portal built on Axum.
//!
//! Serves the same-origin orders proxy, the page gate in front of the
//! frontend bundle, and the role landing redirect.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::ProxyError;
pub use state::AppState;
