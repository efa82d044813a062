//! Custom Axum extractors.

pub mod credential;

pub use credential::{ForwardedAuthorization, TokenCookie};
