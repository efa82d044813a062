//! # inventory-core
//!
//! Core crate for the inventory portal. Contains configuration schemas,
//! the unified error system and the durable session storage trait.
//!
//! This crate has **no** internal dependencies on other portal crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
