//! Route handlers.

pub mod health;
pub mod landing;
pub mod proxy;
