//! # inventory-entity
//!
//! Domain models for the inventory portal. These are the value objects
//! exchanged with the backend services and kept in the durable client
//! session. All entities derive `Debug`, `Clone`, `Serialize` and
//! `Deserialize`.

pub mod alert;
pub mod auth;
pub mod notification;
pub mod route;
pub mod session;
pub mod user;

pub use alert::StockAlert;
pub use auth::{LoginRequest, LoginResponse, SignupRequest};
pub use notification::Notification;
pub use route::LandingRoute;
pub use session::Session;
pub use user::{UserProfile, UserRole};
