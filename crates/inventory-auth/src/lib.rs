//! # inventory-auth
//!
//! Client-side authentication for the inventory portal.
//!
//! ## Modules
//!
//! - `storage`: durable session storage backends (file, memory)
//! - `client`: HTTP client for the user service and API gateway
//! - `token`: unverified JWT payload inspection (role, expiry)
//! - `session`: the session store: login, logout, auth header, verification
//! - `gate`: role router state machine and role-restricted access checks
//! - `permissions`: page gate policy (public routes, per-path role table)

pub mod client;
pub mod gate;
pub mod permissions;
pub mod session;
pub mod storage;
pub mod token;

pub use client::AuthClient;
pub use gate::{Access, AccessGate, GateState};
pub use permissions::{PageDecision, RoutePolicy};
pub use session::SessionStore;
pub use storage::{FileSessionStorage, MemorySessionStorage};
pub use token::{TokenInspector, TokenStatus};
