//! Response bodies produced by the portal itself.

pub mod response;
