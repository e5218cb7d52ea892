// crates/backend-lib/src/middleware/mod.rs

//! Middleware for the FundFlow server.

pub mod auth;

pub use auth::{require_auth, CurrentAccount};
