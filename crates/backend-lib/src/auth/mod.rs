// ============================
// crates/backend-lib/src/auth/mod.rs
// ============================
//! Authentication module.

pub mod password;
pub mod service;
pub mod token;

pub use password::{hash_password, hash_password_secure, verify_password};
pub use service::AccountService;
pub use token::TokenService;
