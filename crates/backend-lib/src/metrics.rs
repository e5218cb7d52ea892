// ==============
// crates/backend-lib/src/metrics.rs

//! Central place for metric keys
pub const ACCOUNT_REGISTERED: &str = "account.registered";
pub const ACCOUNT_CREATED: &str = "account.created";
pub const LOGIN_SUCCEEDED: &str = "login.succeeded";
pub const LOGIN_FAILED: &str = "login.failed";
pub const AUTH_REJECTED: &str = "auth.rejected";
pub const FUND_SAVED: &str = "fund.saved";
pub const FUND_REMOVED: &str = "fund.removed";
