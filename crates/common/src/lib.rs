// ================
// common/src/lib.rs
// ================
//! Wire-level types shared between the FundFlow server and its clients.
//! Field names are serialized in camelCase to match the public JSON API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registration request body
/// # Fields
/// * `name` - Display name for the new account
/// * `email` - Login email (unique, case-insensitive)
/// * `password` - Plaintext password (min length enforced server-side)
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Login request body
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Public view of an account, safe to return to clients.
/// Never carries the password hash.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AccountSummary {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

/// Response to a successful register or login
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub user: AccountSummary,
}

/// Response to the session verification ("who am I") check
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct VerifyResponse {
    pub user: AccountSummary,
}

/// Request to bookmark a fund
/// # Fields
/// * `scheme_code` - Opaque fund identifier from the external data provider
/// * `scheme_name` - Display name of the fund
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SaveFundRequest {
    pub scheme_code: String,
    pub scheme_name: String,
}

/// A saved fund as returned by the API
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SavedFund {
    pub scheme_code: String,
    pub scheme_name: String,
    pub saved_at: DateTime<Utc>,
}

/// Response to a successful fund save
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SaveFundResponse {
    pub message: String,
    pub fund: SavedFund,
}

/// Generic confirmation message
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MessageResponse {
    pub message: String,
}

/// Health check response
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Root service-info response
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ServiceInfo {
    pub name: String,
    pub version: String,
    pub description: String,
}
