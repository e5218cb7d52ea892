// ============================
// crates/backend-lib/src/config.rs
// ============================
//! Configuration management.
use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Default session token lifetime: 7 days
const DEFAULT_TOKEN_TTL_SECS: u64 = 60 * 60 * 24 * 7;

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Server bind address
    pub bind_addr: SocketAddr,
    /// Data directory path
    pub data_dir: PathBuf,
    /// Log level
    pub log_level: String,
    /// Secret used to sign session tokens. Rotating it invalidates every
    /// outstanding token.
    pub token_secret: String,
    /// Session token TTL in seconds
    pub token_ttl_secs: u64,
    /// Minimum accepted password length
    pub password_min_length: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:5000".parse().unwrap(),
            data_dir: PathBuf::from("data"),
            log_level: "info".to_string(),
            token_secret: "insecure-dev-secret-change-me".to_string(),
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
            password_min_length: 6,
        }
    }
}

impl Settings {
    /// Load settings from `config.toml` and `FUNDFLOW_`-prefixed environment
    /// variables, on top of the defaults.
    pub fn load() -> Result<Self> {
        Self::load_from("config.toml")
    }

    /// Load settings from an explicit config file path.
    pub fn load_from(path: &str) -> Result<Self> {
        let settings = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("FUNDFLOW_"))
            .extract()?;
        Ok(settings)
    }
}
