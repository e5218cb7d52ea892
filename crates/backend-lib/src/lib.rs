// ============================
// crates/backend-lib/src/lib.rs
// ============================
//! Core backend-lib functionality for the FundFlow API server.

pub mod account;
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod router;
pub mod storage;
pub mod validation;

use crate::auth::{AccountService, TokenService};
use crate::config::Settings;
use crate::storage::{CredentialStore, FlatFileStore, PortfolioStore};
use std::sync::Arc;
use std::time::Duration;

/// Application state shared across all handlers
pub struct AppState {
    /// Account credential store
    pub accounts: Arc<dyn CredentialStore>,
    /// Per-account saved-fund store
    pub portfolio: Arc<dyn PortfolioStore>,
    /// Session token service
    pub tokens: TokenService,
    /// Registration/login orchestration
    pub account_service: AccountService,
    /// Settings
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Create application state on top of an already-built store.
    pub fn new(store: Arc<FlatFileStore>, settings: Settings) -> Self {
        let tokens = TokenService::new(
            &settings.token_secret,
            Duration::from_secs(settings.token_ttl_secs),
        );
        let accounts: Arc<dyn CredentialStore> = store.clone();
        let portfolio: Arc<dyn PortfolioStore> = store;
        let account_service = AccountService::new(
            accounts.clone(),
            tokens.clone(),
            settings.password_min_length,
        );

        Self {
            accounts,
            portfolio,
            tokens,
            account_service,
            settings: Arc::new(settings),
        }
    }

    /// Create application state with the store rooted in the configured
    /// data directory.
    pub fn from_settings(settings: Settings) -> anyhow::Result<Self> {
        let store = Arc::new(FlatFileStore::new(&settings.data_dir)?);
        Ok(Self::new(store, settings))
    }
}
