// ============================
// crates/backend-lib/src/auth/service.rs
// ============================
//! Registration and login orchestration.
use crate::account::{Account, AccountId};
use crate::auth::password::{hash_password_secure, verify_password};
use crate::auth::token::TokenService;
use crate::error::AppError;
use crate::metrics as metric_keys;
use crate::storage::CredentialStore;
use crate::validation;
use metrics::counter;
use std::sync::Arc;

/// Orchestrates account registration, login and session verification.
///
/// Owns no state of its own: credentials live in the store, session state
/// lives entirely inside the signed token.
#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn CredentialStore>,
    tokens: TokenService,
    password_min_length: usize,
}

impl AccountService {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        tokens: TokenService,
        password_min_length: usize,
    ) -> Self {
        Self {
            store,
            tokens,
            password_min_length,
        }
    }

    /// Register a new account and issue its first session token.
    pub async fn register(
        &self,
        email: &str,
        name: &str,
        password: &str,
    ) -> Result<(Account, String), AppError> {
        let email = validation::validate_email(email)?;
        let name = validation::validate_name(name)?;
        validation::validate_password(password, self.password_min_length)?;

        // scrypt is CPU-bound; hash off the async runtime and scrub the
        // plaintext once done.
        let mut plain = password.to_string();
        let password_hash = tokio::task::spawn_blocking(move || hash_password_secure(&mut plain))
            .await
            .map_err(|e| AppError::Internal(format!("hash task failed: {e}")))?
            .map_err(|e| AppError::Internal(format!("password hashing failed: {e}")))?;

        let account = self.store.create(&email, &name, &password_hash).await?;
        let token = self.tokens.issue(account.id)?;

        counter!(metric_keys::ACCOUNT_REGISTERED).increment(1);
        tracing::info!(account_id = %account.id, "account registered");
        Ok((account, token))
    }

    /// Authenticate with email + password and issue a session token.
    ///
    /// An unknown email and a wrong password fail identically so callers
    /// cannot probe for which addresses have accounts.
    pub async fn login(&self, email: &str, password: &str) -> Result<(Account, String), AppError> {
        let email = validation::normalize_email(email);

        let account = match self.store.find_by_email(&email).await {
            Ok(account) => account,
            Err(AppError::NotFound(_)) => {
                counter!(metric_keys::LOGIN_FAILED).increment(1);
                return Err(AppError::InvalidCredentials);
            },
            Err(other) => return Err(other),
        };

        let hash = account.password_hash.clone();
        let plain = password.to_string();
        let matches = tokio::task::spawn_blocking(move || verify_password(&hash, &plain))
            .await
            .map_err(|e| AppError::Internal(format!("verify task failed: {e}")))?;

        if !matches {
            counter!(metric_keys::LOGIN_FAILED).increment(1);
            tracing::info!(account_id = %account.id, "login rejected: wrong password");
            return Err(AppError::InvalidCredentials);
        }

        let token = self.tokens.issue(account.id)?;
        counter!(metric_keys::LOGIN_SUCCEEDED).increment(1);
        tracing::info!(account_id = %account.id, "login succeeded");
        Ok((account, token))
    }

    /// Re-read the account behind an already-verified session ("who am I").
    pub async fn verify_session(&self, account_id: AccountId) -> Result<Account, AppError> {
        self.store.find_by_id(account_id).await
    }
}
