// ============================
// crates/backend-lib/src/storage.rs
// ============================
//! Storage abstraction with flat-file implementation.
//!
//! Accounts live under `accounts/<id>.json` and each account's saved funds
//! under `portfolios/<id>.json`, keyed by account id so one account's data
//! can never be reached through another account's identifier. In-memory
//! maps are canonical at runtime; every mutation is written through to disk.
use crate::account::{Account, AccountId, SavedFundEntry};
use crate::error::AppError;
use crate::metrics as metric_keys;
use async_trait::async_trait;
use dashmap::{mapref::entry::Entry, DashMap};
use metrics::counter;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};
use tokio::{fs as tokio_fs, sync::Mutex};

/// Persistence of account records
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Create an account. Fails with `DuplicateEmail` when the email is
    /// already taken (case-insensitively).
    async fn create(
        &self,
        email: &str,
        name: &str,
        password_hash: &str,
    ) -> Result<Account, AppError>;

    /// Look up an account by (normalized) email
    async fn find_by_email(&self, email: &str) -> Result<Account, AppError>;

    /// Look up an account by id
    async fn find_by_id(&self, id: AccountId) -> Result<Account, AppError>;
}

/// Per-account saved-fund collection
#[async_trait]
pub trait PortfolioStore: Send + Sync {
    /// Save a fund for an account. Fails with `AlreadySaved` when the
    /// account already has an entry with this scheme code.
    async fn add(
        &self,
        account_id: AccountId,
        scheme_code: &str,
        scheme_name: &str,
    ) -> Result<SavedFundEntry, AppError>;

    /// All entries for an account, most recently saved first.
    async fn list(&self, account_id: AccountId) -> Result<Vec<SavedFundEntry>, AppError>;

    /// Remove one entry by scheme code. Fails with `NotFound` when the
    /// account has no such entry.
    async fn remove(&self, account_id: AccountId, scheme_code: &str) -> Result<(), AppError>;
}

/// Flat-file implementation of both store traits
pub struct FlatFileStore {
    root: PathBuf,
    accounts: DashMap<AccountId, Account>,
    /// Lowercased email -> account id. Reserving an entry here is the
    /// serialization point for email uniqueness.
    email_index: DashMap<String, AccountId>,
    portfolios: DashMap<AccountId, Vec<SavedFundEntry>>,
    /// Per-account write locks. Held across the duplicate check and the
    /// file write so two concurrent saves of the same scheme cannot both
    /// succeed. Distinct accounts never contend.
    portfolio_locks: DashMap<AccountId, Arc<Mutex<()>>>,
}

impl FlatFileStore {
    pub fn new<P: AsRef<Path>>(root: P) -> anyhow::Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(root.join("accounts"))?;
        fs::create_dir_all(root.join("portfolios"))?;

        let store = Self {
            root,
            accounts: DashMap::new(),
            email_index: DashMap::new(),
            portfolios: DashMap::new(),
            portfolio_locks: DashMap::new(),
        };
        store.load()?;
        Ok(store)
    }

    /// Rebuild the in-memory maps from disk at startup.
    fn load(&self) -> anyhow::Result<()> {
        for dir_entry in fs::read_dir(self.root.join("accounts"))? {
            let path = dir_entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let account: Account = serde_json::from_slice(&fs::read(&path)?)?;

            let portfolio_path = self.portfolio_path(account.id);
            if portfolio_path.exists() {
                let entries: Vec<SavedFundEntry> =
                    serde_json::from_slice(&fs::read(&portfolio_path)?)?;
                self.portfolios.insert(account.id, entries);
            }

            self.email_index.insert(account.email.clone(), account.id);
            self.accounts.insert(account.id, account);
        }
        Ok(())
    }

    fn account_path(&self, id: AccountId) -> PathBuf {
        self.root.join("accounts").join(format!("{id}.json"))
    }

    fn portfolio_path(&self, id: AccountId) -> PathBuf {
        self.root.join("portfolios").join(format!("{id}.json"))
    }

    fn portfolio_lock(&self, id: AccountId) -> Arc<Mutex<()>> {
        self.portfolio_locks
            .entry(id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    async fn persist_account(&self, account: &Account) -> Result<(), AppError> {
        let bytes = serde_json::to_vec_pretty(account)?;
        tokio_fs::write(self.account_path(account.id), bytes).await?;
        Ok(())
    }

    async fn persist_portfolio(&self, id: AccountId) -> Result<(), AppError> {
        let entries = self
            .portfolios
            .get(&id)
            .map(|e| e.value().clone())
            .unwrap_or_default();
        let bytes = serde_json::to_vec_pretty(&entries)?;
        tokio_fs::write(self.portfolio_path(id), bytes).await?;
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for FlatFileStore {
    async fn create(
        &self,
        email: &str,
        name: &str,
        password_hash: &str,
    ) -> Result<Account, AppError> {
        // The store enforces case-insensitivity itself; callers are expected
        // to have normalized already.
        let email = email.trim().to_lowercase();
        let account = Account::new(email.clone(), name.to_string(), password_hash.to_string());

        // Reserve the email before the file write. The vacant-entry insert is
        // atomic, so of two concurrent registrations only one wins.
        match self.email_index.entry(email) {
            Entry::Occupied(_) => return Err(AppError::DuplicateEmail),
            Entry::Vacant(slot) => {
                slot.insert(account.id);
            },
        }

        self.accounts.insert(account.id, account.clone());

        if let Err(e) = self.persist_account(&account).await {
            // Roll back the reservation so the email can be retried.
            self.email_index.remove(&account.email);
            self.accounts.remove(&account.id);
            return Err(e);
        }

        counter!(metric_keys::ACCOUNT_CREATED).increment(1);
        Ok(account)
    }

    async fn find_by_email(&self, email: &str) -> Result<Account, AppError> {
        let email = email.trim().to_lowercase();
        let id = self
            .email_index
            .get(&email)
            .map(|e| *e.value())
            .ok_or_else(|| AppError::NotFound("Account".to_string()))?;
        self.find_by_id(id).await
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Account, AppError> {
        self.accounts
            .get(&id)
            .map(|e| e.value().clone())
            .ok_or_else(|| AppError::NotFound("Account".to_string()))
    }
}

#[async_trait]
impl PortfolioStore for FlatFileStore {
    async fn add(
        &self,
        account_id: AccountId,
        scheme_code: &str,
        scheme_name: &str,
    ) -> Result<SavedFundEntry, AppError> {
        let lock = self.portfolio_lock(account_id);
        let _guard = lock.lock().await;

        let entry = SavedFundEntry::new(scheme_code.to_string(), scheme_name.to_string());
        {
            let mut entries = self.portfolios.entry(account_id).or_default();
            if entries.iter().any(|e| e.scheme_code == entry.scheme_code) {
                return Err(AppError::AlreadySaved);
            }
            entries.push(entry.clone());
        }

        if let Err(e) = self.persist_portfolio(account_id).await {
            if let Some(mut entries) = self.portfolios.get_mut(&account_id) {
                entries.retain(|x| x.scheme_code != entry.scheme_code);
            }
            return Err(e);
        }

        counter!(metric_keys::FUND_SAVED).increment(1);
        Ok(entry)
    }

    async fn list(&self, account_id: AccountId) -> Result<Vec<SavedFundEntry>, AppError> {
        let mut entries = self
            .portfolios
            .get(&account_id)
            .map(|e| e.value().clone())
            .unwrap_or_default();
        // Newest first. The sort is stable, so equal timestamps keep their
        // insertion order within a response.
        entries.sort_by(|a, b| b.saved_at.cmp(&a.saved_at));
        Ok(entries)
    }

    async fn remove(&self, account_id: AccountId, scheme_code: &str) -> Result<(), AppError> {
        let lock = self.portfolio_lock(account_id);
        let _guard = lock.lock().await;

        let removed = {
            let mut entries = match self.portfolios.get_mut(&account_id) {
                Some(entries) => entries,
                None => return Err(AppError::NotFound("Saved fund".to_string())),
            };
            let index = entries
                .iter()
                .position(|e| e.scheme_code == scheme_code)
                .ok_or_else(|| AppError::NotFound("Saved fund".to_string()))?;
            (index, entries.remove(index))
        };

        if let Err(e) = self.persist_portfolio(account_id).await {
            if let Some(mut entries) = self.portfolios.get_mut(&account_id) {
                let (index, entry) = removed;
                let index = index.min(entries.len());
                entries.insert(index, entry);
            }
            return Err(e);
        }

        counter!(metric_keys::FUND_REMOVED).increment(1);
        Ok(())
    }
}
