// ============================
// crates/backend-lib/src/account.rs
// ============================
//! Account and saved-fund domain types.
use chrono::{DateTime, Utc};
use fundflow_common::{AccountSummary, SavedFund};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type AccountId = Uuid;

/// A registered account as persisted by the credential store.
///
/// Holds the scrypt password hash, so it must never be serialized onto the
/// wire directly; clients get an [`AccountSummary`] instead.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Account {
    pub id: AccountId,
    /// Stored lowercased; uniqueness is case-insensitive.
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn new(email: String, name: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            name,
            password_hash,
            created_at: Utc::now(),
        }
    }

    /// Public view without the password hash.
    pub fn summary(&self) -> AccountSummary {
        AccountSummary {
            id: self.id,
            email: self.email.clone(),
            name: self.name.clone(),
        }
    }
}

/// One bookmarked fund, owned by exactly one account.
///
/// Entries are immutable once created; the only way to change one is to
/// remove it and save it again.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SavedFundEntry {
    pub scheme_code: String,
    pub scheme_name: String,
    pub saved_at: DateTime<Utc>,
}

impl SavedFundEntry {
    pub fn new(scheme_code: String, scheme_name: String) -> Self {
        Self {
            scheme_code,
            scheme_name,
            saved_at: Utc::now(),
        }
    }
}

impl From<SavedFundEntry> for SavedFund {
    fn from(entry: SavedFundEntry) -> Self {
        SavedFund {
            scheme_code: entry.scheme_code,
            scheme_name: entry.scheme_name,
            saved_at: entry.saved_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_summary_omits_hash() {
        let account = Account::new(
            "ann@example.com".to_string(),
            "Ann".to_string(),
            "scrypt$fake$hash".to_string(),
        );
        let summary = account.summary();
        assert_eq!(summary.id, account.id);
        assert_eq!(summary.email, "ann@example.com");
        let json = serde_json::to_string(&summary).unwrap();
        assert!(!json.contains("hash"));
    }

    #[test]
    fn test_saved_fund_entry_conversion() {
        let entry = SavedFundEntry::new("100".to_string(), "Alpha Fund".to_string());
        let wire: SavedFund = entry.clone().into();
        assert_eq!(wire.scheme_code, "100");
        assert_eq!(wire.scheme_name, "Alpha Fund");
        assert_eq!(wire.saved_at, entry.saved_at);
    }
}
