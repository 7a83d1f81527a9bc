//! Account repository for JSON storage
//!
//! Manages loading and saving accounts to accounts.json

use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::{BookstoreError, BookstoreResult};
use crate::models::Account;

use super::file_io::{read_json_if_exists, write_json_atomic};

/// Serializable account data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct AccountData {
    accounts: Vec<Account>,
}

/// Repository for account persistence, keyed by user id
pub struct AccountRepository {
    path: PathBuf,
    data: HashMap<String, Account>,
}

impl AccountRepository {
    /// Create a new, empty account repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: HashMap::new(),
        }
    }

    /// Load accounts from disk
    ///
    /// Returns `false` when no account file exists yet.
    pub fn load(&mut self) -> BookstoreResult<bool> {
        let file_data: Option<AccountData> = read_json_if_exists(&self.path)?;

        self.data.clear();
        let Some(file_data) = file_data else {
            return Ok(false);
        };
        for account in file_data.accounts {
            self.data.insert(account.user_id.clone(), account);
        }

        Ok(true)
    }

    /// Save accounts to disk
    pub fn save(&self) -> BookstoreResult<()> {
        let file_data = AccountData {
            accounts: self.get_all().into_iter().cloned().collect(),
        };

        write_json_atomic(&self.path, &file_data)
    }

    /// Get an account by user id
    pub fn get(&self, user_id: &str) -> Option<&Account> {
        self.data.get(user_id)
    }

    /// Get a mutable account by user id
    pub fn get_mut(&mut self, user_id: &str) -> Option<&mut Account> {
        self.data.get_mut(user_id)
    }

    /// Get an account or fail with `NotFound`
    pub fn require(&self, user_id: &str) -> BookstoreResult<&Account> {
        self.get(user_id)
            .ok_or_else(|| BookstoreError::account_not_found(user_id))
    }

    /// All accounts, ordered by user id
    pub fn get_all(&self) -> Vec<&Account> {
        let mut accounts: Vec<_> = self.data.values().collect();
        accounts.sort_by(|a, b| a.user_id.cmp(&b.user_id));
        accounts
    }

    /// Insert a new account; fails if the user id is taken
    pub fn insert(&mut self, account: Account) -> BookstoreResult<()> {
        if self.data.contains_key(&account.user_id) {
            return Err(BookstoreError::duplicate_account(&account.user_id));
        }
        self.data.insert(account.user_id.clone(), account);
        Ok(())
    }

    /// Delete an account, returning it if it existed
    pub fn remove(&mut self, user_id: &str) -> Option<Account> {
        self.data.remove(user_id)
    }

    /// Check if an account exists
    pub fn exists(&self, user_id: &str) -> bool {
        self.data.contains_key(user_id)
    }

    /// Count accounts
    pub fn count(&self) -> usize {
        self.data.len()
    }
}
