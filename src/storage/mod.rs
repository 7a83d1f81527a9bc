//! Storage layer for the bookstore
//!
//! The record store owns the three record sets (accounts, books, ledger) and
//! persists them as JSON documents with atomic writes.

pub mod accounts;
pub mod books;
pub mod file_io;
pub mod init;
pub mod ledger;

pub use accounts::AccountRepository;
pub use books::{BookFilter, BookRepository};
pub use file_io::{read_json, write_json_atomic};
pub use init::create_bootstrap_account;
pub use ledger::{FinanceSummary, Ledger};

use tracing::{info, warn};

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::paths::BookstorePaths;
use crate::config::settings::BootstrapAccount;
use crate::error::BookstoreError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: BookstorePaths,
    pub accounts: AccountRepository,
    pub books: BookRepository,
    pub ledger: Ledger,
    audit: Option<AuditLogger>,
    pending_operations: Vec<AuditEntry>,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: BookstorePaths) -> Result<Self, BookstoreError> {
        paths.ensure_directories()?;

        Ok(Self {
            accounts: AccountRepository::new(paths.accounts_file()),
            books: BookRepository::new(paths.books_file()),
            ledger: Ledger::new(paths.ledger_file()),
            audit: None,
            pending_operations: Vec::new(),
            paths,
        })
    }

    /// Open the store under `paths` and load everything from disk
    pub fn open(
        paths: BookstorePaths,
        bootstrap: &BootstrapAccount,
    ) -> Result<Self, BookstoreError> {
        let mut storage = Self::new(paths)?;
        storage.load_all(bootstrap)?;
        Ok(storage)
    }

    /// Record successful mutations in the operation log at `paths.audit_log()`
    pub fn with_audit_log(mut self) -> Self {
        self.audit = Some(AuditLogger::new(self.paths.audit_log()));
        self
    }

    /// Queue entries for the operation log, if one is configured
    ///
    /// Queued entries reach the log file in `save_all`, right after the
    /// records they describe, so the log never runs ahead of saved state.
    pub fn log_operations(&mut self, entries: &[AuditEntry]) {
        if self.audit.is_some() {
            self.pending_operations.extend_from_slice(entries);
        }
    }

    /// All logged operations, oldest first, including those not yet saved;
    /// empty when logging is disabled
    pub fn logged_operations(&self) -> Result<Vec<AuditEntry>, BookstoreError> {
        match &self.audit {
            Some(audit) => {
                let mut entries = audit.read_all()?;
                entries.extend(self.pending_operations.iter().cloned());
                Ok(entries)
            }
            None => Ok(Vec::new()),
        }
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &BookstorePaths {
        &self.paths
    }

    /// Load all data from disk
    ///
    /// If no account file exists yet, the bootstrap account is created.
    pub fn load_all(&mut self, bootstrap: &BootstrapAccount) -> Result<(), BookstoreError> {
        if !self.accounts.load()? {
            create_bootstrap_account(&mut self.accounts, bootstrap)?;
        }
        self.books.load()?;
        self.ledger.load()?;

        info!(
            accounts = self.accounts.count(),
            books = self.books.count(),
            ledger_entries = self.ledger.len(),
            "loaded record store"
        );
        Ok(())
    }

    /// Save all data to disk, then flush queued operation log entries
    ///
    /// The records are already on disk when the log is written, so a log
    /// write failure is reported and otherwise ignored.
    pub fn save_all(&mut self) -> Result<(), BookstoreError> {
        self.accounts.save()?;
        self.books.save()?;
        self.ledger.save()?;
        info!(base_dir = %self.paths.base_dir().display(), "saved record store");

        if let Some(audit) = &self.audit {
            let pending = std::mem::take(&mut self.pending_operations);
            if let Err(e) = audit.log_batch(&pending) {
                warn!(error = %e, path = %audit.path().display(), "failed to write operation log");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BookstorePaths::with_base_dir(temp_dir.path().to_path_buf());
        let _storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
    }

    #[test]
    fn test_first_open_creates_root() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BookstorePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths, &BootstrapAccount::default()).unwrap();

        assert_eq!(storage.accounts.count(), 1);
        assert!(storage.accounts.exists("root"));
        assert_eq!(storage.books.count(), 0);
        assert!(storage.ledger.is_empty());
    }

    #[test]
    fn test_round_trip_all_record_sets() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BookstorePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::open(paths.clone(), &BootstrapAccount::default()).unwrap();

        storage.accounts.remove("root");
        storage.books.get_or_create("111");
        storage.ledger.record_income(Money::from_cents(1250));
        storage.save_all().unwrap();

        let reopened = Storage::open(paths, &BootstrapAccount::default()).unwrap();
        // An existing but empty account file must not re-seed the root account
        assert_eq!(reopened.accounts.count(), 0);
        assert!(reopened.books.exists("111"));
        assert_eq!(reopened.ledger.entries(), &[Money::from_cents(1250)]);
    }

    #[test]
    fn test_operation_log_round_trip() {
        use crate::audit::{EntityType, Operator};
        use crate::models::Privilege;

        let temp_dir = TempDir::new().unwrap();
        let paths = BookstorePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths.clone()).unwrap().with_audit_log();

        storage.log_operations(&[AuditEntry::create(
            Operator::user("root", Privilege::Owner),
            EntityType::Book,
            "111",
            &serde_json::json!({"isbn": "111"}),
        )]);

        let logged = storage.logged_operations().unwrap();
        assert_eq!(logged.len(), 1);
        assert_eq!(logged[0].entity_id, "111");

        storage.save_all().unwrap();
        let reopened = Storage::new(paths).unwrap().with_audit_log();
        assert_eq!(reopened.logged_operations().unwrap().len(), 1);
    }

    #[test]
    fn test_operation_log_waits_for_save() {
        use crate::audit::{EntityType, Operator};
        use crate::models::Privilege;

        let temp_dir = TempDir::new().unwrap();
        let paths = BookstorePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::open(paths.clone(), &BootstrapAccount::default())
            .unwrap()
            .with_audit_log();

        storage.books.get_or_create("111");
        storage.log_operations(&[AuditEntry::create(
            Operator::user("root", Privilege::Owner),
            EntityType::Book,
            "111",
            &serde_json::json!({"isbn": "111"}),
        )]);

        // Nothing on disk yet: neither the book nor its log line
        assert!(!paths.audit_log().exists());
        assert!(!paths.books_file().exists());

        storage.save_all().unwrap();
        assert!(paths.audit_log().exists());
        assert!(Storage::open(paths, &BootstrapAccount::default())
            .unwrap()
            .books
            .exists("111"));
    }

    #[test]
    fn test_operation_log_disabled() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BookstorePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths.clone()).unwrap();

        storage.log_operations(&[]);
        storage.save_all().unwrap();
        assert!(storage.logged_operations().unwrap().is_empty());
        assert!(!paths.audit_log().exists());
    }
}
