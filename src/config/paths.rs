//! Path management for the bookstore
//!
//! ## Path Resolution Order
//!
//! 1. An explicit base directory (the `--data-dir` flag)
//! 2. `BOOKSTORE_DATA_DIR` environment variable (if set)
//! 3. The current working directory

use std::path::PathBuf;

use crate::error::BookstoreError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "BOOKSTORE_DATA_DIR";

/// Manages all paths used by the bookstore
#[derive(Debug, Clone)]
pub struct BookstorePaths {
    /// Base directory for all bookstore data
    base_dir: PathBuf,
}

impl BookstorePaths {
    /// Resolve the base directory from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be determined.
    pub fn new() -> Result<Self, BookstoreError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => std::env::current_dir().map_err(|e| {
                BookstoreError::Config(format!("Could not determine current directory: {}", e))
            })?,
        };

        Ok(Self { base_dir })
    }

    /// Create BookstorePaths with a custom base directory
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (<base>/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to accounts.json
    pub fn accounts_file(&self) -> PathBuf {
        self.data_dir().join("accounts.json")
    }

    /// Get the path to books.json
    pub fn books_file(&self) -> PathBuf {
        self.data_dir().join("books.json")
    }

    /// Get the path to ledger.json
    pub fn ledger_file(&self) -> PathBuf {
        self.data_dir().join("ledger.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), BookstoreError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| BookstoreError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| BookstoreError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }
}
