//! Custom error types for the bookstore interpreter
//!
//! Every command failure is a `BookstoreError`. The interpreter collapses the
//! rejection variants into the single `Invalid` output line, while the
//! infrastructure variants (I/O, JSON, storage) abort the process.

use thiserror::Error;

use crate::validation::ValidationError;

/// The main error type for bookstore operations
#[derive(Error, Debug)]
pub enum BookstoreError {
    /// Malformed command line: bad tokenization, wrong argument count,
    /// unknown command, unknown or repeated option
    #[error("Syntax error: {0}")]
    Syntax(String),

    /// A field failed its validator
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Login failed or no session is active
    #[error("Authentication error: {0}")]
    Auth(String),

    /// The active session's privilege is too low for the command
    #[error("Permission denied: requires privilege {required}, have {actual}")]
    Permission { required: u8, actual: u8 },

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// `modify`/`import` without a selected book
    #[error("No book selected in the current session")]
    NoSelection,

    /// Not enough copies in stock for a sale
    #[error("Insufficient stock for '{isbn}': requested {requested}, available {available}")]
    InsufficientStock {
        isbn: String,
        requested: u64,
        available: u64,
    },

    /// `show finance <count>` asked for more entries than the ledger holds
    #[error("Ledger has {available} entries, requested {requested}")]
    LedgerRange { requested: usize, available: usize },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl BookstoreError {
    /// Create a "not found" error for accounts
    pub fn account_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Account",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for books
    pub fn book_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Book",
            identifier: identifier.into(),
        }
    }

    /// Create a "duplicate" error for accounts
    pub fn duplicate_account(identifier: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type: "Account",
            identifier: identifier.into(),
        }
    }

    /// Create a "duplicate" error for books
    pub fn duplicate_book(identifier: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type: "Book",
            identifier: identifier.into(),
        }
    }

    /// Create a syntax error
    pub fn syntax(message: impl Into<String>) -> Self {
        Self::Syntax(message.into())
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// True for failures caused by the command itself. These are reported as
    /// `Invalid` and leave all state untouched; anything else is an
    /// infrastructure failure.
    pub fn is_rejection(&self) -> bool {
        !matches!(
            self,
            Self::Config(_) | Self::Io(_) | Self::Json(_) | Self::Storage(_)
        )
    }
}

impl From<std::io::Error> for BookstoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BookstoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for bookstore operations
pub type BookstoreResult<T> = Result<T, BookstoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BookstoreError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = BookstoreError::book_not_found("978-7");
        assert_eq!(err.to_string(), "Book not found: 978-7");
        assert!(err.is_not_found());
        assert!(err.is_rejection());
    }

    #[test]
    fn test_insufficient_stock_error() {
        let err = BookstoreError::InsufficientStock {
            isbn: "111".into(),
            requested: 10,
            available: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for '111': requested 10, available 5"
        );
    }

    #[test]
    fn test_validation_converts() {
        let err: BookstoreError = ValidationError::TooLong {
            field: "isbn",
            max: 20,
            actual: 21,
        }
        .into();
        assert!(err.is_validation());
        assert!(err.is_rejection());
    }

    #[test]
    fn test_from_io_error_is_not_rejection() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: BookstoreError = io_err.into();
        assert!(matches!(err, BookstoreError::Io(_)));
        assert!(!err.is_rejection());
    }
}
