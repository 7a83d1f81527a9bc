//! bookstore-cli - a line-oriented bookstore command interpreter
//!
//! Reads one command per line and manages three persistent record sets:
//! user accounts, the book inventory, and a finance ledger. Access is
//! governed by privilege levels (0 anonymous, 1 customer, 3 staff, 7 owner)
//! and a nested login session stack.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution and settings
//! - `error`: Custom error types
//! - `models`: Core data models (money, privilege, accounts, books)
//! - `validation`: Field validators
//! - `storage`: JSON file storage for accounts, books and the ledger
//! - `session`: The login session stack
//! - `command`: Tokenizer and command parser
//! - `services`: One handler per command
//! - `display`: Output line formatting
//! - `audit`: Operation log
//! - `interpreter`: Dispatcher and input loop
//! - `logging`: `tracing` subscriber setup
//!
//! # Example
//!
//! ```rust,ignore
//! use bookstore_cli::config::{BookstorePaths, Settings};
//! use bookstore_cli::interpreter::Interpreter;
//! use bookstore_cli::storage::Storage;
//!
//! let paths = BookstorePaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::open(paths, &settings.bootstrap)?;
//! Interpreter::new(storage).run(std::io::stdin().lock(), &mut std::io::stdout())?;
//! ```

pub mod audit;
pub mod command;
pub mod config;
pub mod display;
pub mod error;
pub mod interpreter;
pub mod logging;
pub mod models;
pub mod services;
pub mod session;
pub mod storage;
pub mod validation;

pub use error::BookstoreError;
