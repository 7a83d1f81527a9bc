//! Core data models for the bookstore
//!
//! Accounts, books, privilege levels and the money type shared by prices
//! and the finance ledger.

pub mod account;
pub mod book;
pub mod money;
pub mod privilege;

pub use account::Account;
pub use book::{Book, BookUpdate, KeywordList};
pub use money::Money;
pub use privilege::Privilege;
