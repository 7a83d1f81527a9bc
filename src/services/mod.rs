//! Service layer for the bookstore
//!
//! Services carry out one command each on top of the storage layer and the
//! session stack: privilege checks, record-level preconditions, the mutation
//! itself and its operation log entry.

pub mod account;
pub mod book;
pub mod report;

pub use account::AccountService;
pub use book::BookService;
pub use report::{FinanceReport, ReportService};
