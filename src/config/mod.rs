//! Configuration module for the bookstore
//!
//! - Data directory resolution
//! - Settings persistence

pub mod paths;
pub mod settings;

pub use paths::BookstorePaths;
pub use settings::{BootstrapAccount, Settings};
