//! Display formatting for command output
//!
//! Every function here returns the exact lines a command writes to stdout.
//! Listings that come out empty are a single blank line.

pub mod book;
pub mod finance;
pub mod log;

pub use book::{format_book_list, format_book_row};
pub use finance::{format_finance_report, format_finance_summary};
pub use log::format_operation_log;

/// The line printed for an empty listing
pub(crate) fn blank_if_empty(lines: Vec<String>) -> Vec<String> {
    if lines.is_empty() {
        vec![String::new()]
    } else {
        lines
    }
}
