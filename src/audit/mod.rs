//! Operation log for the bookstore
//!
//! Every successful mutation is recorded in an append-only log with the
//! operator, the affected record and before/after snapshots.
//!
//! - `AuditEntry`: one logged operation.
//! - `AuditLogger`: appends entries to a JSONL file and reads them back.
//! - `generate_diff`: summarises what changed between two snapshots.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation, Operator};
pub use logger::AuditLogger;
