//! Book service
//!
//! Selection, field updates, restocking, sales and inventory queries.

use tracing::debug;

use crate::audit::{generate_diff, AuditEntry, EntityType};
use crate::error::{BookstoreError, BookstoreResult};
use crate::models::{Book, BookUpdate, Money, Privilege};
use crate::session::SessionStack;
use crate::storage::{BookFilter, Storage};
use crate::validation::ValidationError;

use super::account::current_operator;

/// Service for inventory management
pub struct BookService<'a> {
    storage: &'a mut Storage,
    sessions: &'a mut SessionStack,
}

impl<'a> BookService<'a> {
    /// Create a new book service
    pub fn new(storage: &'a mut Storage, sessions: &'a mut SessionStack) -> Self {
        Self { storage, sessions }
    }

    /// `select`: make `isbn` the current session's book, creating it if unknown
    pub fn select(&mut self, isbn: &str) -> BookstoreResult<()> {
        self.sessions.require(Privilege::Staff)?;

        let (book, created) = self.storage.books.get_or_create(isbn);
        let created_entry = created.then(|| {
            AuditEntry::create(
                current_operator(self.sessions),
                EntityType::Book,
                isbn,
                book,
            )
        });

        self.sessions.select(isbn)?;

        if let Some(entry) = created_entry {
            debug!(isbn, "created empty book on select");
            self.storage.log_operations(&[entry]);
        }
        Ok(())
    }

    /// `modify`: apply `update` to the selected book
    ///
    /// A rename moves the record to its new key and retargets every session
    /// that had the old key selected.
    pub fn modify(&mut self, update: &BookUpdate) -> BookstoreResult<Book> {
        self.sessions.require(Privilege::Staff)?;
        let selected = self.sessions.require_selected()?.to_string();

        let before = self.storage.books.require(&selected)?.clone();
        let after = self.storage.books.update(&selected, update)?;

        if after.isbn != selected {
            self.sessions.retarget_selection(&selected, &after.isbn);
        }

        let mut entry = AuditEntry::update(
            current_operator(self.sessions),
            EntityType::Book,
            after.isbn.clone(),
            &before,
            &after,
            None,
        );
        if let (Some(old), Some(new)) = (&entry.before, &entry.after) {
            entry.diff_summary = generate_diff(old, new);
        }
        self.storage.log_operations(&[entry]);

        Ok(after)
    }

    /// `import`: add `quantity` copies of the selected book, paying `cost`
    pub fn import(&mut self, quantity: u64, cost: Money) -> BookstoreResult<()> {
        self.sessions.require(Privilege::Staff)?;
        let selected = self.sessions.require_selected()?.to_string();

        let before_stock = self.storage.books.require(&selected)?.stock;
        let after_stock = self.storage.books.restock(&selected, quantity)?.stock;
        self.storage.ledger.record_expenditure(cost);

        let operator = current_operator(self.sessions);
        self.storage.log_operations(&[
            AuditEntry::update(
                operator.clone(),
                EntityType::Book,
                selected.clone(),
                &before_stock,
                &after_stock,
                Some(format!("stock: {} -> {}", before_stock, after_stock)),
            ),
            AuditEntry::create(
                operator,
                EntityType::LedgerEntry,
                self.storage.ledger.len().to_string(),
                &-cost.abs(),
            ),
        ]);

        Ok(())
    }

    /// `buy`: sell `quantity` copies of `isbn` and return the sale total
    pub fn buy(&mut self, isbn: &str, quantity: u64) -> BookstoreResult<Money> {
        self.sessions.require(Privilege::Customer)?;

        let book = self.storage.books.require(isbn)?;
        if book.stock < quantity {
            return Err(BookstoreError::InsufficientStock {
                isbn: isbn.to_string(),
                requested: quantity,
                available: book.stock,
            });
        }
        let total = book
            .price
            .checked_mul(quantity)
            .ok_or_else(|| ValidationError::OutOfRange {
                field: "quantity",
                value: quantity.to_string(),
            })?;
        let before_stock = book.stock;

        let after_stock = self.storage.books.take_stock(isbn, quantity)?.stock;
        self.storage.ledger.record_income(total);

        let operator = current_operator(self.sessions);
        self.storage.log_operations(&[
            AuditEntry::update(
                operator.clone(),
                EntityType::Book,
                isbn,
                &before_stock,
                &after_stock,
                Some(format!("stock: {} -> {}", before_stock, after_stock)),
            ),
            AuditEntry::create(
                operator,
                EntityType::LedgerEntry,
                self.storage.ledger.len().to_string(),
                &total,
            ),
        ]);

        Ok(total)
    }

    /// `show`: books matching `filter`, in ascending ISBN order
    pub fn show(&self, filter: Option<&BookFilter>) -> BookstoreResult<Vec<&Book>> {
        self.sessions.require(Privilege::Customer)?;
        Ok(self.storage.books.query(filter))
    }
}
