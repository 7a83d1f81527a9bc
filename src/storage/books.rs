//! Book repository for JSON storage
//!
//! Manages loading and saving the inventory to books.json. Books are kept in
//! ISBN order so every listing comes out sorted.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::error::{BookstoreError, BookstoreResult};
use crate::models::{Book, BookUpdate};
use crate::validation::ValidationError;

use super::file_io::{read_json, write_json_atomic};

/// Serializable book data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct BookData {
    books: Vec<Book>,
}

/// A single-predicate query over the inventory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookFilter {
    Isbn(String),
    Name(String),
    Author(String),
    Keyword(String),
}

impl BookFilter {
    /// Whether `book` satisfies the predicate
    pub fn matches(&self, book: &Book) -> bool {
        match self {
            Self::Isbn(isbn) => book.isbn == *isbn,
            Self::Name(name) => book.name == *name,
            Self::Author(author) => book.author == *author,
            Self::Keyword(keyword) if keyword.is_empty() => book.keywords.is_empty(),
            Self::Keyword(keyword) => book.keywords.contains(keyword),
        }
    }
}

/// Repository for book persistence, keyed by ISBN
pub struct BookRepository {
    path: PathBuf,
    data: BTreeMap<String, Book>,
}

impl BookRepository {
    /// Create a new, empty book repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: BTreeMap::new(),
        }
    }

    /// Load books from disk
    pub fn load(&mut self) -> BookstoreResult<()> {
        let file_data: BookData = read_json(&self.path)?;

        self.data.clear();
        for book in file_data.books {
            self.data.insert(book.isbn.clone(), book);
        }

        Ok(())
    }

    /// Save books to disk
    pub fn save(&self) -> BookstoreResult<()> {
        let file_data = BookData {
            books: self.data.values().cloned().collect(),
        };

        write_json_atomic(&self.path, &file_data)
    }

    /// Get a book by ISBN
    pub fn get(&self, isbn: &str) -> Option<&Book> {
        self.data.get(isbn)
    }

    /// Get a book or fail with `NotFound`
    pub fn require(&self, isbn: &str) -> BookstoreResult<&Book> {
        self.get(isbn)
            .ok_or_else(|| BookstoreError::book_not_found(isbn))
    }

    /// Check if a book exists
    pub fn exists(&self, isbn: &str) -> bool {
        self.data.contains_key(isbn)
    }

    /// Count books
    pub fn count(&self) -> usize {
        self.data.len()
    }

    /// Return the book with this ISBN, creating an empty one if it is unknown
    ///
    /// The flag is `true` when the book was created by this call.
    pub fn get_or_create(&mut self, isbn: &str) -> (&Book, bool) {
        let mut created = false;
        let book = self.data.entry(isbn.to_string()).or_insert_with(|| {
            created = true;
            Book::new(isbn)
        });
        (book, created)
    }

    /// Apply a field-level update to the book at `isbn`
    ///
    /// A rename onto an ISBN that is already taken fails before anything is
    /// written. On success the book is stored under its new key and a copy
    /// of the updated record is returned.
    pub fn update(&mut self, isbn: &str, update: &BookUpdate) -> BookstoreResult<Book> {
        if !self.exists(isbn) {
            return Err(BookstoreError::book_not_found(isbn));
        }
        if let Some(target) = update.rename_target(isbn) {
            if self.exists(target) {
                return Err(BookstoreError::duplicate_book(target));
            }
        }

        let Some(mut book) = self.data.remove(isbn) else {
            return Err(BookstoreError::book_not_found(isbn));
        };
        update.apply(&mut book);
        self.data.insert(book.isbn.clone(), book.clone());
        Ok(book)
    }

    /// Add `quantity` copies to the stock of an existing book
    pub fn restock(&mut self, isbn: &str, quantity: u64) -> BookstoreResult<&Book> {
        let book = self
            .data
            .get_mut(isbn)
            .ok_or_else(|| BookstoreError::book_not_found(isbn))?;
        book.stock = book
            .stock
            .checked_add(quantity)
            .ok_or_else(|| ValidationError::OutOfRange {
                field: "stock",
                value: quantity.to_string(),
            })?;
        Ok(book)
    }

    /// Remove `quantity` copies from stock; fails if not enough are held
    pub fn take_stock(&mut self, isbn: &str, quantity: u64) -> BookstoreResult<&Book> {
        let book = self
            .data
            .get_mut(isbn)
            .ok_or_else(|| BookstoreError::book_not_found(isbn))?;
        if book.stock < quantity {
            return Err(BookstoreError::InsufficientStock {
                isbn: isbn.to_string(),
                requested: quantity,
                available: book.stock,
            });
        }
        book.stock -= quantity;
        Ok(book)
    }

    /// Books matching `filter` (all books when `None`), in ascending ISBN order
    pub fn query(&self, filter: Option<&BookFilter>) -> Vec<&Book> {
        match filter {
            Some(BookFilter::Isbn(isbn)) => self.get(isbn).into_iter().collect(),
            Some(filter) => self.data.values().filter(|b| filter.matches(b)).collect(),
            None => self.data.values().collect(),
        }
    }
}
