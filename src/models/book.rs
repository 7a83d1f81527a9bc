//! Book model
//!
//! A book in the inventory, keyed by ISBN, plus the field-level update that
//! `modify` applies to it.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;
use crate::validation::KEYWORD_SEPARATOR;

/// Ordered set of distinct, non-empty keyword tags
///
/// Construct through [`crate::validation::keyword_list`] so the invariant
/// holds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeywordList(Vec<String>);

impl KeywordList {
    /// Wrap segments that have already been validated
    pub fn from_segments(segments: Vec<String>) -> Self {
        Self(segments)
    }

    /// Whether `tag` is one of the segments
    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|k| k == tag)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for KeywordList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(&KEYWORD_SEPARATOR.to_string()))
    }
}

/// A book in the inventory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Unique key
    pub isbn: String,

    /// Title, empty until set
    #[serde(default)]
    pub name: String,

    /// Author, empty until set
    #[serde(default)]
    pub author: String,

    /// Keyword tags
    #[serde(default)]
    pub keywords: KeywordList,

    /// Unit price
    #[serde(default)]
    pub price: Money,

    /// Copies in stock
    #[serde(default)]
    pub stock: u64,
}

impl Book {
    /// Create an empty book with only its ISBN set
    pub fn new(isbn: impl Into<String>) -> Self {
        Self {
            isbn: isbn.into(),
            name: String::new(),
            author: String::new(),
            keywords: KeywordList::default(),
            price: Money::zero(),
            stock: 0,
        }
    }
}

/// A set of field assignments for `modify`
///
/// Every value has passed its validator; applying the update cannot fail.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookUpdate {
    pub isbn: Option<String>,
    pub name: Option<String>,
    pub author: Option<String>,
    pub keywords: Option<KeywordList>,
    pub price: Option<Money>,
}

impl BookUpdate {
    /// The ISBN this update renames to, if it differs from `current`
    pub fn rename_target<'a>(&'a self, current: &str) -> Option<&'a str> {
        self.isbn.as_deref().filter(|isbn| *isbn != current)
    }

    /// Write every assigned field into `book`
    pub fn apply(&self, book: &mut Book) {
        if let Some(isbn) = &self.isbn {
            book.isbn = isbn.clone();
        }
        if let Some(name) = &self.name {
            book.name = name.clone();
        }
        if let Some(author) = &self.author {
            book.author = author.clone();
        }
        if let Some(keywords) = &self.keywords {
            book.keywords = keywords.clone();
        }
        if let Some(price) = self.price {
            book.price = price;
        }
    }
}
