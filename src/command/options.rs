//! `-key=value` option parsing
//!
//! One structural pass over the option tokens of `modify` and `show`:
//! every token must be a known `-key=value` pair and no key may repeat.
//! Values are checked by the field validators afterwards.

use std::collections::HashSet;
use std::fmt;

use crate::error::{BookstoreError, BookstoreResult};

/// A book field addressable by an option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookField {
    Isbn,
    Name,
    Author,
    Keyword,
    Price,
}

impl BookField {
    /// Look up a field by its option key (case-sensitive)
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ISBN" => Some(Self::Isbn),
            "name" => Some(Self::Name),
            "author" => Some(Self::Author),
            "keyword" => Some(Self::Keyword),
            "price" => Some(Self::Price),
            _ => None,
        }
    }

    pub const fn key(&self) -> &'static str {
        match self {
            Self::Isbn => "ISBN",
            Self::Name => "name",
            Self::Author => "author",
            Self::Keyword => "keyword",
            Self::Price => "price",
        }
    }
}

impl fmt::Display for BookField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "-{}", self.key())
    }
}

/// One parsed `-key=value` option
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldOption {
    pub field: BookField,
    pub value: String,
}

/// Parse option tokens, accepting only the fields in `allowed`
pub fn parse_field_options(
    tokens: &[String],
    allowed: &[BookField],
) -> BookstoreResult<Vec<FieldOption>> {
    let mut seen = HashSet::new();
    let mut options = Vec::with_capacity(tokens.len());

    for token in tokens {
        let (key, value) = token
            .strip_prefix('-')
            .and_then(|rest| rest.split_once('='))
            .ok_or_else(|| BookstoreError::syntax(format!("expected -key=value, got '{}'", token)))?;

        let field = BookField::from_key(key)
            .filter(|field| allowed.contains(field))
            .ok_or_else(|| BookstoreError::syntax(format!("unknown option '-{}'", key)))?;

        if !seen.insert(field) {
            return Err(BookstoreError::syntax(format!("option {} given twice", field)));
        }

        options.push(FieldOption {
            field,
            value: value.to_string(),
        });
    }

    Ok(options)
}
