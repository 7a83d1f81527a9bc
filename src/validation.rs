//! Field validators
//!
//! Pure syntactic checks for every field a command can carry. Handlers run
//! these before touching any state, so a failure here never leaves a partial
//! change behind.

use std::collections::HashSet;
use std::fmt;

use crate::models::money::{Money, MoneyParseError};

/// Maximum length of user ids, passwords and display names
pub const MAX_USER_TOKEN_LEN: usize = 30;
/// Maximum length of an ISBN
pub const MAX_ISBN_LEN: usize = 20;
/// Maximum length of a book name, author or keyword list
pub const MAX_TEXT_LEN: usize = 60;
/// Maximum number of digits in an integer argument
pub const MAX_INTEGER_DIGITS: usize = 10;
/// Largest accepted integer argument
pub const MAX_INTEGER: u64 = 2_147_483_647;

/// Separator between keyword segments
pub const KEYWORD_SEPARATOR: char = '|';

/// Why a field was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty {
        field: &'static str,
    },
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
    InvalidCharacter {
        field: &'static str,
        character: char,
    },
    EmptyKeywordSegment,
    DuplicateKeyword(String),
    MultipleKeywords,
    NotAnInteger {
        field: &'static str,
        value: String,
    },
    OutOfRange {
        field: &'static str,
        value: String,
    },
    Money(MoneyParseError),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::TooLong { field, max, actual } => {
                write!(f, "{} too long ({} bytes, max {})", field, actual, max)
            }
            Self::InvalidCharacter { field, character } => {
                write!(f, "{} contains invalid character {:?}", field, character)
            }
            Self::EmptyKeywordSegment => write!(f, "keyword list contains an empty segment"),
            Self::DuplicateKeyword(k) => write!(f, "keyword '{}' appears more than once", k),
            Self::MultipleKeywords => write!(f, "only one keyword may be queried at a time"),
            Self::NotAnInteger { field, value } => {
                write!(f, "{} is not an integer: '{}'", field, value)
            }
            Self::OutOfRange { field, value } => write!(f, "{} out of range: {}", field, value),
            Self::Money(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<MoneyParseError> for ValidationError {
    fn from(err: MoneyParseError) -> Self {
        Self::Money(err)
    }
}

fn check_length(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.len() > max {
        return Err(ValidationError::TooLong {
            field,
            max,
            actual: value.len(),
        });
    }
    Ok(())
}

fn check_non_empty(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(())
}

fn check_no_control(field: &'static str, value: &str) -> Result<(), ValidationError> {
    match value.chars().find(|c| (*c as u32) < 32) {
        Some(character) => Err(ValidationError::InvalidCharacter { field, character }),
        None => Ok(()),
    }
}

/// User ids and passwords: 1-30 bytes of `[A-Za-z0-9_]`
pub fn user_token(field: &'static str, value: &str) -> Result<(), ValidationError> {
    check_non_empty(field, value)?;
    check_length(field, value, MAX_USER_TOKEN_LEN)?;
    match value
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_'))
    {
        Some(character) => Err(ValidationError::InvalidCharacter { field, character }),
        None => Ok(()),
    }
}

/// Display names: 1-30 bytes, no control characters
pub fn display_name(value: &str) -> Result<(), ValidationError> {
    check_non_empty("display name", value)?;
    check_length("display name", value, MAX_USER_TOKEN_LEN)?;
    check_no_control("display name", value)
}

/// ISBNs: 1-20 bytes, no control characters
pub fn isbn(value: &str) -> Result<(), ValidationError> {
    check_non_empty("ISBN", value)?;
    check_length("ISBN", value, MAX_ISBN_LEN)?;
    check_no_control("ISBN", value)
}

/// Book names, authors and keyword text: at most 60 bytes, no control
/// characters, no double quotes. May be empty.
pub fn free_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    check_length(field, value, MAX_TEXT_LEN)?;
    check_no_control(field, value)?;
    if value.contains('"') {
        return Err(ValidationError::InvalidCharacter {
            field,
            character: '"',
        });
    }
    Ok(())
}

/// A `|`-delimited keyword list whose segments are non-empty and pairwise
/// distinct. Returns the segments in their original order.
pub fn keyword_list(value: &str) -> Result<Vec<String>, ValidationError> {
    free_text("keyword", value)?;

    let mut seen = HashSet::new();
    let mut segments = Vec::new();
    for segment in value.split(KEYWORD_SEPARATOR) {
        if segment.is_empty() {
            return Err(ValidationError::EmptyKeywordSegment);
        }
        if !seen.insert(segment) {
            return Err(ValidationError::DuplicateKeyword(segment.to_string()));
        }
        segments.push(segment.to_string());
    }
    Ok(segments)
}

/// A single keyword used as a query: free text without the separator
///
/// An empty query is allowed and stands for "no keywords".
pub fn single_keyword(value: &str) -> Result<(), ValidationError> {
    free_text("keyword", value)?;
    if value.contains(KEYWORD_SEPARATOR) {
        return Err(ValidationError::MultipleKeywords);
    }
    Ok(())
}

/// Non-negative integers: 1-10 decimal digits, at most 2,147,483,647
pub fn integer(field: &'static str, value: &str) -> Result<u64, ValidationError> {
    check_non_empty(field, value)?;
    if value.len() > MAX_INTEGER_DIGITS || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::NotAnInteger {
            field,
            value: value.to_string(),
        });
    }
    let parsed: u64 = value.parse().map_err(|_| ValidationError::NotAnInteger {
        field,
        value: value.to_string(),
    })?;
    if parsed > MAX_INTEGER {
        return Err(ValidationError::OutOfRange {
            field,
            value: value.to_string(),
        });
    }
    Ok(parsed)
}

/// Currency amounts with at most two fractional digits, parsed to cents
pub fn currency(value: &str) -> Result<Money, ValidationError> {
    Ok(Money::parse(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_token() {
        assert!(user_token("user id", "root").is_ok());
        assert!(user_token("user id", "a_B_9").is_ok());
        assert!(user_token("user id", &"x".repeat(30)).is_ok());
        assert!(user_token("user id", &"x".repeat(31)).is_err());
        assert!(user_token("user id", "").is_err());
        assert!(user_token("user id", "bad-name").is_err());
        assert!(user_token("user id", "has space").is_err());
    }

    #[test]
    fn test_display_name() {
        assert!(display_name("Jane Doe").is_ok());
        assert!(display_name("张三").is_ok());
        assert!(display_name("").is_err());
        assert!(display_name("tab\there").is_err());
    }

    #[test]
    fn test_isbn() {
        assert!(isbn("978-7-111").is_ok());
        assert!(isbn(&"1".repeat(20)).is_ok());
        assert!(isbn(&"1".repeat(21)).is_err());
        assert!(isbn("").is_err());
    }

    #[test]
    fn test_free_text() {
        assert!(free_text("name", "").is_ok());
        assert!(free_text("name", "The Rust Book").is_ok());
        assert!(free_text("name", &"n".repeat(61)).is_err());
        assert!(free_text("name", "say \"hi\"").is_err());
    }

    #[test]
    fn test_keyword_list() {
        assert_eq!(
            keyword_list("a|b").unwrap(),
            vec!["a".to_string(), "b".to_string()]
        );
        assert_eq!(
            keyword_list("a|a"),
            Err(ValidationError::DuplicateKeyword("a".to_string()))
        );
        assert_eq!(
            keyword_list("a||b"),
            Err(ValidationError::EmptyKeywordSegment)
        );
        assert_eq!(keyword_list(""), Err(ValidationError::EmptyKeywordSegment));
        assert_eq!(keyword_list("a|"), Err(ValidationError::EmptyKeywordSegment));
    }

    #[test]
    fn test_single_keyword() {
        assert!(single_keyword("fiction").is_ok());
        assert_eq!(
            single_keyword("a|b"),
            Err(ValidationError::MultipleKeywords)
        );
        assert!(single_keyword("").is_ok());
        assert!(single_keyword("a\"b").is_err());
    }

    #[test]
    fn test_integer() {
        assert_eq!(integer("quantity", "0"), Ok(0));
        assert_eq!(integer("quantity", "2147483647"), Ok(2_147_483_647));
        assert!(matches!(
            integer("quantity", "2147483648"),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(integer("quantity", "12345678901").is_err());
        assert!(integer("quantity", "-1").is_err());
        assert!(integer("quantity", "+1").is_err());
        assert!(integer("quantity", "1.0").is_err());
        assert!(integer("quantity", "").is_err());
    }

    #[test]
    fn test_currency() {
        assert_eq!(currency("12.50"), Ok(Money::from_cents(1250)));
        assert!(currency("12.").is_err());
        assert!(currency("1.005").is_err());
    }
}
