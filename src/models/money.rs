//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) to avoid floating-point precision
//! issues. Prices, sale totals and ledger entries all use this type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Longest accepted textual amount, in bytes
pub const MAX_MONEY_LEN: usize = 13;

/// Upper bound on the whole-currency part of a parsed amount
const MAX_WHOLE: i64 = 90_000_000_000;

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use bookstore_cli::models::Money;
    /// let amount = Money::from_cents(1050);
    /// assert_eq!(amount.to_string(), "10.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn whole(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is positive
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Multiply by a quantity, returning `None` on overflow
    pub fn checked_mul(&self, quantity: u64) -> Option<Self> {
        let quantity = i64::try_from(quantity).ok()?;
        self.0.checked_mul(quantity).map(Self)
    }

    /// Add two amounts, returning `None` on overflow
    pub fn checked_add(&self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Negate, returning `None` on overflow
    pub fn checked_neg(&self) -> Option<Self> {
        self.0.checked_neg().map(Self)
    }

    /// Parse a non-negative amount written as `whole[.frac]`
    ///
    /// At most 13 bytes, at most one point, at most two fractional digits,
    /// and a point must be followed by at least one digit. A missing or
    /// one-digit fraction is padded, so `"3.5"` is 350 cents.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        if s.is_empty() || s.len() > MAX_MONEY_LEN {
            return Err(MoneyParseError::InvalidFormat(s.to_string()));
        }

        let (whole_str, frac_str) = match s.split_once('.') {
            Some((whole, frac)) => (whole, Some(frac)),
            None => (s, None),
        };

        let mut whole: i64 = 0;
        for c in whole_str.chars() {
            let digit = c
                .to_digit(10)
                .ok_or_else(|| MoneyParseError::InvalidFormat(s.to_string()))?;
            whole = whole * 10 + i64::from(digit);
            if whole > MAX_WHOLE {
                return Err(MoneyParseError::Overflow(s.to_string()));
            }
        }

        let mut frac: i64 = 0;
        if let Some(frac_str) = frac_str {
            if frac_str.is_empty() || frac_str.len() > 2 {
                return Err(MoneyParseError::InvalidFormat(s.to_string()));
            }
            for c in frac_str.chars() {
                let digit = c
                    .to_digit(10)
                    .ok_or_else(|| MoneyParseError::InvalidFormat(s.to_string()))?;
                frac = frac * 10 + i64::from(digit);
            }
            if frac_str.len() == 1 {
                frac *= 10;
            }
        }

        Ok(Self(whole * 100 + frac))
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-{}.{:02}", self.whole().abs(), self.cents_part())
        } else {
            write!(f, "{}.{:02}", self.whole(), self.cents_part())
        }
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    Overflow(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
            MoneyParseError::Overflow(s) => write!(f, "Money amount too large: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let m = Money::from_cents(1050);
        assert_eq!(m.cents(), 1050);
        assert_eq!(m.whole(), 10);
        assert_eq!(m.cents_part(), 50);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1050)), "10.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "0.00");
        assert_eq!(format!("{}", Money::from_cents(-1050)), "-10.50");
        assert_eq!(format!("{}", Money::from_cents(5)), "0.05");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((-a).cents(), -1000);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("10").unwrap().cents(), 1000);
        assert_eq!(Money::parse("10.5").unwrap().cents(), 1050);
        assert_eq!(Money::parse("0.05").unwrap().cents(), 5);
        assert_eq!(Money::parse(".5").unwrap().cents(), 50);
        assert_eq!(Money::parse("9.99").unwrap().cents(), 999);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(Money::parse("").is_err());
        assert!(Money::parse("5.").is_err());
        assert!(Money::parse(".").is_err());
        assert!(Money::parse("1.234").is_err());
        assert!(Money::parse("1.2.3").is_err());
        assert!(Money::parse("-1.00").is_err());
        assert!(Money::parse("$1.00").is_err());
        assert!(Money::parse("12345678901234").is_err());
    }

    #[test]
    fn test_parse_rejects_overflowing_whole_part() {
        assert_eq!(
            Money::parse("999999999999"),
            Err(MoneyParseError::Overflow("999999999999".to_string()))
        );
        assert!(Money::parse("90000000000").is_ok());
    }

    #[test]
    fn test_checked_mul() {
        let price = Money::from_cents(1250);
        assert_eq!(price.checked_mul(3), Some(Money::from_cents(3750)));
        assert_eq!(Money::from_cents(i64::MAX).checked_mul(2), None);
    }

    #[test]
    fn test_checked_add_and_neg() {
        let a = Money::from_cents(150);
        assert_eq!(a.checked_add(Money::from_cents(50)), Some(Money::from_cents(200)));
        assert_eq!(Money::from_cents(i64::MAX).checked_add(a), None);
        assert_eq!(a.checked_neg(), Some(Money::from_cents(-150)));
        assert_eq!(Money::from_cents(i64::MIN).checked_neg(), None);
    }

    #[test]
    fn test_sum() {
        let amounts = vec![
            Money::from_cents(100),
            Money::from_cents(200),
            Money::from_cents(300),
        ];
        let total: Money = amounts.into_iter().sum();
        assert_eq!(total.cents(), 600);
    }

    #[test]
    fn test_serialization() {
        let m = Money::from_cents(1050);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "1050");

        let deserialized: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, deserialized);
    }
}
