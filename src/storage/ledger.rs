//! Finance ledger for JSON storage
//!
//! An append-only sequence of signed amounts: positive entries are sales,
//! negative entries are stock purchases.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{BookstoreError, BookstoreResult};
use crate::models::Money;
use crate::validation::ValidationError;

use super::file_io::{read_json, write_json_atomic};

/// Serializable ledger data structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct LedgerData {
    entries: Vec<Money>,
}

/// Income and expenditure totals over a run of ledger entries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FinanceSummary {
    /// Sum of positive entries
    pub income: Money,
    /// Sum of the magnitudes of negative entries
    pub expenditure: Money,
}

impl FinanceSummary {
    /// Fails if either total leaves the representable range
    fn from_entries<'a>(entries: impl Iterator<Item = &'a Money>) -> BookstoreResult<Self> {
        let mut summary = Self::default();
        for amount in entries {
            let overflow = || ValidationError::OutOfRange {
                field: "ledger total",
                value: amount.to_string(),
            };
            if amount.is_negative() {
                let magnitude = amount.checked_neg().ok_or_else(overflow)?;
                summary.expenditure = summary
                    .expenditure
                    .checked_add(magnitude)
                    .ok_or_else(overflow)?;
            } else {
                summary.income = summary.income.checked_add(*amount).ok_or_else(overflow)?;
            }
        }
        Ok(summary)
    }
}

/// Append-only ledger of sales and purchases
pub struct Ledger {
    path: PathBuf,
    entries: Vec<Money>,
}

impl Ledger {
    /// Create a new, empty ledger
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            entries: Vec::new(),
        }
    }

    /// Load entries from disk
    pub fn load(&mut self) -> BookstoreResult<()> {
        let file_data: LedgerData = read_json(&self.path)?;
        self.entries = file_data.entries;
        Ok(())
    }

    /// Save entries to disk
    pub fn save(&self) -> BookstoreResult<()> {
        let file_data = LedgerData {
            entries: self.entries.clone(),
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// Record a sale
    pub fn record_income(&mut self, amount: Money) {
        self.entries.push(amount.abs());
    }

    /// Record a stock purchase
    pub fn record_expenditure(&mut self, amount: Money) {
        self.entries.push(-amount.abs());
    }

    /// All entries, oldest first
    pub fn entries(&self) -> &[Money] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Totals over the whole ledger
    pub fn summary(&self) -> BookstoreResult<FinanceSummary> {
        FinanceSummary::from_entries(self.entries.iter())
    }

    /// Totals over the most recent `count` entries
    ///
    /// Fails if the ledger holds fewer than `count` entries.
    pub fn summary_of_last(&self, count: usize) -> BookstoreResult<FinanceSummary> {
        if count > self.entries.len() {
            return Err(BookstoreError::LedgerRange {
                requested: count,
                available: self.entries.len(),
            });
        }
        let start = self.entries.len() - count;
        FinanceSummary::from_entries(self.entries[start..].iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_ledger() -> (TempDir, Ledger) {
        let temp_dir = TempDir::new().unwrap();
        let mut ledger = Ledger::new(temp_dir.path().join("ledger.json"));
        ledger.record_income(Money::from_cents(50000));
        ledger.record_expenditure(Money::from_cents(20000));
        ledger.record_income(Money::from_cents(30000));
        (temp_dir, ledger)
    }

    #[test]
    fn test_summary_whole_ledger() {
        let (_temp_dir, ledger) = sample_ledger();
        let summary = ledger.summary().unwrap();
        assert_eq!(summary.income.cents(), 80000);
        assert_eq!(summary.expenditure.cents(), 20000);
    }

    #[test]
    fn test_summary_of_last() {
        let (_temp_dir, ledger) = sample_ledger();

        let summary = ledger.summary_of_last(2).unwrap();
        assert_eq!(summary.income.cents(), 30000);
        assert_eq!(summary.expenditure.cents(), 20000);

        assert_eq!(ledger.summary_of_last(0).unwrap(), FinanceSummary::default());
        assert!(matches!(
            ledger.summary_of_last(99),
            Err(BookstoreError::LedgerRange {
                requested: 99,
                available: 3
            })
        ));
    }

    #[test]
    fn test_summary_overflow_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let mut ledger = Ledger::new(temp_dir.path().join("ledger.json"));
        let big_sale = Money::from_cents(9_000_000_000_000_000_000);
        ledger.record_income(big_sale);
        ledger.record_income(big_sale);

        assert!(matches!(
            ledger.summary(),
            Err(BookstoreError::Validation(ValidationError::OutOfRange {
                field: "ledger total",
                ..
            }))
        ));
        assert_eq!(ledger.summary_of_last(1).unwrap().income, big_sale);
        assert!(ledger.summary_of_last(2).is_err());
    }

    #[test]
    fn test_signs_are_normalised() {
        let temp_dir = TempDir::new().unwrap();
        let mut ledger = Ledger::new(temp_dir.path().join("ledger.json"));
        ledger.record_expenditure(Money::from_cents(100));
        assert_eq!(ledger.entries(), &[Money::from_cents(-100)]);
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, ledger) = sample_ledger();
        ledger.save().unwrap();

        let mut reloaded = Ledger::new(temp_dir.path().join("ledger.json"));
        reloaded.load().unwrap();
        assert_eq!(reloaded.entries(), ledger.entries());
    }
}
