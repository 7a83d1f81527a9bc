//! Owner-only reporting: finance summaries, the ledger listing and the
//! operation log.

use crate::audit::AuditEntry;
use crate::error::BookstoreResult;
use crate::models::{Money, Privilege};
use crate::session::SessionStack;
use crate::storage::{FinanceSummary, Storage};

/// Every ledger entry plus the overall totals
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinanceReport {
    pub entries: Vec<Money>,
    pub summary: FinanceSummary,
}

/// Service for reports over the ledger and the operation log
pub struct ReportService<'a> {
    storage: &'a Storage,
    sessions: &'a SessionStack,
}

impl<'a> ReportService<'a> {
    /// Create a new report service
    pub fn new(storage: &'a Storage, sessions: &'a SessionStack) -> Self {
        Self { storage, sessions }
    }

    /// `show finance [count]`
    ///
    /// `None` covers the whole ledger. A count of zero yields no summary.
    pub fn finance_summary(&self, count: Option<usize>) -> BookstoreResult<Option<FinanceSummary>> {
        self.sessions.require(Privilege::Owner)?;

        match count {
            None => self.storage.ledger.summary().map(Some),
            Some(0) => Ok(None),
            Some(count) => self.storage.ledger.summary_of_last(count).map(Some),
        }
    }

    /// `report finance`
    pub fn finance_report(&self) -> BookstoreResult<FinanceReport> {
        self.sessions.require(Privilege::Owner)?;

        Ok(FinanceReport {
            entries: self.storage.ledger.entries().to_vec(),
            summary: self.storage.ledger.summary()?,
        })
    }

    /// `log`: every recorded operation, oldest first
    pub fn operation_log(&self) -> BookstoreResult<Vec<AuditEntry>> {
        self.sessions.require(Privilege::Owner)?;
        self.storage.logged_operations()
    }

    /// `report employee`: operations performed from staff sessions
    pub fn employee_report(&self) -> BookstoreResult<Vec<AuditEntry>> {
        Ok(self
            .operation_log()?
            .into_iter()
            .filter(|entry| entry.operator.privilege == Privilege::Staff)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{EntityType, Operator};
    use crate::config::{BookstorePaths, BootstrapAccount};
    use crate::error::BookstoreError;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Storage, SessionStack) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BookstorePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::open(paths, &BootstrapAccount::default())
            .unwrap()
            .with_audit_log();
        storage.ledger.record_income(Money::from_cents(50000));
        storage.ledger.record_expenditure(Money::from_cents(20000));
        storage.ledger.record_income(Money::from_cents(30000));

        let mut sessions = SessionStack::new();
        sessions
            .push(&storage.accounts, "root", Some("sjtu"))
            .unwrap();
        (temp_dir, storage, sessions)
    }

    #[test]
    fn test_finance_summary_windows() {
        let (_dir, storage, sessions) = setup();
        let service = ReportService::new(&storage, &sessions);

        let all = service.finance_summary(None).unwrap().unwrap();
        assert_eq!(all.income, Money::from_cents(80000));
        assert_eq!(all.expenditure, Money::from_cents(20000));

        let last_two = service.finance_summary(Some(2)).unwrap().unwrap();
        assert_eq!(last_two.income, Money::from_cents(30000));
        assert_eq!(last_two.expenditure, Money::from_cents(20000));

        assert_eq!(service.finance_summary(Some(0)).unwrap(), None);
        assert!(matches!(
            service.finance_summary(Some(99)),
            Err(BookstoreError::LedgerRange { .. })
        ));
    }

    #[test]
    fn test_reports_require_owner() {
        let (_dir, storage, _) = setup();
        let sessions = SessionStack::new();
        let service = ReportService::new(&storage, &sessions);

        assert!(service.finance_summary(None).is_err());
        assert!(service.finance_report().is_err());
        assert!(service.operation_log().is_err());
        assert!(service.employee_report().is_err());
    }

    #[test]
    fn test_finance_report_lists_entries() {
        let (_dir, storage, sessions) = setup();
        let report = ReportService::new(&storage, &sessions)
            .finance_report()
            .unwrap();

        assert_eq!(report.entries.len(), 3);
        assert_eq!(report.entries[1], Money::from_cents(-20000));
        assert_eq!(report.summary.income, Money::from_cents(80000));
    }

    #[test]
    fn test_employee_report_keeps_staff_operations() {
        let (_dir, mut storage, sessions) = setup();
        let book = serde_json::json!({"isbn": "111"});
        storage.log_operations(&[
            AuditEntry::create(
                Operator::user("clerk", Privilege::Staff),
                EntityType::Book,
                "111",
                &book,
            ),
            AuditEntry::create(
                Operator::user("root", Privilege::Owner),
                EntityType::Book,
                "222",
                &book,
            ),
        ]);

        let service = ReportService::new(&storage, &sessions);
        assert_eq!(service.operation_log().unwrap().len(), 2);

        let staff = service.employee_report().unwrap();
        assert_eq!(staff.len(), 1);
        assert_eq!(staff[0].entity_id, "111");
    }
}
