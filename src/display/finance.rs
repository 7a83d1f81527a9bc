//! Finance display formatting

use crate::services::FinanceReport;
use crate::storage::FinanceSummary;

/// `+ <income> - <expenditure>`
pub fn format_finance_summary(summary: &FinanceSummary) -> String {
    format!("+ {} - {}", summary.income, summary.expenditure)
}

/// One `<index>\t<sign>\t<amount>` line per ledger entry, numbered from 1,
/// then the overall summary
pub fn format_finance_report(report: &FinanceReport) -> Vec<String> {
    let mut lines: Vec<String> = report
        .entries
        .iter()
        .enumerate()
        .map(|(i, amount)| {
            let sign = if amount.is_negative() { '-' } else { '+' };
            format!("{}\t{}\t{}", i + 1, sign, amount.abs())
        })
        .collect();
    lines.push(format_finance_summary(&report.summary));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    #[test]
    fn test_format_finance_summary() {
        let summary = FinanceSummary {
            income: Money::from_cents(80000),
            expenditure: Money::from_cents(20000),
        };
        assert_eq!(format_finance_summary(&summary), "+ 800.00 - 200.00");
        assert_eq!(format_finance_summary(&FinanceSummary::default()), "+ 0.00 - 0.00");
    }

    #[test]
    fn test_format_finance_report() {
        let report = FinanceReport {
            entries: vec![Money::from_cents(3750), Money::from_cents(-2000)],
            summary: FinanceSummary {
                income: Money::from_cents(3750),
                expenditure: Money::from_cents(2000),
            },
        };

        assert_eq!(
            format_finance_report(&report),
            vec!["1\t+\t37.50", "2\t-\t20.00", "+ 37.50 - 20.00"]
        );
    }
}
