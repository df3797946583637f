//! JSON Export functionality
//!
//! Exports every budget together with the rollover chain computed over them.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

use crate::error::{BudgetError, BudgetResult};
use crate::models::{Budget, Money, PayDay};
use crate::services::{PeriodBalance, RolloverService};
use crate::storage::BudgetDocument;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full document export structure
#[derive(Debug, Clone, Serialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Pay day the periods were resolved with, absent for calendar months
    pub pay_day_of_month: Option<u32>,

    /// Opening balance the rollover chain starts from
    pub opening_balance: Money,

    pub budgets: Vec<Budget>,

    /// Per-period metrics, oldest first
    pub balances: Vec<PeriodBalance>,

    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize)]
pub struct ExportMetadata {
    pub budget_count: usize,
    pub line_count: usize,
    pub transaction_count: usize,
    pub earliest_period: Option<String>,
    pub latest_period: Option<String>,
}

impl FullExport {
    pub fn from_document(document: &BudgetDocument, pay_day: PayDay, opening: Money) -> Self {
        let periods = document.periods();
        let metadata = ExportMetadata {
            budget_count: document.len(),
            line_count: document.budgets.iter().map(|b| b.lines.len()).sum(),
            transaction_count: document.budgets.iter().map(|b| b.transactions.len()).sum(),
            earliest_period: periods.first().map(|p| p.to_string()),
            latest_period: periods.last().map(|p| p.to_string()),
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            pay_day_of_month: pay_day.day(),
            opening_balance: opening,
            budgets: document.budgets.clone(),
            balances: RolloverService::chain(&document.budgets, opening),
            metadata,
        }
    }
}

/// Export the full document to JSON
pub fn export_full_json<W: Write>(export: &FullExport, writer: &mut W, pretty: bool) -> BudgetResult<()> {
    if pretty {
        serde_json::to_writer_pretty(writer, export)
    } else {
        serde_json::to_writer(writer, export)
    }
    .map_err(|e| BudgetError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetLine, BudgetPeriod, FinancialKind, Recurrence};

    fn document() -> BudgetDocument {
        let mut document = BudgetDocument::new();
        for month in [1, 2] {
            let mut budget = Budget::new(BudgetPeriod::new(2025, month).unwrap());
            let id = budget.id;
            budget.lines = vec![
                BudgetLine::new(id, "Salary", FinancialKind::Income, Recurrence::Fixed, Money::from_units(3000)),
                BudgetLine::new(id, "Rent", FinancialKind::Expense, Recurrence::Fixed, Money::from_units(1200)),
            ];
            document.add_budget(budget).unwrap();
        }
        document
    }

    #[test]
    fn test_full_export() {
        let export = FullExport::from_document(&document(), PayDay::new(27), Money::zero());

        assert_eq!(export.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(export.pay_day_of_month, Some(27));
        assert_eq!(export.metadata.budget_count, 2);
        assert_eq!(export.metadata.line_count, 4);
        assert_eq!(export.metadata.earliest_period.as_deref(), Some("2025-01"));
        assert_eq!(export.balances[1].rollover, Money::from_units(1800));
    }

    #[test]
    fn test_export_full_json() {
        let export = FullExport::from_document(&document(), PayDay::CALENDAR, Money::zero());
        let mut buffer = Vec::new();
        export_full_json(&export, &mut buffer, false).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["schema_version"], EXPORT_SCHEMA_VERSION);
        assert!(value["pay_day_of_month"].is_null());
        assert_eq!(value["budgets"].as_array().unwrap().len(), 2);
        assert_eq!(value["balances"][0]["metrics"]["ending_balance"], 180000);
    }
}
