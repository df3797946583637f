//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod budget;
pub mod config;
pub mod export;
pub mod line;
pub mod period;
pub mod transaction;

pub use budget::{
    handle_delete_command, handle_new_command, handle_rollover_command, handle_summary_command, handle_table_command,
    handle_templates_command,
};
pub use config::handle_config_command;
pub use export::{handle_export_command, ExportFormat};
pub use line::{handle_line_command, LineCommands};
pub use period::handle_period_command;
pub use transaction::{handle_transaction_command, TransactionCommands};

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use chrono::NaiveDate;

use crate::error::{BudgetError, BudgetResult};
use crate::models::{Budget, BudgetLineId, Money, TransactionId};

/// Parse an amount typed by the user ("1500", "$12.50", "-200")
pub(crate) fn parse_money(input: &str) -> BudgetResult<Money> {
    Money::parse(input).map_err(|e| BudgetError::Validation(e.to_string()))
}

/// Parse a non-negative amount for a line or transaction
pub(crate) fn parse_amount(input: &str) -> BudgetResult<Money> {
    let amount = parse_money(input)?;
    if amount.is_negative() {
        return Err(BudgetError::Validation(format!(
            "Amount must not be negative: {}",
            input
        )));
    }
    Ok(amount)
}

pub(crate) fn parse_date(input: &str) -> BudgetResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        BudgetError::Validation(format!("Invalid date format: {}. Use YYYY-MM-DD", input))
    })
}

/// Find a line by full or short id
pub(crate) fn resolve_line(budget: &Budget, reference: &str) -> BudgetResult<BudgetLineId> {
    budget
        .lines
        .iter()
        .find(|l| l.id.matches(reference))
        .map(|l| l.id)
        .ok_or_else(|| BudgetError::line_not_found(reference))
}

/// Find a transaction by full or short id
pub(crate) fn resolve_transaction(budget: &Budget, reference: &str) -> BudgetResult<TransactionId> {
    budget
        .transactions
        .iter()
        .find(|t| t.id.matches(reference))
        .map(|t| t.id)
        .ok_or_else(|| BudgetError::transaction_not_found(reference))
}

/// Create `path` and hand a buffered writer to `write`
pub(crate) fn write_to_file<F>(path: &Path, write: F) -> BudgetResult<()>
where
    F: FnOnce(&mut BufWriter<File>) -> BudgetResult<()>,
{
    let file = File::create(path).map_err(|e| {
        BudgetError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    let mut writer = BufWriter::new(file);
    write(&mut writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetLine, BudgetPeriod, FinancialKind, Recurrence};

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("$1,500.25").unwrap(), Money::from_cents(150025));
        assert!(parse_amount("-3").unwrap_err().is_validation());
        assert!(parse_amount("abc").unwrap_err().is_validation());
        assert_eq!(parse_money("-200").unwrap(), Money::from_units(-200));
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2025-01-27").unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 27).unwrap()
        );
        assert!(parse_date("27/01/2025").is_err());
    }

    #[test]
    fn test_resolve_line_by_short_id() {
        let mut budget = Budget::new(BudgetPeriod::new(2025, 1).unwrap());
        let line = BudgetLine::new(budget.id, "Rent", FinancialKind::Expense, Recurrence::Fixed, Money::from_units(900));
        let id = line.id;
        budget.lines.push(line);

        assert_eq!(resolve_line(&budget, &id.to_string()).unwrap(), id);
        assert!(resolve_line(&budget, "line-0000").unwrap_err().is_not_found());
    }
}
