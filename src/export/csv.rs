//! CSV Export functionality
//!
//! Budget lines and transactions of every period, and the per-period
//! balances of the rollover chain.

use std::io::Write;

use crate::error::BudgetResult;
use crate::models::Money;
use crate::reports::BudgetTableMapper;
use crate::services::RolloverService;
use crate::storage::BudgetDocument;

/// Export every line and transaction, one row each, grouped by period
pub fn export_items_csv<W: Write>(document: &BudgetDocument, writer: W) -> BudgetResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record([
        "period",
        "item_type",
        "id",
        "name",
        "kind",
        "recurrence",
        "date",
        "amount",
        "cumulative_balance",
        "is_rollover",
    ])?;

    let mut budgets: Vec<_> = document.budgets.iter().collect();
    budgets.sort_by_key(|b| b.period);

    for budget in budgets {
        let period = budget.period.to_string();
        for row in BudgetTableMapper::for_budget(budget, None).rows {
            csv.write_record([
                period.clone(),
                row.item_type.as_str().to_string(),
                row.id,
                row.name,
                row.kind.as_str().to_string(),
                row.recurrence.map(|r| r.as_str().to_string()).unwrap_or_default(),
                row.date.map(|d| d.to_string()).unwrap_or_default(),
                row.amount.to_decimal_string(),
                row.cumulative_balance.to_decimal_string(),
                row.is_rollover.to_string(),
            ])?;
        }
    }

    csv.flush()?;
    Ok(())
}

/// Export the rollover chain, one row per period
pub fn export_balances_csv<W: Write>(
    document: &BudgetDocument,
    opening: Money,
    writer: W,
) -> BudgetResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record([
        "period",
        "rollover",
        "total_income",
        "total_expenses",
        "available",
        "ending_balance",
    ])?;

    for balance in RolloverService::chain(&document.budgets, opening) {
        let m = balance.metrics;
        csv.write_record([
            balance.period.to_string(),
            balance.rollover.to_decimal_string(),
            m.total_income.to_decimal_string(),
            m.total_expenses.to_decimal_string(),
            m.available.to_decimal_string(),
            m.ending_balance.to_decimal_string(),
        ])?;
    }

    csv.flush()?;
    Ok(())
}
