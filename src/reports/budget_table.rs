//! Budget table
//!
//! Arranges a budget's lines and transactions into display rows with a
//! running balance. Rollover rows are flagged and never enter edit mode.

use std::io::Write;

use chrono::NaiveDate;
use serde::Serialize;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::error::BudgetResult;
use crate::models::{
    Budget, BudgetLine, BudgetLineId, FinancialItem, FinancialKind, Money, Recurrence, Transaction,
};

/// What a table row was built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    BudgetLine,
    Transaction,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BudgetLine => "budget_line",
            Self::Transaction => "transaction",
        }
    }
}

/// One row of the budget table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub item_type: ItemType,
    /// Short display id (`line-1a2b3c4d`, `txn-...`)
    pub id: String,
    pub name: String,
    pub kind: FinancialKind,
    /// Only set for budget lines
    pub recurrence: Option<Recurrence>,
    /// Only set for transactions
    pub date: Option<NaiveDate>,
    pub amount: Money,
    /// Balance after this row, counting every row above it
    pub cumulative_balance: Money,
    pub is_rollover: bool,
    pub is_editing: bool,
}

/// Rows plus the flags that decide which sections to render
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetTable {
    pub rows: Vec<TableRow>,
    pub has_one_off: bool,
    pub has_transactions: bool,
    pub is_empty: bool,
}

fn kind_rank(kind: FinancialKind) -> u8 {
    match kind {
        FinancialKind::Income => 0,
        FinancialKind::Expense => 1,
        FinancialKind::Saving => 2,
    }
}

/// Lines grouped by kind (income, expense, saving), rollover first within
/// its kind, then oldest first; transactions by date
pub fn canonical_order<'a>(
    lines: &'a [BudgetLine],
    transactions: &'a [Transaction],
) -> (Vec<&'a BudgetLine>, Vec<&'a Transaction>) {
    let mut lines: Vec<&BudgetLine> = lines.iter().collect();
    lines.sort_by_key(|l| (kind_rank(l.kind), !l.is_rollover(), l.created_at));

    let mut transactions: Vec<&Transaction> = transactions.iter().collect();
    transactions.sort_by_key(|t| (t.date, t.created_at));

    (lines, transactions)
}

/// Maps lines and transactions to table rows
pub struct BudgetTableMapper;

impl BudgetTableMapper {
    /// Build the table from rows already in display order
    ///
    /// Lines come before transactions. The running balance follows that
    /// order exactly.
    pub fn map<'a, L, T>(lines: L, transactions: T, editing: Option<BudgetLineId>) -> BudgetTable
    where
        L: IntoIterator<Item = &'a BudgetLine>,
        T: IntoIterator<Item = &'a Transaction>,
    {
        let mut balance = Money::zero();
        let mut rows = Vec::new();
        let mut has_one_off = false;
        let mut has_transactions = false;

        for line in lines {
            balance += line.signed_amount();
            has_one_off |= line.recurrence == Recurrence::OneOff;
            let is_rollover = line.is_rollover();

            rows.push(TableRow {
                item_type: ItemType::BudgetLine,
                id: line.id.to_string(),
                name: line.name.clone(),
                kind: line.kind,
                recurrence: Some(line.recurrence),
                date: None,
                amount: line.amount,
                cumulative_balance: balance,
                is_rollover,
                is_editing: !is_rollover && editing == Some(line.id),
            });
        }

        for txn in transactions {
            balance += txn.signed_amount();
            has_transactions = true;

            rows.push(TableRow {
                item_type: ItemType::Transaction,
                id: txn.id.to_string(),
                name: txn.name.clone(),
                kind: txn.kind,
                recurrence: None,
                date: Some(txn.date),
                amount: txn.amount,
                cumulative_balance: balance,
                is_rollover: false,
                is_editing: false,
            });
        }

        BudgetTable {
            is_empty: rows.is_empty(),
            rows,
            has_one_off,
            has_transactions,
        }
    }

    /// Table of a budget in canonical order
    pub fn for_budget(budget: &Budget, editing: Option<BudgetLineId>) -> BudgetTable {
        let (lines, transactions) = canonical_order(&budget.lines, &budget.transactions);
        Self::map(lines, transactions, editing)
    }
}

#[derive(Tabled)]
struct DisplayRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "When")]
    when: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Balance")]
    balance: String,
}

impl BudgetTable {
    /// Rows as a terminal table
    ///
    /// Rollover rows are marked with `*` and the row being edited with `>`.
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        if self.is_empty {
            return "No budget lines or transactions.\n".to_string();
        }

        let display: Vec<DisplayRow> = self
            .rows
            .iter()
            .map(|row| {
                let marker = if row.is_editing {
                    "> "
                } else if row.is_rollover {
                    "* "
                } else {
                    ""
                };
                let when = match (row.recurrence, row.date) {
                    (_, Some(date)) => date.to_string(),
                    (Some(recurrence), None) => recurrence.to_string(),
                    (None, None) => String::new(),
                };
                DisplayRow {
                    id: row.id.clone(),
                    name: format!("{}{}", marker, row.name),
                    kind: row.kind.to_string(),
                    when,
                    amount: row.kind.signed(row.amount).format_with_symbol(currency_symbol),
                    balance: row.cumulative_balance.format_with_symbol(currency_symbol),
                }
            })
            .collect();

        let mut output = Table::new(display)
            .with(Style::psql())
            .with(Modify::new(Columns::new(4..)).with(Alignment::right()))
            .to_string();
        output.push('\n');

        if self.rows.iter().any(|r| r.is_rollover) {
            output.push_str("\n* = carried over from the previous period\n");
        }
        if self.has_one_off {
            output.push_str("Includes one-off lines\n");
        }

        output
    }

    /// Write the rows as CSV
    pub fn export_csv<W: Write>(&self, writer: W) -> BudgetResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record([
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

        for row in &self.rows {
            csv.write_record([
                row.item_type.as_str().to_string(),
                row.id.clone(),
                row.name.clone(),
                row.kind.as_str().to_string(),
                row.recurrence.map(|r| r.as_str().to_string()).unwrap_or_default(),
                row.date.map(|d| d.to_string()).unwrap_or_default(),
                row.amount.to_decimal_string(),
                row.cumulative_balance.to_decimal_string(),
                row.is_rollover.to_string(),
            ])?;
        }

        csv.flush()?;
        Ok(())
    }
}
