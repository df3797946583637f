//! Reports module for payday-budget
//!
//! The budget table with running balances and the per-period summary.

pub mod budget_summary;
pub mod budget_table;

pub use budget_summary::BudgetSummaryReport;
pub use budget_table::{canonical_order, BudgetTable, BudgetTableMapper, ItemType, TableRow};
