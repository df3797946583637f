//! payday-budget - monthly budgets aligned to the user's pay day
//!
//! A budget period can start on the day the user gets paid instead of the
//! first of the month. Each budget holds planned lines (income, expenses,
//! savings) and realized transactions, and the balance left at the end of a
//! period rolls over into the next.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (money, periods, budgets, lines, transactions)
//! - `services`: Period resolution, budget formulas, rollover and editing
//! - `reports`: The budget table and summary report
//! - `storage`: Budget documents on disk (JSON or YAML)
//! - `export`: JSON, YAML and CSV export
//! - `cli`: Command handlers for the `payday` binary
//! - `logging`: Tracing subscriber setup
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use payday_budget::models::{BudgetPeriod, FinancialKind, Money, Recurrence, TemplateLine};
//! use payday_budget::services::{all_metrics, formulas::NO_TRANSACTIONS, period_for_date};
//!
//! let paid = NaiveDate::from_ymd_opt(2025, 1, 27).unwrap();
//! assert_eq!(period_for_date(paid, Some(27.0)), BudgetPeriod::new(2025, 2).unwrap());
//!
//! let lines = [
//!     TemplateLine::new("Salary", FinancialKind::Income, Recurrence::Fixed, Money::from_units(8000)),
//!     TemplateLine::new("Savings", FinancialKind::Saving, Recurrence::Fixed, Money::from_units(500)),
//! ];
//! let metrics = all_metrics(&lines, NO_TRANSACTIONS, Money::from_units(-200));
//! assert_eq!(metrics.ending_balance, Money::from_units(7300));
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{BudgetError, BudgetResult};
