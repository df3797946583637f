//! Budget formulas
//!
//! Pure reducers from budget lines and transactions to the summary metrics
//! of a period. Savings count as expenses: money put aside is no longer
//! available to spend, even though it is not consumed.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::models::{FinancialItem, FinancialKind, Money, Transaction};

/// Largest drift tolerated between a metric and its defining equation
pub const COHERENCE_TOLERANCE: Money = Money::from_cents(1);

/// Convenience for callers with no transactions to pass
pub const NO_TRANSACTIONS: &[Transaction] = &[];

fn sum_where<I, F>(items: I, keep: F) -> Money
where
    I: IntoIterator,
    I::Item: FinancialItem,
    F: Fn(FinancialKind) -> bool,
{
    items
        .into_iter()
        .filter(|item| keep(item.kind()))
        .map(|item| item.amount())
        .sum()
}

fn counts_as_income(kind: FinancialKind) -> bool {
    !kind.is_outflow()
}

/// Sum of all income amounts across lines and transactions
pub fn total_income<L, T>(budget_lines: &[L], transactions: &[T]) -> Money
where
    L: FinancialItem,
    T: FinancialItem,
{
    sum_where(budget_lines, counts_as_income) + sum_where(transactions, counts_as_income)
}

/// Sum of all expense and saving amounts across lines and transactions
pub fn total_expenses<L, T>(budget_lines: &[L], transactions: &[T]) -> Money
where
    L: FinancialItem,
    T: FinancialItem,
{
    sum_where(budget_lines, FinancialKind::is_outflow)
        + sum_where(transactions, FinancialKind::is_outflow)
}

/// Income plus the (possibly negative) balance carried from last period
pub fn available(total_income: Money, rollover: Money) -> Money {
    total_income + rollover
}

pub fn ending_balance(available: Money, total_expenses: Money) -> Money {
    available - total_expenses
}

/// What is left to spend; numerically the ending balance
pub fn remaining(available: Money, total_expenses: Money) -> Money {
    available - total_expenses
}

/// Summary metrics of one budget period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BudgetMetrics {
    pub total_income: Money,
    pub total_expenses: Money,
    pub available: Money,
    pub ending_balance: Money,
    pub remaining: Money,
    pub rollover: Money,
}

impl BudgetMetrics {
    pub fn is_coherent(&self) -> bool {
        validate_metrics_coherence(self).is_ok()
    }

    pub fn is_overspent(&self) -> bool {
        self.ending_balance.is_negative()
    }
}

/// Compute every metric in one go
pub fn all_metrics<L, T>(budget_lines: &[L], transactions: &[T], rollover: Money) -> BudgetMetrics
where
    L: FinancialItem,
    T: FinancialItem,
{
    let total_income = total_income(budget_lines, transactions);
    let total_expenses = total_expenses(budget_lines, transactions);
    let available = available(total_income, rollover);

    let metrics = BudgetMetrics {
        total_income,
        total_expenses,
        available,
        ending_balance: ending_balance(available, total_expenses),
        remaining: remaining(available, total_expenses),
        rollover,
    };

    tracing::debug!(
        lines = budget_lines.len(),
        transactions = transactions.len(),
        ending_balance = %metrics.ending_balance,
        "computed budget metrics"
    );

    metrics
}

/// The metric a coherence check failed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricField {
    TotalIncome,
    TotalExpenses,
    Available,
    EndingBalance,
    Remaining,
}

impl fmt::Display for MetricField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TotalIncome => "total income",
            Self::TotalExpenses => "total expenses",
            Self::Available => "available",
            Self::EndingBalance => "ending balance",
            Self::Remaining => "remaining",
        };
        f.write_str(name)
    }
}

/// Why a set of metrics is not self-consistent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CoherenceViolation {
    #[error("{field} is negative: {actual}")]
    Negative { field: MetricField, actual: Money },

    #[error("{field} is {actual}, expected {expected}")]
    Mismatch {
        field: MetricField,
        expected: Money,
        actual: Money,
    },
}

impl CoherenceViolation {
    pub fn field(&self) -> MetricField {
        match self {
            Self::Negative { field, .. } | Self::Mismatch { field, .. } => *field,
        }
    }
}

fn check_equation(field: MetricField, expected: Money, actual: Money) -> Result<(), CoherenceViolation> {
    if (actual - expected).abs() > COHERENCE_TOLERANCE {
        return Err(CoherenceViolation::Mismatch {
            field,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Check that metrics agree with their defining equations
///
/// Not used when computing metrics; meant for assertions on metrics that
/// were assembled or stored elsewhere.
pub fn validate_metrics_coherence(metrics: &BudgetMetrics) -> Result<(), CoherenceViolation> {
    if metrics.total_income.is_negative() {
        return Err(CoherenceViolation::Negative {
            field: MetricField::TotalIncome,
            actual: metrics.total_income,
        });
    }
    if metrics.total_expenses.is_negative() {
        return Err(CoherenceViolation::Negative {
            field: MetricField::TotalExpenses,
            actual: metrics.total_expenses,
        });
    }

    check_equation(
        MetricField::Available,
        metrics.total_income + metrics.rollover,
        metrics.available,
    )?;
    check_equation(
        MetricField::EndingBalance,
        metrics.available - metrics.total_expenses,
        metrics.ending_balance,
    )?;
    check_equation(
        MetricField::Remaining,
        metrics.ending_balance,
        metrics.remaining,
    )
}
