//! Planned versus realized allowance
//!
//! The plan (budget lines) defines how much is left to live on once fixed
//! costs and savings are set aside. Transactions then consume that allowance.

use serde::Serialize;

use crate::models::{Budget, FinancialItem, FinancialKind, Money};

/// Planned and realized figures for one budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AllowanceBreakdown {
    /// Income lines
    pub planned_income: Money,
    /// Expense and saving lines
    pub fixed_block: Money,
    /// `planned_income - fixed_block + rollover`
    pub living_allowance: Money,
    /// Outflow transactions minus income transactions
    pub realized_spend: Money,
    /// `living_allowance - realized_spend`
    pub remaining_allowance: Money,
}

impl AllowanceBreakdown {
    /// Share of the living allowance already spent, in percent
    ///
    /// Zero when there is no positive allowance to spend from.
    pub fn usage_percent(&self) -> f64 {
        if !self.living_allowance.is_positive() {
            return 0.0;
        }
        self.realized_spend.cents() as f64 * 100.0 / self.living_allowance.cents() as f64
    }

    pub fn is_exceeded(&self) -> bool {
        self.remaining_allowance.is_negative()
    }
}

/// Computes allowance figures for budgets
pub struct BudgetCalculator;

impl BudgetCalculator {
    pub fn planned_income<L: FinancialItem>(lines: &[L]) -> Money {
        lines
            .iter()
            .filter(|l| l.kind() == FinancialKind::Income)
            .map(|l| l.amount())
            .sum()
    }

    /// Expenses and savings the plan sets aside
    pub fn fixed_block<L: FinancialItem>(lines: &[L]) -> Money {
        lines
            .iter()
            .filter(|l| l.kind().is_outflow())
            .map(|l| l.amount())
            .sum()
    }

    /// Net outflow of the transactions: spending minus refunds and extra income
    pub fn realized_spend<T: FinancialItem>(transactions: &[T]) -> Money {
        -transactions.iter().map(|t| t.signed_amount()).sum::<Money>()
    }

    /// Breakdown for raw lines and transactions with an external rollover
    pub fn breakdown<L, T>(lines: &[L], transactions: &[T], rollover: Money) -> AllowanceBreakdown
    where
        L: FinancialItem,
        T: FinancialItem,
    {
        let planned_income = Self::planned_income(lines);
        let fixed_block = Self::fixed_block(lines);
        let living_allowance = planned_income - fixed_block + rollover;
        let realized_spend = Self::realized_spend(transactions);

        AllowanceBreakdown {
            planned_income,
            fixed_block,
            living_allowance,
            realized_spend,
            remaining_allowance: living_allowance - realized_spend,
        }
    }

    /// Breakdown for a budget and the rollover it receives
    ///
    /// Rollover lines are left out of the lines; `rollover` stands for them.
    pub fn for_budget(budget: &Budget, rollover: Money) -> AllowanceBreakdown {
        let lines: Vec<_> = budget.user_lines().collect();
        Self::breakdown(&lines, &budget.transactions, rollover)
    }
}
