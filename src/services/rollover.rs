//! Rollover chaining
//!
//! Each period starts with the ending balance of the one before it. The
//! first period in a chain starts with an opening balance supplied by the
//! caller.

use serde::Serialize;

use super::budget::BudgetService;
use super::formulas::{all_metrics, BudgetMetrics};
use crate::models::{Budget, BudgetId, BudgetPeriod, FinancialItem, Money};

/// Metrics of one period within a rollover chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PeriodBalance {
    pub period: BudgetPeriod,
    pub budget_id: BudgetId,
    /// Balance received from the previous period
    pub rollover: Money,
    pub metrics: BudgetMetrics,
}

/// Computes and applies balances carried between periods
pub struct RolloverService;

impl RolloverService {
    /// Metrics for a budget receiving `rollover`
    ///
    /// Rollover lines stored in the budget are skipped so the carried
    /// balance only counts once.
    pub fn summarize(budget: &Budget, rollover: Money) -> BudgetMetrics {
        let lines: Vec<_> = budget.user_lines().collect();
        all_metrics(&lines, &budget.transactions, rollover)
    }

    /// The balance a budget carries in through its rollover line
    pub fn carried(budget: &Budget) -> Money {
        budget
            .rollover_line()
            .map(|line| line.signed_amount())
            .unwrap_or_default()
    }

    /// Balances of every budget, oldest period first
    ///
    /// The oldest budget receives `opening`; each following budget receives
    /// the ending balance of the budget before it.
    pub fn chain(budgets: &[Budget], opening: Money) -> Vec<PeriodBalance> {
        let mut ordered: Vec<&Budget> = budgets.iter().collect();
        ordered.sort_by_key(|b| b.period);

        let mut rollover = opening;
        let mut balances = Vec::with_capacity(ordered.len());
        for budget in ordered {
            let metrics = Self::summarize(budget, rollover);
            balances.push(PeriodBalance {
                period: budget.period,
                budget_id: budget.id,
                rollover,
                metrics,
            });
            rollover = metrics.ending_balance;
        }

        tracing::debug!(periods = balances.len(), closing = %rollover, "computed rollover chain");
        balances
    }

    /// The balance `period` receives within the chain
    ///
    /// A period after the last budget receives the last ending balance. A
    /// period before the first budget receives the opening balance.
    pub fn rollover_for(budgets: &[Budget], period: BudgetPeriod, opening: Money) -> Money {
        let mut rollover = opening;
        for balance in Self::chain(budgets, opening) {
            if balance.period >= period {
                return balance.rollover;
            }
            rollover = balance.metrics.ending_balance;
        }
        rollover
    }

    /// Rewrite every budget's rollover line from the chain
    ///
    /// A line's source is the previous stored budget, which skips over
    /// periods without a budget. The oldest budget names the month before it.
    /// Returns the number of budgets whose rollover line was set.
    pub fn apply(budgets: &mut [Budget], opening: Money) -> usize {
        let balances = Self::chain(budgets, opening);

        let mut applied = 0;
        let mut previous: Option<BudgetPeriod> = None;
        for balance in balances {
            let from = previous.unwrap_or_else(|| balance.period.prev());
            previous = Some(balance.period);

            let Some(budget) = budgets.iter_mut().find(|b| b.id == balance.budget_id) else {
                continue;
            };
            if BudgetService::new(budget)
                .apply_rollover(from, balance.rollover)
                .is_some()
            {
                applied += 1;
            }
        }

        tracing::info!(applied, "applied rollover lines");
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetLine, FinancialKind, Recurrence};

    fn budget(year: i32, month: u32, income: i64, expense: i64) -> Budget {
        let mut budget = Budget::new(BudgetPeriod::new(year, month).unwrap());
        let id = budget.id;
        budget.lines = vec![
            BudgetLine::new(id, "Salary", FinancialKind::Income, Recurrence::Fixed, Money::from_units(income)),
            BudgetLine::new(id, "Rent", FinancialKind::Expense, Recurrence::Fixed, Money::from_units(expense)),
        ];
        budget
    }

    #[test]
    fn test_chain_carries_ending_balances() {
        // Out of order on purpose
        let budgets = vec![
            budget(2025, 2, 1000, 1300),
            budget(2024, 12, 1000, 800),
            budget(2025, 1, 1000, 900),
        ];

        let chain = RolloverService::chain(&budgets, Money::from_units(50));
        let periods: Vec<_> = chain.iter().map(|b| b.period.to_string()).collect();
        assert_eq!(periods, ["2024-12", "2025-01", "2025-02"]);

        assert_eq!(chain[0].rollover, Money::from_units(50));
        assert_eq!(chain[0].metrics.ending_balance, Money::from_units(250));
        assert_eq!(chain[1].rollover, Money::from_units(250));
        assert_eq!(chain[1].metrics.ending_balance, Money::from_units(350));
        assert_eq!(chain[2].rollover, Money::from_units(350));
        assert_eq!(chain[2].metrics.ending_balance, Money::from_units(50));
        assert!(chain.iter().all(|b| b.metrics.is_coherent()));
    }

    #[test]
    fn test_rollover_for() {
        let budgets = vec![budget(2025, 1, 1000, 900), budget(2025, 2, 1000, 1300)];
        let p = |m| BudgetPeriod::new(2025, m).unwrap();

        assert_eq!(RolloverService::rollover_for(&budgets, p(1), Money::zero()), Money::zero());
        assert_eq!(RolloverService::rollover_for(&budgets, p(2), Money::zero()), Money::from_units(100));
        assert_eq!(RolloverService::rollover_for(&budgets, p(3), Money::zero()), Money::from_units(-200));
    }

    #[test]
    fn test_apply_writes_rollover_lines_without_double_counting() {
        let mut budgets = vec![budget(2025, 1, 1000, 900), budget(2025, 2, 1000, 1300)];

        assert_eq!(RolloverService::apply(&mut budgets, Money::zero()), 1);
        assert!(budgets[0].rollover_line().is_none());

        let line = budgets[1].rollover_line().unwrap();
        assert_eq!(line.kind, FinancialKind::Income);
        assert_eq!(line.amount, Money::from_units(100));
        assert_eq!(line.rollover_source(), Some(BudgetPeriod::new(2025, 1).unwrap()));
        assert_eq!(RolloverService::carried(&budgets[1]), Money::from_units(100));

        // Applying again yields the same balances
        let before = RolloverService::chain(&budgets, Money::zero());
        RolloverService::apply(&mut budgets, Money::zero());
        assert_eq!(before, RolloverService::chain(&budgets, Money::zero()));
    }

    #[test]
    fn test_negative_carry_becomes_expense_line() {
        let mut budgets = vec![budget(2025, 1, 1000, 1200), budget(2025, 2, 1000, 500)];
        RolloverService::apply(&mut budgets, Money::zero());

        let line = budgets[1].rollover_line().unwrap();
        assert_eq!(line.kind, FinancialKind::Expense);
        assert_eq!(RolloverService::carried(&budgets[1]), Money::from_units(-200));
    }

    #[test]
    fn test_empty_chain() {
        assert!(RolloverService::chain(&[], Money::from_units(10)).is_empty());
        let period = BudgetPeriod::new(2025, 1).unwrap();
        assert_eq!(RolloverService::rollover_for(&[], period, Money::from_units(10)), Money::from_units(10));
    }

    #[test]
    fn test_apply_across_gap_names_previous_stored_budget() {
        let mut budgets = vec![budget(2025, 1, 1000, 900), budget(2025, 4, 1000, 1000)];

        assert_eq!(RolloverService::apply(&mut budgets, Money::zero()), 1);

        let line = budgets[1].rollover_line().unwrap();
        assert_eq!(line.rollover_source(), Some(BudgetPeriod::new(2025, 1).unwrap()));
        assert_eq!(line.name, "Rollover from 2025-01");
        assert_eq!(line.amount, Money::from_units(100));
    }

    #[test]
    fn test_opening_balance_line_names_month_before_first_budget() {
        let mut budgets = vec![budget(2025, 3, 1000, 1000)];

        assert_eq!(RolloverService::apply(&mut budgets, Money::from_units(40)), 1);
        let line = budgets[0].rollover_line().unwrap();
        assert_eq!(line.rollover_source(), Some(BudgetPeriod::new(2025, 2).unwrap()));
    }
}
