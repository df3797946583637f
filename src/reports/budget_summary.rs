//! Budget summary report
//!
//! The metrics of one period (income, expenses, available, ending balance)
//! next to the planned versus realized allowance.

use serde::Serialize;
use std::io::Write;

use crate::error::{BudgetError, BudgetResult};
use crate::models::{Budget, BudgetPeriod, Money};
use crate::services::{
    validate_metrics_coherence, AllowanceBreakdown, BudgetCalculator, BudgetMetrics,
    RolloverService,
};

/// Summary of a single budget period
#[derive(Debug, Clone, Serialize)]
pub struct BudgetSummaryReport {
    pub period: BudgetPeriod,
    pub description: String,
    pub metrics: BudgetMetrics,
    pub allowance: AllowanceBreakdown,
    pub line_count: usize,
    pub transaction_count: usize,
}

impl BudgetSummaryReport {
    /// Generate the report for a budget receiving `rollover`
    pub fn generate(budget: &Budget, rollover: Money) -> BudgetResult<Self> {
        let metrics = RolloverService::summarize(budget, rollover);
        validate_metrics_coherence(&metrics).map_err(|violation| {
            tracing::error!(period = %budget.period, %violation, "incoherent budget metrics");
            BudgetError::Validation(violation.to_string())
        })?;

        Ok(Self {
            period: budget.period,
            description: budget.description.clone(),
            metrics,
            allowance: BudgetCalculator::for_budget(budget, rollover),
            line_count: budget.user_lines().count(),
            transaction_count: budget.transactions.len(),
        })
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        let fmt = |m: Money| m.format_with_symbol(currency_symbol);
        let mut output = String::new();

        output.push_str(&format!("Budget Summary - {}\n", self.period));
        output.push_str(&"=".repeat(48));
        output.push('\n');
        if !self.description.is_empty() {
            output.push_str(&format!("{}\n", self.description));
        }
        output.push_str(&format!(
            "{} lines, {} transactions\n\n",
            self.line_count, self.transaction_count
        ));

        let m = &self.metrics;
        output.push_str(&format!("{:<28} {:>18}\n", "Rollover", fmt(m.rollover)));
        output.push_str(&format!("{:<28} {:>18}\n", "Total income", fmt(m.total_income)));
        output.push_str(&format!("{:<28} {:>18}\n", "Available", fmt(m.available)));
        output.push_str(&format!(
            "{:<28} {:>18}\n",
            "Total expenses (incl. saving)",
            fmt(m.total_expenses)
        ));
        output.push_str(&"-".repeat(48));
        output.push('\n');
        let ending = if m.is_overspent() {
            format!("{} *", fmt(m.ending_balance))
        } else {
            fmt(m.ending_balance)
        };
        output.push_str(&format!("{:<28} {:>18}\n\n", "Ending balance", ending));

        let a = &self.allowance;
        output.push_str("Allowance\n");
        output.push_str(&"-".repeat(48));
        output.push('\n');
        output.push_str(&format!("{:<28} {:>18}\n", "Planned income", fmt(a.planned_income)));
        output.push_str(&format!("{:<28} {:>18}\n", "Fixed costs and savings", fmt(a.fixed_block)));
        output.push_str(&format!("{:<28} {:>18}\n", "Living allowance", fmt(a.living_allowance)));
        output.push_str(&format!("{:<28} {:>18}\n", "Spent so far", fmt(a.realized_spend)));
        output.push_str(&format!(
            "{:<28} {:>18}\n",
            "Remaining allowance",
            fmt(a.remaining_allowance)
        ));
        output.push_str(&format!("{:<28} {:>17.1}%\n", "Used", a.usage_percent()));

        if m.is_overspent() {
            output.push_str("\n* = Overspent\n");
        }

        output
    }

    /// Export the report as `metric,amount` CSV rows
    pub fn export_csv<W: Write>(&self, writer: W) -> BudgetResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["period", "metric", "amount"])?;

        let period = self.period.to_string();
        let rows = [
            ("rollover", self.metrics.rollover),
            ("total_income", self.metrics.total_income),
            ("total_expenses", self.metrics.total_expenses),
            ("available", self.metrics.available),
            ("ending_balance", self.metrics.ending_balance),
            ("remaining", self.metrics.remaining),
            ("living_allowance", self.allowance.living_allowance),
            ("realized_spend", self.allowance.realized_spend),
            ("remaining_allowance", self.allowance.remaining_allowance),
        ];
        for (metric, amount) in rows {
            let amount = amount.to_decimal_string();
            csv.write_record([period.as_str(), metric, amount.as_str()])?;
        }

        csv.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetLine, FinancialKind, Recurrence};

    /// Household budget with every kind of line
    fn household() -> Budget {
        let mut budget = Budget::new(BudgetPeriod::new(2025, 3).unwrap());
        let id = budget.id;
        let line = |name: &str, kind, units: i64| {
            BudgetLine::new(id, name, kind, Recurrence::Fixed, Money::from_units(units))
        };
        budget.lines = vec![
            line("Salary", FinancialKind::Income, 8000),
            line("Rent", FinancialKind::Expense, 2200),
            line("Insurance", FinancialKind::Expense, 450),
            line("Phone", FinancialKind::Expense, 150),
            line("Taxes", FinancialKind::Expense, 1137),
            line("Savings", FinancialKind::Saving, 500),
        ];
        budget
    }

    #[test]
    fn test_generate() {
        let report = BudgetSummaryReport::generate(&household(), Money::from_units(-200)).unwrap();

        assert_eq!(report.metrics.total_income, Money::from_units(8000));
        assert_eq!(report.metrics.total_expenses, Money::from_units(4437));
        assert_eq!(report.metrics.available, Money::from_units(7800));
        assert_eq!(report.metrics.ending_balance, Money::from_units(3363));
        assert_eq!(report.allowance.living_allowance, Money::from_units(3363));
        assert_eq!(report.line_count, 6);
    }

    #[test]
    fn test_format_terminal() {
        let report = BudgetSummaryReport::generate(&household(), Money::zero()).unwrap();
        let output = report.format_terminal("$");

        assert!(output.contains("Budget Summary - 2025-03"));
        assert!(output.contains("$3563.00"));
        assert!(output.contains("$4437.00"));
        assert!(!output.contains("Overspent"));
    }

    #[test]
    fn test_overspent_is_marked() {
        let report = BudgetSummaryReport::generate(&household(), Money::from_units(-4000)).unwrap();
        assert!(report.metrics.is_overspent());
        assert!(report.format_terminal("$").contains("* = Overspent"));
    }

    #[test]
    fn test_export_csv() {
        let report = BudgetSummaryReport::generate(&household(), Money::zero()).unwrap();
        let mut buffer = Vec::new();
        report.export_csv(&mut buffer).unwrap();

        let csv = String::from_utf8(buffer).unwrap();
        assert!(csv.starts_with("period,metric,amount\n"));
        assert!(csv.contains("2025-03,ending_balance,3563.00"));
        assert!(csv.contains("2025-03,total_expenses,4437.00"));
    }
}
