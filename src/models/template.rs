//! Budget templates
//!
//! Templates pre-fill a new budget with typical lines so a first budget does
//! not start from a blank page.

use serde::{Deserialize, Serialize};

use super::budget_line::BudgetLine;
use super::ids::BudgetId;
use super::kind::{FinancialItem, FinancialKind, ItemValidationError, Recurrence};
use super::money::Money;

/// A line blueprint inside a template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateLine {
    pub name: String,
    pub kind: FinancialKind,
    #[serde(default)]
    pub recurrence: Recurrence,
    pub amount: Money,
}

impl TemplateLine {
    pub fn new(
        name: impl Into<String>,
        kind: FinancialKind,
        recurrence: Recurrence,
        amount: Money,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            recurrence,
            amount,
        }
    }

    /// Turn the blueprint into a real line owned by `budget_id`
    pub fn instantiate(&self, budget_id: BudgetId) -> BudgetLine {
        BudgetLine::new(
            budget_id,
            self.name.clone(),
            self.kind,
            self.recurrence,
            self.amount,
        )
    }
}

impl FinancialItem for TemplateLine {
    fn kind(&self) -> FinancialKind {
        self.kind
    }

    fn amount(&self) -> Money {
        self.amount
    }
}

/// A named set of template lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetTemplate {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub lines: Vec<TemplateLine>,
}

/// Names of the templates shipped with the crate
pub const BUILTIN_TEMPLATES: [&str; 4] = ["empty", "single", "couple", "student"];

impl BudgetTemplate {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            lines: Vec::new(),
        }
    }

    fn line(mut self, name: &str, kind: FinancialKind, recurrence: Recurrence, units: i64) -> Self {
        self.lines
            .push(TemplateLine::new(name, kind, recurrence, Money::from_units(units)));
        self
    }

    /// Look up a built-in template by name (case-insensitive)
    pub fn builtin(name: &str) -> Option<Self> {
        use FinancialKind::{Expense, Income, Saving};
        use Recurrence::{Fixed, Variable};

        let template = match name.trim().to_lowercase().as_str() {
            "empty" => Self::new("empty", "Start from scratch"),
            "single" => Self::new("single", "One salary, one household")
                .line("Salary", Income, Fixed, 5000)
                .line("Rent", Expense, Fixed, 1500)
                .line("Health insurance", Expense, Fixed, 350)
                .line("Groceries", Expense, Variable, 600)
                .line("Transport", Expense, Variable, 120)
                .line("Emergency fund", Saving, Fixed, 300),
            "couple" => Self::new("couple", "Two salaries, shared household")
                .line("Salary (first)", Income, Fixed, 5200)
                .line("Salary (second)", Income, Fixed, 4100)
                .line("Rent", Expense, Fixed, 2400)
                .line("Health insurance", Expense, Fixed, 700)
                .line("Utilities", Expense, Fixed, 200)
                .line("Groceries", Expense, Variable, 1000)
                .line("Leisure", Expense, Variable, 400)
                .line("Savings", Saving, Fixed, 800),
            "student" => Self::new("student", "Part-time job and allowance")
                .line("Part-time job", Income, Variable, 1400)
                .line("Allowance", Income, Fixed, 400)
                .line("Room", Expense, Fixed, 650)
                .line("Groceries", Expense, Variable, 300)
                .line("Phone", Expense, Fixed, 30)
                .line("Savings", Saving, Fixed, 100),
            _ => return None,
        };

        Some(template)
    }

    /// All built-in templates
    pub fn all_builtin() -> Vec<Self> {
        BUILTIN_TEMPLATES
            .iter()
            .filter_map(|name| Self::builtin(name))
            .collect()
    }

    pub fn validate(&self) -> Result<(), ItemValidationError> {
        self.lines
            .iter()
            .try_for_each(|line| ItemValidationError::check(&line.name, line.amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        assert!(BudgetTemplate::builtin("Single").is_some());
        assert!(BudgetTemplate::builtin("empty").unwrap().lines.is_empty());
        assert!(BudgetTemplate::builtin("family-of-twelve").is_none());
    }

    #[test]
    fn test_all_builtin_are_valid() {
        let templates = BudgetTemplate::all_builtin();
        assert_eq!(templates.len(), BUILTIN_TEMPLATES.len());
        for template in templates {
            assert!(template.validate().is_ok(), "{} is invalid", template.name);
        }
    }

    #[test]
    fn test_instantiate_assigns_budget() {
        let budget_id = BudgetId::new();
        let blueprint = TemplateLine::new(
            "Rent",
            FinancialKind::Expense,
            Recurrence::Fixed,
            Money::from_units(1500),
        );
        let line = blueprint.instantiate(budget_id);
        assert_eq!(line.budget_id, budget_id);
        assert_eq!(line.amount, blueprint.amount);
        assert!(!line.is_rollover());
    }
}
