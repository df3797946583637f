//! Budget document
//!
//! The on-disk snapshot the CLI works on: every budget the user keeps, one
//! per period. Documents are validated when loaded and before they are saved.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::file_io::{read_document, write_atomic};
use crate::error::{BudgetError, BudgetResult};
use crate::models::{Budget, BudgetPeriod};

/// Current document schema version
pub const DOCUMENT_SCHEMA_VERSION: u32 = 1;

fn default_schema_version() -> u32 {
    DOCUMENT_SCHEMA_VERSION
}

/// All budgets of one user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetDocument {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    #[serde(default)]
    pub budgets: Vec<Budget>,
}

impl Default for BudgetDocument {
    fn default() -> Self {
        Self {
            schema_version: DOCUMENT_SCHEMA_VERSION,
            budgets: Vec::new(),
        }
    }
}

impl BudgetDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and validate a document
    pub fn load(path: impl AsRef<Path>) -> BudgetResult<Self> {
        let path = path.as_ref();
        let document: Self = read_document(path)?;
        document.validate()?;

        tracing::debug!(
            path = %path.display(),
            budgets = document.budgets.len(),
            "loaded budget document"
        );
        Ok(document)
    }

    /// Load a document, or start an empty one if the file doesn't exist
    pub fn load_or_default(path: impl AsRef<Path>) -> BudgetResult<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate and write the document
    pub fn save(&self, path: impl AsRef<Path>) -> BudgetResult<()> {
        let path = path.as_ref();
        self.validate()?;
        write_atomic(path, self)?;

        tracing::info!(
            path = %path.display(),
            budgets = self.budgets.len(),
            "saved budget document"
        );
        Ok(())
    }

    /// Check the document and every budget in it
    ///
    /// Periods and budget ids must be unique.
    pub fn validate(&self) -> BudgetResult<()> {
        if self.schema_version > DOCUMENT_SCHEMA_VERSION {
            return Err(BudgetError::Storage(format!(
                "Unsupported document schema version {} (newest known is {})",
                self.schema_version, DOCUMENT_SCHEMA_VERSION
            )));
        }

        let mut periods = HashSet::new();
        let mut ids = HashSet::new();
        for budget in &self.budgets {
            if !periods.insert(budget.period) {
                return Err(BudgetError::Duplicate {
                    entity_type: "Budget",
                    identifier: budget.period.to_string(),
                });
            }
            if !ids.insert(budget.id) {
                return Err(BudgetError::Duplicate {
                    entity_type: "Budget",
                    identifier: budget.id.to_string(),
                });
            }
            budget.validate().map_err(|e| {
                tracing::warn!(period = %budget.period, error = %e, "invalid budget in document");
                BudgetError::Validation(format!("Budget {}: {}", budget.period, e))
            })?;
        }

        Ok(())
    }

    pub fn budget_for(&self, period: BudgetPeriod) -> Option<&Budget> {
        self.budgets.iter().find(|b| b.period == period)
    }

    pub fn budget_for_mut(&mut self, period: BudgetPeriod) -> Option<&mut Budget> {
        self.budgets.iter_mut().find(|b| b.period == period)
    }

    /// The budget for `period`, or `NotFound`
    pub fn require(&self, period: BudgetPeriod) -> BudgetResult<&Budget> {
        self.budget_for(period)
            .ok_or_else(|| BudgetError::budget_not_found(period.to_string()))
    }

    pub fn require_mut(&mut self, period: BudgetPeriod) -> BudgetResult<&mut Budget> {
        self.budget_for_mut(period)
            .ok_or_else(|| BudgetError::budget_not_found(period.to_string()))
    }

    /// Add a budget, keeping budgets sorted by period
    pub fn add_budget(&mut self, budget: Budget) -> BudgetResult<&Budget> {
        if self.budget_for(budget.period).is_some() {
            return Err(BudgetError::Duplicate {
                entity_type: "Budget",
                identifier: budget.period.to_string(),
            });
        }
        budget
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;

        let index = self.budgets.partition_point(|b| b.period < budget.period);
        self.budgets.insert(index, budget);
        Ok(&self.budgets[index])
    }

    pub fn remove_budget(&mut self, period: BudgetPeriod) -> BudgetResult<Budget> {
        let index = self
            .budgets
            .iter()
            .position(|b| b.period == period)
            .ok_or_else(|| BudgetError::budget_not_found(period.to_string()))?;
        Ok(self.budgets.remove(index))
    }

    /// Periods that have a budget, oldest first
    pub fn periods(&self) -> Vec<BudgetPeriod> {
        let mut periods: Vec<_> = self.budgets.iter().map(|b| b.period).collect();
        periods.sort();
        periods
    }

    pub fn len(&self) -> usize {
        self.budgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.budgets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetLine, FinancialKind, Money, Recurrence};
    use std::fs;
    use tempfile::TempDir;

    fn period(m: u32) -> BudgetPeriod {
        BudgetPeriod::new(2025, m).unwrap()
    }

    fn budget(m: u32) -> Budget {
        let mut budget = Budget::new(period(m));
        let line = BudgetLine::new(
            budget.id,
            "Salary",
            FinancialKind::Income,
            Recurrence::Fixed,
            Money::from_units(3000),
        );
        budget.lines.push(line);
        budget
    }

    #[test]
    fn test_add_budget_keeps_periods_sorted() {
        let mut document = BudgetDocument::new();
        document.add_budget(budget(3)).unwrap();
        document.add_budget(budget(1)).unwrap();
        document.add_budget(budget(2)).unwrap();

        assert_eq!(document.periods(), vec![period(1), period(2), period(3)]);
        assert_eq!(document.budgets[0].period, period(1));
    }

    #[test]
    fn test_duplicate_period_is_rejected() {
        let mut document = BudgetDocument::new();
        document.add_budget(budget(1)).unwrap();
        assert!(matches!(
            document.add_budget(budget(1)),
            Err(BudgetError::Duplicate { .. })
        ));
    }

    #[test]
    fn test_require_and_remove() {
        let mut document = BudgetDocument::new();
        document.add_budget(budget(1)).unwrap();

        assert!(document.require(period(1)).is_ok());
        assert!(document.require(period(2)).unwrap_err().is_not_found());
        document.remove_budget(period(1)).unwrap();
        assert!(document.is_empty());
    }

    #[test]
    fn test_save_and_load_json_and_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let mut document = BudgetDocument::new();
        document.add_budget(budget(1)).unwrap();
        document.add_budget(budget(2)).unwrap();

        for name in ["budgets.json", "budgets.yml"] {
            let path = temp_dir.path().join(name);
            document.save(&path).unwrap();

            let loaded = BudgetDocument::load(&path).unwrap();
            assert_eq!(loaded.len(), 2);
            assert_eq!(loaded.budgets[1].lines[0].amount, Money::from_units(3000));
        }
    }

    #[test]
    fn test_load_or_default_for_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let document = BudgetDocument::load_or_default(temp_dir.path().join("none.json")).unwrap();
        assert!(document.is_empty());
        assert_eq!(document.schema_version, DOCUMENT_SCHEMA_VERSION);
    }

    #[test]
    fn test_load_rejects_negative_amounts() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("budgets.json");

        let mut document = BudgetDocument::new();
        document.add_budget(budget(1)).unwrap();
        document.budgets[0].lines[0].amount = Money::from_cents(-100);
        // Bypass validation on save
        fs::write(&path, serde_json::to_string(&document).unwrap()).unwrap();

        assert!(BudgetDocument::load(&path).unwrap_err().is_validation());
    }

    #[test]
    fn test_load_rejects_invalid_month() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("budgets.json");
        let json = r#"{
            "schema_version": 1,
            "budgets": [{
                "id": "6f1c1a52-3c1e-4c4e-9a55-1b2f3d4e5f60",
                "period": {"year": 2025, "month": 13},
                "created_at": "2025-01-01T00:00:00Z"
            }]
        }"#;
        fs::write(&path, json).unwrap();

        assert!(matches!(BudgetDocument::load(&path), Err(BudgetError::Storage(_))));
    }

    #[test]
    fn test_newer_schema_is_rejected() {
        let document = BudgetDocument {
            schema_version: DOCUMENT_SCHEMA_VERSION + 1,
            budgets: Vec::new(),
        };
        assert!(document.validate().is_err());
    }
}
