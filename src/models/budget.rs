//! Budget model
//!
//! One budget per period. It owns its planned lines and the transactions
//! recorded against it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::budget_line::BudgetLine;
use super::ids::{BudgetId, BudgetLineId, TransactionId};
use super::kind::ItemValidationError;
use super::period::BudgetPeriod;
use super::template::BudgetTemplate;
use super::transaction::Transaction;

/// A monthly budget with its lines and transactions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: BudgetId,

    pub period: BudgetPeriod,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub lines: Vec<BudgetLine>,

    #[serde(default)]
    pub transactions: Vec<Transaction>,

    pub created_at: DateTime<Utc>,
}

impl Budget {
    /// Create an empty budget for a period
    pub fn new(period: BudgetPeriod) -> Self {
        Self {
            id: BudgetId::new(),
            period,
            description: String::new(),
            lines: Vec::new(),
            transactions: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Create a budget pre-filled with a template's lines
    pub fn from_template(period: BudgetPeriod, template: &BudgetTemplate) -> Self {
        let mut budget = Self::new(period);
        budget.description = template.description.clone();
        budget.lines = template
            .lines
            .iter()
            .map(|line| line.instantiate(budget.id))
            .collect();
        budget
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn line(&self, id: BudgetLineId) -> Option<&BudgetLine> {
        self.lines.iter().find(|l| l.id == id)
    }

    pub fn transaction(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    /// The line carried over from the previous period, if any
    pub fn rollover_line(&self) -> Option<&BudgetLine> {
        self.lines.iter().find(|l| l.is_rollover())
    }

    /// Lines the user entered (everything except rollover lines)
    pub fn user_lines(&self) -> impl Iterator<Item = &BudgetLine> {
        self.lines.iter().filter(|l| !l.is_rollover())
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.transactions.is_empty()
    }

    /// Check every line and transaction against the budget's invariants
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        let mut rollovers = 0;
        for line in &self.lines {
            if line.budget_id != self.id {
                return Err(BudgetValidationError::ForeignLine(line.id));
            }
            line.validate()
                .map_err(|error| BudgetValidationError::Line { id: line.id, error })?;
            if line.is_rollover() {
                rollovers += 1;
            }
        }

        if rollovers > 1 {
            return Err(BudgetValidationError::MultipleRollovers(rollovers));
        }

        for txn in &self.transactions {
            if txn.budget_id != self.id {
                return Err(BudgetValidationError::ForeignTransaction(txn.id));
            }
            txn.validate()
                .map_err(|error| BudgetValidationError::Transaction { id: txn.id, error })?;
        }

        Ok(())
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} lines, {} transactions)",
            self.period,
            self.lines.len(),
            self.transactions.len()
        )
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    Line {
        id: BudgetLineId,
        error: ItemValidationError,
    },
    Transaction {
        id: TransactionId,
        error: ItemValidationError,
    },
    ForeignLine(BudgetLineId),
    ForeignTransaction(TransactionId),
    MultipleRollovers(usize),
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Line { id, error } => write!(f, "Budget line {}: {}", id, error),
            Self::Transaction { id, error } => write!(f, "Transaction {}: {}", id, error),
            Self::ForeignLine(id) => write!(f, "Budget line {} belongs to another budget", id),
            Self::ForeignTransaction(id) => {
                write!(f, "Transaction {} belongs to another budget", id)
            }
            Self::MultipleRollovers(count) => {
                write!(f, "A budget can hold one rollover line, found {}", count)
            }
        }
    }
}

impl std::error::Error for BudgetValidationError {}
