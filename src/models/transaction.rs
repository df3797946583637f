//! Transaction model
//!
//! A transaction is money that actually moved during a period, as opposed to
//! the plan expressed by budget lines.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BudgetId, TransactionId};
use super::kind::{FinancialItem, FinancialKind, ItemValidationError};
use super::money::Money;

/// A realized income, expense or saving
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,

    /// The budget this transaction is recorded against
    pub budget_id: BudgetId,

    pub date: NaiveDate,

    /// Free-text description
    pub name: String,

    /// Optional free-text category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    pub kind: FinancialKind,

    /// Amount, never negative; `kind` gives the direction
    pub amount: Money,

    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        budget_id: BudgetId,
        date: NaiveDate,
        name: impl Into<String>,
        kind: FinancialKind,
        amount: Money,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            budget_id,
            date,
            name: name.into(),
            category: None,
            kind,
            amount,
            created_at: Utc::now(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn validate(&self) -> Result<(), ItemValidationError> {
        ItemValidationError::check(&self.name, self.amount)
    }
}

impl FinancialItem for Transaction {
    fn kind(&self) -> FinancialKind {
        self.kind
    }

    fn amount(&self) -> Money {
        self.amount
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.name,
            self.signed_amount()
        )
    }
}
