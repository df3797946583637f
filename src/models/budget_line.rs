//! Budget line model
//!
//! A budget line is a planned movement for a period: a salary, the rent, the
//! monthly saving. Lines generated from the previous period's leftover
//! balance carry a `Rollover` origin and cannot be edited by the user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BudgetId, BudgetLineId};
use super::kind::{FinancialItem, FinancialKind, ItemValidationError, Recurrence};
use super::money::Money;
use super::period::BudgetPeriod;

/// Where a budget line came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LineOrigin {
    /// Entered by the user or copied from a template
    #[default]
    User,
    /// Carried over from the ending balance of `from`
    Rollover { from: BudgetPeriod },
}

/// A planned income, expense or saving within a budget
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetLine {
    pub id: BudgetLineId,

    /// The budget this line belongs to
    pub budget_id: BudgetId,

    pub name: String,

    pub kind: FinancialKind,

    #[serde(default)]
    pub recurrence: Recurrence,

    /// Planned amount, never negative
    pub amount: Money,

    #[serde(default)]
    pub origin: LineOrigin,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl BudgetLine {
    /// Create a new user line
    pub fn new(
        budget_id: BudgetId,
        name: impl Into<String>,
        kind: FinancialKind,
        recurrence: Recurrence,
        amount: Money,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: BudgetLineId::new(),
            budget_id,
            name: name.into(),
            kind,
            recurrence,
            amount,
            origin: LineOrigin::User,
            created_at: now,
            updated_at: now,
        }
    }

    /// Build the line carrying `balance` over from period `from`
    ///
    /// A positive balance becomes income, a deficit becomes an expense.
    pub fn rollover(budget_id: BudgetId, from: BudgetPeriod, balance: Money) -> Self {
        let kind = if balance.is_negative() {
            FinancialKind::Expense
        } else {
            FinancialKind::Income
        };
        let mut line = Self::new(
            budget_id,
            format!("Rollover from {}", from),
            kind,
            Recurrence::OneOff,
            balance.abs(),
        );
        line.origin = LineOrigin::Rollover { from };
        line
    }

    pub fn is_rollover(&self) -> bool {
        matches!(self.origin, LineOrigin::Rollover { .. })
    }

    /// Rollover lines are derived data and never editable
    pub fn is_editable(&self) -> bool {
        match self.origin {
            LineOrigin::User => true,
            LineOrigin::Rollover { .. } => false,
        }
    }

    /// The period a rollover line was carried from
    pub fn rollover_source(&self) -> Option<BudgetPeriod> {
        match self.origin {
            LineOrigin::User => None,
            LineOrigin::Rollover { from } => Some(from),
        }
    }

    pub fn set_amount(&mut self, amount: Money) {
        self.amount = amount;
        self.updated_at = Utc::now();
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.updated_at = Utc::now();
    }

    pub fn set_kind(&mut self, kind: FinancialKind) {
        self.kind = kind;
        self.updated_at = Utc::now();
    }

    pub fn set_recurrence(&mut self, recurrence: Recurrence) {
        self.recurrence = recurrence;
        self.updated_at = Utc::now();
    }

    pub fn validate(&self) -> Result<(), ItemValidationError> {
        ItemValidationError::check(&self.name, self.amount)
    }
}

impl FinancialItem for BudgetLine {
    fn kind(&self) -> FinancialKind {
        self.kind
    }

    fn amount(&self) -> Money {
        self.amount
    }
}

impl fmt::Display for BudgetLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.name, self.kind, self.amount)
    }
}

/// Changes to apply to an existing line; `None` leaves a field untouched
#[derive(Debug, Clone, Default)]
pub struct LineUpdate {
    pub name: Option<String>,
    pub kind: Option<FinancialKind>,
    pub recurrence: Option<Recurrence>,
    pub amount: Option<Money>,
}

impl LineUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.kind.is_none()
            && self.recurrence.is_none()
            && self.amount.is_none()
    }

    /// Apply the update to a line
    pub fn apply_to(self, line: &mut BudgetLine) {
        if let Some(name) = self.name {
            line.set_name(name);
        }
        if let Some(kind) = self.kind {
            line.set_kind(kind);
        }
        if let Some(recurrence) = self.recurrence {
            line.set_recurrence(recurrence);
        }
        if let Some(amount) = self.amount {
            line.set_amount(amount);
        }
    }
}
