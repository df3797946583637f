//! Kinds and recurrences of budget items
//!
//! Every line and transaction is tagged with exactly one `FinancialKind`.
//! Amounts are always non-negative; the kind decides the direction.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::money::Money;

/// What a line or transaction does to the budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FinancialKind {
    /// Money coming in
    Income,
    /// Money spent
    Expense,
    /// Money put aside; leaves the spendable pool like an expense
    Saving,
}

impl FinancialKind {
    pub const ALL: [FinancialKind; 3] = [Self::Income, Self::Expense, Self::Saving];

    /// +1 for income, -1 for expense and saving
    pub fn sign(&self) -> i64 {
        match self {
            Self::Income => 1,
            Self::Expense | Self::Saving => -1,
        }
    }

    /// Apply this kind's direction to a non-negative amount
    pub fn signed(&self, amount: Money) -> Money {
        Money::from_cents(amount.cents().saturating_mul(self.sign()))
    }

    /// Whether this kind reduces the money available to spend
    pub fn is_outflow(self) -> bool {
        match self {
            Self::Income => false,
            Self::Expense | Self::Saving => true,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
            Self::Saving => "saving",
        }
    }
}

impl fmt::Display for FinancialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
            Self::Saving => write!(f, "Saving"),
        }
    }
}

impl FromStr for FinancialKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" => Ok(Self::Income),
            "expense" | "out" => Ok(Self::Expense),
            "saving" | "savings" => Ok(Self::Saving),
            other => Err(format!("Unknown kind: {}", other)),
        }
    }
}

/// How often a budget line is expected to occur
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Recurrence {
    /// Same amount every period (rent, salary)
    #[default]
    Fixed,
    /// Recurs every period with a varying amount (groceries)
    Variable,
    /// Happens once
    OneOff,
}

impl Recurrence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Variable => "variable",
            Self::OneOff => "one_off",
        }
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed => write!(f, "Fixed"),
            Self::Variable => write!(f, "Variable"),
            Self::OneOff => write!(f, "One-off"),
        }
    }
}

impl FromStr for Recurrence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "fixed" => Ok(Self::Fixed),
            "variable" => Ok(Self::Variable),
            "one_off" | "oneoff" | "once" => Ok(Self::OneOff),
            other => Err(format!("Unknown recurrence: {}", other)),
        }
    }
}

/// Shared shape of planned lines and realized transactions
pub trait FinancialItem {
    fn kind(&self) -> FinancialKind;
    fn amount(&self) -> Money;

    /// Amount with the kind's direction applied
    fn signed_amount(&self) -> Money {
        self.kind().signed(self.amount())
    }
}

impl<T: FinancialItem + ?Sized> FinancialItem for &T {
    fn kind(&self) -> FinancialKind {
        (**self).kind()
    }

    fn amount(&self) -> Money {
        (**self).amount()
    }
}

/// Validation errors shared by lines, transactions and template lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemValidationError {
    EmptyName,
    NegativeAmount(Money),
    AmountTooLarge(Money),
}

impl ItemValidationError {
    /// Check the invariants every named financial item shares
    pub fn check(name: &str, amount: Money) -> Result<(), Self> {
        if name.trim().is_empty() {
            return Err(Self::EmptyName);
        }
        if amount.is_negative() {
            return Err(Self::NegativeAmount(amount));
        }
        if amount > Money::MAX_AMOUNT {
            return Err(Self::AmountTooLarge(amount));
        }
        Ok(())
    }
}

impl fmt::Display for ItemValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Name cannot be empty"),
            Self::NegativeAmount(amount) => {
                write!(f, "Amount cannot be negative (got {})", amount)
            }
            Self::AmountTooLarge(amount) => {
                write!(f, "Amount {} exceeds the limit of {}", amount, Money::MAX_AMOUNT)
            }
        }
    }
}

impl std::error::Error for ItemValidationError {}
