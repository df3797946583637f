//! Core data models for payday-budget
//!
//! Money, ids, kinds, periods, and the budget, line, transaction and
//! template records the calculations run over.

pub mod budget;
pub mod budget_line;
pub mod ids;
pub mod kind;
pub mod money;
pub mod period;
pub mod template;
pub mod transaction;

pub use budget::{Budget, BudgetValidationError};
pub use budget_line::{BudgetLine, LineOrigin, LineUpdate};
pub use ids::{BudgetId, BudgetLineId, TransactionId};
pub use kind::{FinancialItem, FinancialKind, ItemValidationError, Recurrence};
pub use money::{Money, MoneyParseError};
pub use period::{BudgetPeriod, PayDay, PeriodParseError};
pub use template::{BudgetTemplate, TemplateLine};
pub use transaction::Transaction;
