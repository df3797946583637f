//! Service layer for payday-budget
//!
//! Period resolution, the budget formulas, and the editing and rollover
//! operations built on top of them.

pub mod budget;
pub mod calculator;
pub mod formulas;
pub mod period;
pub mod rollover;

pub use budget::BudgetService;
pub use calculator::{AllowanceBreakdown, BudgetCalculator};
pub use formulas::{
    all_metrics, validate_metrics_coherence, BudgetMetrics, CoherenceViolation, MetricField,
};
pub use period::{compare_budget_periods, period_for_date, PeriodService};
pub use rollover::{PeriodBalance, RolloverService};
