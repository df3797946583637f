//! Budget service
//!
//! Line and transaction editing on a single budget. Every change is
//! validated before it touches the budget, and rollover lines can only be
//! replaced through `apply_rollover`.

use crate::error::{BudgetError, BudgetResult};
use crate::models::{
    Budget, BudgetLine, BudgetLineId, BudgetPeriod, FinancialKind, LineUpdate, Money, Recurrence,
    Transaction, TransactionId,
};

/// Service for editing one budget
pub struct BudgetService<'a> {
    budget: &'a mut Budget,
}

impl<'a> BudgetService<'a> {
    pub fn new(budget: &'a mut Budget) -> Self {
        Self { budget }
    }

    pub fn budget(&self) -> &Budget {
        self.budget
    }

    /// Add a user line
    pub fn add_line(
        &mut self,
        name: &str,
        kind: FinancialKind,
        recurrence: Recurrence,
        amount: Money,
    ) -> BudgetResult<BudgetLineId> {
        let line = BudgetLine::new(self.budget.id, name.trim(), kind, recurrence, amount);
        line.validate().map_err(|e| {
            tracing::warn!(budget = %self.budget.period, error = %e, "rejected budget line");
            BudgetError::Validation(e.to_string())
        })?;

        let id = line.id;
        tracing::debug!(budget = %self.budget.period, line = %id, "added budget line");
        self.budget.lines.push(line);
        Ok(id)
    }

    fn editable_line_mut(&mut self, id: BudgetLineId) -> BudgetResult<&mut BudgetLine> {
        let line = self
            .budget
            .lines
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| BudgetError::line_not_found(id.to_string()))?;

        if !line.is_editable() {
            return Err(BudgetError::Locked(format!(
                "'{}' is carried over from a previous period",
                line.name
            )));
        }

        Ok(line)
    }

    /// Change fields of a user line
    pub fn update_line(&mut self, id: BudgetLineId, update: LineUpdate) -> BudgetResult<()> {
        let line = self.editable_line_mut(id)?;

        let mut updated = line.clone();
        update.apply_to(&mut updated);
        updated
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;

        *line = updated;
        Ok(())
    }

    /// Delete a user line
    pub fn remove_line(&mut self, id: BudgetLineId) -> BudgetResult<BudgetLine> {
        self.editable_line_mut(id)?;

        let index = self
            .budget
            .lines
            .iter()
            .position(|l| l.id == id)
            .ok_or_else(|| BudgetError::line_not_found(id.to_string()))?;
        Ok(self.budget.lines.remove(index))
    }

    /// Record a transaction against this budget
    pub fn add_transaction(&mut self, transaction: Transaction) -> BudgetResult<TransactionId> {
        if transaction.budget_id != self.budget.id {
            return Err(BudgetError::Validation(format!(
                "Transaction {} belongs to another budget",
                transaction.id
            )));
        }
        transaction
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;
        if self.budget.transaction(transaction.id).is_some() {
            return Err(BudgetError::Duplicate {
                entity_type: "Transaction",
                identifier: transaction.id.to_string(),
            });
        }

        let id = transaction.id;
        self.budget.transactions.push(transaction);
        Ok(id)
    }

    pub fn remove_transaction(&mut self, id: TransactionId) -> BudgetResult<Transaction> {
        let index = self
            .budget
            .transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| BudgetError::transaction_not_found(id.to_string()))?;
        Ok(self.budget.transactions.remove(index))
    }

    /// Replace the rollover line with one carrying `balance` from `from`
    ///
    /// A zero balance only removes the existing rollover line.
    pub fn apply_rollover(&mut self, from: BudgetPeriod, balance: Money) -> Option<BudgetLineId> {
        self.budget.lines.retain(|l| !l.is_rollover());

        if balance.is_zero() {
            return None;
        }

        let line = BudgetLine::rollover(self.budget.id, from, balance);
        let id = line.id;
        // Rollover lines lead the list, like the carried balance leads the month
        self.budget.lines.insert(0, line);
        Some(id)
    }
}
