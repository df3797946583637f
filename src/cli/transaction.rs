//! Transaction CLI commands

use std::path::PathBuf;

use chrono::Local;
use clap::Subcommand;

use super::{parse_amount, parse_date, resolve_transaction};
use crate::config::settings::Settings;
use crate::error::BudgetResult;
use crate::models::{FinancialKind, Transaction};
use crate::services::{BudgetService, PeriodService};
use crate::storage::BudgetDocument;

/// Transaction subcommands
#[derive(Subcommand, Debug)]
pub enum TransactionCommands {
    /// Record a transaction
    ///
    /// The budget is the period the date falls into under the configured
    /// pay day, unless --period is given.
    Add {
        /// Budget document (JSON or YAML)
        file: PathBuf,

        /// Description
        #[arg(short, long)]
        name: String,

        /// income, expense or saving
        #[arg(short, long, default_value = "expense")]
        kind: FinancialKind,

        #[arg(short, long)]
        amount: String,

        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,

        #[arg(short, long)]
        category: Option<String>,

        #[arg(short, long)]
        period: Option<String>,
    },

    /// Remove a transaction
    #[command(alias = "rm")]
    Remove {
        file: PathBuf,

        /// Transaction ID (e.g., "txn-1a2b3c4d")
        transaction: String,

        #[arg(short, long)]
        period: Option<String>,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(settings: &Settings, cmd: TransactionCommands) -> BudgetResult<()> {
    let period_service = PeriodService::new(settings);

    match cmd {
        TransactionCommands::Add {
            file,
            name,
            kind,
            amount,
            date,
            category,
            period,
        } => {
            let amount = parse_amount(&amount)?;
            let date = match date {
                Some(d) => parse_date(&d)?,
                None => Local::now().date_naive(),
            };
            let period = match period {
                Some(p) => period_service.parse(&p)?,
                None => period_service.period_for_date(date),
            };

            let mut document = BudgetDocument::load(&file)?;
            let budget = document.require_mut(period)?;

            let mut txn = Transaction::new(budget.id, date, name.trim(), kind, amount);
            if let Some(category) = category {
                txn = txn.with_category(category);
            }
            let description = txn.to_string();

            let id = BudgetService::new(budget).add_transaction(txn)?;
            document.save(&file)?;

            println!("Recorded {} ({}) in {}", description, id, period);
            Ok(())
        }
        TransactionCommands::Remove {
            file,
            transaction,
            period,
        } => {
            let period = period_service.parse_or_current(period.as_deref())?;
            let mut document = BudgetDocument::load(&file)?;
            let budget = document.require_mut(period)?;

            let id = resolve_transaction(budget, &transaction)?;
            let removed = BudgetService::new(budget).remove_transaction(id)?;
            document.save(&file)?;

            println!("Removed {}", removed);
            Ok(())
        }
    }
}
