//! Budget line CLI commands

use std::path::{Path, PathBuf};

use clap::Subcommand;

use super::{parse_amount, resolve_line};
use crate::config::settings::Settings;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{FinancialKind, LineUpdate, Recurrence};
use crate::services::{BudgetService, PeriodService};
use crate::storage::BudgetDocument;

/// Budget line subcommands
#[derive(Subcommand, Debug)]
pub enum LineCommands {
    /// Add a line to a budget
    Add {
        /// Budget document (JSON or YAML)
        file: PathBuf,

        #[arg(short, long)]
        name: String,

        /// income, expense or saving
        #[arg(short, long)]
        kind: FinancialKind,

        /// Amount (e.g., "1500" or "12.50")
        #[arg(short, long)]
        amount: String,

        /// fixed, variable or one_off
        #[arg(short, long, default_value = "fixed")]
        recurrence: Recurrence,

        /// Budget period (e.g., "2025-01", "January", "current", "last")
        #[arg(short, long)]
        period: Option<String>,
    },

    /// Change a line
    Edit {
        file: PathBuf,

        /// Line ID (e.g., "line-1a2b3c4d")
        line: String,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        kind: Option<FinancialKind>,

        #[arg(short, long)]
        amount: Option<String>,

        #[arg(short, long)]
        recurrence: Option<Recurrence>,

        #[arg(short, long)]
        period: Option<String>,
    },

    /// Remove a line
    #[command(alias = "rm")]
    Remove {
        file: PathBuf,

        /// Line ID
        line: String,

        #[arg(short, long)]
        period: Option<String>,
    },
}

fn edit_document<F>(settings: &Settings, file: &Path, period: Option<&str>, edit: F) -> BudgetResult<()>
where
    F: FnOnce(&mut BudgetService<'_>) -> BudgetResult<()>,
{
    let period = PeriodService::new(settings).parse_or_current(period)?;
    let mut document = BudgetDocument::load(file)?;
    let budget = document.require_mut(period)?;

    edit(&mut BudgetService::new(budget))?;
    document.save(file)
}

/// Handle a line command
pub fn handle_line_command(settings: &Settings, cmd: LineCommands) -> BudgetResult<()> {
    match cmd {
        LineCommands::Add {
            file,
            name,
            kind,
            amount,
            recurrence,
            period,
        } => {
            let amount = parse_amount(&amount)?;
            edit_document(settings, &file, period.as_deref(), |service| {
                let id = service.add_line(&name, kind, recurrence, amount)?;
                println!("Added {} '{}' ({}) to {}", kind.as_str(), name, id, service.budget().period);
                Ok(())
            })
        }
        LineCommands::Edit {
            file,
            line,
            name,
            kind,
            amount,
            recurrence,
            period,
        } => {
            let update = LineUpdate {
                name,
                kind,
                recurrence,
                amount: amount.as_deref().map(parse_amount).transpose()?,
            };
            if update.is_empty() {
                return Err(BudgetError::Validation(
                    "Nothing to change. Use --name, --kind, --amount or --recurrence".into(),
                ));
            }

            edit_document(settings, &file, period.as_deref(), |service| {
                let id = resolve_line(service.budget(), &line)?;
                service.update_line(id, update)?;
                println!("Updated {}", id);
                Ok(())
            })
        }
        LineCommands::Remove { file, line, period } => {
            edit_document(settings, &file, period.as_deref(), |service| {
                let id = resolve_line(service.budget(), &line)?;
                let removed = service.remove_line(id)?;
                println!("Removed '{}' ({})", removed.name, id);
                Ok(())
            })
        }
    }
}
