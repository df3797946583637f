//! Budget CLI commands
//!
//! Creating budgets from templates, the summary and table views, and
//! rollover application across a document.

use std::path::{Path, PathBuf};

use super::{parse_money, resolve_line, write_to_file};
use crate::config::settings::Settings;
use crate::error::{BudgetError, BudgetResult};
use crate::export::export_balances_csv;
use crate::models::{Budget, BudgetTemplate, FinancialItem, Money};
use crate::reports::{BudgetSummaryReport, BudgetTableMapper};
use crate::services::{PeriodService, RolloverService};
use crate::storage::BudgetDocument;

/// The rollover a budget receives
///
/// An explicit amount wins, then the budget's own rollover line, then the
/// ending balance of the budgets before it in the document.
fn incoming_rollover(
    document: &BudgetDocument,
    budget: &Budget,
    explicit: Option<&str>,
) -> BudgetResult<Money> {
    if let Some(amount) = explicit {
        return parse_money(amount);
    }
    if budget.rollover_line().is_some() {
        return Ok(RolloverService::carried(budget));
    }
    Ok(RolloverService::rollover_for(
        &document.budgets,
        budget.period,
        Money::zero(),
    ))
}

/// Handle `payday new`
pub fn handle_new_command(
    settings: &Settings,
    file: &Path,
    period: Option<String>,
    template: Option<String>,
    description: Option<String>,
) -> BudgetResult<()> {
    let period = PeriodService::new(settings).parse_or_current(period.as_deref())?;
    let template_name = template.unwrap_or_else(|| settings.default_template.clone());
    let template = BudgetTemplate::builtin(&template_name)
        .ok_or_else(|| BudgetError::template_not_found(template_name.as_str()))?;

    let mut document = BudgetDocument::load_or_default(file)?;
    let mut budget = Budget::from_template(period, &template);
    if let Some(description) = description {
        budget = budget.with_description(description);
    }
    let line_count = budget.lines.len();

    document.add_budget(budget)?;
    document.save(file)?;

    println!(
        "Created budget {} from template '{}' ({} lines) in {}",
        period,
        template.name,
        line_count,
        file.display()
    );
    Ok(())
}

/// Handle `payday summary`
pub fn handle_summary_command(
    settings: &Settings,
    file: &Path,
    period: Option<String>,
    rollover: Option<String>,
    output: Option<PathBuf>,
) -> BudgetResult<()> {
    let period = PeriodService::new(settings).parse_or_current(period.as_deref())?;
    let document = BudgetDocument::load(file)?;
    let budget = document.require(period)?;

    let rollover = incoming_rollover(&document, budget, rollover.as_deref())?;
    let report = BudgetSummaryReport::generate(budget, rollover)?;

    if let Some(path) = output {
        write_to_file(&path, |writer| report.export_csv(writer))?;
        println!("Budget summary exported to: {}", path.display());
    } else {
        print!("{}", report.format_terminal(&settings.currency_symbol));
    }

    Ok(())
}

/// Handle `payday table`
pub fn handle_table_command(
    settings: &Settings,
    file: &Path,
    period: Option<String>,
    editing: Option<String>,
    output: Option<PathBuf>,
) -> BudgetResult<()> {
    let period = PeriodService::new(settings).parse_or_current(period.as_deref())?;
    let document = BudgetDocument::load(file)?;
    let budget = document.require(period)?;

    let editing = editing
        .map(|reference| resolve_line(budget, &reference))
        .transpose()?;
    let table = BudgetTableMapper::for_budget(budget, editing);

    if let Some(path) = output {
        write_to_file(&path, |writer| table.export_csv(writer))?;
        println!("Budget table exported to: {}", path.display());
    } else {
        println!("Budget {}", period);
        print!("{}", table.format_terminal(&settings.currency_symbol));
    }

    Ok(())
}

/// Handle `payday rollover`
pub fn handle_rollover_command(
    settings: &Settings,
    file: &Path,
    opening: Option<String>,
    output: Option<PathBuf>,
) -> BudgetResult<()> {
    let opening = match opening {
        Some(amount) => parse_money(&amount)?,
        None => Money::zero(),
    };

    let mut document = BudgetDocument::load(file)?;
    if document.is_empty() {
        println!("No budgets in {}", file.display());
        return Ok(());
    }

    let applied = RolloverService::apply(&mut document.budgets, opening);
    document.save(file)?;

    if let Some(path) = output {
        write_to_file(&path, |writer| export_balances_csv(&document, opening, writer))?;
        println!("Period balances exported to: {}", path.display());
        return Ok(());
    }

    let symbol = settings.currency_symbol.as_str();
    println!("Rollover applied to {} budget(s)", applied);
    println!();
    println!("{:<10} {:>14} {:>14}", "Period", "Rollover", "Ending");
    println!("{}", "-".repeat(40));
    for balance in RolloverService::chain(&document.budgets, opening) {
        println!(
            "{:<10} {:>14} {:>14}",
            balance.period.to_string(),
            balance.rollover.format_with_symbol(symbol),
            balance.metrics.ending_balance.format_with_symbol(symbol)
        );
    }

    Ok(())
}

/// Handle `payday delete`
///
/// A budget that still holds lines or transactions is only deleted with
/// `force`; they go with it.
pub fn handle_delete_command(
    settings: &Settings,
    file: &Path,
    period: &str,
    force: bool,
) -> BudgetResult<()> {
    let period = PeriodService::new(settings).parse(period)?;
    let mut document = BudgetDocument::load(file)?;

    let budget = document.require(period)?;
    let (lines, transactions) = (budget.lines.len(), budget.transactions.len());
    if !force && lines + transactions > 0 {
        return Err(BudgetError::Validation(format!(
            "Budget {} has {} lines and {} transactions. Use --force to delete it anyway",
            period, lines, transactions
        )));
    }

    document.remove_budget(period)?;
    document.save(file)?;

    tracing::info!(%period, lines, transactions, "deleted budget");
    println!(
        "Deleted budget {} ({} lines, {} transactions)",
        period, lines, transactions
    );
    Ok(())
}

/// Handle `payday templates`
pub fn handle_templates_command(settings: &Settings) -> BudgetResult<()> {
    let symbol = settings.currency_symbol.as_str();

    for template in BudgetTemplate::all_builtin() {
        let default_marker = if template.name == settings.default_template {
            " (default)"
        } else {
            ""
        };
        println!("{}{} - {}", template.name, default_marker, template.description);

        for line in &template.lines {
            println!(
                "  {:<24} {:<8} {:>12}",
                line.name,
                line.kind.as_str(),
                line.amount.format_with_symbol(symbol)
            );
        }

        let net: Money = template.lines.iter().map(|l| l.signed_amount()).sum();
        if !template.lines.is_empty() {
            println!("  {:<33} {:>12}", "Left after plan", net.format_with_symbol(symbol));
        }
        println!();
    }

    Ok(())
}
