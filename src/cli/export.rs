//! Export CLI command
//!
//! Writes a budget document as JSON, YAML or CSV, to a file or stdout.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::ValueEnum;

use super::{parse_money, write_to_file};
use crate::config::settings::Settings;
use crate::error::BudgetResult;
use crate::export::{export_full_json, export_full_yaml, export_items_csv, FullExport};
use crate::models::Money;
use crate::storage::BudgetDocument;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// CSV format (lines and transactions only)
    Csv,
    /// JSON format (budgets and period balances)
    Json,
    /// YAML format (budgets and period balances, human-readable)
    Yaml,
}

fn write_export<W: Write>(
    document: &BudgetDocument,
    export: &FullExport,
    format: ExportFormat,
    writer: &mut W,
) -> BudgetResult<()> {
    match format {
        ExportFormat::Csv => export_items_csv(document, &mut *writer)?,
        ExportFormat::Json => {
            export_full_json(export, writer, true)?;
            writeln!(writer)?;
        }
        ExportFormat::Yaml => export_full_yaml(export, writer)?,
    }
    writer.flush()?;
    Ok(())
}

/// Handle `payday export`
pub fn handle_export_command(
    settings: &Settings,
    file: &Path,
    format: ExportFormat,
    output: Option<PathBuf>,
    opening: Option<String>,
) -> BudgetResult<()> {
    let opening = match opening {
        Some(amount) => parse_money(&amount)?,
        None => Money::zero(),
    };
    let document = BudgetDocument::load(file)?;
    let export = FullExport::from_document(&document, settings.pay_day(), opening);

    match output {
        Some(path) => {
            write_to_file(&path, |writer| write_export(&document, &export, format, writer))?;
            tracing::info!(path = %path.display(), ?format, "exported budget document");
            println!(
                "Exported {} budget(s) to: {}",
                export.metadata.budget_count,
                path.display()
            );
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            write_export(&document, &export, format, &mut handle)?;
        }
    }

    Ok(())
}
