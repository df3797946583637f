//! YAML Export functionality
//!
//! Same content as the JSON export, in a form that is easier to read.

use std::io::Write;

use crate::error::{BudgetError, BudgetResult};
use crate::export::json::FullExport;

fn export_err(e: impl std::fmt::Display) -> BudgetError {
    BudgetError::Export(e.to_string())
}

/// Export the full document to YAML
pub fn export_full_yaml<W: Write>(export: &FullExport, writer: &mut W) -> BudgetResult<()> {
    writeln!(writer, "# payday-budget export").map_err(export_err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(export_err)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(export_err)?;
    writeln!(writer, "#").map_err(export_err)?;
    writeln!(writer, "# Amounts are in cents.").map_err(export_err)?;
    writeln!(writer).map_err(export_err)?;

    serde_yaml::to_writer(writer, export).map_err(export_err)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Budget, BudgetPeriod, Money, PayDay};
    use crate::storage::BudgetDocument;

    #[test]
    fn test_yaml_export() {
        let mut document = BudgetDocument::new();
        document
            .add_budget(Budget::new(BudgetPeriod::new(2025, 4).unwrap()).with_description("April"))
            .unwrap();
        let export = FullExport::from_document(&document, PayDay::new(25), Money::from_units(10));

        let mut buffer = Vec::new();
        export_full_yaml(&export, &mut buffer).unwrap();
        let yaml = String::from_utf8(buffer).unwrap();

        assert!(yaml.starts_with("# payday-budget export"));
        assert!(yaml.contains("description: April"));
        assert!(yaml.contains("pay_day_of_month: 25"));
        assert!(yaml.contains("opening_balance: 1000"));

        let parsed: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed["metadata"]["budget_count"].as_u64(), Some(1));
    }
}
