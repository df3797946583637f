//! Config CLI command
//!
//! Shows the settings file and updates individual settings.

use crate::config::{PaydayPaths, Settings};
use crate::error::{BudgetError, BudgetResult};
use crate::models::{BudgetTemplate, PayDay};

/// Handle `payday config`
///
/// Without options the current configuration is printed.
pub fn handle_config_command(
    paths: &PaydayPaths,
    mut settings: Settings,
    pay_day: Option<f64>,
    currency: Option<String>,
    template: Option<String>,
) -> BudgetResult<()> {
    let changing = pay_day.is_some() || currency.is_some() || template.is_some();

    if let Some(day) = pay_day {
        if day.is_nan() || day < 0.0 {
            return Err(BudgetError::Validation(format!("Invalid pay day: {}", day)));
        }
        settings.pay_day_of_month = if PayDay::from_setting(Some(day)).is_calendar() {
            None
        } else {
            Some(day)
        };
    }
    if let Some(symbol) = currency {
        settings.currency_symbol = symbol;
    }
    if let Some(name) = template {
        let template = BudgetTemplate::builtin(&name)
            .ok_or_else(|| BudgetError::template_not_found(name.as_str()))?;
        settings.default_template = template.name;
    }

    if changing {
        settings.save(paths)?;
        println!("Settings saved to {}", paths.settings_file().display());
        println!();
    }

    println!("payday-budget configuration");
    println!("===========================");
    println!("Base directory:   {}", paths.base_dir().display());
    println!("Settings file:    {}", paths.settings_file().display());
    println!();
    println!("Pay day:          {}", settings.pay_day());
    println!("Currency symbol:  {}", settings.currency_symbol);
    println!("Date format:      {}", settings.date_format);
    println!("Default template: {}", settings.default_template);

    Ok(())
}
