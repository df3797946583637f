//! Period CLI command
//!
//! Shows which budget period a date falls into under a pay day.

use chrono::Local;

use super::parse_date;
use crate::config::settings::Settings;
use crate::error::BudgetResult;
use crate::services::PeriodService;

/// Handle `payday period`
pub fn handle_period_command(
    settings: &Settings,
    date: Option<String>,
    pay_day: Option<f64>,
) -> BudgetResult<()> {
    let mut settings = settings.clone();
    if pay_day.is_some() {
        settings.pay_day_of_month = pay_day;
    }
    let service = PeriodService::new(&settings);

    let date = match date {
        Some(d) => parse_date(&d)?,
        None => Local::now().date_naive(),
    };
    let period = service.period_for_date(date);

    println!("{} belongs to {}", date, period);
    println!("{}", service.format_period_with_range(&period));
    println!("Pay day: {}", service.pay_day());
    if service.is_current(&period) {
        println!("This is the current period.");
    }

    Ok(())
}
