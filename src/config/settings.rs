//! User settings for payday-budget
//!
//! Holds the pay day that shifts budget periods, plus display preferences.

use serde::{Deserialize, Serialize};

use super::paths::PaydayPaths;
use crate::error::BudgetError;
use crate::models::PayDay;
use crate::storage::write_atomic;

/// User settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Day of the month the user is paid
    ///
    /// Kept as the raw number the user entered; `pay_day()` normalizes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pay_day_of_month: Option<f64>,

    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Template used by `payday new` when none is given
    #[serde(default = "default_template")]
    pub default_template: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_template() -> String {
    "single".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            pay_day_of_month: None,
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            default_template: default_template(),
        }
    }
}

impl Settings {
    /// The normalized pay day
    pub fn pay_day(&self) -> PayDay {
        PayDay::from_setting(self.pay_day_of_month)
    }

    /// Load settings from disk, or use defaults if the file doesn't exist
    pub fn load_or_create(paths: &PaydayPaths) -> Result<Self, BudgetError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| BudgetError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                BudgetError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            tracing::debug!(path = %settings_path.display(), "loaded settings");
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &PaydayPaths) -> Result<(), BudgetError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        write_atomic(&settings_path, self)?;

        tracing::info!(path = %settings_path.display(), "saved settings");
        Ok(())
    }
}
