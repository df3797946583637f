//! Configuration module for payday-budget
//!
//! - platform path resolution
//! - user settings persistence (pay day, currency, default template)

pub mod paths;
pub mod settings;

pub use paths::PaydayPaths;
pub use settings::Settings;
