//! Tracing setup
//!
//! `RUST_LOG` wins when set. Otherwise the crate logs warnings, or
//! everything from `info` up with `--verbose`.

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "payday_budget=info"
    } else {
        "payday_budget=warn"
    }
}

/// Install the global subscriber; later calls do nothing
pub fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

        // Logs go to stderr so command output stays pipeable
        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(false), "payday_budget=warn");
        assert_eq!(default_directive(true), "payday_budget=info");
    }

    #[test]
    fn test_init_is_idempotent() {
        init_tracing(false);
        init_tracing(true);
        tracing::info!("still one subscriber");
    }
}
