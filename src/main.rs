use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use payday_budget::cli::{
    handle_config_command, handle_delete_command, handle_export_command, handle_line_command, handle_new_command,
    handle_period_command, handle_rollover_command, handle_summary_command, handle_table_command,
    handle_templates_command, handle_transaction_command, ExportFormat, LineCommands,
    TransactionCommands,
};
use payday_budget::config::{PaydayPaths, Settings};
use payday_budget::logging::init_tracing;

#[derive(Parser)]
#[command(
    name = "payday",
    author = "Kaylee Beyene",
    version,
    about = "Monthly budgets that follow your pay day",
    long_about = "payday-budget keeps monthly budgets whose periods start on the day \
                  you get paid. It carries each month's leftover balance into the next \
                  and shows your plan next to what you actually spent."
)]
struct Cli {
    /// Log more detail to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show which budget period a date belongs to
    Period {
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,

        /// Pay day to use instead of the configured one
        #[arg(long)]
        pay_day: Option<f64>,
    },

    /// Create a budget from a template
    New {
        /// Budget document (JSON or YAML), created if missing
        file: PathBuf,

        /// Budget period (e.g., "2025-01", "January", "current", "next")
        #[arg(short, long)]
        period: Option<String>,

        /// Template name (see `payday templates`)
        #[arg(short, long)]
        template: Option<String>,

        #[arg(short, long)]
        description: Option<String>,
    },

    /// Delete the budget of a period with its lines and transactions
    Delete {
        file: PathBuf,

        /// Budget period to delete (e.g., "2025-01")
        #[arg(short, long)]
        period: String,

        /// Delete even if the budget still has lines or transactions
        #[arg(short, long)]
        force: bool,
    },

    /// Show the metrics of a budget
    Summary {
        file: PathBuf,

        #[arg(short, long)]
        period: Option<String>,

        /// Balance carried in from the previous period (may be negative)
        #[arg(short, long, allow_hyphen_values = true)]
        rollover: Option<String>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show budget lines and transactions with a running balance
    Table {
        file: PathBuf,

        #[arg(short, long)]
        period: Option<String>,

        /// Line being edited (e.g., "line-1a2b3c4d")
        #[arg(short, long)]
        editing: Option<String>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Carry each period's ending balance into the next
    Rollover {
        file: PathBuf,

        /// Balance the oldest budget starts with (may be negative)
        #[arg(long, allow_hyphen_values = true)]
        opening: Option<String>,

        /// Export period balances to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Budget line management commands
    #[command(subcommand)]
    Line(LineCommands),

    /// Transaction management commands
    #[command(subcommand, alias = "transaction")]
    Txn(TransactionCommands),

    /// Export a budget document
    Export {
        file: PathBuf,

        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,

        /// Output file path, stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Opening balance for the exported period balances
        #[arg(long, allow_hyphen_values = true)]
        opening: Option<String>,
    },

    /// List the built-in budget templates
    Templates,

    /// Show or change configuration
    Config {
        /// Day of the month you get paid (0 or 1 for calendar months)
        #[arg(long)]
        pay_day: Option<f64>,

        /// Currency symbol used in reports
        #[arg(long)]
        currency: Option<String>,

        /// Template used by `payday new`
        #[arg(long)]
        template: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let paths = PaydayPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Period { date, pay_day }) => {
            handle_period_command(&settings, date, pay_day)?;
        }
        Some(Commands::New {
            file,
            period,
            template,
            description,
        }) => {
            handle_new_command(&settings, &file, period, template, description)?;
        }
        Some(Commands::Delete {
            file,
            period,
            force,
        }) => {
            handle_delete_command(&settings, &file, &period, force)?;
        }
        Some(Commands::Summary {
            file,
            period,
            rollover,
            output,
        }) => {
            handle_summary_command(&settings, &file, period, rollover, output)?;
        }
        Some(Commands::Table {
            file,
            period,
            editing,
            output,
        }) => {
            handle_table_command(&settings, &file, period, editing, output)?;
        }
        Some(Commands::Rollover {
            file,
            opening,
            output,
        }) => {
            handle_rollover_command(&settings, &file, opening, output)?;
        }
        Some(Commands::Line(cmd)) => handle_line_command(&settings, cmd)?,
        Some(Commands::Txn(cmd)) => handle_transaction_command(&settings, cmd)?,
        Some(Commands::Export {
            file,
            format,
            output,
            opening,
        }) => {
            handle_export_command(&settings, &file, format, output, opening)?;
        }
        Some(Commands::Templates) => handle_templates_command(&settings)?,
        Some(Commands::Config {
            pay_day,
            currency,
            template,
        }) => {
            handle_config_command(&paths, settings, pay_day, currency, template)?;
        }
        None => {
            println!("payday - monthly budgets that follow your pay day");
            println!();
            println!("Run 'payday --help' for usage information.");
            println!("Run 'payday new budgets.json' to create your first budget.");
        }
    }

    Ok(())
}
