use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use importer::{import, ImportOptions, DEFAULT_CLOSING_WINDOW_DAYS};
use std::path::Path;
use time::macros::format_description;
use time::{Date, OffsetDateTime};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "importer")]
#[command(about = "Normalize exported job sheets into the board's job file", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build jobs.json and meta.json from JSON/JSONL rows
    Build {
        /// Input path (file or directory)
        #[arg(long)]
        input: String,
        /// Output data directory
        #[arg(long)]
        output: String,
        /// Reference date for urgency, YYYY-MM-DD (defaults to today, UTC)
        #[arg(long)]
        today: Option<String>,
        /// Jobs whose last date is at most this many days away are urgent
        #[arg(long, default_value_t = DEFAULT_CLOSING_WINDOW_DAYS)]
        closing_window_days: i64,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { input, output, today, closing_window_days } => {
            let today = match today {
                Some(raw) => Date::parse(&raw, format_description!("[year]-[month]-[day]"))
                    .with_context(|| format!("invalid --today {raw:?}"))?,
                None => OffsetDateTime::now_utc().date(),
            };
            let opts = ImportOptions { today, closing_window_days };
            let report = import(Path::new(&input), Path::new(&output), &opts)?;
            tracing::info!(
                rows = report.rows,
                skipped = report.skipped,
                northeast = report.northeast,
                featured = report.featured,
                all_india = report.all_india,
                closing = report.closing,
                output = %output,
                "import complete"
            );
            Ok(())
        }
    }
}
