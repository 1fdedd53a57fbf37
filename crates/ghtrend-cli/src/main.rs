mod fetch;
mod report;

use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use ghtrend_core::Timeframe;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "ghtrend")]
#[command(about = "Snapshot GitHub trending and report rank changes")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch today's trending pages and save them as snapshots
    Fetch {
        /// Timeframe to fetch (daily, weekly, monthly); repeat for several, defaults to all
        #[arg(long = "timeframe", short = 't')]
        timeframes: Vec<Timeframe>,
    },
    /// Compare stored snapshots with their predecessors and write a Markdown report
    Report {
        /// Report date as YYYY-MM-DD (defaults to today, UTC)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Keep descriptions in their original language
        #[arg(long)]
        no_translate: bool,
        /// Print the report instead of writing it to the report directory
        #[arg(long)]
        stdout: bool,
    },
    /// Fetch every timeframe, then write today's report
    Run {
        /// Keep descriptions in their original language
        #[arg(long)]
        no_translate: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = ghtrend_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let today = Utc::now().date_naive();

    match cli.command {
        Commands::Fetch { timeframes } => {
            fetch::run_fetch(&config, &timeframes, today).await?;
        }
        Commands::Report {
            date,
            no_translate,
            stdout,
        } => {
            let options = report::ReportOptions {
                date: date.unwrap_or(today),
                translate: !no_translate,
                to_stdout: stdout,
            };
            report::run_report(&config, &options).await?;
        }
        Commands::Run { no_translate } => {
            let summary = fetch::run_fetch(&config, &[], today).await?;
            if summary.failed > 0 {
                tracing::warn!(
                    failed = summary.failed,
                    "continuing to report with partial data"
                );
            }
            let options = report::ReportOptions {
                date: today,
                translate: !no_translate,
                to_stdout: false,
            };
            report::run_report(&config, &options).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod test_support;
#[cfg(test)]
mod tests;
