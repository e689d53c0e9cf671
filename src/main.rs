use std::env;

use anyhow::Result;
use clap::{Parser, Subcommand};

use expense_tracker::api::HttpApi;
use expense_tracker::cli::{
    handle_config_command, handle_history_command, handle_record_command,
    handle_summary_command, ConfigCommands, OutputOptions, RecordCommands,
};
use expense_tracker::config::{Settings, TrackerPaths};
use expense_tracker::display::DisplayOptions;
use expense_tracker::models::RecordKind;
use expense_tracker::store::TrackerStore;

#[derive(Parser)]
#[command(
    name = "expense",
    version,
    about = "Track income and expenses against a remote expense service",
    long_about = "A terminal client for a remote expense-tracking API. Records live on \
                  the server; every change is sent there first and the local view is \
                  refreshed from the server's copy."
)]
struct Cli {
    /// Override the configured API base URL for this invocation
    #[arg(long, global = true, env = "EXPENSE_TRACKER_BASE_URL")]
    base_url: Option<String>,

    /// Print JSON instead of formatted tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Income management commands
    #[command(subcommand)]
    Income(RecordCommands),

    /// Expense management commands
    #[command(subcommand)]
    Expense(RecordCommands),

    /// Show total income, total expenses and balance
    Summary,

    /// Show the most recent incomes and expenses
    History {
        /// Number of entries to show (defaults to 5)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show or change configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            env::var("RUST_LOG")
                .unwrap_or_else(|_| "warn".to_string())
                .as_str(),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let paths = TrackerPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    let Some(command) = cli.command else {
        println!("Expense Tracker - income and expense tracking from the terminal");
        println!();
        println!("Run 'expense --help' for usage information.");
        println!("Run 'expense summary' to see your balance.");
        return Ok(());
    };

    let output = OutputOptions {
        display: DisplayOptions::from(&settings),
        json: cli.json,
    };

    match command {
        Commands::Income(cmd) => {
            let mut store = connect(&settings, cli.base_url.as_deref())?;
            handle_record_command(&mut store, RecordKind::Income, &output, cmd).await?
        }
        Commands::Expense(cmd) => {
            let mut store = connect(&settings, cli.base_url.as_deref())?;
            handle_record_command(&mut store, RecordKind::Expense, &output, cmd).await?
        }
        Commands::Summary => {
            let mut store = connect(&settings, cli.base_url.as_deref())?;
            handle_summary_command(&mut store, &output).await?
        }
        Commands::History { limit } => {
            let mut store = connect(&settings, cli.base_url.as_deref())?;
            handle_history_command(&mut store, &output, limit).await?
        }
        Commands::Config(cmd) => handle_config_command(&paths, &mut settings, cmd)?,
    }

    Ok(())
}

/// Build an empty store backed by the configured API, or `base_url` if given.
///
/// The override only applies to this invocation and is never saved.
fn connect(settings: &Settings, base_url: Option<&str>) -> Result<TrackerStore<HttpApi>> {
    let mut settings = settings.clone();
    if let Some(url) = base_url {
        settings.set_base_url(url)?;
    }

    tracing::debug!(base_url = %settings.base_url, "using API");
    Ok(TrackerStore::new(HttpApi::from_settings(&settings)?))
}
