//! Switchyard CLI: the main entry point.
//!
//! Commands:
//! - `onboard`   Write the default config
//! - `ask`       Route a single query
//! - `chat`      Interactive query loop
//! - `history`   Show remembered conversations
//! - `stats`     Summarise the conversation log
//! - `clear`     Forget all conversations
//! - `status`    Show configuration and backend status
//! - `routes`    Classify a query without calling the backend

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

mod commands;

#[derive(Parser)]
#[command(
    name = "switchyard",
    about = "Switchyard — route queries to math, writing, translation or general handlers",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Also write logs to this file
    #[arg(long, global = true, env = "SWITCHYARD_LOG_FILE")]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize configuration
    Onboard,

    /// Route a single query and print the answer
    Ask {
        /// The query text
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Print the full outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// Interactive query loop
    Chat,

    /// Show recent conversations
    History {
        /// How many of the newest conversations to show
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },

    /// Show conversation statistics
    Stats,

    /// Delete all remembered conversations
    Clear {
        /// Required to actually clear
        #[arg(long)]
        confirm: bool,
    },

    /// Show configuration and memory status
    Status {
        /// Also check that the backend is reachable
        #[arg(long)]
        check: bool,
    },

    /// Show how a query would be routed
    Routes {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
}

fn init_tracing(verbose: bool, log_file: Option<PathBuf>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let file_layer: Option<Box<dyn Layer<Registry> + Send + Sync>> = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|e| format!("Failed to open log file {}: {e}", path.display()))?;
            let writer = Arc::new(file);
            if json {
                Some(tracing_subscriber::fmt::layer().json().with_writer(writer).boxed())
            } else {
                Some(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(writer)
                        .boxed(),
                )
            }
        }
        None => None,
    };

    let console = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console)
        .with(filter)
        .init();

    Ok(())
}

async fn run(command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Onboard => commands::onboard::run().await,
        Commands::Ask { query, json } => commands::ask::run(&query.join(" "), json).await,
        Commands::Chat => commands::chat::run().await,
        Commands::History { limit } => commands::memory::history(limit).await,
        Commands::Stats => commands::memory::stats().await,
        Commands::Clear { confirm } => commands::memory::clear(confirm).await,
        Commands::Status { check } => commands::status::run(check).await,
        Commands::Routes { query } => commands::routes::run(&query.join(" ")).await,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Logging settings may live in the config file; a broken config is
    // reported by the command itself.
    let logging = switchyard_config::AppConfig::load()
        .map(|c| c.logging)
        .unwrap_or_default();
    let log_file = cli.log_file.or_else(|| logging.file.map(PathBuf::from));

    if let Err(e) = init_tracing(cli.verbose, log_file, logging.json) {
        eprintln!("⚠️  Logging setup failed: {e}");
    }

    if let Err(e) = run(cli.command).await {
        tracing::warn!(error = %e, "Command failed");
        eprintln!("⚠️  {e}");
        std::process::exit(1);
    }
}
