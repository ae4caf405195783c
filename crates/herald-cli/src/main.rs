use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "herald")]
#[command(about = "Herald - operator console for a scheduled group broadcast backend", long_about = None)]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Where the backend lives and how long to wait for it.
#[derive(Args)]
pub struct ConnectionArgs {
    /// Backend base URL (default http://localhost:3000)
    #[arg(long, global = true)]
    backend_url: Option<String>,

    /// Per-request timeout in milliseconds
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    /// Settings file to read instead of ~/.config/herald/config.toml
    #[arg(long = "config", global = true, value_name = "FILE")]
    settings: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the messaging session state
    Status {
        /// Write the scan QR code image to this file when one is available
        #[arg(long, value_name = "FILE")]
        qr_out: Option<PathBuf>,
    },
    /// Show the persisted configuration and its resolved target groups
    Show,
    /// List the target groups the backend knows
    Groups,
    /// Edit and save the configuration
    Save(commands::config::SaveArgs),
    /// Broadcast the saved configuration now
    Trigger,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "herald=info".into());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let console = commands::connect(&cli.connection)?;

    match cli.command {
        Commands::Status { qr_out } => commands::status::run(&console, qr_out.as_deref()).await?,
        Commands::Show => commands::config::show(&console).await?,
        Commands::Groups => commands::groups::run(&console).await?,
        Commands::Save(args) => commands::config::save(&console, args).await?,
        Commands::Trigger => commands::trigger::run(&console).await?,
    }

    Ok(())
}
