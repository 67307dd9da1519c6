//! Tether CLI - Command-line interface for Tether
//!
//! Provides `tether profile list`, `tether profile set`, `tether profile validate`,
//! and the other profile commands.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::profile::{ProfileCommands, SettingsArgs};

/// Environment variable holding the log filter
const LOG_ENV: &str = "TETHER_LOG";

#[derive(Parser)]
#[command(name = "tether")]
#[command(about = "Tether - connection profile manager")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    settings: SettingsArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage connection profiles
    Profile {
        #[command(subcommand)]
        action: ProfileCommands,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Profile { action } => {
            if let Err(e) = commands::profile::execute(action, &cli.settings) {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    }
}
