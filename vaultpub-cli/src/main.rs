//! vaultpub — publish a local vault to a remote record and blob store.
//!
//! Usage:
//!   vaultpub publish            run one publish pass
//!   vaultpub deploy             POST the configured deploy webhook
//!   vaultpub export             copy the public directory to the export dir
//!   vaultpub cache clear        forget sync state, re-upload next pass
//!   vaultpub config show        print the effective settings

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use vaultpub_cli::commands;
use vaultpub_cli::settings::Settings;

#[derive(Parser)]
#[command(name = "vaultpub")]
#[command(version)]
#[command(about = "Publish a local vault to a remote record and blob store")]
struct Cli {
    /// Path to the settings file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Publish the vault to the remote store
    Publish,

    /// Trigger the configured deploy webhook
    Deploy,

    /// Copy the public directory to the export directory
    Export,

    /// Manage the sync cache
    Cache {
        #[command(subcommand)]
        command: CacheCommand,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand)]
enum CacheCommand {
    /// Clear the sync cache; the next publish re-uploads everything
    Clear,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show the effective settings
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .compact()
        .init();

    let settings_path = cli.config.unwrap_or_else(Settings::default_path);
    let settings = Settings::load(&settings_path)?;

    match cli.command {
        Commands::Publish => commands::publish(&settings_path, &settings).await?,
        Commands::Deploy => commands::deploy(&settings).await?,
        Commands::Export => commands::export(&settings)?,
        Commands::Cache {
            command: CacheCommand::Clear,
        } => commands::clear_cache(&settings_path)?,
        Commands::Config {
            command: ConfigCommand::Show,
        } => commands::show_config(&settings_path, &settings)?,
    }

    Ok(())
}
