//! Push Bootstrap CLI.
//!
//! This is the main binary entry point. See the `push_bootstrap` library
//! for the core functionality.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use push_bootstrap::{commands, Config};

// CLI
#[derive(Parser)]
#[command(name = "push-bootstrap")]
#[command(version)]
#[command(about = "Web push subscription bootstrap and registry sync")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a URL-safe base64 VAPID public key and print its bytes
    DecodeKey {
        /// Key to decode (defaults to the configured VAPID key)
        key: Option<String>,
        /// Also require a valid uncompressed P-256 point
        #[arg(long)]
        check: bool,
    },
    /// Post a saved subscription JSON to the registry
    Sync {
        /// Path to the subscription JSON, or `-` for stdin
        subscription: String,
    },
    /// Bootstrap against an in-memory platform and sync the result
    Simulate {
        /// Print the subscription instead of posting it
        #[arg(long)]
        no_sync: bool,
    },
    /// Show the resolved configuration
    Config {
        /// Validate the configuration
        #[arg(long)]
        check: bool,
        /// Write the resolved configuration to the config file
        #[arg(long)]
        save: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    let cli = Cli::parse();
    let config = Config::load().context("Failed to load configuration")?;

    match cli.command {
        Commands::DecodeKey { key, check } => {
            commands::decode_key::run(key.as_deref(), check, &config)?;
        }
        Commands::Sync { subscription } => {
            commands::sync::run(&subscription, &config).await?;
        }
        Commands::Simulate { no_sync } => {
            commands::simulate::run(no_sync, &config).await?;
        }
        Commands::Config { check, save } => {
            if check {
                config.validate()?;
                log::info!("Configuration is valid");
            }
            if save {
                config.save()?;
                println!("Saved {}", Config::config_path()?.display());
            }
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
