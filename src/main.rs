mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};
use cli::settings::{CliOverrides, Settings};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "smd-compare")]
#[command(about = "Discover nodes on one SMD instance and check a second one matches it")]
#[command(version)]
struct Cli {
    /// YAML settings file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(flatten)]
    overrides: CliOverrides,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Discover, copy components to the secondary, then compare
    Run,
    /// Register endpoints on the primary and wait for discovery
    Discover,
    /// Copy components from the primary to the secondary
    Sync,
    /// Compare component state between the two instances
    Compare,
}

fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if settings.log_json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref(), &cli.overrides)?;
    init_tracing(&settings);

    match cli.command {
        Commands::Run => cli::commands::run(&settings).await,
        Commands::Discover => cli::commands::discover(&settings).await,
        Commands::Sync => cli::commands::sync(&settings).await,
        Commands::Compare => cli::commands::compare(&settings).await,
    }
}
