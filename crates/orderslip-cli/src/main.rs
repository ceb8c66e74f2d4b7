//! CLI for the retail order document converters.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::run;

/// Convert retail partner order documents into normalized JSON
#[derive(Parser)]
#[command(name = "orderslip")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Directory holding paths.json and the vendor column maps
    #[arg(short, long, global = true, default_value = "config")]
    config_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one vendor's batch conversion
    Run(run::RunArgs),

    /// Run every vendor in sequence
    All(run::AllArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Run(args) => run::run(args, &cli.config_dir).await,
        Commands::All(args) => run::run_all(args, &cli.config_dir).await,
    }
}
