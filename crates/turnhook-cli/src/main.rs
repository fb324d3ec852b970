//! turnhook CLI
//!
//! Command-line interface for turnhook

use clap::{Parser, Subcommand};
use turnhook_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "turnhook")]
#[command(about = "turnhook - Initiative roster diffs and webhook events", long_about = None)]
struct Cli {
    /// Log dispatcher activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log as JSON lines to stderr (implies --verbose)
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compare two roster snapshots
    Diff(commands::diff::DiffArgs),
    /// Replay a scripted encounter through the dispatcher
    Replay(commands::replay::ReplayArgs),
}

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if cli.log_json {
        init(Profile::Production);
    } else if cli.verbose {
        init(Profile::Development);
    }

    let result = match cli.command {
        Commands::Diff(args) => commands::diff::execute(args),
        Commands::Replay(args) => commands::replay::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
