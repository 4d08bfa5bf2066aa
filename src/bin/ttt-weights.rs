//! ttt-weights CLI - tic-tac-toe players that learn state weights by self-play
//!
//! - Training weighted players in round-robin tournaments
//! - Evaluating frozen stores against a random baseline
//! - Inspecting saved stores
//! - Watching single games

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ttt-weights")]
#[command(version, about = "Tic-tac-toe self-play weight learner", long_about = None)]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train weighted players through self-play
    Train(ttt_weights::cli::commands::train::TrainArgs),

    /// Run a tournament with learning switched off
    Tournament(ttt_weights::cli::commands::tournament::TournamentArgs),

    /// Summarize a saved store
    Inspect(ttt_weights::cli::commands::inspect::InspectArgs),

    /// Play and print a single game
    PlayOne(ttt_weights::cli::commands::play::PlayArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Train(args) => ttt_weights::cli::commands::train::execute(args),
        Commands::Tournament(args) => ttt_weights::cli::commands::tournament::execute(args),
        Commands::Inspect(args) => ttt_weights::cli::commands::inspect::execute(args),
        Commands::PlayOne(args) => ttt_weights::cli::commands::play::execute(args),
    }
}
