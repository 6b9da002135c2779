//! TICTAC CLI - Command-line interface
//!
//! Commands:
//! - play: Play against the engine in the terminal
//! - serve: Start the HTTP API server
//! - analyze: Score every Opponent move on a board
//! - selfplay: Random player against the engine

mod analyze;
mod play;
mod selfplay;
mod server;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tictac")]
#[command(about = "Tic-tac-toe against a perfect minimax opponent")]
struct Cli {
    /// Log filter (overrides RUST_LOG), e.g. "debug" or "tictac_core=trace"
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game in the terminal
    Play,
    /// Start the HTTP API server
    Serve(server::ServerArgs),
    /// Score every Opponent move on a board
    Analyze(analyze::AnalyzeArgs),
    /// Play a random Player against the engine
    Selfplay(selfplay::SelfplayArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.log_level.as_deref());

    match cli.command {
        Commands::Play => play::run(),
        Commands::Serve(args) => server::run(args),
        Commands::Analyze(args) => analyze::run(args),
        Commands::Selfplay(args) => selfplay::run(args),
    }
}

/// Log to stderr so command output stays clean on stdout
fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
