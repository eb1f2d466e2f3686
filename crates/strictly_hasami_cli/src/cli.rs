//! Command-line interface for hasami.

use clap::{Parser, Subcommand};

/// Hasami Shogi - two players, one terminal
#[derive(Parser, Debug)]
#[command(name = "hasami")]
#[command(about = "Play Hasami Shogi in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file (defaults to ./hasami.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<std::path::PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a game, reading moves like `i1-e1` from stdin
    Play,

    /// Print the starting position and exit
    Board,
}
