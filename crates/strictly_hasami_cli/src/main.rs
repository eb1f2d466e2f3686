//! Hasami - terminal front end for the strictly_hasami rule engine.

#![warn(missing_docs)]

mod cli;
mod config;
mod session;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use config::HasamiConfig;
use std::io::Write;
use strictly_hasami::Board;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = HasamiConfig::load(cli.config.as_deref())?;

    // Logs go to stderr so they never interleave with the board.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    info!(command = ?cli.command, "Starting hasami");

    match cli.command {
        Command::Play => session::run(&config, std::io::stdin().lock(), std::io::stdout().lock()),
        Command::Board => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", Board::new())?;
            Ok(())
        }
    }
}
