//! Command-line interface for the jungle service.

use clap::{Parser, Subcommand};
use jungle_game::Difficulty;
use std::path::PathBuf;

/// Jungle - Dou Shou Qi game service with a search-based AI
#[derive(Parser, Debug)]
#[command(name = "jungle")]
#[command(about = "Jungle (Dou Shou Qi) game service", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP game service
    Serve {
        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Host to bind to (overrides the config file)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides the config file)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Play the AI against itself in the terminal
    SelfPlay {
        /// Red's difficulty
        #[arg(long, default_value = "amateur")]
        red: Difficulty,

        /// Blue's difficulty
        #[arg(long, default_value = "amateur")]
        blue: Difficulty,

        /// Give up after this many plies
        #[arg(long, default_value = "200")]
        max_plies: usize,

        /// Seed for reproducible games
        #[arg(long)]
        seed: Option<u64>,
    },
}
