//! Jungle - unified CLI
//!
//! Runs the HTTP game service or a terminal self-play game.

use anyhow::Result;
use clap::Parser;
use jungle_game::Difficulty;
use jungle_server::cli::{Cli, Command};
use jungle_server::{GameService, SelfPlayConfig, ServerConfig, router, self_play};
use std::path::PathBuf;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { config, host, port } => run_server(config, host, port).await,
        Command::SelfPlay {
            red,
            blue,
            max_plies,
            seed,
        } => run_self_play(red, blue, max_plies, seed).await,
    }
}

/// Run the HTTP game service
#[instrument]
async fn run_server(config: Option<PathBuf>, host: Option<String>, port: Option<u16>) -> Result<()> {
    let mut settings = match config {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::default(),
    };
    if let Some(host) = host {
        settings = settings.with_host(host);
    }
    if let Some(port) = port {
        settings = settings.with_port(port);
    }

    let service = GameService::new(&settings);
    let app = router(service);

    let address = settings.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!(%address, "Server ready");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Play the AI against itself and print the result
#[instrument]
async fn run_self_play(
    red: Difficulty,
    blue: Difficulty,
    max_plies: usize,
    seed: Option<u64>,
) -> Result<()> {
    let config = SelfPlayConfig {
        red,
        blue,
        max_plies,
        seed,
        ..SelfPlayConfig::default()
    };
    let report = tokio::task::spawn_blocking(move || self_play(config)).await??;

    println!("{}", report.final_board);
    match report.winner {
        Some(winner) => println!("{winner} wins after {} plies", report.plies),
        None => println!("No result after {} plies", report.plies),
    }
    Ok(())
}
