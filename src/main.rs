//! Tic-tac-toe - unified CLI
//!
//! Play in the terminal, or query the rules engine from the shell.

#![warn(missing_docs)]

mod cli;
mod tui;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command, PlayArgs};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde_json::json;
use tictactoe::AppConfig;
use tictactoe_rules::{Board, Mark, evaluate, recommend};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play(args) => run_play(args).await,
        Command::Evaluate { board, json } => {
            init_stderr_logging();
            run_evaluate(board, json)
        }
        Command::Recommend {
            board,
            mark,
            seed,
            json,
        } => {
            init_stderr_logging();
            run_recommend(board, mark, seed, json)
        }
    }
}

/// Logs to stderr for one-shot commands.
fn init_stderr_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Run the terminal game
async fn run_play(args: PlayArgs) -> Result<()> {
    let config = AppConfig::load(args.config.as_deref())
        .context("Failed to load configuration")?
        .with_overrides(args.overrides());

    // Log to a file so output doesn't tear the TUI
    let log_file = std::fs::File::create(config.log_file())
        .with_context(|| format!("Failed to create log file {}", config.log_file().display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!(?config, "Starting tic-tac-toe");
    tui::run_tui(&config).await
}

/// Print the verdict for a board
#[instrument(skip(board), fields(board = %board))]
fn run_evaluate(board: Board, json: bool) -> Result<()> {
    let verdict = evaluate(&board);
    if json {
        println!("{}", serde_json::to_string(&verdict)?);
    } else {
        println!("{}\n\n{}", board.grid(), verdict);
    }
    Ok(())
}

/// Print the recommended move for a board
#[instrument(skip(board), fields(board = %board))]
fn run_recommend(board: Board, mark: Mark, seed: Option<u64>, json: bool) -> Result<()> {
    let mut rng = match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let rec = recommend(&board, mark, mark.opponent(), &mut rng);

    if json {
        let value = match rec {
            Some(r) => json!({ "index": r.position.to_index(), "tier": r.tier }),
            None => json!({ "index": null, "tier": null }),
        };
        println!("{value}");
    } else {
        match rec {
            Some(r) => println!("{} ({}): {}", r.position.to_index(), r.position, r.tier),
            None => println!("none: board is full"),
        }
    }
    Ok(())
}
