//! Headless bot runner (default binary).
//!
//! Plays the placement bot against the engine with gravity and prints a JSON
//! summary when done. Configuration comes from `TETRIS_BOT_*` environment
//! variables; see [`tetris_bot::config`].

use anyhow::{Context, Result};

use tetris_bot::config::RunnerConfig;
use tetris_bot::runner;

#[tokio::main]
async fn main() -> Result<()> {
    let config = RunnerConfig::from_env();
    let weights = config.load_weights()?;

    println!(
        "[Runner] seed={} pieces={} step_ms={} gravity={} lock_delay={}",
        config.seed, config.pieces, config.step_ms, config.gravity, config.lock_delay_ticks
    );
    if let Some(path) = &config.weights_path {
        println!("[Runner] Loaded weights from {}", path.display());
    }

    let summary = runner::run(&config, weights).await?;

    let json = serde_json::to_string_pretty(&summary).context("serializing run summary")?;
    println!("{}", json);
    Ok(())
}
