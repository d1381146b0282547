//! Runner configuration from environment variables.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `TETRIS_BOT_SEED` | 1 | bag seed |
//! | `TETRIS_BOT_PIECES` | 500 | pieces to lock before exiting |
//! | `TETRIS_BOT_STEP_MS` | 10 | delay between bot inputs; 0 places whole pieces |
//! | `TETRIS_BOT_GRAVITY` | on | `0`/`false` disables gravity ticks |
//! | `TETRIS_BOT_LOCK_DELAY` | 0 | grounded ticks before a piece settles |
//! | `TETRIS_BOT_WEIGHTS` | unset | path to a JSON weights file |
//!
//! Unparseable numbers fall back to their defaults.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::bot::ScoreWeights;
use crate::core::EngineConfig;
use crate::types::DEFAULT_BOT_STEP_MS;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    pub seed: u32,
    pub pieces: u32,
    pub step_ms: u64,
    pub gravity: bool,
    pub lock_delay_ticks: u32,
    pub weights_path: Option<PathBuf>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            pieces: 500,
            step_ms: DEFAULT_BOT_STEP_MS as u64,
            gravity: true,
            lock_delay_ticks: 0,
            weights_path: None,
        }
    }
}

impl RunnerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let seed = lookup("TETRIS_BOT_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.seed);

        let pieces = lookup("TETRIS_BOT_PIECES")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.pieces);

        let step_ms = lookup("TETRIS_BOT_STEP_MS")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.step_ms);

        let gravity = lookup("TETRIS_BOT_GRAVITY")
            .map(|v| {
                let v = v.trim().to_lowercase();
                !(v == "0" || v == "false")
            })
            .unwrap_or(defaults.gravity);

        let lock_delay_ticks = lookup("TETRIS_BOT_LOCK_DELAY")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.lock_delay_ticks);

        let weights_path = lookup("TETRIS_BOT_WEIGHTS")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(PathBuf::from(s)) });

        Self {
            seed,
            pieces,
            step_ms,
            gravity,
            lock_delay_ticks,
            weights_path,
        }
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            seed: self.seed,
            lock_delay_ticks: self.lock_delay_ticks,
        }
    }

    /// Weights from `weights_path`, or the defaults when unset
    pub fn load_weights(&self) -> Result<ScoreWeights> {
        let Some(path) = &self.weights_path else {
            return Ok(ScoreWeights::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading weights file {}", path.display()))?;
        ScoreWeights::from_json(&text)
            .with_context(|| format!("parsing weights file {}", path.display()))
    }
}
