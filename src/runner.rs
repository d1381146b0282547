//! Headless runner - the bot playing the engine under gravity
//!
//! A gravity task ticks the shared engine at the pace the score dictates while
//! the bot task issues one input per step. Both go through [`SharedGame`], so
//! every call sees a consistent engine. The run ends once the requested number
//! of pieces have locked.

use std::time::{Duration, Instant};

use anyhow::Result;
use serde::Serialize;
use tokio::sync::{mpsc, oneshot};

use crate::bot::{Bot, ScoreWeights};
use crate::config::RunnerConfig;
use crate::core::{gravity_interval_ms, SharedGame};
use crate::types::{GameAction, LockEvent};

/// Totals printed when the run ends
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub seed: u32,
    /// Pieces locked across all games
    pub pieces: u32,
    /// Games started, including the one in progress
    pub games: u32,
    /// Lines cleared across all games
    pub lines: u32,
    /// Score of the game in progress
    pub score: u32,
    pub best_score: u32,
    pub elapsed_ms: u64,
}

impl RunSummary {
    fn record(&mut self, event: &LockEvent) {
        self.pieces += 1;
        self.lines += event.lines_cleared;
    }
}

/// Tick the engine until `stop` fires, forwarding lock events.
async fn gravity_loop(
    game: SharedGame,
    events: mpsc::UnboundedSender<LockEvent>,
    mut stop: oneshot::Receiver<()>,
) {
    loop {
        let interval = game.with(|gs| gravity_interval_ms(gs.score()));
        tokio::select! {
            _ = &mut stop => break,
            _ = tokio::time::sleep(Duration::from_millis(interval as u64)) => {
                let event = game.with(|gs| {
                    gs.update_tick();
                    gs.take_last_event()
                });
                if let Some(event) = event {
                    if events.send(event).is_err() {
                        break;
                    }
                }
            }
        }
    }
}

/// Play until `config.pieces` pieces have locked
pub async fn run(config: &RunnerConfig, weights: ScoreWeights) -> Result<RunSummary> {
    let started = Instant::now();
    let game = SharedGame::with_config(config.engine_config());
    let mut bot = Bot::new(weights);
    let mut summary = RunSummary {
        seed: config.seed,
        games: 1,
        ..RunSummary::default()
    };

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let (stop_tx, stop_rx) = oneshot::channel();
    let gravity = if config.gravity {
        Some(tokio::spawn(gravity_loop(game.clone(), event_tx, stop_rx)))
    } else {
        drop(event_tx);
        None
    };

    let step = Duration::from_millis(config.step_ms);

    while summary.pieces < config.pieces {
        let (action, score_before, event, stack) = game.with(|gs| {
            let score_before = gs.score();
            let action = if config.step_ms == 0 {
                place_whole_piece(&mut bot, gs)
            } else {
                bot.play(gs)
            };
            (action, score_before, gs.take_last_event(), gs.board().max_height())
        });

        if action == Some(GameAction::Restart) {
            println!(
                "[Runner] Game {} over: score {}, {} pieces locked so far",
                summary.games, score_before, summary.pieces
            );
            summary.best_score = summary.best_score.max(score_before);
            summary.games += 1;
        }
        if let Some(event) = event {
            summary.record(&event);
        }
        while let Ok(event) = event_rx.try_recv() {
            summary.record(&event);
        }

        if summary.pieces > 0 && summary.pieces % 100 == 0 && event.is_some() {
            println!(
                "[Runner] {} pieces, {} lines, stack height {}",
                summary.pieces, summary.lines, stack
            );
        }

        if step.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(step).await;
        }
    }

    let _ = stop_tx.send(());
    if let Some(handle) = gravity {
        handle.await?;
    }

    let final_score = game.with(|gs| gs.score());
    summary.score = final_score;
    summary.best_score = summary.best_score.max(final_score);
    summary.elapsed_ms = started.elapsed().as_millis() as u64;
    Ok(summary)
}

/// One whole piece per step, restarting finished games.
fn place_whole_piece(bot: &mut Bot, gs: &mut crate::core::GameState) -> Option<GameAction> {
    if gs.is_game_over() {
        gs.restart();
        return Some(GameAction::Restart);
    }
    if let Err(err) = bot.place_piece(gs) {
        eprintln!("[Runner] Placement failed ({}), hard dropping", err);
        gs.hard_drop();
    }
    Some(GameAction::HardDrop)
}
