//! Bot driver - one discrete input per control step
//!
//! The bot searches once per active piece, commits to the best placement, and
//! then emits rotations, shifts and finally a hard drop until the piece is
//! placed. The plan is tied to the engine's `active_id`, so a new piece (or a
//! swap, or a setup hook replacing the piece) always triggers a fresh search.

use tetris_bot_core::{GameState, Tetromino};
use tetris_bot_types::{GameAction, PiecePosition};

use crate::eval::EvalContext;
use crate::place::{apply_place, PlaceError};
use crate::search::{best_placement, Candidate};
use crate::weights::ScoreWeights;

/// Outcome of the last search, kept for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub active_id: u32,
    pub active: Option<Candidate>,
    pub swap: Option<Candidate>,
    pub chose_swap: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Plan {
    active_id: u32,
    target: Option<PiecePosition>,
    /// Set when the engine rejected a step toward `target`
    blocked: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Bot {
    weights: ScoreWeights,
    plan: Option<Plan>,
    last_decision: Option<Decision>,
}

impl Bot {
    pub fn new(weights: ScoreWeights) -> Self {
        Self {
            weights,
            plan: None,
            last_decision: None,
        }
    }

    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    pub fn last_decision(&self) -> Option<&Decision> {
        self.last_decision.as_ref()
    }

    /// Rank every placement of the active piece and of the swap piece.
    pub fn decide(&self, state: &GameState) -> Option<Decision> {
        let active = state.active()?;
        let ctx = EvalContext::from_state(state);

        let best_active = best_placement(&self.weights, &ctx, active.kind, active.pos.y);

        let swap_kind = if state.can_swap() {
            state.hold_piece().or_else(|| state.preview(0))
        } else {
            None
        };
        let best_swap = swap_kind.and_then(|kind| {
            best_placement(&self.weights, &ctx, kind, PiecePosition::spawn().y)
        });

        let chose_swap = match (&best_swap, &best_active) {
            (Some(swap), Some(active)) => swap.eval.score > active.eval.score,
            (Some(_), None) => true,
            _ => false,
        };

        Some(Decision {
            active_id: state.active_id(),
            active: best_active,
            swap: best_swap,
            chose_swap,
        })
    }

    /// Next input for the engine, or `None` when no piece is in play
    pub fn choose_move(&mut self, state: &GameState) -> Option<GameAction> {
        if state.is_game_over() {
            self.plan = None;
            return Some(GameAction::Restart);
        }
        let active = state.active()?;

        let plan = match self.plan {
            Some(plan) if plan.active_id == state.active_id() => plan,
            _ => {
                let decision = self.decide(state)?;
                self.last_decision = Some(decision);
                if decision.chose_swap {
                    self.plan = None;
                    return Some(GameAction::Hold);
                }
                let plan = Plan {
                    active_id: decision.active_id,
                    target: decision.active.map(|c| c.pos),
                    blocked: false,
                };
                self.plan = Some(plan);
                plan
            }
        };

        let target = match plan.target {
            Some(target) if !plan.blocked => target,
            _ => {
                self.plan = None;
                return Some(GameAction::HardDrop);
            }
        };

        Some(match step_toward(active, target) {
            Some(action) => action,
            None => {
                self.plan = None;
                GameAction::HardDrop
            }
        })
    }

    /// Choose a move and apply it. Returns the action taken.
    pub fn play(&mut self, state: &mut GameState) -> Option<GameAction> {
        let action = self.choose_move(state)?;
        let applied = state.apply_action(action);
        if !applied {
            if let Some(plan) = self.plan.as_mut() {
                plan.blocked = true;
            }
        }
        Some(action)
    }

    /// Search and place the whole active piece in one call.
    ///
    /// Restarts a finished game first. Swaps when the swap piece scores better.
    pub fn place_piece(&mut self, state: &mut GameState) -> Result<Decision, PlaceError> {
        if state.is_game_over() {
            state.restart();
        }
        self.plan = None;

        let decision = self.decide(state).ok_or(PlaceError::NoActive)?;
        self.last_decision = Some(decision);

        let (candidate, use_hold) = if decision.chose_swap {
            (decision.swap, true)
        } else {
            (decision.active, false)
        };
        match candidate {
            Some(c) => apply_place(state, c.pos.x, c.pos.rotation, use_hold)?,
            None => {
                state.hard_drop();
            }
        }
        Ok(decision)
    }
}

/// Rotate first (shorter direction), then shift; `None` once aligned
fn step_toward(active: Tetromino, target: PiecePosition) -> Option<GameAction> {
    let current = active.pos;
    if current.rotation != target.rotation {
        return Some(if current.rotation.cw_steps_to(target.rotation) <= 2 {
            GameAction::RotateCw
        } else {
            GameAction::RotateCcw
        });
    }
    if current.x < target.x {
        return Some(GameAction::MoveRight);
    }
    if current.x > target.x {
        return Some(GameAction::MoveLeft);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use tetris_bot_types::{PieceKind, Rotation};

    #[test]
    fn test_restart_on_game_over() {
        let mut gs = GameState::new(3);
        for _ in 0..200 {
            if gs.is_game_over() {
                break;
            }
            gs.hard_drop();
        }
        assert!(gs.is_game_over());

        let mut bot = Bot::default();
        assert_eq!(bot.choose_move(&gs), Some(GameAction::Restart));
    }

    #[test]
    fn test_step_prefers_shorter_rotation() {
        let piece = Tetromino::new(PieceKind::T, PiecePosition::new(4, 0, Rotation::North));
        let west = PiecePosition::new(4, 10, Rotation::West);
        assert_eq!(step_toward(piece, west), Some(GameAction::RotateCcw));
        let east = PiecePosition::new(4, 10, Rotation::East);
        assert_eq!(step_toward(piece, east), Some(GameAction::RotateCw));
        let aligned = PiecePosition::new(4, 10, Rotation::North);
        assert_eq!(step_toward(piece, aligned), None);
        let right = PiecePosition::new(7, 10, Rotation::North);
        assert_eq!(step_toward(piece, right), Some(GameAction::MoveRight));
    }

    #[test]
    fn test_plan_ends_with_hard_drop() {
        let mut gs = GameState::new(8);
        gs.swap();
        let mut bot = Bot::default();
        let start = gs.piece_id();

        let mut steps = 0;
        while gs.piece_id() == start {
            let action = bot.play(&mut gs).unwrap();
            assert_ne!(action, GameAction::Hold);
            steps += 1;
            assert!(steps < 30);
        }
        assert_eq!(gs.board().filled_count() % 2, 0);
    }

    #[test]
    fn test_blocked_plan_falls_back_to_hard_drop() {
        let mut gs = GameState::new(8);
        gs.swap();
        let mut bot = Bot::default();
        bot.plan = Some(Plan {
            active_id: gs.active_id(),
            target: Some(PiecePosition::new(0, 19, Rotation::West)),
            blocked: true,
        });
        assert_eq!(bot.choose_move(&gs), Some(GameAction::HardDrop));
        assert!(bot.plan.is_none());
    }

    #[test]
    fn test_place_piece_locks_one_piece() {
        let mut gs = GameState::new(11);
        let mut bot = Bot::default();
        let decision = bot.place_piece(&mut gs).unwrap();
        assert_eq!(decision.active_id, 1);
        assert_eq!(gs.board().filled_count(), 4);
    }
}
