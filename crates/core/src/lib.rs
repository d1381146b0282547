//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains all the game rules, state management, and simulation logic.
//! It has **zero dependencies** on rendering, input, or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: Comprehensive unit tests for all game rules
//! - **Portable**: Runs headless, under a bot, or behind any shell
//! - **Fast**: Fixed-size tables and no allocation on the tick path
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 game board with collision detection and line clearing
//! - [`game_state`]: The engine state machine: active piece, hold, preview, scoring
//! - [`pieces`]: Tetromino bitmaps, pivots and wall adjustment
//! - [`rng`]: 7-bag random piece generation for fair distribution
//! - [`scoring`]: Line clear points with T-spin, back-to-back and line-combo factors
//! - [`session`]: Mutex-guarded engine shared between tasks
//!
//! # Game Rules
//!
//! - **7-Bag Randomizer**: every 7 draws after a refill hold each piece once
//! - **Pivot Rotation**: pieces rotate about a per-rotation pivot cell and are
//!   shifted horizontally off the walls; there are no upward kicks
//! - **Open Sky**: cells above the top row never collide, but locking there ends the game
//! - **Hold**: swap the active piece once per piece
//! - **T-Spin**: a T that cannot move up when it settles doubles its points
//!
//! # Example
//!
//! ```
//! use tetris_bot_core::GameState;
//! use tetris_bot_types::GameAction;
//!
//! let mut game = GameState::new(12345);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert_eq!(game.piece_id(), 2);
//! assert_eq!(game.board().filled_count(), 4);
//! ```

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use tetris_bot_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use game_state::{EngineConfig, GameState, Phase, Tetromino};
pub use pieces::{get_shape, wall_adjust};
pub use rng::{PieceQueue, SimpleRng};
pub use scoring::{calculate_score, gravity_interval_ms, ComboState, ScoreResult};
pub use session::SharedGame;
pub use snapshot::{ActiveSnapshot, GameSnapshot};
