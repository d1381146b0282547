//! Heuristic placement bot
//!
//! The bot reads the engine's query surface, scores every legal resting
//! position of the active piece and of the piece a swap would bring in, and
//! drives the engine toward the winner one discrete input at a time.
//!
//! - [`weights`]: tunable scorer weights, loadable from JSON
//! - [`eval`]: the pure placement scorer
//! - [`search`]: placement enumeration using the engine's collision rule
//! - [`bot`]: the per-step driver
//! - [`place`]: one-shot rotate/shift/drop helper
//!
//! # Example
//!
//! ```
//! use tetris_bot_ai::Bot;
//! use tetris_bot_core::GameState;
//!
//! let mut game = GameState::new(7);
//! let mut bot = Bot::default();
//!
//! while game.piece_id() < 10 {
//!     bot.play(&mut game);
//! }
//! assert!(!game.is_game_over());
//! ```

pub mod bot;
pub mod eval;
pub mod place;
pub mod search;
pub mod weights;

pub use bot::{Bot, Decision};
pub use eval::{evaluate, EvalContext, Evaluation};
pub use place::{apply_place, PlaceError};
pub use search::{best_placement, enumerate, Candidate};
pub use weights::ScoreWeights;
