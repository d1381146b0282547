//! Tetris bot (workspace facade crate).
//!
//! Re-exports the engine, bot and shared types under one name and hosts the
//! headless runner used by the `tetris-bot` binary.

pub use tetris_bot_ai as bot;
pub use tetris_bot_core as core;
pub use tetris_bot_types as types;

pub mod config;
pub mod runner;
