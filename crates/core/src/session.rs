//! Shared session - one engine behind a mutex
//!
//! The engine is not reentrant. Callers that drive it from several tasks
//! (a gravity timer and a bot, say) go through [`SharedGame`], which takes the
//! lock once per control call so each call observes and leaves a consistent state.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::game_state::{EngineConfig, GameState};
use crate::snapshot::GameSnapshot;
use crate::types::GameAction;

#[derive(Debug, Clone)]
pub struct SharedGame {
    inner: Arc<Mutex<GameState>>,
}

impl SharedGame {
    pub fn new(state: GameState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self::new(GameState::with_config(config))
    }

    fn lock(&self) -> MutexGuard<'_, GameState> {
        // A panic while holding the lock leaves a state that is still structurally valid.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Run `f` with exclusive access to the engine
    pub fn with<R>(&self, f: impl FnOnce(&mut GameState) -> R) -> R {
        f(&mut self.lock())
    }

    pub fn apply(&self, action: GameAction) -> bool {
        self.lock().apply_action(action)
    }

    /// One gravity step
    pub fn tick(&self) -> bool {
        self.lock().update_tick()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.lock().snapshot()
    }
}
