//! Read-only copy of the query surface for observers.

use crate::game_state::Tetromino;
use crate::types::{PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH, PREVIEW_LEN};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            rotation: value.pos.rotation,
            x: value.pos.x,
            y: value.pos.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// Locked cells as `Color::id()` values, row-major, 0 = empty
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub ghost_y: Option<i8>,
    pub hold: Option<PieceKind>,
    pub preview: [PieceKind; PREVIEW_LEN],
    pub can_swap: bool,
    pub game_over: bool,
    pub seed: u32,
    pub piece_id: u32,
    pub active_id: u32,
    pub score: u32,
    pub lines: u32,
    pub back_to_back: u32,
    pub line_combo: u32,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        !self.game_over && self.active.is_some()
    }

    /// Number of locked cells
    pub fn filled_count(&self) -> usize {
        self.board.iter().flatten().filter(|&&id| id != 0).count()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost_y: None,
            hold: None,
            preview: [PieceKind::I; PREVIEW_LEN],
            can_swap: false,
            game_over: false,
            seed: 0,
            piece_id: 0,
            active_id: 0,
            score: 0,
            lines: 0,
            back_to_back: 0,
            line_combo: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameState;

    #[test]
    fn test_snapshot_mirrors_queries() {
        let mut gs = GameState::new(5);
        gs.hard_drop();
        let s = gs.snapshot();

        assert_eq!(s.piece_id, gs.piece_id());
        assert_eq!(s.score, gs.score());
        assert_eq!(s.preview, *gs.preview_queue());
        assert_eq!(s.filled_count(), gs.board().filled_count());
        assert_eq!(s.active.map(|a| a.kind), gs.active().map(|a| a.kind));
        assert!(s.playable());
    }
}
