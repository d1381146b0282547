//! Game state module - the engine state machine
//!
//! Ties the board, piece catalog, bag and scoring together. The engine moves
//! through three phases:
//!
//! - **AwaitingPiece**: between a settle and the next spawn (transient)
//! - **PieceInPlay**: an active piece is falling
//! - **GameOver**: a spawn collided or a piece settled above the top row; only
//!   [`GameState::restart`] is accepted
//!
//! Every control method returns `false` and leaves the state untouched when the
//! request is illegal.

use crate::pieces::{cells_at, rotation_candidate, wall_adjust, PieceShape};
use crate::scoring::{calculate_score, ComboState};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::*;
use crate::{Board, PieceQueue};

/// Engine settings fixed for the lifetime of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Seed for the piece bag
    pub seed: u32,
    /// Grounded gravity ticks granted before a piece settles (0 = settle on the first)
    pub lock_delay_ticks: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            lock_delay_ticks: 0,
        }
    }
}

impl EngineConfig {
    pub fn with_seed(seed: u32) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }
}

/// Engine phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingPiece,
    PieceInPlay,
    GameOver,
}

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub pos: PiecePosition,
}

impl Tetromino {
    pub fn new(kind: PieceKind, pos: PiecePosition) -> Self {
        Self { kind, pos }
    }

    /// Piece at the spawn position, wall-adjusted
    pub fn spawn(kind: PieceKind) -> Option<Self> {
        wall_adjust(kind, PiecePosition::spawn()).map(|pos| Self { kind, pos })
    }

    /// Absolute board cells of this piece
    pub fn cells(&self) -> PieceShape {
        cells_at(self.kind, self.pos)
    }

    pub fn fits(&self, board: &Board) -> bool {
        board.fits(self.kind, self.pos)
    }

    /// Check if the piece is resting on something
    pub fn is_grounded(&self, board: &Board) -> bool {
        board.collides(self.kind, self.pos.down())
    }

    /// Same piece at its hard-drop resting row
    pub fn dropped(&self, board: &Board) -> Self {
        Self {
            pos: board.drop_position(self.kind, self.pos),
            ..*self
        }
    }

    fn with_pos(self, pos: PiecePosition) -> Self {
        Self { pos, ..self }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: EngineConfig,
    board: Board,
    active: Option<Tetromino>,
    /// Remaining grounded ticks before the active piece settles.
    lock_grace: Option<u32>,
    hold: Option<PieceKind>,
    preview: [PieceKind; PREVIEW_LEN],
    piece_queue: PieceQueue,
    /// Monotonic id for spawned pieces (increments only on spawn from the queue).
    piece_id: u32,
    /// Monotonic id for the active piece instance (increments on spawn and swaps).
    active_id: u32,
    last_event: Option<LockEvent>,
    swap_used: bool,
    score: u32,
    lines: u32,
    combo: ComboState,
    game_over: bool,
}

impl GameState {
    /// Create a new game with the given RNG seed and default settings
    pub fn new(seed: u32) -> Self {
        Self::with_config(EngineConfig::with_seed(seed))
    }

    /// Create a new game and spawn its first piece
    pub fn with_config(config: EngineConfig) -> Self {
        let mut state = Self {
            config,
            board: Board::new(),
            active: None,
            lock_grace: None,
            hold: None,
            preview: [PieceKind::I; PREVIEW_LEN],
            piece_queue: PieceQueue::new(config.seed),
            piece_id: 0,
            active_id: 0,
            last_event: None,
            swap_used: false,
            score: 0,
            lines: 0,
            combo: ComboState::default(),
            game_over: false,
        };
        state.restart();
        state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    pub fn phase(&self) -> Phase {
        if self.game_over {
            Phase::GameOver
        } else if self.active.is_some() {
            Phase::PieceInPlay
        } else {
            Phase::AwaitingPiece
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn can_swap(&self) -> bool {
        !self.game_over && !self.swap_used && self.active.is_some()
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    pub fn active_id(&self) -> u32 {
        self.active_id
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines
    }

    pub fn back_to_back(&self) -> u32 {
        self.combo.back_to_back
    }

    pub fn line_combo(&self) -> u32 {
        self.combo.line_combo
    }

    pub fn hold_piece(&self) -> Option<PieceKind> {
        self.hold
    }

    /// Upcoming piece `index` places ahead (0 = next)
    pub fn preview(&self, index: usize) -> Option<PieceKind> {
        self.preview.get(index).copied()
    }

    pub fn preview_queue(&self) -> &[PieceKind; PREVIEW_LEN] {
        &self.preview
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access for puzzle setup and tests.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Replace the active piece with `kind` at the spawn position.
    ///
    /// Setup hook for puzzles and tests; fails when the spawn is blocked or the
    /// game is over. Does not touch the queue, hold or swap flag.
    pub fn replace_active(&mut self, kind: PieceKind) -> bool {
        if self.game_over {
            return false;
        }
        match Tetromino::spawn(kind) {
            Some(piece) if piece.fits(&self.board) => {
                self.active = Some(piece);
                self.active_id = self.active_id.wrapping_add(1);
                self.lock_grace = None;
                true
            }
            _ => false,
        }
    }

    /// Row the active piece would land on
    pub fn ghost(&self) -> Option<Tetromino> {
        self.active.map(|piece| piece.dropped(&self.board))
    }

    /// Display color at (x, y): active piece over ghost over locked cells.
    ///
    /// Out-of-range coordinates read as `Gray`.
    pub fn tile(&self, x: i8, y: i8) -> Color {
        if self.board.get(x, y).is_none() {
            return Color::Gray;
        }
        if let Some(piece) = self.active {
            if piece.cells().contains(&(x, y)) {
                return piece.kind.color();
            }
            if let Some(ghost) = self.ghost() {
                if ghost.cells().contains(&(x, y)) {
                    return Color::Ghost;
                }
            }
        }
        self.board.color_at(x, y)
    }

    pub fn is_locked(&self, x: i8, y: i8) -> bool {
        self.board.is_locked(x, y)
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        for (y, row) in out.board.iter_mut().enumerate() {
            for (x, cell) in row.iter_mut().enumerate() {
                *cell = self.board.color_at(x as i8, y as i8).id();
            }
        }
        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_y = self.ghost().map(|g| g.pos.y);
        out.hold = self.hold;
        out.preview = self.preview;
        out.can_swap = self.can_swap();
        out.game_over = self.game_over;
        out.seed = self.piece_queue.seed();
        out.piece_id = self.piece_id;
        out.active_id = self.active_id;
        out.score = self.score;
        out.lines = self.lines;
        out.back_to_back = self.combo.back_to_back;
        out.line_combo = self.combo.line_combo;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Clear the board, hold and counters, refill the preview and spawn.
    ///
    /// The bag keeps running across restarts, so consecutive games differ while
    /// the whole session stays reproducible from the seed.
    pub fn restart(&mut self) {
        self.board.clear();
        self.active = None;
        self.lock_grace = None;
        self.hold = None;
        self.swap_used = false;
        self.score = 0;
        self.lines = 0;
        self.combo = ComboState::default();
        self.last_event = None;
        self.game_over = false;
        for slot in &mut self.preview {
            *slot = self.piece_queue.draw();
        }
        self.spawn_next();
    }

    /// Pop the preview front, refill its back and place the piece at spawn.
    fn spawn_next(&mut self) -> bool {
        let kind = self.preview[0];
        self.preview.rotate_left(1);
        self.preview[PREVIEW_LEN - 1] = self.piece_queue.draw();

        self.piece_id = self.piece_id.wrapping_add(1);
        self.swap_used = false;
        self.place_at_spawn(kind)
    }

    fn place_at_spawn(&mut self, kind: PieceKind) -> bool {
        self.lock_grace = None;
        self.active_id = self.active_id.wrapping_add(1);
        match Tetromino::spawn(kind) {
            Some(piece) if piece.fits(&self.board) => {
                self.active = Some(piece);
                true
            }
            _ => {
                self.active = None;
                self.game_over = true;
                false
            }
        }
    }

    /// Move the active piece to `pos` if that position fits.
    fn try_reposition(&mut self, pos: PiecePosition) -> bool {
        if self.game_over {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };
        if pos == active.pos {
            return false;
        }

        let moved = active.with_pos(pos);
        if !moved.fits(&self.board) {
            return false;
        }

        self.active = Some(moved);
        if !moved.is_grounded(&self.board) {
            self.lock_grace = None;
        }
        true
    }

    fn active_pos(&self) -> Option<PiecePosition> {
        self.active.map(|piece| piece.pos)
    }

    pub fn move_left(&mut self) -> bool {
        self.active_pos()
            .is_some_and(|pos| self.try_reposition(pos.left()))
    }

    pub fn move_right(&mut self) -> bool {
        self.active_pos()
            .is_some_and(|pos| self.try_reposition(pos.right()))
    }

    /// Move one row down. Never settles; gravity does.
    pub fn soft_drop(&mut self) -> bool {
        self.active_pos()
            .is_some_and(|pos| self.try_reposition(pos.down()))
    }

    fn try_rotate(&mut self, clockwise: bool) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        match rotation_candidate(active.kind, active.pos, clockwise) {
            Some(pos) => self.try_reposition(pos),
            None => false,
        }
    }

    /// Rotate clockwise
    pub fn rotate_right(&mut self) -> bool {
        self.try_rotate(true)
    }

    /// Rotate counter-clockwise
    pub fn rotate_left(&mut self) -> bool {
        self.try_rotate(false)
    }

    /// Drop the active piece to its resting row and settle it.
    pub fn hard_drop(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };
        self.active = Some(active.dropped(&self.board));
        self.settle();
        true
    }

    /// Exchange the active piece with the hold slot, once per piece.
    pub fn swap(&mut self) -> bool {
        if !self.can_swap() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        match self.hold.replace(active.kind) {
            Some(held) => {
                self.place_at_spawn(held);
            }
            None => {
                self.spawn_next();
            }
        }
        self.swap_used = true;
        true
    }

    /// One gravity step: move down, or count down the lock grace and settle.
    pub fn update_tick(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        if self.try_reposition(active.pos.down()) {
            return true;
        }

        let remaining = match self.lock_grace {
            None => self.config.lock_delay_ticks,
            Some(n) => n.saturating_sub(1),
        };
        if remaining == 0 {
            self.settle();
        } else {
            self.lock_grace = Some(remaining);
        }
        true
    }

    /// Apply a discrete action; returns whether anything changed
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::RotateCw => self.rotate_right(),
            GameAction::RotateCcw => self.rotate_left(),
            GameAction::Hold => self.swap(),
            GameAction::Restart => {
                self.restart();
                true
            }
        }
    }

    /// Lock the active piece, clear rows, score and spawn the next piece.
    ///
    /// # Panics
    ///
    /// Panics if the active piece overlaps the walls, floor or locked cells.
    fn settle(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };
        assert!(
            piece.fits(&self.board),
            "settling {:?} at illegal position {:?}",
            piece.kind,
            piece.pos
        );
        self.lock_grace = None;

        if piece.cells().iter().any(|&(_, y)| y < 0) {
            self.game_over = true;
            return;
        }

        let tspin =
            piece.kind == PieceKind::T && self.board.collides(piece.kind, piece.pos.up());

        self.board.lock(piece.kind, piece.pos);
        let rows = self.board.clear_full_rows().len() as u32;
        let perfect_clear = rows > 0 && self.board.is_empty();

        let result = calculate_score(rows, tspin, self.combo);
        self.combo = result.combo;
        self.score = self.score.saturating_add(result.points);
        self.lines += rows;

        self.last_event = Some(LockEvent {
            kind: piece.kind,
            lines_cleared: rows,
            points: result.points,
            tspin,
            tetris_class: result.tetris_class,
            perfect_clear,
            back_to_back: self.combo.back_to_back,
            line_combo: self.combo.line_combo,
        });

        self.spawn_next();
    }
}
