//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no external dependencies, so they can be used
//! by the engine, the bot, and any rendering or input shell alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, top to bottom)
//! - **Spawn position**: pivot at (5, 0), rotation 0
//!
//! Rows above the top (`y < 0`) are open sky for a falling piece, but a piece
//! that locks with any cell up there ends the game.
//!
//! # Gravity Pacing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_GRAVITY_MS` | 250 | Gravity interval at score 0 |
//! | `GRAVITY_STEP_MS` | 5 | Interval reduction per `GRAVITY_STEP_POINTS` |
//! | `GRAVITY_STEP_POINTS` | 4 | Points needed per reduction step |
//! | `MIN_GRAVITY_MS` | 50 | Fastest gravity interval |
//! | `DEFAULT_BOT_STEP_MS` | 10 | Default delay between bot inputs |
//!
//! # Examples
//!
//! ```
//! use tetris_bot_types::{GameAction, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::T;
//! assert_eq!(PieceKind::from_str("t"), Some(piece));
//!
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//! assert_eq!(Rotation::from_index(-1), Rotation::West);
//!
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 visible rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Number of upcoming pieces visible in the preview queue
pub const PREVIEW_LEN: usize = 5;

/// Gravity interval at score 0 (milliseconds per row)
pub const BASE_GRAVITY_MS: u32 = 250;

/// Gravity interval reduction per step
pub const GRAVITY_STEP_MS: u32 = 5;

/// Points needed for one gravity step
pub const GRAVITY_STEP_POINTS: u32 = 4;

/// Fastest gravity interval
pub const MIN_GRAVITY_MS: u32 = 50;

/// Default delay between two bot inputs
pub const DEFAULT_BOT_STEP_MS: u32 = 10;


/// The seven tetromino piece kinds
///
/// Each piece has a distinct shape and color:
/// - **I**: Cyan, straight bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Magenta, T-shaped
/// - **S**: Green, S-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// Every piece kind, in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_bot_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }

    /// Position of this kind in [`PieceKind::ALL`]
    pub fn index(&self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::T => 2,
            PieceKind::S => 3,
            PieceKind::Z => 4,
            PieceKind::J => 5,
            PieceKind::L => 6,
        }
    }

    /// Color tag used when this piece is locked into the board
    pub fn color(&self) -> Color {
        match self {
            PieceKind::I => Color::Cyan,
            PieceKind::O => Color::Yellow,
            PieceKind::T => Color::Magenta,
            PieceKind::S => Color::Green,
            PieceKind::Z => Color::Red,
            PieceKind::J => Color::Blue,
            PieceKind::L => Color::Orange,
        }
    }
}

/// Tile colors exposed by the query surface
///
/// `Gray` is the wall sentinel returned for out-of-range coordinates and
/// `Ghost` marks the projected landing cells of the active piece. Neither is
/// ever stored in the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    None,
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Cyan,
    Magenta,
    Gray,
    Ghost,
}

impl Color {
    /// Compact numeric id (0 = empty) for grid snapshots
    pub fn id(&self) -> u8 {
        match self {
            Color::None => 0,
            Color::Red => 1,
            Color::Orange => 2,
            Color::Yellow => 3,
            Color::Green => 4,
            Color::Blue => 5,
            Color::Cyan => 6,
            Color::Magenta => 7,
            Color::Gray => 8,
            Color::Ghost => 9,
        }
    }
}

/// Rotation states, clockwise from the spawn orientation
///
/// - **North**: rotation index 0 (spawn)
/// - **East**: index 1, 90° clockwise
/// - **South**: index 2
/// - **West**: index 3, 90° counter-clockwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// All rotations in index order
    pub const ALL: [Rotation; 4] = [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
    ];

    /// Build a rotation from any integer, wrapping modulo 4
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_bot_types::Rotation;
    ///
    /// assert_eq!(Rotation::from_index(0), Rotation::North);
    /// assert_eq!(Rotation::from_index(6), Rotation::South);
    /// assert_eq!(Rotation::from_index(-1), Rotation::West);
    /// ```
    pub fn from_index(index: i32) -> Self {
        Self::ALL[index.rem_euclid(4) as usize]
    }

    /// Rotation index in `0..4`
    pub fn index(&self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Rotate clockwise (90°)
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise (-90° or 270°)
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    /// Number of clockwise quarter turns needed to reach `target`
    pub fn cw_steps_to(&self, target: Rotation) -> u8 {
        ((target.index() + 4 - self.index()) % 4) as u8
    }
}

/// Where a piece's pivot sits on the board, and its orientation
///
/// A plain value: the step helpers return a new position and leave `self`
/// untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PiecePosition {
    pub x: i8,
    pub y: i8,
    pub rotation: Rotation,
}

impl PiecePosition {
    pub fn new(x: i8, y: i8, rotation: Rotation) -> Self {
        Self { x, y, rotation }
    }

    /// Spawn position: horizontal center of the top row, rotation 0
    pub fn spawn() -> Self {
        Self::new((BOARD_WIDTH / 2) as i8, 0, Rotation::North)
    }

    pub fn left(self) -> Self {
        Self { x: self.x - 1, ..self }
    }

    pub fn right(self) -> Self {
        Self { x: self.x + 1, ..self }
    }

    pub fn up(self) -> Self {
        Self { y: self.y - 1, ..self }
    }

    pub fn down(self) -> Self {
        Self { y: self.y + 1, ..self }
    }

    pub fn rotated_cw(self) -> Self {
        Self {
            rotation: self.rotation.rotate_cw(),
            ..self
        }
    }

    pub fn rotated_ccw(self) -> Self {
        Self {
            rotation: self.rotation.rotate_ccw(),
            ..self
        }
    }
}

/// Game actions that can be applied to modify game state
///
/// These are the discrete inputs shared by human input shells and the bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down
    SoftDrop,
    /// Drop piece to its resting row and lock it
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Swap the active piece with the hold slot
    Hold,
    /// Restart the game
    Restart,
}

impl GameAction {
    pub const ALL: [GameAction; 8] = [
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::SoftDrop,
        GameAction::HardDrop,
        GameAction::RotateCw,
        GameAction::RotateCcw,
        GameAction::Hold,
        GameAction::Restart,
    ];

    /// Parse action from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_bot_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("hold"), Some(GameAction::Hold));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotatecw" | "rotateright" => Some(GameAction::RotateCw),
            "rotateccw" | "rotateleft" => Some(GameAction::RotateCcw),
            "hold" | "swap" => Some(GameAction::Hold),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::Hold => "hold",
            GameAction::Restart => "restart",
        }
    }
}

/// Event recorded each time a piece settles.
///
/// Counters are the values *after* the lock was scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: PieceKind,
    pub lines_cleared: u32,
    pub points: u32,
    pub tspin: bool,
    pub tetris_class: bool,
    pub perfect_clear: bool,
    pub back_to_back: u32,
    pub line_combo: u32,
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell locked by the specified piece kind
pub type Cell = Option<PieceKind>;
