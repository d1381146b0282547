//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell can be empty or filled with a piece kind.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom)
//!
//! Two notions of "blocked" live here:
//! - [`Board::is_locked`] treats everything outside the grid as wall.
//! - [`Board::collides`] is the piece collision rule: the side walls and the floor
//!   block, but rows above the top (`y < 0`) are open sky.

use std::fmt;

use arrayvec::ArrayVec;

use crate::pieces::cells_at;
use crate::types::{Cell, Color, PieceKind, PiecePosition, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

const ROWS: usize = BOARD_HEIGHT as usize;

/// Row indices removed by one [`Board::clear_full_rows`] call
pub type ClearedRows = ArrayVec<usize, ROWS>;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Build a board from ASCII rows, bottom-aligned.
    ///
    /// The last string is row 19. `.` is empty and a piece letter (`IOTSZJL`,
    /// any case) is a cell locked by that piece. Returns `None` for more than
    /// 20 rows, a row that is not 10 wide, or an unknown character.
    ///
    /// ```
    /// use tetris_bot_core::Board;
    ///
    /// let board = Board::from_ascii(&["IIIIIIIII."]).unwrap();
    /// assert!(board.is_locked(0, 19));
    /// assert!(!board.is_locked(9, 19));
    /// assert_eq!(board.filled_count(), 9);
    /// ```
    pub fn from_ascii(rows: &[&str]) -> Option<Self> {
        if rows.len() > ROWS {
            return None;
        }
        let mut board = Self::new();
        let first_row = ROWS - rows.len();
        for (i, line) in rows.iter().enumerate() {
            if line.chars().count() != BOARD_WIDTH as usize {
                return None;
            }
            let y = (first_row + i) as i8;
            for (x, ch) in line.chars().enumerate() {
                let cell = match ch {
                    '.' => None,
                    other => Some(PieceKind::from_str(other.encode_utf8(&mut [0; 4]))?),
                };
                board.set(x as i8, y, cell);
            }
        }
        Some(board)
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Get height of the board
    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// True when (x, y) is filled or lies outside the grid
    pub fn is_locked(&self, x: i8, y: i8) -> bool {
        !matches!(self.get(x, y), Some(None))
    }

    /// Locked color at (x, y); `Gray` outside the grid
    pub fn color_at(&self, x: i8, y: i8) -> Color {
        match self.get(x, y) {
            Some(Some(kind)) => kind.color(),
            Some(None) => Color::None,
            None => Color::Gray,
        }
    }

    /// Piece collision test.
    ///
    /// A position collides when any cell lies outside `[0, W)` horizontally,
    /// below the bottom row, or on a locked cell. Cells above the top row never
    /// collide.
    pub fn collides(&self, kind: PieceKind, pos: PiecePosition) -> bool {
        cells_at(kind, pos).iter().any(|&(x, y)| {
            if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
                return true;
            }
            y >= 0 && self.is_locked(x, y)
        })
    }

    /// Inverse of [`Board::collides`]
    #[inline]
    pub fn fits(&self, kind: PieceKind, pos: PiecePosition) -> bool {
        !self.collides(kind, pos)
    }

    /// Resting position reached by dropping `pos` straight down.
    ///
    /// `pos` itself must fit; the result is the lowest fitting row above the
    /// first collision.
    pub fn drop_position(&self, kind: PieceKind, pos: PiecePosition) -> PiecePosition {
        let mut rest = pos;
        while self.fits(kind, rest.down()) {
            rest = rest.down();
        }
        rest
    }

    /// Write every in-bounds cell of a piece at `pos`.
    ///
    /// Cells above the top row are dropped; callers decide whether that is an
    /// overflow before locking.
    pub fn lock(&mut self, kind: PieceKind, pos: PiecePosition) {
        for (x, y) in cells_at(kind, pos) {
            self.set(x, y, Some(kind));
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= ROWS {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Clear all full rows and return the row indices that were cleared (sorted top to bottom)
    /// Uses a two-pointer algorithm with zero-allocation
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared_rows = ClearedRows::new();
        let width = BOARD_WIDTH as usize;
        let mut write_y = ROWS;

        // Scan from bottom to top
        for read_y in (0..ROWS).rev() {
            if self.is_row_full(read_y) {
                cleared_rows.push(read_y);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    let dst_start = write_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, dst_start);
                }
            }
        }

        for cell in &mut self.cells[..write_y * width] {
            *cell = None;
        }

        cleared_rows.reverse();
        cleared_rows
    }

    /// Number of filled cells from the highest filled cell of column `x` down to the floor.
    ///
    /// Returns 0 for an empty or out-of-range column.
    pub fn column_height(&self, x: i8) -> u8 {
        if x < 0 || x >= BOARD_WIDTH as i8 {
            return 0;
        }
        (0..BOARD_HEIGHT as i8)
            .find(|&y| self.is_locked(x, y))
            .map_or(0, |top| BOARD_HEIGHT - top as u8)
    }

    /// Height of the tallest column
    pub fn max_height(&self) -> u8 {
        (0..BOARD_WIDTH as i8)
            .map(|x| self.column_height(x))
            .max()
            .unwrap_or(0)
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_none())
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells = [None; BOARD_SIZE];
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..BOARD_HEIGHT as i8 {
            for x in 0..BOARD_WIDTH as i8 {
                let ch = match self.get(x, y).flatten() {
                    Some(kind) => kind.as_str().as_bytes()[0].to_ascii_uppercase() as char,
                    None => '.',
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rotation;

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 19), Some(199));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 20), None);
    }

    #[test]
    fn test_out_of_range_is_locked_and_gray() {
        let board = Board::new();
        assert!(board.is_locked(-1, 5));
        assert!(board.is_locked(10, 5));
        assert!(board.is_locked(3, -1));
        assert!(board.is_locked(3, 20));
        assert!(!board.is_locked(3, 5));
        assert_eq!(board.color_at(-1, 0), Color::Gray);
        assert_eq!(board.color_at(0, 0), Color::None);
    }

    #[test]
    fn test_collision_sky_is_open() {
        let board = Board::new();
        // I vertical with pivot at row 0 pokes two cells above the top
        let pos = PiecePosition::new(4, 0, Rotation::East);
        assert!(!board.collides(PieceKind::I, pos));
        // but not through the floor
        let pos = PiecePosition::new(4, 19, Rotation::East);
        assert!(board.collides(PieceKind::I, pos));
    }

    #[test]
    fn test_clear_non_contiguous_rows() {
        let mut board = Board::from_ascii(&[
            "TTTTTTTTTT",
            "..O.......",
            "LLLLLLLLLL",
            "...J......",
        ])
        .unwrap();

        let cleared = board.clear_full_rows();
        assert_eq!(cleared.as_slice(), &[16, 18]);
        assert_eq!(board.get(2, 18), Some(Some(PieceKind::O)));
        assert_eq!(board.get(3, 19), Some(Some(PieceKind::J)));
        assert_eq!(board.filled_count(), 2);
        assert!((0..20).all(|y| !board.is_row_full(y)));
    }

    #[test]
    fn test_column_height() {
        let board = Board::from_ascii(&["Z.........", "Z....S...."]).unwrap();
        assert_eq!(board.column_height(0), 2);
        assert_eq!(board.column_height(5), 1);
        assert_eq!(board.column_height(1), 0);
        assert_eq!(board.max_height(), 2);
    }

    #[test]
    fn test_from_ascii_rejects_bad_rows() {
        assert!(Board::from_ascii(&["III"]).is_none());
        assert!(Board::from_ascii(&["IIIIIIIII?"]).is_none());
    }

    #[test]
    fn test_display_matches_ascii() {
        let board = Board::from_ascii(&["I........t"]).unwrap();
        let text = board.to_string();
        assert_eq!(text.lines().count(), 20);
        assert_eq!(text.lines().last(), Some("I........T"));
    }
}
