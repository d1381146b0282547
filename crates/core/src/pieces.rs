//! Pieces module - tetromino shape tables and wall adjustment
//!
//! Every piece has four rotation bitmaps, each a small rectangle with a pivot
//! cell. A piece's board position names where its pivot sits, so the cells it
//! covers are the filled bitmap cells shifted by `position - pivot`.
//!
//! All tables are built at compile time from the ASCII art below; nothing here
//! holds mutable state.
//!
//! Rotation never kicks upward. When a rotated bitmap pokes past a side wall
//! it is shifted horizontally by the minimum amount that brings both edges back
//! inside the board; [`wall_adjust`] fails only if no such shift exists.

use crate::types::{PieceKind, PiecePosition, Rotation, BOARD_WIDTH};

/// Offset of a single mino relative to the pivot
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from the pivot
pub type PieceShape = [MinoOffset; 4];

/// Signed extents of a rotation relative to its pivot.
///
/// `left` and `top` are never positive, `right` and `bottom` never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Offsets {
    pub left: i8,
    pub right: i8,
    pub top: i8,
    pub bottom: i8,
}

/// One rotation of one piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationShape {
    width: u8,
    height: u8,
    /// Row masks top to bottom, bit `x` set when column `x` is filled.
    rows: [u8; 4],
    pivot: (i8, i8),
    cells: PieceShape,
}

impl RotationShape {
    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Whether bitmap cell (col, row) is filled. Out-of-range reads are empty.
    pub fn is_filled(&self, col: u8, row: u8) -> bool {
        col < self.width && row < self.height && self.rows[row as usize] & (1 << col) != 0
    }

    /// Pivot as (col, row) inside the bitmap
    pub fn pivot(&self) -> (i8, i8) {
        self.pivot
    }

    /// Filled cells relative to the pivot
    pub fn cells(&self) -> PieceShape {
        self.cells
    }

    pub fn offsets(&self) -> Offsets {
        Offsets {
            left: -self.pivot.0,
            right: self.width as i8 - 1 - self.pivot.0,
            top: -self.pivot.1,
            bottom: self.height as i8 - 1 - self.pivot.1,
        }
    }
}

const fn shape(art: &[&str], pivot: (i8, i8)) -> RotationShape {
    let height = art.len();
    let width = art[0].len();
    let mut rows = [0u8; 4];
    let mut cells = [(0i8, 0i8); 4];
    let mut filled = 0;

    let mut y = 0;
    while y < height {
        let bytes = art[y].as_bytes();
        assert!(bytes.len() == width);
        let mut x = 0;
        while x < width {
            if bytes[x] == b'#' {
                rows[y] |= 1 << x;
                cells[filled] = (x as i8 - pivot.0, y as i8 - pivot.1);
                filled += 1;
            }
            x += 1;
        }
        y += 1;
    }
    assert!(filled == 4);

    RotationShape {
        width: width as u8,
        height: height as u8,
        rows,
        pivot,
        cells,
    }
}

/// Indexed by `PieceKind::index()` then `Rotation::index()`.
static SHAPES: [[RotationShape; 4]; 7] = [
    // I
    [
        shape(&["####"], (2, 0)),
        shape(&["#", "#", "#", "#"], (0, 2)),
        shape(&["####"], (1, 0)),
        shape(&["#", "#", "#", "#"], (0, 1)),
    ],
    // O
    [
        shape(&["##", "##"], (1, 1)),
        shape(&["##", "##"], (1, 1)),
        shape(&["##", "##"], (1, 1)),
        shape(&["##", "##"], (1, 1)),
    ],
    // T
    [
        shape(&[".#.", "###"], (1, 1)),
        shape(&["#.", "##", "#."], (0, 1)),
        shape(&["###", ".#."], (1, 0)),
        shape(&[".#", "##", ".#"], (1, 1)),
    ],
    // S
    [
        shape(&[".##", "##."], (1, 1)),
        shape(&["#.", "##", ".#"], (0, 1)),
        shape(&[".##", "##."], (1, 0)),
        shape(&["#.", "##", ".#"], (1, 1)),
    ],
    // Z
    [
        shape(&["##.", ".##"], (1, 1)),
        shape(&[".#", "##", "#."], (0, 1)),
        shape(&["##.", ".##"], (1, 0)),
        shape(&[".#", "##", "#."], (1, 1)),
    ],
    // J
    [
        shape(&["#..", "###"], (1, 1)),
        shape(&["##", "#.", "#."], (0, 1)),
        shape(&["###", "..#"], (1, 0)),
        shape(&[".#", ".#", "##"], (1, 1)),
    ],
    // L
    [
        shape(&["..#", "###"], (1, 1)),
        shape(&["#.", "#.", "##"], (0, 1)),
        shape(&["###", "#.."], (1, 0)),
        shape(&["##", ".#", ".#"], (1, 1)),
    ],
];

/// Full rotation record for a piece kind
pub fn rotation_shape(kind: PieceKind, rotation: Rotation) -> &'static RotationShape {
    &SHAPES[kind.index()][rotation.index()]
}

/// Bitmap for any integer rotation index, normalized modulo 4
pub fn bitmap(kind: PieceKind, rotation: i32) -> &'static RotationShape {
    rotation_shape(kind, Rotation::from_index(rotation))
}

/// Get the shape (mino offsets from the pivot) for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    rotation_shape(kind, rotation).cells
}

pub fn pivot(kind: PieceKind, rotation: Rotation) -> (i8, i8) {
    rotation_shape(kind, rotation).pivot
}

pub fn offsets(kind: PieceKind, rotation: Rotation) -> Offsets {
    rotation_shape(kind, rotation).offsets()
}

/// Absolute board cells covered by a piece at `pos`
pub fn cells_at(kind: PieceKind, pos: PiecePosition) -> PieceShape {
    let mut out = get_shape(kind, pos.rotation);
    for cell in &mut out {
        cell.0 += pos.x;
        cell.1 += pos.y;
    }
    out
}

/// Shift `pos` horizontally so the piece lies within the side walls.
///
/// Returns `None` when both edges would need shifting.
pub fn wall_adjust(kind: PieceKind, pos: PiecePosition) -> Option<PiecePosition> {
    let off = offsets(kind, pos.rotation);
    let max_x = BOARD_WIDTH as i8 - 1;

    let mut x = pos.x;
    let mut shifted = false;
    if x + off.left < 0 {
        x = -off.left;
        shifted = true;
    }
    if x + off.right > max_x {
        if shifted {
            return None;
        }
        x = max_x - off.right;
    }
    Some(PiecePosition { x, ..pos })
}

/// Rotated and wall-adjusted candidate, before any collision test
pub fn rotation_candidate(
    kind: PieceKind,
    pos: PiecePosition,
    clockwise: bool,
) -> Option<PiecePosition> {
    let rotated = if clockwise {
        pos.rotated_cw()
    } else {
        pos.rotated_ccw()
    };
    wall_adjust(kind, rotated)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn art(kind: PieceKind, rotation: Rotation) -> Vec<String> {
        let s = rotation_shape(kind, rotation);
        (0..s.height())
            .map(|row| {
                (0..s.width())
                    .map(|col| if s.is_filled(col, row) { '#' } else { '.' })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_every_rotation_has_four_cells() {
        for kind in PieceKind::ALL {
            for rotation in Rotation::ALL {
                let s = rotation_shape(kind, rotation);
                let mut count = 0;
                for row in 0..s.height() {
                    for col in 0..s.width() {
                        if s.is_filled(col, row) {
                            count += 1;
                        }
                    }
                }
                assert_eq!(count, 4, "{:?} {:?}", kind, rotation);
            }
        }
    }

    #[test]
    fn test_pivot_inside_bitmap() {
        for kind in PieceKind::ALL {
            for rotation in Rotation::ALL {
                let s = rotation_shape(kind, rotation);
                let (px, py) = s.pivot();
                assert!(px >= 0 && (px as u8) < s.width());
                assert!(py >= 0 && (py as u8) < s.height());
            }
        }
    }

    #[test]
    fn test_l_and_t_art() {
        assert_eq!(art(PieceKind::L, Rotation::North), vec!["..#", "###"]);
        assert_eq!(art(PieceKind::L, Rotation::West), vec!["##", ".#", ".#"]);
        assert_eq!(art(PieceKind::T, Rotation::South), vec!["###", ".#."]);
    }

    #[test]
    fn test_i_offsets() {
        let o = offsets(PieceKind::I, Rotation::North);
        assert_eq!(o, Offsets { left: -2, right: 1, top: 0, bottom: 0 });
        let o = offsets(PieceKind::I, Rotation::East);
        assert_eq!(o, Offsets { left: 0, right: 0, top: -2, bottom: 1 });
    }

    #[test]
    fn test_negative_rotation_wraps() {
        assert_eq!(bitmap(PieceKind::J, -1), bitmap(PieceKind::J, 3));
        assert_eq!(bitmap(PieceKind::J, 7), bitmap(PieceKind::J, 3));
    }

    #[test]
    fn test_wall_adjust_shifts_minimally() {
        let pos = PiecePosition::new(0, 5, Rotation::North);
        let adjusted = wall_adjust(PieceKind::I, pos).unwrap();
        assert_eq!(adjusted.x, 2);

        let pos = PiecePosition::new(9, 5, Rotation::North);
        let adjusted = wall_adjust(PieceKind::I, pos).unwrap();
        assert_eq!(adjusted.x, 8);

        let pos = PiecePosition::new(4, 5, Rotation::North);
        assert_eq!(wall_adjust(PieceKind::I, pos), Some(pos));
    }

    #[test]
    fn test_cells_at_uses_pivot() {
        let cells = cells_at(PieceKind::T, PiecePosition::new(4, 10, Rotation::North));
        assert!(cells.contains(&(4, 9)));
        assert!(cells.contains(&(3, 10)));
        assert!(cells.contains(&(5, 10)));
        assert!(cells.contains(&(4, 10)));
    }
}
