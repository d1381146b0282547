//! Placement scorer - rates one resting position of one piece
//!
//! [`evaluate`] is a pure function of the weights, the board, the combo
//! counters, the hold slot, the preview and the candidate placement. It never
//! mutates the board; the candidate cells are overlaid while scanning.
//!
//! Column 0 is kept as a well for I pieces. Until every other column is at
//! least four high ("tetris ready") the left border used for wall contact is
//! column 1 and touching column 0 is heavily penalized.

use tetris_bot_core::pieces::{cells_at, offsets, PieceShape};
use tetris_bot_core::{Board, GameState};
use tetris_bot_types::{PieceKind, PiecePosition, BOARD_HEIGHT, BOARD_WIDTH};

use crate::weights::ScoreWeights;

const W: usize = BOARD_WIDTH as usize;
const H: usize = BOARD_HEIGHT as usize;

/// Everything the scorer reads besides the candidate itself
#[derive(Debug, Clone, Copy)]
pub struct EvalContext<'a> {
    pub board: &'a Board,
    pub back_to_back: u32,
    pub line_combo: u32,
    pub hold: Option<PieceKind>,
    pub preview: &'a [PieceKind],
}

impl<'a> EvalContext<'a> {
    pub fn from_state(state: &'a GameState) -> Self {
        Self {
            board: state.board(),
            back_to_back: state.back_to_back(),
            line_combo: state.line_combo(),
            hold: state.hold_piece(),
            preview: state.preview_queue(),
        }
    }

    /// Whether `kind` is in hold or among the first `window` previews
    pub fn is_soon(&self, kind: PieceKind, window: usize) -> bool {
        self.hold == Some(kind) || self.preview.iter().take(window).any(|&k| k == kind)
    }
}

/// Score and the sub-metrics behind it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Evaluation {
    pub score: i64,
    pub lines_cleared: u32,
    pub total_height: u32,
    pub cliff_left: i64,
    pub cliff_right: i64,
    pub shadows: u32,
    /// Buried holes under the piece's columns
    pub bubbles: u32,
    /// Buried holes anywhere on the board with the piece placed
    pub board_bubbles: u32,
    pub adj_tiles: u32,
    pub adj_walls: u32,
    pub tetris_ready: bool,
    pub perfect_clear: bool,
    pub bubble_popper: bool,
    pub emergency: bool,
}

struct Overlay<'a> {
    board: &'a Board,
    piece: PieceShape,
}

impl Overlay<'_> {
    fn is_piece(&self, x: i8, y: i8) -> bool {
        self.piece.contains(&(x, y))
    }

    /// Locked board cell, ignoring walls
    fn is_tile(&self, x: i8, y: i8) -> bool {
        matches!(self.board.get(x, y), Some(Some(_)))
    }
}

/// Rate `kind` resting at `pos`
pub fn evaluate(
    weights: &ScoreWeights,
    ctx: &EvalContext<'_>,
    kind: PieceKind,
    pos: PiecePosition,
) -> Evaluation {
    let overlay = Overlay {
        board: ctx.board,
        piece: cells_at(kind, pos),
    };
    let mut ev = Evaluation::default();

    let mut highest = [0i64; W];
    let mut row_cleared = [false; H];

    for y in 0..H as i8 {
        let mut filled = 0;
        let tile_height = H as i64 - y as i64;
        for x in 0..W as i8 {
            let piece = overlay.is_piece(x, y);
            let column = &mut highest[x as usize];
            if piece || overlay.is_tile(x, y) {
                filled += 1;
                *column = (*column).max(tile_height);
            } else if tile_height < *column {
                ev.board_bubbles += 1;
            }

            if !piece {
                continue;
            }
            ev.total_height += tile_height as u32;

            for (dx, dy) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
                if overlay.is_tile(x + dx, y + dy) {
                    ev.adj_tiles += 1;
                }
            }
            if x == W as i8 - 1 {
                ev.adj_walls += 1;
            }
            if y == H as i8 - 1 {
                ev.adj_walls += 1;
            }
        }
        if filled == W {
            row_cleared[y as usize] = true;
            ev.lines_cleared += 1;
        }
    }

    ev.tetris_ready = highest[1..].iter().all(|&h| h >= 4);
    let highest_fill = highest.iter().copied().max().unwrap_or(0);

    let border_left: i8 = if ev.tetris_ready { 0 } else { 1 };
    ev.adj_walls += overlay
        .piece
        .iter()
        .filter(|&&(x, y)| x == border_left && (0..H as i8).contains(&y))
        .count() as u32;

    let off = offsets(kind, pos.rotation);
    let top = pos.y + off.top;
    let bottom = pos.y + off.bottom;
    let left = pos.x + off.left;
    let right = pos.x + off.right;

    let b2b = ctx.back_to_back as i64;
    let mut adj_tiles_w = weights.adj_tiles;
    let mut adj_walls_w = weights.adj_walls;
    let mut height_w = weights.height;
    let mut shadow_w = weights.shadow;
    let mut row_clear_w = weights.row_clear - weights.back_to_back_row_clear_step * b2b;
    let mut perfect_w = weights.perfect;

    let mut score: i64 = 0;

    ev.bubble_popper = ev.board_bubbles > weights.popper.bubble_threshold;
    if ev.bubble_popper {
        shadow_w = weights.popper.shadow;
        row_clear_w = weights.popper.row_clear;
    } else if !ev.tetris_ready && left < 1 {
        score -= weights.reserved_column;
    }

    if ctx.line_combo > 0 {
        row_clear_w = weights.combo_row_clear * ctx.line_combo as i64
            - weights.combo_back_to_back_penalty * b2b;
        perfect_w -= weights.combo_perfect_penalty * b2b;
    }

    let i_soon = ctx.is_soon(PieceKind::I, weights.soon_window);
    ev.emergency = highest_fill >= weights.emergency.trigger_height as i64 && !i_soon;
    if ev.emergency {
        let e = &weights.emergency;
        height_w = e.height;
        row_clear_w = e.row_clear;
        shadow_w = e.shadow;
        adj_walls_w = e.adj_walls;
        adj_tiles_w = e.adj_tiles;
        perfect_w = e.perfect;
    }

    score += ev.adj_tiles as i64 * adj_tiles_w;
    score += ev.adj_walls as i64 * adj_walls_w;

    score += match ev.lines_cleared {
        1 => row_clear_w / 2,
        2 | 3 => ev.lines_cleared as i64 * row_clear_w,
        4 => weights.tetris,
        _ => 0,
    };

    ev.perfect_clear = ev.lines_cleared > 0
        && (top.max(0)..=bottom).all(|y| row_cleared.get(y as usize).copied().unwrap_or(false));
    if ev.perfect_clear {
        score += perfect_w;
    }

    if kind == PieceKind::I && !i_soon {
        score -= weights.long_piece;
    }
    if kind != PieceKind::I && left == 0 && !i_soon {
        score -= weights.reserved_touch;
    }

    let height_of = |x: i8| highest[x as usize];
    let cliff_left = if left > border_left {
        height_of(left) - height_of(left - 1)
    } else {
        0
    };
    let cliff_right = if right < W as i8 - 1 {
        height_of(right) - height_of(right + 1)
    } else {
        0
    };
    ev.cliff_left = (cliff_left - 1).max(-1);
    ev.cliff_right = (cliff_right - 1).max(-1);
    score += (ev.cliff_left + ev.cliff_right) * weights.cliffs;

    score += ev.total_height as i64 * height_w;

    // Walk down from each piece cell: empties before the first locked cell are
    // shadows, empties after it are bubbles.
    for &(x, y) in overlay.piece.iter().filter(|&&(_, y)| y >= 0) {
        let mut solid_found = false;
        for s in y + 1..H as i8 {
            if overlay.is_piece(x, s) {
                break;
            }
            if overlay.is_tile(x, s) {
                solid_found = true;
            } else if solid_found {
                ev.bubbles += 1;
            } else {
                ev.shadows += 1;
            }
        }
    }
    score += ev.shadows as i64 * shadow_w;
    score += ev.bubbles as i64 * weights.bubble;

    ev.score = score;
    ev
}
