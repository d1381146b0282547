//! Placement search
//!
//! Tries every rotation and every column where the rotated bitmap fits between
//! the walls, drops the piece straight down from the starting row using the
//! engine's own collision rule, and keeps the best evaluation. Ties keep the
//! earliest candidate in rotation-major, column-ascending order.

use arrayvec::ArrayVec;
use tetris_bot_core::pieces::offsets;
use tetris_bot_core::Board;
use tetris_bot_types::{PieceKind, PiecePosition, Rotation, BOARD_WIDTH};

use crate::eval::{evaluate, EvalContext, Evaluation};
use crate::weights::ScoreWeights;

pub const MAX_PLACEMENTS: usize = 4 * BOARD_WIDTH as usize;

/// A scored resting position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub kind: PieceKind,
    pub pos: PiecePosition,
    pub eval: Evaluation,
}

/// Resting positions reachable by a straight drop from `start_y`
pub fn enumerate(
    board: &Board,
    kind: PieceKind,
    start_y: i8,
) -> ArrayVec<PiecePosition, MAX_PLACEMENTS> {
    let mut out = ArrayVec::new();
    for rotation in Rotation::ALL {
        let off = offsets(kind, rotation);
        for x in 0..BOARD_WIDTH as i8 {
            if x + off.left < 0 || x + off.right > BOARD_WIDTH as i8 - 1 {
                continue;
            }
            let start = PiecePosition::new(x, start_y, rotation);
            if board.collides(kind, start) {
                continue;
            }
            out.push(board.drop_position(kind, start));
        }
    }
    out
}

/// Highest scoring placement of `kind`, or `None` when nothing fits
pub fn best_placement(
    weights: &ScoreWeights,
    ctx: &EvalContext<'_>,
    kind: PieceKind,
    start_y: i8,
) -> Option<Candidate> {
    let mut best: Option<Candidate> = None;
    for pos in enumerate(ctx.board, kind, start_y) {
        let eval = evaluate(weights, ctx, kind, pos);
        if best.map_or(true, |b| eval.score > b.eval.score) {
            best = Some(Candidate { kind, pos, eval });
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enumerate_counts_on_empty_board() {
        let board = Board::new();
        // I: 7 horizontal columns twice, 10 vertical columns twice
        assert_eq!(enumerate(&board, PieceKind::I, 0).len(), 7 + 10 + 7 + 10);
        // O: 9 columns in each of the 4 rotations
        assert_eq!(enumerate(&board, PieceKind::O, 0).len(), 36);
    }

    #[test]
    fn test_enumerated_positions_rest_on_something() {
        let board = Board::from_ascii(&["....SS....", "...SS....."]).unwrap();
        for kind in PieceKind::ALL {
            for pos in enumerate(&board, kind, 0) {
                assert!(board.fits(kind, pos));
                assert!(board.collides(kind, pos.down()));
            }
        }
    }

    #[test]
    fn test_blocked_start_row_yields_nothing() {
        let mut board = Board::new();
        for x in 0..BOARD_WIDTH as i8 {
            board.set(x, 0, Some(PieceKind::Z));
            board.set(x, 1, Some(PieceKind::Z));
        }
        assert!(enumerate(&board, PieceKind::T, 0).is_empty());
        let preview = [PieceKind::O; 5];
        let ctx = EvalContext {
            board: &board,
            back_to_back: 0,
            line_combo: 0,
            hold: None,
            preview: &preview,
        };
        assert!(best_placement(&ScoreWeights::default(), &ctx, PieceKind::T, 0).is_none());
    }

    #[test]
    fn test_best_is_first_of_equal_scores() {
        let board = Board::new();
        let preview = [PieceKind::I; 5];
        let ctx = EvalContext {
            board: &board,
            back_to_back: 0,
            line_combo: 0,
            hold: None,
            preview: &preview,
        };
        let w = ScoreWeights::default();
        let best = best_placement(&w, &ctx, PieceKind::O, 0).unwrap();
        for pos in enumerate(&board, PieceKind::O, 0) {
            assert!(evaluate(&w, &ctx, PieceKind::O, pos).score <= best.eval.score);
        }
        // all four O rotations score alike, so the North one wins
        assert_eq!(best.pos.rotation, Rotation::North);
    }
}
