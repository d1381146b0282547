//! Scoring module - line clear points and combo bookkeeping
//!
//! Points for a lock are `rows × tspin_mult × (back_to_back + 1) × (line_combo + 1)`,
//! always computed from the counters as they stood *before* the lock.
//!
//! | Counter | Tetris-class clear | Other clear (rows > 0) | No clear |
//! |---------|--------------------|------------------------|----------|
//! | `back_to_back` | `+= 1` | reset to 0 | unchanged |
//! | `line_combo` | `+= rows` | `+= rows` | reset to 0 |
//!
//! A clear is tetris-class when it removes 4 rows, or 2 rows with a T-spin.

use crate::types::{BASE_GRAVITY_MS, GRAVITY_STEP_MS, GRAVITY_STEP_POINTS, MIN_GRAVITY_MS};

/// Combo counters carried between locks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ComboState {
    pub back_to_back: u32,
    pub line_combo: u32,
}

/// Score calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    pub points: u32,
    pub tetris_class: bool,
    /// Counters after this lock
    pub combo: ComboState,
}

pub fn is_tetris_class(rows: u32, tspin: bool) -> bool {
    rows == 4 || (rows == 2 && tspin)
}

/// Score one lock and advance the combo counters
///
/// # Examples
///
/// ```
/// use tetris_bot_core::scoring::{calculate_score, ComboState};
///
/// let first = calculate_score(4, false, ComboState::default());
/// assert_eq!(first.points, 4);
/// assert_eq!(first.combo, ComboState { back_to_back: 1, line_combo: 4 });
///
/// let second = calculate_score(4, false, first.combo);
/// assert_eq!(second.points, 4 * 2 * 5);
/// ```
pub fn calculate_score(rows: u32, tspin: bool, before: ComboState) -> ScoreResult {
    let tspin_mult = if tspin { 2 } else { 1 };
    let points = rows
        .saturating_mul(tspin_mult)
        .saturating_mul(before.back_to_back + 1)
        .saturating_mul(before.line_combo + 1);

    let tetris_class = is_tetris_class(rows, tspin);
    let mut combo = before;
    if rows > 0 {
        combo.back_to_back = if tetris_class { before.back_to_back + 1 } else { 0 };
        combo.line_combo = before.line_combo + rows;
    } else {
        combo.line_combo = 0;
    }

    ScoreResult {
        points,
        tetris_class,
        combo,
    }
}

/// Gravity interval for the current score (milliseconds per row)
///
/// 250 ms at score 0, 5 ms faster every 4 points, never below 50 ms.
pub fn gravity_interval_ms(score: u32) -> u32 {
    let speedup = (score / GRAVITY_STEP_POINTS).saturating_mul(GRAVITY_STEP_MS);
    BASE_GRAVITY_MS.saturating_sub(speedup).max(MIN_GRAVITY_MS)
}
