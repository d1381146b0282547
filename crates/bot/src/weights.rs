//! Placement scorer weights
//!
//! One [`ScoreWeights`] value drives every evaluation in a session. The defaults
//! are the hand-tuned values the bot plays well with; a JSON file can override
//! any subset of them.
//!
//! | Weight | Default | Applied to |
//! |--------|---------|------------|
//! | `adj_tiles` | 100 | locked cells touching the piece |
//! | `adj_walls` | 100 | piece cells on the floor, right wall or left border |
//! | `height` | -100 | summed height of the piece cells |
//! | `shadow` | -1000 | empty cells covered by the piece |
//! | `bubble` | -100 | empty cells buried under a locked cell below the piece |
//! | `row_clear` | 500 | base row clear bonus |
//! | `tetris` | 900000 | four-row clear |
//! | `perfect` | 1200 | every row the piece touches is cleared |
//! | `cliffs` | -200 | height step next to the piece, minus one |

use serde::Deserialize;

/// Weights swapped in when the stack is high and no I piece is coming
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EmergencyWeights {
    /// Highest column height that triggers the profile
    pub trigger_height: u8,
    pub height: i64,
    pub row_clear: i64,
    pub shadow: i64,
    pub adj_walls: i64,
    pub adj_tiles: i64,
    pub perfect: i64,
}

impl Default for EmergencyWeights {
    fn default() -> Self {
        Self {
            trigger_height: 12,
            height: -5000,
            row_clear: 6000,
            shadow: -800,
            adj_walls: 0,
            adj_tiles: 10,
            perfect: 100_000,
        }
    }
}

/// Weights swapped in when the board has too many buried holes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PopperWeights {
    /// Board bubbles above this count activate the profile
    pub bubble_threshold: u32,
    pub shadow: i64,
    pub row_clear: i64,
}

impl Default for PopperWeights {
    fn default() -> Self {
        Self {
            bubble_threshold: 10,
            shadow: -60_000,
            row_clear: 6000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub adj_tiles: i64,
    pub adj_walls: i64,
    pub height: i64,
    pub shadow: i64,
    pub bubble: i64,
    pub row_clear: i64,
    pub tetris: i64,
    pub perfect: i64,
    pub cliffs: i64,
    /// Row clear bonus lost per back-to-back step
    pub back_to_back_row_clear_step: i64,
    /// Row clear bonus per line-combo row while a combo is running
    pub combo_row_clear: i64,
    /// Row clear bonus lost per back-to-back step while a combo is running
    pub combo_back_to_back_penalty: i64,
    /// Perfect bonus lost per back-to-back step while a combo is running
    pub combo_perfect_penalty: i64,
    /// Penalty for touching the reserved well column before a tetris is ready
    pub reserved_column: i64,
    /// Penalty for a non-I piece touching column 0 with no I coming
    pub reserved_touch: i64,
    /// Penalty for spending the only I piece in sight
    pub long_piece: i64,
    /// How many preview slots count as "soon"
    pub soon_window: usize,
    pub popper: PopperWeights,
    pub emergency: EmergencyWeights,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            adj_tiles: 100,
            adj_walls: 100,
            height: -100,
            shadow: -1000,
            bubble: -100,
            row_clear: 500,
            tetris: 900_000,
            perfect: 1200,
            cliffs: -200,
            back_to_back_row_clear_step: 100,
            combo_row_clear: 400,
            combo_back_to_back_penalty: 2400,
            combo_perfect_penalty: 1200,
            reserved_column: 10_000,
            reserved_touch: 100,
            long_piece: 300,
            soon_window: 5,
            popper: PopperWeights::default(),
            emergency: EmergencyWeights::default(),
        }
    }
}

impl ScoreWeights {
    /// Parse weights from JSON; missing fields keep their defaults.
    ///
    /// ```
    /// use tetris_bot_ai::ScoreWeights;
    ///
    /// let w = ScoreWeights::from_json(r#"{ "shadow": -2000, "emergency": { "trigger_height": 10 } }"#).unwrap();
    /// assert_eq!(w.shadow, -2000);
    /// assert_eq!(w.emergency.trigger_height, 10);
    /// assert_eq!(w.tetris, ScoreWeights::default().tetris);
    /// ```
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_is_default() {
        assert_eq!(ScoreWeights::from_json("{}").unwrap(), ScoreWeights::default());
    }

    #[test]
    fn test_rejects_wrong_types() {
        assert!(ScoreWeights::from_json(r#"{ "shadow": "deep" }"#).is_err());
    }

    #[test]
    fn test_tetris_outweighs_everything() {
        let w = ScoreWeights::default();
        assert!(w.tetris > w.reserved_column * 10);
        assert!(w.tetris > w.emergency.perfect);
    }
}
