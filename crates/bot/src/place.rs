use tetris_bot_core::pieces::offsets;
use tetris_bot_core::GameState;
use tetris_bot_types::{GameAction, Rotation, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceError {
    HoldUnavailable,
    RotationBlocked,
    XOutOfBounds,
    XBlocked,
    NotPlayable,
    NoActive,
}

impl PlaceError {
    pub fn code(self) -> &'static str {
        match self {
            PlaceError::HoldUnavailable => "hold_unavailable",
            PlaceError::NotPlayable => "not_playable",
            PlaceError::RotationBlocked
            | PlaceError::XOutOfBounds
            | PlaceError::XBlocked
            | PlaceError::NoActive => "invalid_place",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            PlaceError::HoldUnavailable => "hold requested when unavailable",
            PlaceError::RotationBlocked => "could not rotate to target rotation",
            PlaceError::XOutOfBounds => "target x would place piece out of bounds",
            PlaceError::XBlocked => "could not move to target x due to collision",
            PlaceError::NotPlayable => "game is over",
            PlaceError::NoActive => "no active piece",
        }
    }
}

impl std::fmt::Display for PlaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl std::error::Error for PlaceError {}

/// Rotate, shift and hard-drop the active piece in one call.
///
/// On error the engine may be left part way (rotated or shifted, not dropped).
pub fn apply_place(
    state: &mut GameState,
    target_x: i8,
    target_rot: Rotation,
    use_hold: bool,
) -> Result<(), PlaceError> {
    if state.is_game_over() {
        return Err(PlaceError::NotPlayable);
    }

    if use_hold && !state.apply_action(GameAction::Hold) {
        return Err(PlaceError::HoldUnavailable);
    }

    let Some(active0) = state.active() else {
        return Err(PlaceError::NoActive);
    };

    // Try the shorter direction first; a 180 tries clockwise then counter-clockwise.
    let cw = active0.pos.rotation.cw_steps_to(target_rot);
    let ccw = (4 - cw) % 4;
    let mut plans = [(true, cw), (false, ccw)];
    if plans[1].1 < plans[0].1 {
        plans.swap(0, 1);
    }

    let snapshot = state.clone();
    let mut rotated = false;
    for (clockwise, steps) in plans {
        *state = snapshot.clone();
        let mut ok = true;
        for _ in 0..steps {
            let turned = if clockwise {
                state.rotate_right()
            } else {
                state.rotate_left()
            };
            if !turned {
                ok = false;
                break;
            }
        }
        if ok {
            rotated = true;
            break;
        }
    }
    if !rotated {
        return Err(PlaceError::RotationBlocked);
    }

    let Some(active) = state.active() else {
        return Err(PlaceError::NoActive);
    };
    if active.pos.rotation != target_rot {
        return Err(PlaceError::RotationBlocked);
    }

    let off = offsets(active.kind, target_rot);
    let (left, right) = (
        target_x as i16 + off.left as i16,
        target_x as i16 + off.right as i16,
    );
    if left < 0 || right >= BOARD_WIDTH as i16 {
        return Err(PlaceError::XOutOfBounds);
    }

    let dx = target_x - active.pos.x;
    for _ in 0..dx.unsigned_abs() {
        let moved = if dx > 0 {
            state.move_right()
        } else {
            state.move_left()
        };
        if !moved {
            return Err(PlaceError::XBlocked);
        }
    }

    if !state.hard_drop() {
        return Err(PlaceError::NoActive);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tetris_bot_types::PieceKind;

    #[test]
    fn place_rejected_when_game_over() {
        let mut gs = GameState::new(1);
        for _ in 0..200 {
            if gs.is_game_over() {
                break;
            }
            gs.hard_drop();
        }

        let err = apply_place(&mut gs, 4, Rotation::North, false).unwrap_err();
        assert_eq!(err, PlaceError::NotPlayable);
    }

    #[test]
    fn place_rejected_when_x_out_of_bounds() {
        let mut gs = GameState::new(1);

        let a = gs.active().expect("expected active piece");
        let err = apply_place(&mut gs, -50, a.pos.rotation, false).unwrap_err();
        assert_eq!(err, PlaceError::XOutOfBounds);
        assert_eq!(err.code(), "invalid_place");
    }

    #[test]
    fn place_rejects_extreme_x_without_overflow() {
        let mut gs = GameState::new(1);
        assert!(gs.replace_active(PieceKind::I));

        for x in [i8::MIN, i8::MIN + 1, i8::MAX - 1, i8::MAX] {
            let err = apply_place(&mut gs, x, Rotation::North, false).unwrap_err();
            assert_eq!(err, PlaceError::XOutOfBounds, "x = {}", x);
        }
        assert!(gs.board().is_empty());
    }

    #[test]
    fn place_rejected_when_x_blocked_by_collision() {
        let mut gs = GameState::new(1);
        assert!(gs.replace_active(PieceKind::O));
        let a = gs.active().unwrap();

        // Wall off the column just left of the O.
        let wall_x = a.pos.x - 2;
        for y in 0..20 {
            gs.board_mut().set(wall_x, y, Some(PieceKind::I));
        }

        let err = apply_place(&mut gs, 1, Rotation::North, false).unwrap_err();
        assert_eq!(err, PlaceError::XBlocked);
    }

    #[test]
    fn second_hold_is_rejected() {
        let mut gs = GameState::new(1);
        assert!(gs.swap());
        let err = apply_place(&mut gs, 4, Rotation::North, true).unwrap_err();
        assert_eq!(err, PlaceError::HoldUnavailable);
    }

    #[test]
    fn place_locks_at_target() {
        let mut gs = GameState::new(1);
        assert!(gs.replace_active(PieceKind::I));

        apply_place(&mut gs, 0, Rotation::East, false).unwrap();
        for y in 16..20 {
            assert!(gs.is_locked(0, y));
        }
        assert_eq!(gs.board().filled_count(), 4);
    }
}
