//! Bot integration tests - decisions on set-up boards and long self-play

use tetris_bot::bot::{enumerate, evaluate, Bot, EvalContext, ScoreWeights};
use tetris_bot::core::GameState;
use tetris_bot::types::{GameAction, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

/// Rows 16..19 full except the left well
fn well_board(gs: &mut GameState) {
    for y in 16..BOARD_HEIGHT as i8 {
        for x in 1..BOARD_WIDTH as i8 {
            gs.board_mut().set(x, y, Some(PieceKind::L));
        }
    }
}

#[test]
fn test_bot_drops_i_into_well_for_perfect_clear() {
    let mut gs = GameState::new(2);
    well_board(&mut gs);
    assert!(gs.replace_active(PieceKind::I));

    let mut bot = Bot::default();
    let start = gs.piece_id();
    let mut steps = 0;
    while gs.piece_id() == start {
        let action = bot.play(&mut gs).unwrap();
        assert_ne!(action, GameAction::Hold);
        steps += 1;
        assert!(steps < 20, "bot did not finish the piece");
    }

    let event = gs.take_last_event().unwrap();
    assert_eq!(event.kind, PieceKind::I);
    assert_eq!(event.lines_cleared, 4);
    assert!(event.perfect_clear);
    assert!(gs.board().is_empty());
    assert_eq!(gs.score(), 4);
}

#[test]
fn test_well_placement_outscores_every_other_placement() {
    let mut gs = GameState::new(2);
    well_board(&mut gs);
    assert!(gs.replace_active(PieceKind::I));

    let bot = Bot::default();
    let decision = bot.decide(&gs).unwrap();
    assert!(!decision.chose_swap);
    let best = decision.active.unwrap();
    assert_eq!(best.pos.x, 0);
    assert!(matches!(best.pos.rotation, Rotation::East | Rotation::West));
    assert_eq!(best.eval.lines_cleared, 4);

    let ctx = EvalContext::from_state(&gs);
    let weights = ScoreWeights::default();
    for pos in enumerate(gs.board(), PieceKind::I, 0) {
        let ev = evaluate(&weights, &ctx, PieceKind::I, pos);
        if ev.lines_cleared < 4 {
            assert!(ev.score < best.eval.score, "{:?}", pos);
        }
    }
}

#[test]
fn test_bot_keeps_well_open_on_flat_board() {
    let gs = GameState::new(9);
    let decision = Bot::default().decide(&gs).unwrap();
    let chosen = if decision.chose_swap {
        decision.swap
    } else {
        decision.active
    }
    .unwrap();

    // the reserved column stays empty until the stack is tetris ready
    if chosen.kind != PieceKind::I {
        assert!(tetris_bot::core::pieces::cells_at(chosen.kind, chosen.pos)
            .iter()
            .all(|&(x, _)| x != 0));
    }
}

#[test]
fn test_self_play_is_deterministic() {
    let run = || {
        let mut gs = GameState::new(21);
        let mut bot = Bot::default();
        let mut actions = Vec::new();
        for _ in 0..400 {
            actions.push(bot.play(&mut gs));
        }
        (actions, gs.snapshot())
    };
    assert_eq!(run(), run());
}

#[test]
fn test_long_self_play_clears_lines() {
    let mut gs = GameState::new(1);
    let mut bot = Bot::default();
    let mut lines = 0;
    let mut pieces = 0;

    while pieces < 300 {
        if bot.place_piece(&mut gs).is_err() {
            gs.hard_drop();
        }
        if let Some(event) = gs.take_last_event() {
            pieces += 1;
            lines += event.lines_cleared;
        }
    }
    assert!(lines > 0);
}

#[test]
fn test_step_mode_always_makes_progress() {
    let mut gs = GameState::new(13);
    let mut bot = Bot::default();
    let mut idle = 0;
    let mut last = gs.piece_id();

    for _ in 0..2000 {
        assert!(bot.play(&mut gs).is_some());
        if gs.piece_id() == last {
            idle += 1;
            assert!(idle < 30, "bot stalled on piece {}", last);
        } else {
            idle = 0;
            last = gs.piece_id();
        }
    }
}
