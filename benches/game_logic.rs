use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tetris_bot::bot::{best_placement, Bot, EvalContext, ScoreWeights};
use tetris_bot::core::{Board, GameState};
use tetris_bot::types::PieceKind;

fn bench_tick(c: &mut Criterion) {
    let mut state = GameState::new(12345);

    c.bench_function("update_tick", |b| {
        b.iter(|| {
            if state.is_game_over() {
                state.restart();
            }
            black_box(state.update_tick());
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::new();
            // Fill bottom 4 rows
            for y in 16..20 {
                for x in 0..10 {
                    board.set(x, y, Some(PieceKind::I));
                }
            }
            board.clear_full_rows();
        })
    });
}

fn bench_hard_drop(c: &mut Criterion) {
    let mut state = GameState::new(12345);

    c.bench_function("hard_drop", |b| {
        b.iter(|| {
            if state.is_game_over() {
                state.restart();
            }
            black_box(state.hard_drop());
        })
    });
}

fn bench_try_move(c: &mut Criterion) {
    let mut state = GameState::new(12345);

    c.bench_function("move_right", |b| {
        b.iter(|| {
            if !state.move_right() {
                while state.move_left() {}
            }
        })
    });
}

fn bench_try_rotate(c: &mut Criterion) {
    let mut state = GameState::new(12345);

    c.bench_function("rotate_right", |b| {
        b.iter(|| {
            black_box(state.rotate_right());
        })
    });
}

fn bench_best_placement(c: &mut Criterion) {
    let board = Board::from_ascii(&[
        "..........",
        "...TT.....",
        ".TTTOO..ZZ",
        ".LLLOO.ZZJ",
        ".L.SSIIIIJ",
        ".SS..JJJJJ",
    ])
    .unwrap_or_default();
    let preview = [PieceKind::O, PieceKind::I, PieceKind::T, PieceKind::S, PieceKind::Z];
    let ctx = EvalContext {
        board: &board,
        back_to_back: 0,
        line_combo: 0,
        hold: None,
        preview: &preview,
    };
    let weights = ScoreWeights::default();

    c.bench_function("best_placement_t", |b| {
        b.iter(|| best_placement(&weights, &ctx, black_box(PieceKind::T), 0))
    });
}

fn bench_bot_piece(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    let mut bot = Bot::default();

    c.bench_function("bot_place_piece", |b| {
        b.iter(|| {
            if bot.place_piece(&mut state).is_err() {
                state.hard_drop();
            }
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_hard_drop,
    bench_try_move,
    bench_try_rotate,
    bench_best_placement,
    bench_bot_piece
);
criterion_main!(benches);
