//! Board tests - match engine behaviour through the public API

use tui_match3::core::{Board, BoardConfig, BoardError, CellPos, Phase, RandomPieceFactory, ScriptedFactory, SwapOutcome};
use tui_match3::types::PieceKind::{self, Emerald as E, Ruby as R, Sapphire as S, Topaz as T};
use tui_match3::types::{PointerSample, Vec2, TICK_MS};

/// 8x8 board without runs: kind index `(row + 2 * col) % 4`.
fn striped_layout() -> Vec<Vec<PieceKind>> {
    (0..8)
        .map(|row| (0..8).map(|col| PieceKind::ALL[(row + 2 * col) % 4]).collect())
        .collect()
}

fn board(layout: Vec<Vec<PieceKind>>, refill: Vec<PieceKind>) -> Board {
    let config = BoardConfig::new(layout.len(), layout[0].len());
    Board::from_kinds(config, &layout, ScriptedFactory::new(refill)).unwrap()
}

fn letters(board: &Board) -> Vec<String> {
    board.snapshot().letter_rows()
}

/// Pointer position at the centre of a tile.
fn centre(board: &Board, row: usize, col: usize) -> Vec2 {
    let half = board.config().tile_size / 2.0;
    board.target(row, col).unwrap() + Vec2::new(half, half)
}

fn click(board: &mut Board, row: usize, col: usize) {
    let at = centre(board, row, col);
    board.update(PointerSample::new(at, true), TICK_MS);
    board.update(PointerSample::new(at, false), TICK_MS);
}

fn run_until_idle(board: &mut Board) {
    for _ in 0..1000 {
        if !board.is_busy() {
            return;
        }
        board.update(PointerSample::idle(), TICK_MS);
    }
    panic!("board never settled");
}

#[test]
fn test_fresh_board_is_full_with_no_score() {
    let mut board = Board::new(BoardConfig::default(), RandomPieceFactory::new(3)).unwrap();
    assert_eq!(board.occupied_count(), 64);
    assert!(!board.has_any_run());
    assert_eq!(board.take_score(), 0);
    assert!(!board.take_failed_swap());
    assert_eq!(board.phase(), Phase::Idle);
}

#[test]
fn test_single_run_detected_and_removed() {
    let mut layout = striped_layout();
    for col in 3..6 {
        layout[2][col] = R;
    }
    let mut board = board(layout, vec![]);

    assert!(board.check_matches());
    for col in 3..6 {
        assert!(board.get(2, col).unwrap().is_matched());
    }
    assert!(!board.get(2, 2).unwrap().is_matched());

    assert_eq!(board.remove_matches(), 3);
    assert_eq!(board.occupied_count(), 61);
    for col in 3..6 {
        assert!(board.get(2, col).is_none());
    }

    assert_eq!(board.take_score(), 3);
    assert_eq!(board.take_score(), 0);
}

#[test]
fn test_factory_run_in_top_row_scores_three() {
    let config = BoardConfig::default().with_screening(false);
    let factory = ScriptedFactory::new([R, R, R, E, S, T, E, S]);
    let mut board = Board::new(config, factory).unwrap();
    assert_eq!(letters(&board)[0], "RRRESTES");

    assert!(board.check_matches());
    for col in 0..3 {
        assert!(board.get(0, col).unwrap().is_matched());
    }
    assert_eq!(board.remove_matches(), 3);
    for col in 0..3 {
        assert!(board.get(0, col).is_none());
    }
    assert_eq!(board.take_score(), 3);
}

#[test]
fn test_negative_settle_tolerance_is_rejected() {
    let mut config = BoardConfig::new(4, 4);
    config.settle_epsilon = -1.0;
    let layout = vec![
        vec![R, R, E, S],
        vec![S, T, R, E],
        vec![E, S, T, R],
        vec![T, E, S, T],
    ];
    assert_eq!(
        Board::from_kinds(config.clone(), &layout, ScriptedFactory::new([T])).unwrap_err(),
        BoardError::InvalidSettleEpsilon(-1.0)
    );
    assert!(Board::new(config, ScriptedFactory::new([T])).is_err());
}

#[test]
fn test_zero_settle_tolerance_still_settles() {
    let mut config = BoardConfig::new(4, 4);
    config.settle_epsilon = 0.0;
    let layout = vec![
        vec![R, R, E, S],
        vec![S, T, R, E],
        vec![E, S, T, R],
        vec![T, E, S, T],
    ];
    let mut board = Board::from_kinds(config, &layout, ScriptedFactory::new([T, E, S])).unwrap();
    assert!(matches!(
        board.try_swap(CellPos::new(0, 2), CellPos::new(1, 2)),
        SwapOutcome::Matched { removed: 3 }
    ));
    run_until_idle(&mut board);
    assert_eq!(board.phase(), Phase::Idle);
    assert_eq!(board.occupied_count(), 16);
}

#[test]
fn test_diagonal_swap_is_a_no_op() {
    let mut board = board(striped_layout(), vec![]);
    let before = letters(&board);

    assert_eq!(board.try_swap(CellPos::new(0, 0), CellPos::new(1, 1)), SwapOutcome::Rejected);
    assert_eq!(letters(&board), before);
    assert!(!board.take_failed_swap());
}

#[test]
fn test_only_four_neighbours_can_swap() {
    let mut board = board(striped_layout(), vec![]);
    let before = letters(&board);
    let centre_cell = CellPos::new(3, 3);

    for row in 0..8 {
        for col in 0..8 {
            let other = CellPos::new(row, col);
            let manhattan = row.abs_diff(3) + col.abs_diff(3);
            if manhattan == 1 {
                continue;
            }
            assert_eq!(board.try_swap(centre_cell, other), SwapOutcome::Rejected, "{:?}", other);
        }
    }
    assert_eq!(letters(&board), before);
    assert!(!board.take_failed_swap());
}

#[test]
fn test_matchless_swap_round_trips_and_flags_once() {
    let mut board = board(striped_layout(), vec![]);
    let before = letters(&board);
    let a = centre(&board, 4, 4);

    assert_eq!(board.try_swap(CellPos::new(4, 4), CellPos::new(4, 5)), SwapOutcome::Reverted);
    assert_eq!(letters(&board), before);
    assert_eq!(board.get(4, 4).unwrap().position() + Vec2::new(16.0, 16.0), a);

    assert!(board.take_failed_swap());
    assert!(!board.take_failed_swap());
    assert_eq!(board.take_score(), 0);
}

#[test]
fn test_click_select_and_deselect() {
    let mut board = board(striped_layout(), vec![]);

    click(&mut board, 2, 2);
    assert_eq!(board.selected(), Some(CellPos::new(2, 2)));

    click(&mut board, 2, 2);
    assert_eq!(board.selected(), None);
}

#[test]
fn test_held_pointer_presses_once() {
    let mut board = board(striped_layout(), vec![]);
    let at = centre(&board, 1, 1);
    for _ in 0..5 {
        board.update(PointerSample::new(at, true), TICK_MS);
    }
    assert_eq!(board.selected(), Some(CellPos::new(1, 1)));
}

#[test]
fn test_click_swap_matches_and_refills() {
    let layout = vec![
        vec![R, R, E, S],
        vec![S, T, R, E],
        vec![E, S, T, R],
        vec![T, E, S, T],
    ];
    let mut board = board(layout, vec![T, E, S]);

    click(&mut board, 0, 2);
    click(&mut board, 1, 2);
    assert!(board.is_busy());
    assert_eq!(board.selected(), None);

    run_until_idle(&mut board);
    assert_eq!(board.take_score(), 3);
    assert!(!board.take_failed_swap());
    assert_eq!(board.occupied_count(), 16);
    assert!(!board.has_any_run());
    assert_eq!(letters(&board), vec!["TESS", "STEE", "ESTR", "TEST"]);
    for row in 0..4 {
        for col in 0..4 {
            assert_eq!(board.get(row, col).unwrap().position(), board.target(row, col).unwrap());
        }
    }
}

#[test]
fn test_press_ignored_while_refilling() {
    let layout = vec![
        vec![R, R, E, S],
        vec![S, T, R, E],
        vec![E, S, T, R],
        vec![T, E, S, T],
    ];
    let mut board = board(layout, vec![T, E, S]);
    assert!(matches!(
        board.try_swap(CellPos::new(0, 2), CellPos::new(1, 2)),
        SwapOutcome::Matched { removed: 3 }
    ));
    assert!(board.is_busy());

    click(&mut board, 3, 3);
    assert_eq!(board.selected(), None);
    assert_eq!(board.try_swap(CellPos::new(3, 3), CellPos::new(3, 2)), SwapOutcome::Rejected);
}

#[test]
fn test_cascade_runs_to_completion() {
    // Swapping (2,0) and (2,1) completes column 0. The first refill is three
    // rubies, which match again; the second refill settles.
    let layout = vec![vec![R, E, S], vec![R, S, T], vec![E, R, E]];
    let mut board = board(layout, vec![R, R, R, E, S, T]);

    assert!(matches!(
        board.try_swap(CellPos::new(2, 0), CellPos::new(2, 1)),
        SwapOutcome::Matched { removed: 3 }
    ));
    run_until_idle(&mut board);

    assert_eq!(board.take_score(), 6);
    assert_eq!(board.occupied_count(), 9);
    assert!(!board.has_any_run());
    assert_eq!(letters(&board), vec!["EES", "SST", "TEE"]);
}

#[test]
fn test_random_play_keeps_board_full_and_stable() {
    let mut board = Board::new(BoardConfig::default(), RandomPieceFactory::new(2024)).unwrap();
    let mut rng = tui_match3::core::SimpleRng::new(77);
    let mut scored = 0;

    for _ in 0..200 {
        let row = rng.next_range(8) as usize;
        let col = rng.next_range(8) as usize;
        let (r2, c2) = if rng.next_range(2) == 0 {
            (row, (col + 1) % 8)
        } else {
            ((row + 1) % 8, col)
        };
        board.try_swap(CellPos::new(row, col), CellPos::new(r2, c2));
        run_until_idle(&mut board);
        board.take_failed_swap();
        scored += board.take_score();

        assert_eq!(board.occupied_count(), 64);
        assert!(!board.has_any_run());
    }
    assert!(scored > 0);
}

#[test]
fn test_fading_pieces_expire() {
    let layout = vec![
        vec![R, R, E, S],
        vec![S, T, R, E],
        vec![E, S, T, R],
        vec![T, E, S, T],
    ];
    let mut board = board(layout, vec![T, E, S]);
    board.try_swap(CellPos::new(0, 2), CellPos::new(1, 2));
    assert_eq!(board.fading().len(), 3);

    for _ in 0..40 {
        board.update(PointerSample::idle(), TICK_MS);
    }
    assert!(board.fading().is_empty());
}
