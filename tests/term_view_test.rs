use tui_match3::core::BoardConfig;
use tui_match3::engine::Game;
use tui_match3::term::{AnchorY, GameView, Viewport};
use tui_match3::types::{GameMode, MenuAction};

fn screen_text(fb: &tui_match3::term::FrameBuffer) -> Vec<String> {
    (0..fb.height()).map(|y| fb.row_text(y)).collect()
}

#[test]
fn term_view_board_frame_at_layout() {
    let mut game = Game::new(BoardConfig::default(), 9).unwrap();
    game.apply_action(MenuAction::Pick(GameMode::Normal)).unwrap();

    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let vp = Viewport::new(60, 20);
    let layout = view.layout(game.config(), vp);
    let fb = view.render(&game, vp);

    // 8 columns x 4 wide, 8 rows x 2 tall, plus the frame.
    let (x0, y0) = (layout.origin_x - 1, layout.origin_y - 1);
    assert_eq!(y0, 0);
    assert_eq!(fb.get(x0, y0).unwrap().ch, '┌');
    assert_eq!(fb.get(x0 + 33, y0).unwrap().ch, '┐');
    assert_eq!(fb.get(x0, y0 + 17).unwrap().ch, '└');
    assert_eq!(fb.get(x0 + 33, y0 + 17).unwrap().ch, '┘');
}

#[test]
fn term_view_every_tile_shows_its_kind() {
    let mut game = Game::new(BoardConfig::default(), 9).unwrap();
    game.apply_action(MenuAction::Pick(GameMode::Zen)).unwrap();

    let view = GameView::default();
    let vp = Viewport::new(80, 24);
    let layout = view.layout(game.config(), vp);
    let fb = view.render(&game, vp);
    let board = game.session().unwrap().board();

    for row in 0..8 {
        for col in 0..8 {
            let x = layout.origin_x + col as u16 * 4 + 1;
            let y = layout.origin_y + row as u16 * 2;
            let expected = board.kind_at(row, col).unwrap().letter();
            assert_eq!(fb.get(x, y).unwrap().ch, expected, "tile ({}, {})", row, col);
        }
    }
}

#[test]
fn term_view_pointer_hits_rendered_tile() {
    let mut game = Game::new(BoardConfig::default(), 9).unwrap();
    game.apply_action(MenuAction::Pick(GameMode::Zen)).unwrap();

    let view = GameView::default();
    let vp = Viewport::new(80, 24);
    let layout = view.layout(game.config(), vp);

    // Terminal cell inside tile (5, 6) maps to that tile's centre.
    let sample = layout.pointer_sample(layout.origin_x + 6 * 4 + 2, layout.origin_y + 5 * 2 + 1, true);
    let target = game.config().resting_position(5, 6);
    assert_eq!(sample.position.x, target.x + 16.0);
    assert_eq!(sample.position.y, target.y + 16.0);
}

#[test]
fn term_view_small_viewport_does_not_panic() {
    let mut game = Game::new(BoardConfig::default(), 1).unwrap();
    let view = GameView::default();
    for (w, h) in [(0, 0), (5, 3), (20, 10)] {
        let _ = view.render(&game, Viewport::new(w, h));
    }
    game.apply_action(MenuAction::Select).unwrap();
    for (w, h) in [(0, 0), (5, 3), (20, 10)] {
        let _ = view.render(&game, Viewport::new(w, h));
    }
}

#[test]
fn term_view_menu_highlights_cursor() {
    let mut game = Game::new(BoardConfig::default(), 1).unwrap();
    game.apply_action(MenuAction::Down).unwrap();
    let fb = GameView::default().render(&game, Viewport::new(60, 20));
    let text = screen_text(&fb);
    assert!(text.iter().any(|l| l.contains("> 2. Time Keeper")));
    assert!(text.iter().any(|l| l.contains("  1. Normal")));
}
