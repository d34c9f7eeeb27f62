//! Terminal match-3 runner (default binary).
//!
//! Keyboard drives the menus, the mouse drives the board. Rendering goes
//! through the framebuffer-based renderer in `tui_match3::term`.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use log::info;

use tui_match3::config::Settings;
use tui_match3::engine::Game;
use tui_match3::input::{handle_key_event, should_quit, PointerTracker};
use tui_match3::logging;
use tui_match3::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

fn main() -> Result<()> {
    logging::init_from_env()?;
    let settings = Settings::load()?;
    let seed = settings.resolved_seed();
    info!(
        "starting rows={} columns={} seed={} tick_ms={}",
        settings.rows,
        settings.columns,
        seed,
        settings.tick_ms()
    );
    let game = Game::new(settings.board_config(), seed).context("invalid board settings")?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, game, settings.tick_ms());

    // Always try to restore terminal state.
    let _ = term.exit();
    log::logger().flush();
    result
}

fn run(term: &mut TerminalRenderer, mut game: Game, tick_ms: u32) -> Result<()> {
    let view = GameView::default();
    let mut pointer = PointerTracker::new();
    let mut fb = FrameBuffer::new(0, 0);

    let tick_duration = Duration::from_millis(tick_ms as u64);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        view.render_into(&game, viewport, &mut fb);
        term.present(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        info!("quit requested");
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        if game.apply_action(action)? {
                            pointer.reset();
                        }
                    }
                }
                Event::Mouse(mouse) => pointer.handle_mouse_event(mouse),
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();

            let frame = pointer.sample();
            let layout = view.layout(game.config(), viewport);
            let sample = layout.pointer_sample(frame.column, frame.row, frame.pressed);
            if game.tick(sample, tick_ms) {
                pointer.reset();
            }
        }
    }
}
