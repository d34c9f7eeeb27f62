//! Key mapping from terminal events to menu actions.

use crate::types::{GameMode, MenuAction};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to menu/session actions.
pub fn handle_key_event(key: KeyEvent) -> Option<MenuAction> {
    match key.code {
        // Menu navigation
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => Some(MenuAction::Up),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => Some(MenuAction::Down),
        KeyCode::Enter | KeyCode::Char(' ') => Some(MenuAction::Select),

        // Direct mode pick
        KeyCode::Char('1') => Some(MenuAction::Pick(GameMode::Normal)),
        KeyCode::Char('2') => Some(MenuAction::Pick(GameMode::TimeKeeper)),
        KeyCode::Char('3') => Some(MenuAction::Pick(GameMode::Zen)),

        KeyCode::Esc | KeyCode::Backspace => Some(MenuAction::Back),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(MenuAction::Restart),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
