//! Game engine module - modes, scoring and scene flow on top of the board
//!
//! The board in `tui-match3-core` knows nothing about lives, timers or
//! menus. This crate adds them:
//!
//! - [`score`]: score and lives counter
//! - [`timer`]: millisecond countdown
//! - [`session`]: one play session of a [`GameMode`](types::GameMode)
//! - [`game`]: menu → play → result scene flow with the best score
//!
//! Everything is driven by explicit `update`/`tick` calls with elapsed
//! milliseconds; nothing here reads a clock.
//!
//! # Example
//!
//! ```
//! use tui_match3_engine::{Game, Scene};
//! use tui_match3_engine::core::BoardConfig;
//! use tui_match3_engine::types::{GameMode, MenuAction, PointerSample, TICK_MS};
//!
//! let mut game = Game::new(BoardConfig::default(), 7).unwrap();
//! game.apply_action(MenuAction::Pick(GameMode::Zen)).unwrap();
//! assert!(matches!(game.scene(), Scene::Playing(_)));
//!
//! // Zen never ends
//! assert!(!game.tick(PointerSample::idle(), TICK_MS));
//! ```

pub mod game;
pub mod score;
pub mod session;
pub mod timer;

pub use tui_match3_core as core;
pub use tui_match3_types as types;

pub use game::{Game, Scene, SessionResult};
pub use score::ScoreKeeper;
pub use session::{ModeSession, OutcomeCallback};
pub use timer::Countdown;
