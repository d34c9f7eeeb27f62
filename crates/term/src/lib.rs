//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal play. It renders into
//! a plain framebuffer that is diffed and flushed to the terminal, with no
//! widget toolkit in between.
//!
//! - [`fb`]: cells, styles, framebuffer
//! - [`renderer`]: raw-mode terminal, mouse capture, diff flush
//! - [`game_view`]: menu/board/HUD/result drawing and the board-to-terminal
//!   coordinate mapping used for mouse hit testing

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_match3_core as core;
pub use tui_match3_engine as engine;
pub use tui_match3_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, BoardLayout, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
