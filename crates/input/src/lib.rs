//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::MenuAction`] and turns
//! mouse events into one pointer frame per tick. Converting terminal cells to
//! board pixels is the view's job, since only it knows the layout.

pub mod map;
pub mod pointer;

pub use tui_match3_types as types;

pub use map::{handle_key_event, should_quit};
pub use pointer::{PointerFrame, PointerTracker};
