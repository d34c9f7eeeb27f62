//! Terminal match-3 (workspace facade crate).
//!
//! Re-exports the workspace crates under one name and carries the pieces only
//! the binary needs: runtime [`config`] and the file [`logging`] backend.

pub mod config;
pub mod logging;

pub use tui_match3_core as core;
pub use tui_match3_engine as engine;
pub use tui_match3_input as input;
pub use tui_match3_term as term;
pub use tui_match3_types as types;
