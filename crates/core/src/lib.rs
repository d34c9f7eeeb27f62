//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the match-3 board simulation: the grid, match
//! detection, removal, gravity refill and the cascade loop. It has **zero
//! dependencies** on UI, terminals or I/O, which makes it:
//!
//! - **Deterministic**: the board draws every piece from a [`PieceFactory`];
//!   a seeded or scripted factory reproduces a game exactly
//! - **Testable**: the whole state machine runs headless, one `update` per frame
//! - **Portable**: any renderer can implement [`DrawTarget`]
//!
//! # Module Structure
//!
//! - [`board`]: grid state machine (input, swap, match, refill, cascade)
//! - [`config`]: board geometry/physics and construction errors
//! - [`draw`]: the renderer seam
//! - [`factory`]: piece creation policies
//! - [`piece`]: a single token with position, match flag and fade
//! - [`rng`]: small seeded LCG
//! - [`snapshot`]: owned render-facing copy of the board
//!
//! # Game Rules
//!
//! - A run of three or more same-kind pieces in a row or column is a match
//! - Swaps are only legal between 4-neighbours; a swap that makes no match is
//!   undone and reported through [`Board::take_failed_swap`]
//! - Every removed piece scores one point, read through [`Board::take_score`]
//! - Removed cells are refilled from above; settled boards are re-checked so
//!   cascades chain without input
//!
//! # Example
//!
//! ```
//! use tui_match3_core::{Board, BoardConfig, RandomPieceFactory};
//! use tui_match3_types::{PointerSample, TICK_MS};
//!
//! let mut board = Board::new(BoardConfig::default(), RandomPieceFactory::new(7)).unwrap();
//! assert_eq!(board.take_score(), 0);
//!
//! board.update(PointerSample::idle(), TICK_MS);
//! assert!(!board.has_any_run());
//! ```
//!
//! # Timing
//!
//! [`Board::update`] takes the elapsed milliseconds since the previous frame.
//! Fall physics integrate `speed += gravity * dt; y += speed * dt` per frame.

pub mod board;
pub mod config;
pub mod draw;
pub mod factory;
pub mod piece;
pub mod rng;
pub mod snapshot;

pub use tui_match3_types as types;

// Re-export commonly used types for convenience
pub use board::{Axis, Board, CellPos, Phase, Run, SwapOutcome};
pub use config::{BoardConfig, BoardError};
pub use draw::DrawTarget;
pub use factory::{PieceFactory, RandomPieceFactory, ScriptedFactory};
pub use piece::{Fade, Piece};
pub use rng::SimpleRng;
pub use snapshot::{BoardSnapshot, PieceView};
