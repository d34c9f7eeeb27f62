//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (board engine, game modes, terminal rendering).
//!
//! # Board Geometry
//!
//! The board lives in a continuous "pixel" space. Cell `(row, col)` rests at
//! `anchor + (col * pitch, row * pitch)` where `pitch = tile_size + spacing`.
//! Row 0 is the visual top.
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_ROWS` | 8 | Rows in a standard board |
//! | `DEFAULT_COLUMNS` | 8 | Columns in a standard board |
//! | `TILE_SIZE` | 32 | Edge of one square tile |
//! | `TILE_SPACING` | 4 | Gap between neighbouring tiles |
//! | `MIN_RUN` | 3 | Shortest run that counts as a match |
//! | `MAX_GRID_DIM` | 16 | Largest supported row/column count |
//!
//! # Timing Constants
//!
//! Durations are in milliseconds, physics in pixels and seconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `FALL_DELAY_MS` | 0 | Pause between a removal and the refill fall |
//! | `GRAVITY` | 500 | Downward acceleration while falling |
//! | `SETTLE_EPSILON` | 1 | Distance at which a falling piece counts as settled |
//!
//! # Examples
//!
//! ```
//! use tui_match3_types::{GameMode, PieceKind, Vec2, PIECE_KIND_COUNT};
//!
//! assert_eq!(PieceKind::ALL.len(), PIECE_KIND_COUNT);
//! assert_eq!(PieceKind::from_str("ruby"), Some(PieceKind::Ruby));
//! assert_eq!(GameMode::from_str("zen"), Some(GameMode::Zen));
//!
//! let p = Vec2::new(3.0, 4.0);
//! assert_eq!(p.distance(Vec2::ZERO), 5.0);
//! ```

use std::fmt;

/// Default board height in cells
pub const DEFAULT_ROWS: usize = 8;

/// Default board width in cells
pub const DEFAULT_COLUMNS: usize = 8;

/// Smallest supported row/column count (a run needs three cells)
pub const MIN_GRID_DIM: usize = 3;

/// Largest supported row/column count
pub const MAX_GRID_DIM: usize = 16;

/// Tile edge length in board pixels
pub const TILE_SIZE: f32 = 32.0;

/// Gap between neighbouring tiles in board pixels
pub const TILE_SPACING: f32 = 4.0;

/// Border thickness drawn around the board
pub const BORDER_WIDTH: f32 = 5.0;

/// Minimum number of same-kind pieces in a line that form a match
pub const MIN_RUN: usize = 3;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Delay between a removal and the start of the refill fall.
pub const FALL_DELAY_MS: u32 = 0;

/// Downward acceleration applied to falling pieces (px/s²)
pub const GRAVITY: f32 = 500.0;

/// A falling piece closer than this to its target counts as settled
pub const SETTLE_EPSILON: f32 = 1.0;

/// Opacity change per second while a piece fades in or out
pub const FADE_PER_SECOND: f32 = 4.0;

/// Lives at the start of a Normal session
pub const NORMAL_LIVES: i32 = 3;

/// Lives at the start of a TimeKeeper session
pub const TIMEKEEPER_LIVES: i32 = 5;

/// Countdown at the start of a TimeKeeper session
pub const TIMEKEEPER_START_MS: u32 = 120_000;

/// Time restored every `TIMEKEEPER_BONUS_EVERY` points
pub const TIMEKEEPER_BONUS_MS: u32 = 10_000;

/// Points needed for one TimeKeeper time bonus
pub const TIMEKEEPER_BONUS_EVERY: u32 = 50;

/// Number of distinct piece kinds
pub const PIECE_KIND_COUNT: usize = 4;

/// The closed set of piece kinds.
///
/// Kinds carry no behaviour beyond identity: two pieces match when their
/// kinds are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Ruby,
    Emerald,
    Sapphire,
    Topaz,
}

impl PieceKind {
    /// Every kind, in wire order (`as_u8` is index + 1).
    pub const ALL: [PieceKind; PIECE_KIND_COUNT] = [
        PieceKind::Ruby,
        PieceKind::Emerald,
        PieceKind::Sapphire,
        PieceKind::Topaz,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_match3_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("TOPAZ"), Some(PieceKind::Topaz));
    /// assert_eq!(PieceKind::from_str("s"), Some(PieceKind::Sapphire));
    /// assert_eq!(PieceKind::from_str("diamond"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "ruby" | "r" => Some(PieceKind::Ruby),
            "emerald" | "e" => Some(PieceKind::Emerald),
            "sapphire" | "s" => Some(PieceKind::Sapphire),
            "topaz" | "t" => Some(PieceKind::Topaz),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::Ruby => "ruby",
            PieceKind::Emerald => "emerald",
            PieceKind::Sapphire => "sapphire",
            PieceKind::Topaz => "topaz",
        }
    }

    /// Compact numeric tag (1-based, 0 is reserved for "empty").
    pub fn as_u8(&self) -> u8 {
        match self {
            PieceKind::Ruby => 1,
            PieceKind::Emerald => 2,
            PieceKind::Sapphire => 3,
            PieceKind::Topaz => 4,
        }
    }

    /// Single-letter label used by text renderers and test layouts.
    pub fn letter(&self) -> char {
        match self {
            PieceKind::Ruby => 'R',
            PieceKind::Emerald => 'E',
            PieceKind::Sapphire => 'S',
            PieceKind::Topaz => 'T',
        }
    }
}

/// Error returned when a numeric tag names no piece kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownPieceKind(pub u8);

impl fmt::Display for UnknownPieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown piece kind tag {}", self.0)
    }
}

impl std::error::Error for UnknownPieceKind {}

impl TryFrom<u8> for PieceKind {
    type Error = UnknownPieceKind;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(PieceKind::Ruby),
            2 => Ok(PieceKind::Emerald),
            3 => Ok(PieceKind::Sapphire),
            4 => Ok(PieceKind::Topaz),
            other => Err(UnknownPieceKind(other)),
        }
    }
}

/// A point or offset in board pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Vec2) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// One frame of pointer input, already mapped into board pixel space.
///
/// The board keeps the previous frame's `pressed` value itself, so a press
/// registers once on the released -> pressed transition.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerSample {
    pub position: Vec2,
    pub pressed: bool,
}

impl PointerSample {
    pub fn new(position: Vec2, pressed: bool) -> Self {
        Self { position, pressed }
    }

    /// Pointer at rest, button up.
    pub fn idle() -> Self {
        Self::default()
    }
}

/// Game modes offered from the menu.
///
/// - **Normal**: limited lives, a match-less swap costs one
/// - **TimeKeeper**: lives plus a countdown, scoring buys time back
/// - **Zen**: endless play without lives or timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameMode {
    Normal,
    TimeKeeper,
    Zen,
}

impl GameMode {
    pub const ALL: [GameMode; 3] = [GameMode::Normal, GameMode::TimeKeeper, GameMode::Zen];

    /// Parse mode from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "normal" => Some(GameMode::Normal),
            "timekeeper" | "time" => Some(GameMode::TimeKeeper),
            "zen" => Some(GameMode::Zen),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Normal => "normal",
            GameMode::TimeKeeper => "timekeeper",
            GameMode::Zen => "zen",
        }
    }

    /// Menu label.
    pub fn title(&self) -> &'static str {
        match self {
            GameMode::Normal => "Normal",
            GameMode::TimeKeeper => "Time Keeper",
            GameMode::Zen => "Zen",
        }
    }
}

/// How a finished session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Won => "won",
            Outcome::Lost => "lost",
        }
    }
}

/// Keyboard-driven actions for menu navigation and session control.
///
/// Board interaction itself is pointer driven (see [`PointerSample`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Move the menu cursor up
    Up,
    /// Move the menu cursor down
    Down,
    /// Confirm the highlighted entry
    Select,
    /// Start a specific mode directly
    Pick(GameMode),
    /// Leave the current scene for the main menu
    Back,
    /// Restart the current mode from a fresh board
    Restart,
}
