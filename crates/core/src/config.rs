//! Board geometry and physics configuration.

use thiserror::Error;

use crate::types::{
    Vec2, BORDER_WIDTH, DEFAULT_COLUMNS, DEFAULT_ROWS, FALL_DELAY_MS, GRAVITY, MAX_GRID_DIM,
    MIN_GRID_DIM, SETTLE_EPSILON, TILE_SIZE, TILE_SPACING,
};

/// Errors raised while building a board.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BoardError {
    #[error("board needs at least {min} rows and columns, got {rows}x{columns}")]
    GridTooSmall {
        rows: usize,
        columns: usize,
        min: usize,
    },
    #[error("board supports at most {max} rows and columns, got {rows}x{columns}")]
    GridTooLarge {
        rows: usize,
        columns: usize,
        max: usize,
    },
    #[error("tile size must be positive and finite, got {0}")]
    InvalidTileSize(f32),
    #[error("tile spacing must be non-negative and finite, got {0}")]
    InvalidSpacing(f32),
    #[error("gravity must be positive and finite, got {0}")]
    InvalidGravity(f32),
    #[error("settle tolerance must be non-negative and finite, got {0}")]
    InvalidSettleEpsilon(f32),
    #[error("anchor must be finite, got ({x}, {y})")]
    InvalidAnchor { x: f32, y: f32 },
    #[error("border width must be non-negative and finite, got {0}")]
    InvalidBorderWidth(f32),
    #[error("layout does not match a {rows}x{columns} board")]
    LayoutShape { rows: usize, columns: usize },
}

/// Everything fixed for the lifetime of one board.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardConfig {
    pub rows: usize,
    pub columns: usize,
    pub tile_size: f32,
    pub spacing: f32,
    /// Top-left corner of cell (0, 0).
    pub anchor: Vec2,
    /// Downward acceleration while falling, px/s².
    pub gravity: f32,
    pub fall_delay_ms: u32,
    pub settle_epsilon: f32,
    pub border_width: f32,
    /// Redraw initial pieces that would complete a run.
    pub screen_initial_matches: bool,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            tile_size: TILE_SIZE,
            spacing: TILE_SPACING,
            anchor: Vec2::ZERO,
            gravity: GRAVITY,
            fall_delay_ms: FALL_DELAY_MS,
            settle_epsilon: SETTLE_EPSILON,
            border_width: BORDER_WIDTH,
            screen_initial_matches: true,
        }
    }
}

impl BoardConfig {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            ..Self::default()
        }
    }

    pub fn with_anchor(mut self, anchor: Vec2) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn with_fall_delay_ms(mut self, fall_delay_ms: u32) -> Self {
        self.fall_delay_ms = fall_delay_ms;
        self
    }

    pub fn with_screening(mut self, screen_initial_matches: bool) -> Self {
        self.screen_initial_matches = screen_initial_matches;
        self
    }

    /// Distance between the top-left corners of neighbouring cells.
    pub fn pitch(&self) -> f32 {
        self.tile_size + self.spacing
    }

    /// Where the piece in `(row, col)` rests once settled.
    pub fn resting_position(&self, row: usize, col: usize) -> Vec2 {
        let pitch = self.pitch();
        Vec2::new(
            self.anchor.x + col as f32 * pitch,
            self.anchor.y + row as f32 * pitch,
        )
    }

    /// Pixel width of the tile area (no trailing spacing).
    pub fn pixel_width(&self) -> f32 {
        self.columns as f32 * self.pitch() - self.spacing
    }

    /// Pixel height of the tile area (no trailing spacing).
    pub fn pixel_height(&self) -> f32 {
        self.rows as f32 * self.pitch() - self.spacing
    }

    pub fn validate(&self) -> Result<(), BoardError> {
        if self.rows < MIN_GRID_DIM || self.columns < MIN_GRID_DIM {
            return Err(BoardError::GridTooSmall {
                rows: self.rows,
                columns: self.columns,
                min: MIN_GRID_DIM,
            });
        }
        if self.rows > MAX_GRID_DIM || self.columns > MAX_GRID_DIM {
            return Err(BoardError::GridTooLarge {
                rows: self.rows,
                columns: self.columns,
                max: MAX_GRID_DIM,
            });
        }
        if !(self.tile_size.is_finite() && self.tile_size > 0.0) {
            return Err(BoardError::InvalidTileSize(self.tile_size));
        }
        if !(self.spacing.is_finite() && self.spacing >= 0.0) {
            return Err(BoardError::InvalidSpacing(self.spacing));
        }
        if !(self.gravity.is_finite() && self.gravity > 0.0) {
            return Err(BoardError::InvalidGravity(self.gravity));
        }
        // A negative or NaN tolerance would keep a falling board from ever settling.
        if !(self.settle_epsilon.is_finite() && self.settle_epsilon >= 0.0) {
            return Err(BoardError::InvalidSettleEpsilon(self.settle_epsilon));
        }
        if !(self.anchor.x.is_finite() && self.anchor.y.is_finite()) {
            return Err(BoardError::InvalidAnchor {
                x: self.anchor.x,
                y: self.anchor.y,
            });
        }
        if !(self.border_width.is_finite() && self.border_width >= 0.0) {
            return Err(BoardError::InvalidBorderWidth(self.border_width));
        }
        Ok(())
    }
}
