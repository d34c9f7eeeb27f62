//! Piece module - a single typed token on the board
//!
//! A piece's kind is fixed at creation. Its position, match flag and
//! opacity are mutated by the board while it swaps, falls and fades.

use crate::types::{PieceKind, Vec2, FADE_PER_SECOND};

/// Cosmetic opacity transition currently running on a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fade {
    None,
    In,
    Out,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    kind: PieceKind,
    position: Vec2,
    matched: bool,
    opacity: f32,
    fade: Fade,
}

impl Piece {
    /// Create a fully visible, unmatched piece
    pub fn new(kind: PieceKind, position: Vec2) -> Self {
        Self {
            kind,
            position,
            matched: false,
            opacity: 1.0,
            fade: Fade::None,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn is_matched(&self) -> bool {
        self.matched
    }

    pub fn set_matched(&mut self, matched: bool) {
        self.matched = matched;
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn fade(&self) -> Fade {
        self.fade
    }

    pub fn is_fading(&self) -> bool {
        self.fade != Fade::None
    }

    /// Axis-aligned hit test against a `size` x `size` square anchored at the
    /// piece's current top-left position. The right and bottom edges are open.
    pub fn contains_point(&self, point: Vec2, size: f32) -> bool {
        point.x >= self.position.x
            && point.x < self.position.x + size
            && point.y >= self.position.y
            && point.y < self.position.y + size
    }

    /// Start fading in from fully transparent.
    pub fn start_fade_in(&mut self) {
        self.opacity = 0.0;
        self.fade = Fade::In;
    }

    /// Start fading out from the current opacity.
    pub fn start_fade_out(&mut self) {
        self.fade = Fade::Out;
    }

    /// Advance the running fade by `elapsed_secs`.
    pub fn update(&mut self, elapsed_secs: f32) {
        match self.fade {
            Fade::None => {}
            Fade::In => {
                self.opacity += FADE_PER_SECOND * elapsed_secs;
                if self.opacity >= 1.0 {
                    self.opacity = 1.0;
                    self.fade = Fade::None;
                }
            }
            Fade::Out => {
                self.opacity -= FADE_PER_SECOND * elapsed_secs;
                if self.opacity <= 0.0 {
                    self.opacity = 0.0;
                    self.fade = Fade::None;
                }
            }
        }
    }
}
