//! Piece factories - creation policy for new pieces
//!
//! The board asks a [`PieceFactory`] for every piece it places, both on the
//! initial fill and on refill. Swapping the factory is how tests pin down
//! the exact sequence of kinds.

use crate::piece::Piece;
use crate::rng::SimpleRng;
use crate::types::{PieceKind, Vec2, PIECE_KIND_COUNT};

pub trait PieceFactory {
    /// Produce a new piece resting at `position`.
    fn create_piece(&mut self, position: Vec2) -> Piece;
}

impl<F: PieceFactory + ?Sized> PieceFactory for Box<F> {
    fn create_piece(&mut self, position: Vec2) -> Piece {
        (**self).create_piece(position)
    }
}

/// Uniformly random kinds from an owned, seeded generator.
#[derive(Debug, Clone)]
pub struct RandomPieceFactory {
    rng: SimpleRng,
}

impl RandomPieceFactory {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    pub fn next_kind(&mut self) -> PieceKind {
        // next_range(n) < n, so the index is always in bounds.
        PieceKind::ALL[self.rng.next_range(PIECE_KIND_COUNT as u32) as usize]
    }

    pub fn rng_state(&self) -> u32 {
        self.rng.state()
    }
}

impl PieceFactory for RandomPieceFactory {
    fn create_piece(&mut self, position: Vec2) -> Piece {
        Piece::new(self.next_kind(), position)
    }
}

/// Hands out a fixed list of kinds in order, wrapping around at the end.
#[derive(Debug, Clone)]
pub struct ScriptedFactory {
    kinds: Vec<PieceKind>,
    next: usize,
    issued: usize,
}

impl ScriptedFactory {
    /// An empty script falls back to cycling every kind.
    pub fn new(kinds: impl IntoIterator<Item = PieceKind>) -> Self {
        let mut kinds: Vec<PieceKind> = kinds.into_iter().collect();
        if kinds.is_empty() {
            kinds = PieceKind::ALL.to_vec();
        }
        Self {
            kinds,
            next: 0,
            issued: 0,
        }
    }

    /// Number of pieces created so far.
    pub fn issued(&self) -> usize {
        self.issued
    }

    fn next_kind(&mut self) -> PieceKind {
        let kind = self.kinds[self.next];
        self.next = (self.next + 1) % self.kinds.len();
        self.issued += 1;
        kind
    }
}

impl PieceFactory for ScriptedFactory {
    fn create_piece(&mut self, position: Vec2) -> Piece {
        Piece::new(self.next_kind(), position)
    }
}
