use crate::board::{CellPos, Phase};
use crate::piece::Piece;
use crate::types::{PieceKind, Vec2};

/// Render-facing copy of one piece.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PieceView {
    pub kind: PieceKind,
    pub position: Vec2,
    pub opacity: f32,
    pub matched: bool,
}

impl From<&Piece> for PieceView {
    fn from(piece: &Piece) -> Self {
        Self {
            kind: piece.kind(),
            position: piece.position(),
            opacity: piece.opacity(),
            matched: piece.is_matched(),
        }
    }
}

/// Owned copy of the board taken after an update, for drawing and tests.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardSnapshot {
    pub rows: usize,
    pub columns: usize,
    pub tile_size: f32,
    pub pitch: f32,
    pub anchor: Vec2,
    /// Row-major, `rows * columns` entries.
    pub cells: Vec<Option<PieceView>>,
    pub selected: Option<CellPos>,
    pub hovered: Option<CellPos>,
    pub phase: Phase,
    /// Removed pieces still fading out.
    pub fading: Vec<PieceView>,
}

impl BoardSnapshot {
    pub fn get(&self, row: usize, col: usize) -> Option<&PieceView> {
        if row >= self.rows || col >= self.columns {
            return None;
        }
        self.cells[row * self.columns + col].as_ref()
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// One string per row, a kind letter per cell and `.` for empty.
    pub fn letter_rows(&self) -> Vec<String> {
        (0..self.rows)
            .map(|row| {
                (0..self.columns)
                    .map(|col| self.get(row, col).map_or('.', |p| p.kind.letter()))
                    .collect()
            })
            .collect()
    }
}
