//! Drawing seam between the board and whatever renders it.
//!
//! The board only knows board pixel space. A renderer implements
//! [`DrawTarget`] and maps those coordinates onto its own surface.

use crate::piece::Piece;
use crate::types::Vec2;

pub trait DrawTarget {
    /// Draw one piece as a `tile_size` square at its current position.
    fn draw_piece(&mut self, piece: &Piece, tile_size: f32);

    /// Highlight frame around the selected piece.
    fn draw_selection(&mut self, origin: Vec2, size: f32);

    /// Static frame around the tile area.
    fn draw_border(&mut self, origin: Vec2, width: f32, height: f32, thickness: f32);
}
