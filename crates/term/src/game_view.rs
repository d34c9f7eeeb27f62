//! GameView: maps the engine's scenes into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Board pixels and terminal cells are related through [`BoardLayout`]: each
//! board cell (one `pitch` in pixels) becomes `cell_w x cell_h` terminal
//! cells. The same layout maps mouse positions back to board pixels, landing
//! on the centre of the tile under the pointer.

use crate::core::{Board, BoardConfig, DrawTarget, Piece};
use crate::engine::{Game, ModeSession, Scene, SessionResult};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{GameMode, Outcome, PieceKind, PointerSample, Vec2};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Far outside any board; used for pointer positions off the tile area.
const OFF_BOARD: Vec2 = Vec2::new(-1.0e6, -1.0e6);

const PANEL_W: u16 = 18;

const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);
const BOARD_BG: Rgb = Rgb::new(30, 30, 40);

/// Placement of the board's tile area on the terminal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardLayout {
    /// Terminal column of the left edge of column 0.
    pub origin_x: u16,
    /// Terminal row of the top edge of row 0.
    pub origin_y: u16,
    pub cell_w: u16,
    pub cell_h: u16,
    pub rows: u16,
    pub columns: u16,
    anchor: Vec2,
    pitch: f32,
    tile_size: f32,
}

impl BoardLayout {
    pub fn new(config: &BoardConfig, origin_x: u16, origin_y: u16, cell_w: u16, cell_h: u16) -> Self {
        Self {
            origin_x,
            origin_y,
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            rows: config.rows as u16,
            columns: config.columns as u16,
            anchor: config.anchor,
            pitch: config.pitch(),
            tile_size: config.tile_size,
        }
    }

    /// Tile area width in terminal columns.
    pub fn width(&self) -> u16 {
        self.columns * self.cell_w
    }

    /// Tile area height in terminal rows.
    pub fn height(&self) -> u16 {
        self.rows * self.cell_h
    }

    /// Terminal cell of a tile's top-left corner given in board pixels.
    ///
    /// `None` when the tile would not lie fully inside the tile area, e.g.
    /// refill pieces still above the board.
    pub fn to_terminal(&self, point: Vec2) -> Option<(u16, u16)> {
        let tx = ((point.x - self.anchor.x) / self.pitch * self.cell_w as f32).round();
        let ty = ((point.y - self.anchor.y) / self.pitch * self.cell_h as f32).round();
        let max_x = (self.width() - self.cell_w) as f32;
        let max_y = (self.height() - self.cell_h) as f32;
        if !(0.0..=max_x).contains(&tx) || !(0.0..=max_y).contains(&ty) {
            return None;
        }
        Some((self.origin_x + tx as u16, self.origin_y + ty as u16))
    }

    /// Board pixel at the centre of the tile under a terminal cell.
    pub fn to_board(&self, column: u16, row: u16) -> Option<Vec2> {
        let dx = column.checked_sub(self.origin_x)?;
        let dy = row.checked_sub(self.origin_y)?;
        if dx >= self.width() || dy >= self.height() {
            return None;
        }
        let col = (dx / self.cell_w) as f32;
        let row = (dy / self.cell_h) as f32;
        let half = self.tile_size / 2.0;
        Some(self.anchor + Vec2::new(col * self.pitch + half, row * self.pitch + half))
    }

    /// Pointer sample for the board. Positions off the tile area still carry
    /// the button state so press edges stay consistent.
    pub fn pointer_sample(&self, column: u16, row: u16, pressed: bool) -> PointerSample {
        PointerSample::new(self.to_board(column, row).unwrap_or(OFF_BOARD), pressed)
    }
}

/// A lightweight terminal renderer for the match-3 game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 4x2 keeps tiles roughly square with typical glyph aspect ratio.
        Self {
            cell_w: 4,
            cell_h: 2,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w,
            cell_h,
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Where the board goes for this viewport. Rendering and pointer mapping
    /// must use the same layout.
    pub fn layout(&self, config: &BoardConfig, viewport: Viewport) -> BoardLayout {
        let probe = BoardLayout::new(config, 0, 0, self.cell_w, self.cell_h);
        let frame_w = probe.width() + 2;
        let frame_h = probe.height() + 2;
        let total_w = frame_w + 2 + PANEL_W;

        let start_x = viewport.width.saturating_sub(total_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };
        BoardLayout::new(config, start_x + 1, start_y + 1, self.cell_w, self.cell_h)
    }

    /// Render the current scene into an existing framebuffer.
    pub fn render_into(&self, game: &Game, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        match game.scene() {
            Scene::Menu { cursor } => self.draw_menu(fb, viewport, *cursor, game.best_score()),
            Scene::Playing(session) => {
                let layout = self.layout(game.config(), viewport);
                self.draw_session(fb, &layout, session, game.best_score());
            }
            Scene::Result(result) => self.draw_result(fb, viewport, result),
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, game: &Game, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(game, viewport, &mut fb);
        fb
    }

    /// Draw a board with its frame at `layout`.
    pub fn draw_board(&self, fb: &mut FrameBuffer, layout: &BoardLayout, board: &Board) {
        fb.fill_rect(
            layout.origin_x,
            layout.origin_y,
            layout.width(),
            layout.height(),
            ' ',
            CellStyle::new(SCREEN_BG, BOARD_BG),
        );
        board.draw(&mut TerminalPainter { fb, layout });
    }

    fn draw_session(&self, fb: &mut FrameBuffer, layout: &BoardLayout, session: &ModeSession, best: u32) {
        self.draw_board(fb, layout, session.board());

        let panel_x = layout.origin_x + layout.width() + 3;
        if panel_x >= fb.width() {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);

        let mut y = layout.origin_y.saturating_sub(1);
        fb.put_str(panel_x, y, session.mode().title(), label);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "SCORE", label);
        fb.put_u32(panel_x, y + 1, session.score(), value);
        y = y.saturating_add(3);

        if let Some(lives) = session.lives() {
            fb.put_str(panel_x, y, "LIVES", label);
            fb.put_u32(panel_x, y + 1, lives.max(0) as u32, value);
            y = y.saturating_add(3);
        }

        if let Some(timer) = session.timer() {
            fb.put_str(panel_x, y, "TIME", label);
            let secs = timer.display_secs();
            let style = if secs <= 10 {
                CellStyle::new(Rgb::new(240, 90, 80), SCREEN_BG).bold()
            } else {
                value
            };
            fb.put_u32(panel_x, y + 1, secs, style);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "BEST", label);
        fb.put_u32(panel_x, y + 1, best, value);
        y = y.saturating_add(3);

        let hint = value.dim();
        fb.put_str(panel_x, y, "click two tiles", hint);
        fb.put_str(panel_x, y + 1, "r restart", hint);
        fb.put_str(panel_x, y + 2, "esc menu", hint);
    }

    fn draw_menu(&self, fb: &mut FrameBuffer, viewport: Viewport, cursor: usize, best: u32) {
        let entries = GameMode::ALL.len() as u16;
        let block_h = 4 + entries * 2 + 3;
        let mut y = viewport.height.saturating_sub(block_h) / 2;
        let title = CellStyle::new(kind_color(PieceKind::Topaz), SCREEN_BG).bold();
        fb.put_str_centered(0, viewport.width, y, "M A T C H  3", title);
        y = y.saturating_add(2);

        let gems: String = PieceKind::ALL.iter().map(|k| k.letter()).collect();
        let mut x = viewport.width.saturating_sub(gems.len() as u16 * 2) / 2;
        for kind in PieceKind::ALL {
            fb.put_char(x, y, kind.letter(), CellStyle::new(kind_color(kind), SCREEN_BG).bold());
            x = x.saturating_add(2);
        }
        y = y.saturating_add(2);

        for (i, mode) in GameMode::ALL.iter().enumerate() {
            let selected = i == cursor;
            let style = if selected {
                CellStyle::new(SCREEN_BG, Rgb::new(220, 220, 220)).bold()
            } else {
                CellStyle::default()
            };
            let mut line = String::with_capacity(20);
            line.push(if selected { '>' } else { ' ' });
            line.push(' ');
            line.push(char::from(b'1' + i as u8));
            line.push_str(". ");
            line.push_str(mode.title());
            while line.len() < 18 {
                line.push(' ');
            }
            fb.put_str_centered(0, viewport.width, y, &line, style);
            y = y.saturating_add(2);
        }

        if best > 0 {
            let x = viewport.width.saturating_sub(12) / 2;
            let end = fb.put_str(x, y, "BEST ", CellStyle::default().bold());
            fb.put_u32(end, y, best, CellStyle::default());
        }
        y = y.saturating_add(2);
        fb.put_str_centered(0, viewport.width, y, "enter play  q quit", CellStyle::default().dim());
    }

    fn draw_result(&self, fb: &mut FrameBuffer, viewport: Viewport, result: &SessionResult) {
        let mut y = viewport.height.saturating_sub(9) / 2;
        let (headline, color) = match result.outcome {
            Outcome::Won => ("YOU WIN", kind_color(PieceKind::Emerald)),
            Outcome::Lost => ("GAME OVER", kind_color(PieceKind::Ruby)),
        };
        fb.put_str_centered(0, viewport.width, y, headline, CellStyle::new(color, SCREEN_BG).bold());
        y = y.saturating_add(1);
        fb.put_str_centered(0, viewport.width, y, result.mode.title(), CellStyle::default().dim());
        y = y.saturating_add(2);

        let x = viewport.width.saturating_sub(12) / 2;
        let end = fb.put_str(x, y, "SCORE ", CellStyle::default().bold());
        fb.put_u32(end, y, result.score, CellStyle::default());
        y = y.saturating_add(1);
        let end = fb.put_str(x, y, "BEST  ", CellStyle::default().bold());
        fb.put_u32(end, y, result.best, CellStyle::default());
        y = y.saturating_add(2);

        if result.new_best {
            let style = CellStyle::new(kind_color(PieceKind::Topaz), SCREEN_BG).bold();
            fb.put_str_centered(0, viewport.width, y, "NEW BEST!", style);
        }
        y = y.saturating_add(2);
        fb.put_str_centered(0, viewport.width, y, "enter menu  r again", CellStyle::default().dim());
    }
}

/// Paints board draw calls into a framebuffer through a [`BoardLayout`].
struct TerminalPainter<'a> {
    fb: &'a mut FrameBuffer,
    layout: &'a BoardLayout,
}

impl DrawTarget for TerminalPainter<'_> {
    fn draw_piece(&mut self, piece: &Piece, _tile_size: f32) {
        let Some((x, y)) = self.layout.to_terminal(piece.position()) else {
            return;
        };
        let (cw, ch) = (self.layout.cell_w, self.layout.cell_h);
        // Leave the last column as a gap between tiles when there is room.
        let tile_w = if cw >= 3 { cw - 1 } else { cw };
        let opacity = piece.opacity();
        let bg = BOARD_BG.lerp(kind_color(piece.kind()), opacity);
        let style = CellStyle::new(Rgb::new(250, 250, 250), bg).bold();
        self.fb.fill_rect(x, y, tile_w, ch, ' ', style);
        if opacity > 0.5 {
            self.fb
                .put_char(x + (tile_w - 1) / 2, y + (ch - 1) / 2, piece.kind().letter(), style);
        }
    }

    fn draw_selection(&mut self, origin: Vec2, _size: f32) {
        // `origin` is inset from the tile; the tile itself starts 2px further in.
        let Some((x, y)) = self.layout.to_terminal(origin + Vec2::new(2.0, 2.0)) else {
            return;
        };
        let cw = self.layout.cell_w;
        let tile_w = if cw >= 3 { cw - 1 } else { cw };
        let fg = Rgb::new(255, 255, 255);
        for dy in 0..self.layout.cell_h {
            self.fb.overlay_char(x, y + dy, '[', fg, true);
            self.fb.overlay_char(x + tile_w - 1, y + dy, ']', fg, true);
        }
    }

    fn draw_border(&mut self, _origin: Vec2, _width: f32, _height: f32, _thickness: f32) {
        let style = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);
        self.fb.draw_box(
            self.layout.origin_x.saturating_sub(1),
            self.layout.origin_y.saturating_sub(1),
            self.layout.width() + 2,
            self.layout.height() + 2,
            style,
        );
    }
}

fn kind_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::Ruby => Rgb::new(200, 40, 60),
        PieceKind::Emerald => Rgb::new(40, 170, 90),
        PieceKind::Sapphire => Rgb::new(50, 90, 210),
        PieceKind::Topaz => Rgb::new(225, 165, 40),
    }
}
