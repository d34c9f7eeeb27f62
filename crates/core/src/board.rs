//! Board module - the match engine
//!
//! The board owns a `rows x columns` grid of optional pieces stored row-major
//! in flat vectors, plus parallel vectors for each cell's resting position and
//! fall speed. Row 0 is the visual top.
//!
//! Every call to [`Board::update`] runs, in order:
//!
//! 1. **Input**: a press edge hit-tests the pieces; first hit selects, hitting
//!    the selection again deselects, any other hit attempts a swap. Skipped
//!    while a refill is in progress.
//! 2. **Swap**: only between pieces exactly one pitch apart on one axis. A
//!    swap that makes no match is undone and raises the failed-swap flag.
//! 3. **Match & removal**: the first run of three or more (rows before
//!    columns) is marked and its cells emptied.
//! 4. **Refill**: columns are compacted, the top gaps get fresh pieces spawned
//!    above the board, and after the fall delay everything drops under
//!    gravity. Once settled the grid is scanned again, which is how cascades
//!    chain without further input.

use std::fmt;

use arrayvec::ArrayVec;
use log::{debug, trace};

use crate::config::{BoardConfig, BoardError};
use crate::draw::DrawTarget;
use crate::factory::PieceFactory;
use crate::piece::Piece;
use crate::snapshot::{BoardSnapshot, PieceView};
use crate::types::{PieceKind, PointerSample, Vec2, MAX_GRID_DIM, MIN_RUN};

/// Redraws allowed per cell when screening the initial fill.
const SCREEN_ATTEMPTS: usize = 32;

/// Slack when comparing piece distances against the pitch.
const ADJACENCY_TOLERANCE: f32 = 0.5;

/// Grid coordinate of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellPos {
    pub row: usize,
    pub col: usize,
}

impl CellPos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Row,
    Column,
}

impl Axis {
    /// Cell `offset` along line number `line` of this axis.
    fn cell(self, line: usize, offset: usize) -> CellPos {
        match self {
            Axis::Row => CellPos::new(line, offset),
            Axis::Column => CellPos::new(offset, line),
        }
    }
}

/// A straight line of same-kind pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub axis: Axis,
    pub start: CellPos,
    pub len: usize,
}

impl Run {
    pub fn cells(&self) -> ArrayVec<CellPos, MAX_GRID_DIM> {
        (0..self.len)
            .map(|i| match self.axis {
                Axis::Row => CellPos::new(self.start.row, self.start.col + i),
                Axis::Column => CellPos::new(self.start.row + i, self.start.col),
            })
            .collect()
    }
}

/// Refill progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Everything at rest, input accepted.
    Idle,
    /// Gaps already refilled, waiting out the fall delay.
    Delay { elapsed_ms: u32 },
    /// Pieces dropping toward their resting positions.
    Falling,
}

/// What a swap attempt did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapOutcome {
    /// Not a legal pair (not adjacent, empty cell, or board busy). Nothing changed.
    Rejected,
    /// Legal swap without a match; undone and flagged as failed.
    Reverted,
    /// Swap kept; this many pieces were removed.
    Matched { removed: u32 },
}

pub struct Board {
    config: BoardConfig,
    cells: Vec<Option<Piece>>,
    targets: Vec<Vec2>,
    velocity: Vec<f32>,
    fading: Vec<Piece>,
    factory: Box<dyn PieceFactory>,
    selected: Option<CellPos>,
    hovered: Option<CellPos>,
    pointer_was_pressed: bool,
    phase: Phase,
    removed: u32,
    failed_swap: bool,
    cascade_depth: u32,
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("rows", &self.config.rows)
            .field("columns", &self.config.columns)
            .field("phase", &self.phase)
            .field("selected", &self.selected)
            .field("removed", &self.removed)
            .field("failed_swap", &self.failed_swap)
            .finish_non_exhaustive()
    }
}

impl Board {
    /// Create a fully populated board.
    ///
    /// With `screen_initial_matches` set, a freshly drawn piece that would
    /// complete a run with its left or upper neighbours is redrawn (up to a
    /// bounded number of attempts).
    pub fn new(config: BoardConfig, factory: impl PieceFactory + 'static) -> Result<Self, BoardError> {
        let mut board = Self::empty(config, Box::new(factory))?;
        for row in 0..board.config.rows {
            for col in 0..board.config.columns {
                let position = board.config.resting_position(row, col);
                let mut piece = board.factory.create_piece(position);
                if board.config.screen_initial_matches {
                    let mut attempts = 1;
                    while attempts < SCREEN_ATTEMPTS && board.completes_run(row, col, piece.kind()) {
                        piece = board.factory.create_piece(position);
                        attempts += 1;
                    }
                }
                let idx = board.index(row, col);
                board.cells[idx] = Some(piece);
            }
        }
        Ok(board)
    }

    /// Create a board with an exact layout, one `Vec` per row.
    ///
    /// The factory is only used for refills.
    pub fn from_kinds(
        config: BoardConfig,
        layout: &[Vec<PieceKind>],
        factory: impl PieceFactory + 'static,
    ) -> Result<Self, BoardError> {
        let mut board = Self::empty(config, Box::new(factory))?;
        let (rows, columns) = (board.config.rows, board.config.columns);
        if layout.len() != rows || layout.iter().any(|r| r.len() != columns) {
            return Err(BoardError::LayoutShape { rows, columns });
        }
        for (row, kinds) in layout.iter().enumerate() {
            for (col, &kind) in kinds.iter().enumerate() {
                let idx = board.index(row, col);
                board.cells[idx] = Some(Piece::new(kind, board.targets[idx]));
            }
        }
        Ok(board)
    }

    fn empty(config: BoardConfig, factory: Box<dyn PieceFactory>) -> Result<Self, BoardError> {
        config.validate()?;
        let len = config.rows * config.columns;
        let mut targets = Vec::with_capacity(len);
        for row in 0..config.rows {
            for col in 0..config.columns {
                targets.push(config.resting_position(row, col));
            }
        }
        Ok(Self {
            cells: vec![None; len],
            targets,
            velocity: vec![0.0; len],
            fading: Vec::new(),
            factory,
            selected: None,
            hovered: None,
            pointer_was_pressed: false,
            phase: Phase::Idle,
            removed: 0,
            failed_swap: false,
            cascade_depth: 0,
            config,
        })
    }

    #[inline(always)]
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.config.columns + col
    }

    fn in_bounds(&self, pos: CellPos) -> bool {
        pos.row < self.config.rows && pos.col < self.config.columns
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn rows(&self) -> usize {
        self.config.rows
    }

    pub fn columns(&self) -> usize {
        self.config.columns
    }

    /// Piece in `(row, col)`, `None` when empty or out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<&Piece> {
        if !self.in_bounds(CellPos::new(row, col)) {
            return None;
        }
        self.cells[self.index(row, col)].as_ref()
    }

    pub fn kind_at(&self, row: usize, col: usize) -> Option<PieceKind> {
        self.get(row, col).map(Piece::kind)
    }

    /// Resting coordinate of `(row, col)`.
    pub fn target(&self, row: usize, col: usize) -> Option<Vec2> {
        if !self.in_bounds(CellPos::new(row, col)) {
            return None;
        }
        Some(self.targets[self.index(row, col)])
    }

    pub fn selected(&self) -> Option<CellPos> {
        self.selected
    }

    pub fn hovered(&self) -> Option<CellPos> {
        self.hovered
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True while a refill is waiting or falling; input is ignored then.
    pub fn is_busy(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Removed pieces whose fade-out is still running.
    pub fn fading(&self) -> &[Piece] {
        &self.fading
    }

    /// Pieces removed since the last call; resets to zero.
    pub fn take_score(&mut self) -> u32 {
        std::mem::take(&mut self.removed)
    }

    /// Whether a swap failed since the last call; resets to false.
    pub fn take_failed_swap(&mut self) -> bool {
        std::mem::take(&mut self.failed_swap)
    }

    /// Advance one frame.
    pub fn update(&mut self, pointer: PointerSample, elapsed_ms: u32) {
        let press = pointer.pressed && !self.pointer_was_pressed;
        self.pointer_was_pressed = pointer.pressed;
        self.hovered = self.hit_test(pointer.position);

        if press && !self.is_busy() {
            self.handle_press(pointer.position);
        }

        self.advance_refill(elapsed_ms);

        let elapsed_secs = elapsed_ms as f32 / 1000.0;
        for piece in self.cells.iter_mut().flatten() {
            piece.update(elapsed_secs);
        }
        for piece in &mut self.fading {
            piece.update(elapsed_secs);
        }
        self.fading.retain(Piece::is_fading);
    }

    fn hit_test(&self, point: Vec2) -> Option<CellPos> {
        let size = self.config.tile_size;
        (0..self.config.rows)
            .flat_map(|row| (0..self.config.columns).map(move |col| CellPos::new(row, col)))
            .find(|&pos| {
                self.cells[self.index(pos.row, pos.col)]
                    .as_ref()
                    .is_some_and(|p| p.contains_point(point, size))
            })
    }

    fn handle_press(&mut self, point: Vec2) {
        let Some(hit) = self.hit_test(point) else {
            return;
        };
        match self.selected {
            None => {
                trace!("select {:?}", hit);
                self.selected = Some(hit);
            }
            Some(current) if current == hit => {
                trace!("deselect {:?}", hit);
                self.selected = None;
            }
            Some(current) => {
                self.try_swap(current, hit);
            }
        }
    }

    /// Attempt to swap the pieces in two cells. Clears the selection.
    pub fn try_swap(&mut self, a: CellPos, b: CellPos) -> SwapOutcome {
        self.selected = None;

        if self.is_busy() || a == b || !self.in_bounds(a) || !self.in_bounds(b) {
            return SwapOutcome::Rejected;
        }
        let (ia, ib) = (self.index(a.row, a.col), self.index(b.row, b.col));
        let (Some(pa), Some(pb)) = (&self.cells[ia], &self.cells[ib]) else {
            return SwapOutcome::Rejected;
        };
        if !self.adjacent(pa.position(), pb.position()) {
            debug!("swap rejected: {:?} and {:?} are not adjacent", a, b);
            return SwapOutcome::Rejected;
        }

        self.swap_cells(ia, ib);
        if !self.check_matches() {
            self.swap_cells(ia, ib);
            self.failed_swap = true;
            debug!("swap {:?} <-> {:?} made no match, reverted", a, b);
            return SwapOutcome::Reverted;
        }

        let removed = self.remove_matches();
        self.failed_swap = false;
        debug!("swap {:?} <-> {:?} removed {} pieces", a, b, removed);
        self.begin_refill();
        SwapOutcome::Matched { removed }
    }

    fn adjacent(&self, p: Vec2, q: Vec2) -> bool {
        let pitch = self.config.pitch();
        let dx = (p.x - q.x).abs();
        let dy = (p.y - q.y).abs();
        let near = |v: f32, want: f32| (v - want).abs() < ADJACENCY_TOLERANCE;
        (near(dx, pitch) && near(dy, 0.0)) || (near(dy, pitch) && near(dx, 0.0))
    }

    /// Exchange occupancy and positions of two cells.
    fn swap_cells(&mut self, ia: usize, ib: usize) {
        let pos_a = self.cells[ia].as_ref().map(Piece::position);
        let pos_b = self.cells[ib].as_ref().map(Piece::position);
        self.cells.swap(ia, ib);
        if let (Some(piece), Some(pos)) = (self.cells[ia].as_mut(), pos_a) {
            piece.set_position(pos);
        }
        if let (Some(piece), Some(pos)) = (self.cells[ib].as_mut(), pos_b) {
            piece.set_position(pos);
        }
        self.velocity[ia] = 0.0;
        self.velocity[ib] = 0.0;
    }

    /// Mark the first run found and report whether there was one.
    ///
    /// Rows are scanned before columns, each left-to-right / top-to-bottom,
    /// and the scan stops at the first run. Further runs are picked up by
    /// the cascade after the next settle.
    pub fn check_matches(&mut self) -> bool {
        let Some(run) = self.find_first_run() else {
            return false;
        };
        for pos in run.cells() {
            let idx = self.index(pos.row, pos.col);
            if let Some(piece) = self.cells[idx].as_mut() {
                piece.set_matched(true);
            }
        }
        true
    }

    /// First run in scan order, without marking anything.
    pub fn find_first_run(&self) -> Option<Run> {
        (0..self.config.rows)
            .find_map(|row| self.scan_line(Axis::Row, row))
            .or_else(|| (0..self.config.columns).find_map(|col| self.scan_line(Axis::Column, col)))
    }

    pub fn has_any_run(&self) -> bool {
        self.find_first_run().is_some()
    }

    fn scan_line(&self, axis: Axis, line: usize) -> Option<Run> {
        let len = match axis {
            Axis::Row => self.config.columns,
            Axis::Column => self.config.rows,
        };
        let at = |i: usize| axis.cell(line, i);
        let kind = |i: usize| {
            let pos = at(i);
            self.kind_at(pos.row, pos.col)
        };

        let mut count = 1;
        for i in 1..len {
            let current = kind(i);
            if current.is_some() && current == kind(i - 1) {
                count += 1;
                continue;
            }
            if count >= MIN_RUN {
                return Some(Run {
                    axis,
                    start: at(i - count),
                    len: count,
                });
            }
            count = 1;
        }
        // Run touching the last cell of the line.
        if count >= MIN_RUN {
            return Some(Run {
                axis,
                start: at(len - count),
                len: count,
            });
        }
        None
    }

    /// Empty every matched cell, start its fade-out and count it toward the score.
    pub fn remove_matches(&mut self) -> u32 {
        let mut removed = 0;
        for cell in &mut self.cells {
            if cell.as_ref().is_some_and(Piece::is_matched) {
                if let Some(mut piece) = cell.take() {
                    piece.set_matched(false);
                    piece.start_fade_out();
                    self.fading.push(piece);
                    removed += 1;
                }
            }
        }
        self.removed += removed;
        removed
    }

    fn begin_refill(&mut self) {
        self.compact_and_refill();
        self.phase = Phase::Delay { elapsed_ms: 0 };
    }

    /// Let pieces drop into the gaps below them, then fill the top of every
    /// column with new pieces spawned above the board.
    ///
    /// Scanning bottom-up and pulling the nearest piece above into each gap
    /// leaves the vacated cell to be revisited further up the same scan, so a
    /// single pass compacts the column completely.
    fn compact_and_refill(&mut self) {
        let (rows, columns) = (self.config.rows, self.config.columns);
        let pitch = self.config.pitch();

        for col in 0..columns {
            for row in (0..rows).rev() {
                let idx = self.index(row, col);
                if self.cells[idx].is_some() {
                    continue;
                }
                let source = (0..row)
                    .rev()
                    .map(|above| self.index(above, col))
                    .find(|&i| self.cells[i].is_some());
                if let Some(src) = source {
                    self.cells[idx] = self.cells[src].take();
                    self.velocity[idx] = 0.0;
                }
            }

            let empty: ArrayVec<usize, MAX_GRID_DIM> = (0..rows)
                .filter(|&row| self.cells[self.index(row, col)].is_none())
                .collect();
            let count = empty.len();
            for (i, &row) in empty.iter().enumerate() {
                let idx = self.index(row, col);
                let target = self.targets[idx];
                // Stack spawns above the board in final order so they never cross.
                let spawn = Vec2::new(target.x, self.config.anchor.y - (count - i) as f32 * pitch);
                let mut piece = self.factory.create_piece(spawn);
                piece.start_fade_in();
                self.cells[idx] = Some(piece);
                self.velocity[idx] = 0.0;
            }
        }
    }

    fn advance_refill(&mut self, elapsed_ms: u32) {
        match self.phase {
            Phase::Idle => {}
            Phase::Delay { elapsed_ms: waited } => {
                let waited = waited.saturating_add(elapsed_ms);
                if waited >= self.config.fall_delay_ms {
                    self.phase = Phase::Falling;
                    self.step_fall(elapsed_ms);
                    self.finish_if_settled();
                } else {
                    self.phase = Phase::Delay { elapsed_ms: waited };
                }
            }
            Phase::Falling => {
                self.step_fall(elapsed_ms);
                self.finish_if_settled();
            }
        }
    }

    /// Accelerate every piece above its target and clamp at arrival.
    fn step_fall(&mut self, elapsed_ms: u32) {
        let dt = elapsed_ms as f32 / 1000.0;
        let gravity = self.config.gravity;
        for (idx, cell) in self.cells.iter_mut().enumerate() {
            let Some(piece) = cell.as_mut() else {
                continue;
            };
            let target = self.targets[idx];
            let mut position = piece.position();
            if position.y >= target.y {
                continue;
            }
            self.velocity[idx] += gravity * dt;
            position.y += self.velocity[idx] * dt;
            if position.y >= target.y {
                position.y = target.y;
                self.velocity[idx] = 0.0;
            }
            piece.set_position(position);
        }
    }

    fn is_settled(&self) -> bool {
        let epsilon = self.config.settle_epsilon;
        self.cells
            .iter()
            .zip(&self.targets)
            .all(|(cell, &target)| cell.as_ref().map_or(true, |p| p.position().distance(target) <= epsilon))
    }

    fn finish_if_settled(&mut self) {
        if !self.is_settled() {
            return;
        }
        for (idx, cell) in self.cells.iter_mut().enumerate() {
            if let Some(piece) = cell.as_mut() {
                piece.set_position(self.targets[idx]);
            }
            self.velocity[idx] = 0.0;
        }
        self.phase = Phase::Idle;

        if self.check_matches() {
            let removed = self.remove_matches();
            self.cascade_depth += 1;
            debug!("cascade {} removed {} pieces", self.cascade_depth, removed);
            self.begin_refill();
        } else if self.cascade_depth > 0 {
            debug!("board settled after {} cascades", self.cascade_depth);
            self.cascade_depth = 0;
        }
    }

    /// Draw bottom row first, so lower pieces sit under the ones above.
    pub fn draw(&self, target: &mut impl DrawTarget) {
        let size = self.config.tile_size;
        for piece in &self.fading {
            target.draw_piece(piece, size);
        }
        for row in (0..self.config.rows).rev() {
            for col in 0..self.config.columns {
                let Some(piece) = &self.cells[self.index(row, col)] else {
                    continue;
                };
                target.draw_piece(piece, size);
                if self.selected == Some(CellPos::new(row, col)) {
                    target.draw_selection(piece.position() - Vec2::new(2.0, 2.0), size + 4.0);
                }
            }
        }
        target.draw_border(
            self.config.anchor,
            self.config.pixel_width(),
            self.config.pixel_height(),
            self.config.border_width,
        );
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            rows: self.config.rows,
            columns: self.config.columns,
            tile_size: self.config.tile_size,
            pitch: self.config.pitch(),
            anchor: self.config.anchor,
            cells: self.cells.iter().map(|c| c.as_ref().map(PieceView::from)).collect(),
            selected: self.selected,
            hovered: self.hovered,
            phase: self.phase,
            fading: self.fading.iter().map(PieceView::from).collect(),
        }
    }

    /// Would placing `kind` at `(row, col)` complete a run with the two
    /// cells to its left or the two above it?
    fn completes_run(&self, row: usize, col: usize, kind: PieceKind) -> bool {
        let same = |r: usize, c: usize| self.kind_at(r, c) == Some(kind);
        (col >= 2 && same(row, col - 1) && same(row, col - 2))
            || (row >= 2 && same(row - 1, col) && same(row - 2, col))
    }

    /// Mutable cell access for white-box tests.
    #[cfg(test)]
    fn cell_mut(&mut self, row: usize, col: usize) -> &mut Option<Piece> {
        let idx = self.index(row, col);
        &mut self.cells[idx]
    }
}
