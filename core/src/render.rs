//! Drawing seam between the algorithms and whatever shows them.
//!
//! The generator and solver never talk to a [`RenderSurface`] directly; they
//! go through a [`Canvas`], which turns grid positions into pixel geometry
//! using the maze [`Layout`].

use crate::grid::{Cell, Grid, Position};
use crate::layout::{Layout, Point, Rect};

/// Something that can show a maze being built and solved.
pub trait RenderSurface {
    /// Draw the four walls of a cell. Present walls are drawn solid, removed
    /// walls are drawn faint; neither is skipped.
    fn draw_cell(&mut self, rect: Rect, cell: &Cell);

    /// Draw a path segment between two cell centres. `undo` marks a
    /// segment that the solver backed out of.
    fn draw_move(&mut self, from: Point, to: Point, undo: bool);

    /// Make pending drawing visible and wait out the animation delay.
    fn flush_and_pace(&mut self);
}

impl<S: RenderSurface + ?Sized> RenderSurface for &mut S {
    fn draw_cell(&mut self, rect: Rect, cell: &Cell) {
        (**self).draw_cell(rect, cell);
    }

    fn draw_move(&mut self, from: Point, to: Point, undo: bool) {
        (**self).draw_move(from, to, undo);
    }

    fn flush_and_pace(&mut self) {
        (**self).flush_and_pace();
    }
}

/// Discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSurface;

impl RenderSurface for NullSurface {
    fn draw_cell(&mut self, _rect: Rect, _cell: &Cell) {}

    fn draw_move(&mut self, _from: Point, _to: Point, _undo: bool) {}

    fn flush_and_pace(&mut self) {}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderEvent {
    Cell { rect: Rect, walls: [bool; 4] },
    Move { from: Point, to: Point, undo: bool },
    Flush,
}

/// Keeps every call in order, for assertions in tests.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    pub events: Vec<RenderEvent>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cell_draws(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, RenderEvent::Cell { .. }))
            .count()
    }

    pub fn flushes(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, RenderEvent::Flush))
            .count()
    }

    /// `(from, to, undo)` for every move, in call order.
    pub fn moves(&self) -> Vec<(Point, Point, bool)> {
        self.events
            .iter()
            .filter_map(|e| match *e {
                RenderEvent::Move { from, to, undo } => Some((from, to, undo)),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl RenderSurface for RecordingSurface {
    fn draw_cell(&mut self, rect: Rect, cell: &Cell) {
        self.events.push(RenderEvent::Cell {
            rect,
            walls: cell.walls(),
        });
    }

    fn draw_move(&mut self, from: Point, to: Point, undo: bool) {
        self.events.push(RenderEvent::Move { from, to, undo });
    }

    fn flush_and_pace(&mut self) {
        self.events.push(RenderEvent::Flush);
    }
}

/// A surface bound to the geometry of one maze.
pub struct Canvas<'a, S: ?Sized> {
    layout: &'a Layout,
    surface: &'a mut S,
}

impl<'a, S: RenderSurface + ?Sized> Canvas<'a, S> {
    pub fn new(layout: &'a Layout, surface: &'a mut S) -> Self {
        Self { layout, surface }
    }

    pub fn draw_cell(&mut self, grid: &Grid, pos: Position) {
        self.surface.draw_cell(self.layout.cell_rect(pos), grid.cell(pos));
    }

    pub fn draw_move(&mut self, from: Position, to: Position, undo: bool) {
        self.surface
            .draw_move(self.layout.center(from), self.layout.center(to), undo);
    }

    pub fn animate(&mut self) {
        self.surface.flush_and_pace();
    }
}
