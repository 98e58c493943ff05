//! Maze generation using the Recursive Backtracker algorithm
//!
//! Algorithm: randomized depth-first search from the entrance
//! 1. Enter a cell: mark it visited, shuffle [N, E, S, W]
//! 2. Try the directions in shuffled order:
//!    - Skip neighbours outside the grid or already visited
//!    - Otherwise remove the wall pair and enter the neighbour
//! 3. A cell whose four directions are used up backtracks to its parent
//!
//! The recursion runs on an explicit frame stack, so grid size is bounded by
//! memory rather than by the thread's stack. Every cell is entered exactly
//! once and every carve links a new cell to the tree, which makes the result
//! a spanning tree: one path between any two cells, none unreachable.
//!
//! Each entered cell consumes exactly one shuffle of four directions, so a
//! seed fixes the layout completely.

use crate::error::MazeError;
use crate::grid::{Direction, Grid, Position};
use crate::render::{Canvas, RenderSurface};
use crate::rng::{fresh_seed, SimpleLCG};

/// One suspended level of the depth-first walk.
struct Frame {
    pos: Position,
    directions: [Direction; 4],
    next: usize,
}

/// Seeded maze generator.
pub struct MazeGenerator {
    rng: SimpleLCG,
    seed: u32,
}

impl MazeGenerator {
    /// Uses `seed` if given, otherwise draws a fresh one.
    pub fn new(seed: Option<u32>) -> Self {
        let seed = seed.unwrap_or_else(fresh_seed);
        Self {
            rng: SimpleLCG::new(seed),
            seed,
        }
    }

    /// The seed actually in use, also when it was picked at random.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Builds a `cols x rows` maze, drawing every step on `canvas`.
    ///
    /// The returned grid has the entrance and exit open, consistent walls
    /// and every `visited` flag cleared.
    pub fn generate<S: RenderSurface + ?Sized>(
        &mut self,
        cols: usize,
        rows: usize,
        canvas: &mut Canvas<'_, S>,
    ) -> Result<Grid, MazeError> {
        let mut grid = Grid::new(cols, rows)?;
        tracing::debug!(cols, rows, seed = self.seed, "generating maze");

        for pos in grid.positions() {
            canvas.draw_cell(&grid, pos);
            canvas.animate();
        }

        Self::break_entrance_and_exit(&mut grid, canvas);
        let carved = self.recursive_backtracker(&mut grid, canvas);
        grid.reset_visited();

        tracing::info!(cols, rows, seed = self.seed, carved, "maze generated");
        Ok(grid)
    }

    fn break_entrance_and_exit<S: RenderSurface + ?Sized>(grid: &mut Grid, canvas: &mut Canvas<'_, S>) {
        let entrance = grid.entrance();
        grid.cell_mut(entrance).set_wall(Direction::North, false);
        canvas.draw_cell(grid, entrance);
        canvas.animate();

        let exit = grid.exit();
        grid.cell_mut(exit).set_wall(Direction::South, false);
        canvas.draw_cell(grid, exit);
        canvas.animate();
    }

    /// Carves passages from the entrance; returns how many walls came down.
    fn recursive_backtracker<S: RenderSurface + ?Sized>(
        &mut self,
        grid: &mut Grid,
        canvas: &mut Canvas<'_, S>,
    ) -> usize {
        let mut carved = 0;
        let mut stack = Vec::with_capacity(grid.len());
        let entrance = grid.entrance();
        stack.push(self.enter(grid, entrance));

        while let Some(frame) = stack.last_mut() {
            if frame.next == frame.directions.len() {
                stack.pop();
                continue;
            }

            let direction = frame.directions[frame.next];
            frame.next += 1;
            let pos = frame.pos;

            let Some(next) = grid.neighbor(pos, direction) else {
                continue;
            };
            if grid.cell(next).visited() {
                continue;
            }

            grid.remove_wall_between(pos, direction);
            carved += 1;
            tracing::trace!(?pos, ?direction, "carved");
            canvas.draw_cell(grid, pos);
            canvas.animate();

            let frame = self.enter(grid, next);
            stack.push(frame);
        }

        carved
    }

    fn enter(&mut self, grid: &mut Grid, pos: Position) -> Frame {
        grid.cell_mut(pos).set_visited(true);
        let mut directions = Direction::ALL;
        self.rng.shuffle(&mut directions);

        Frame {
            pos,
            directions,
            next: 0,
        }
    }
}

/// One-shot generation; see [`MazeGenerator::generate`].
pub fn generate<S: RenderSurface + ?Sized>(
    cols: usize,
    rows: usize,
    seed: Option<u32>,
    canvas: &mut Canvas<'_, S>,
) -> Result<Grid, MazeError> {
    MazeGenerator::new(seed).generate(cols, rows, canvas)
}
