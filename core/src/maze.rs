use crate::error::MazeError;
use crate::grid::{Grid, Position};
use crate::layout::{Layout, MazeConfig};
use crate::maze_gen::MazeGenerator;
use crate::render::{Canvas, RenderSurface};
use crate::solver;

/// A generated maze together with the surface it is drawn on.
///
/// Building one runs the generator to completion; [`Maze::solve`] then runs
/// the solver on the same grid.
pub struct Maze<S> {
    grid: Grid,
    layout: Layout,
    seed: Option<u32>,
    surface: S,
}

impl<S: RenderSurface> Maze<S> {
    /// Generates a maze from `config`, drawing on `surface` as it goes.
    ///
    /// # Example
    /// ```
    /// use maze_core::{Maze, MazeConfig, NullSurface};
    ///
    /// let mut maze = Maze::new(MazeConfig::new(15, 15).with_seed(42), NullSurface).unwrap();
    /// assert_eq!(maze.seed(), Some(42));
    /// assert!(maze.solve());
    /// ```
    pub fn new(config: MazeConfig, mut surface: S) -> Result<Self, MazeError> {
        let layout = config.layout()?;
        let mut generator = MazeGenerator::new(config.seed);
        if config.seed.is_none() {
            tracing::info!(seed = generator.seed(), "no seed given, picked one");
        }

        let grid = generator.generate(
            layout.cols(),
            layout.rows(),
            &mut Canvas::new(&layout, &mut surface),
        )?;

        Ok(Self {
            grid,
            layout,
            seed: Some(generator.seed()),
            surface,
        })
    }

    /// Wraps an existing grid, e.g. one loaded from a report.
    ///
    /// Visited flags are cleared and every cell is drawn once so the surface
    /// matches the grid before solving.
    pub fn from_grid(mut grid: Grid, config: &MazeConfig, mut surface: S) -> Result<Self, MazeError> {
        let layout = MazeConfig {
            num_cols: grid.cols(),
            num_rows: grid.rows(),
            ..*config
        }
        .layout()?;
        grid.reset_visited();

        let mut canvas = Canvas::new(&layout, &mut surface);
        for pos in grid.positions() {
            canvas.draw_cell(&grid, pos);
        }
        canvas.animate();

        Ok(Self {
            grid,
            layout,
            seed: None,
            surface,
        })
    }

    /// Runs the solver; `true` iff the exit was reached.
    pub fn solve(&mut self) -> bool {
        self.find_path().is_some()
    }

    /// Runs the solver and returns the route it found.
    pub fn find_path(&mut self) -> Option<Vec<Position>> {
        let mut canvas = Canvas::new(&self.layout, &mut self.surface);
        solver::find_path(&mut self.grid, &mut canvas)
    }
}

impl<S> Maze<S> {
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Seed the maze was generated from; `None` for wrapped grids.
    pub fn seed(&self) -> Option<u32> {
        self.seed
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_parts(self) -> (Grid, S) {
        (self.grid, self.surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{NullSurface, RecordingSurface};

    #[test]
    fn test_new_generates_and_solves() {
        let mut maze = Maze::new(MazeConfig::new(15, 15).with_seed(42), RecordingSurface::new()).unwrap();

        assert_eq!(maze.grid().len(), 225);
        assert_eq!(maze.surface().cell_draws(), 451);
        maze.surface_mut().clear();

        let path = maze.find_path().unwrap();
        assert_eq!(path.len(), 145);
        assert!(maze.grid().cell(Position::new(14, 14)).visited());
    }

    #[test]
    fn test_rejects_bad_config() {
        let err = Maze::new(MazeConfig::new(3, 3).with_cell_size(-1, 10), NullSurface)
            .err()
            .unwrap();

        assert_eq!(err, MazeError::InvalidCellSize { width: -1, height: 10 });
    }

    #[test]
    fn test_rejects_layout_past_pixel_range() {
        let config = MazeConfig::new(1000, 1).with_cell_size(3_000_000, 10).with_seed(1);
        let mut surface = RecordingSurface::new();

        let err = Maze::new(config, &mut surface).err().unwrap();

        assert!(matches!(err, MazeError::LayoutOverflow { cols: 1000, .. }), "{err}");
        assert!(surface.events.is_empty());
    }

    #[test]
    fn test_unseeded_maze_reports_its_seed() {
        let first = Maze::new(MazeConfig::new(7, 5), NullSurface).unwrap();
        let seed = first.seed().unwrap();

        let again = Maze::new(MazeConfig::new(7, 5).with_seed(seed), NullSurface).unwrap();
        assert_eq!(first.grid(), again.grid());
    }

    #[test]
    fn test_from_grid_uses_grid_dimensions() {
        let generated = Maze::new(MazeConfig::new(6, 4).with_seed(8), NullSurface).unwrap();
        let (mut grid, _) = generated.into_parts();
        grid.cell_mut(Position::new(2, 2)).set_visited(true);

        let mut maze = Maze::from_grid(grid, &MazeConfig::new(1, 1), RecordingSurface::new()).unwrap();

        assert_eq!(maze.layout().cols(), 6);
        assert_eq!(maze.layout().rows(), 4);
        assert_eq!(maze.seed(), None);
        assert_eq!(maze.surface().cell_draws(), 24);
        assert!(maze.grid().positions().all(|p| !maze.grid().cell(p).visited()));
        assert!(maze.solve());
    }
}
