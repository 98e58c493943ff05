//! Maze generation and solving
//!
//! A maze is a fixed `cols x rows` grid of walled cells. The generator
//! carves it into a spanning tree with a seeded randomized depth-first
//! search, opening the top of the entrance `(0, 0)` and the bottom of the
//! exit `(cols - 1, rows - 1)`. The solver then walks it depth-first from
//! entrance to exit. Both report every step to a [`RenderSurface`] so the
//! process can be animated; [`NullSurface`] and [`RecordingSurface`] stand
//! in when nothing needs to be shown.

pub mod error;
pub mod grid;
pub mod layout;
pub mod maze;
pub mod maze_gen;
pub mod render;
pub mod rng;
pub mod solver;

pub use error::MazeError;
pub use grid::{Cell, Direction, Grid, Position};
pub use layout::{Layout, MazeConfig, Point, Rect, DEFAULT_CELL_SIZE};
pub use maze::Maze;
pub use maze_gen::{generate, MazeGenerator};
pub use render::{Canvas, NullSurface, RecordingSurface, RenderEvent, RenderSurface};
pub use rng::SimpleLCG;
pub use solver::{find_path, solve};
