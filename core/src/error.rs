use thiserror::Error;

use crate::grid::Direction;

/// Errors raised while building or loading a maze.
///
/// An unsolvable grid is not an error: the solver reports it as `false`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    #[error("invalid maze dimensions {cols}x{rows}: both must be at least 1")]
    InvalidDimensions { cols: usize, rows: usize },

    #[error("invalid cell size {width}x{height}: both must be positive")]
    InvalidCellSize { width: i32, height: i32 },

    #[error("{cols}x{rows} cells of {width}x{height} at ({x}, {y}) do not fit in i32 pixel coordinates")]
    LayoutOverflow {
        x: i32,
        y: i32,
        cols: usize,
        rows: usize,
        width: i32,
        height: i32,
    },

    #[error("grid has {actual} cells, expected {expected}")]
    CellCountMismatch { expected: usize, actual: usize },

    #[error("wall {direction:?} of cell ({col}, {row}) disagrees with its neighbour")]
    InconsistentWalls {
        col: usize,
        row: usize,
        direction: Direction,
    },
}
