//! Construction parameters and pixel geometry.

use serde::{Deserialize, Serialize};

use crate::error::MazeError;
use crate::grid::Position;

/// Cell edge length used when the caller does not pick one.
pub const DEFAULT_CELL_SIZE: i32 = 10;

/// A point on the drawing surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle spanned by two corners, `(x1, y1)` top-left.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Rect {
    /// Midpoint, rounded towards negative infinity.
    pub fn center(&self) -> Point {
        Point::new(midpoint(self.x1, self.x2), midpoint(self.y1, self.y2))
    }

    pub fn width(&self) -> i32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> i32 {
        self.y2 - self.y1
    }
}

fn midpoint(a: i32, b: i32) -> i32 {
    // lies between a and b, so it fits back into i32
    (i64::from(a) + i64::from(b)).div_euclid(2) as i32
}

/// `origin + count * size`, if every step fits in an i32.
fn far_edge(origin: i32, count: usize, size: i32) -> Option<i32> {
    i32::try_from(count).ok()?.checked_mul(size)?.checked_add(origin)
}

/// Everything needed to build a maze instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeConfig {
    #[serde(default)]
    pub x1: i32,
    #[serde(default)]
    pub y1: i32,
    pub num_cols: usize,
    pub num_rows: usize,
    #[serde(default = "default_cell_size")]
    pub cell_size_x: i32,
    #[serde(default = "default_cell_size")]
    pub cell_size_y: i32,
    /// `None` picks a fresh seed per run.
    #[serde(default)]
    pub seed: Option<u32>,
}

fn default_cell_size() -> i32 {
    DEFAULT_CELL_SIZE
}

impl MazeConfig {
    /// Anchored at the origin with default cell size and no seed.
    pub fn new(num_cols: usize, num_rows: usize) -> Self {
        Self {
            x1: 0,
            y1: 0,
            num_cols,
            num_rows,
            cell_size_x: DEFAULT_CELL_SIZE,
            cell_size_y: DEFAULT_CELL_SIZE,
            seed: None,
        }
    }

    pub fn with_anchor(mut self, x1: i32, y1: i32) -> Self {
        self.x1 = x1;
        self.y1 = y1;
        self
    }

    pub fn with_cell_size(mut self, width: i32, height: i32) -> Self {
        self.cell_size_x = width;
        self.cell_size_y = height;
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the parameters and derives the geometry.
    pub fn layout(&self) -> Result<Layout, MazeError> {
        Layout::new(
            Point::new(self.x1, self.y1),
            self.num_cols,
            self.num_rows,
            self.cell_size_x,
            self.cell_size_y,
        )
    }
}

/// Maps grid positions to pixel rectangles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    origin: Point,
    cols: usize,
    rows: usize,
    cell_width: i32,
    cell_height: i32,
}

impl Layout {
    pub fn new(
        origin: Point,
        cols: usize,
        rows: usize,
        cell_width: i32,
        cell_height: i32,
    ) -> Result<Self, MazeError> {
        if cols == 0 || rows == 0 {
            return Err(MazeError::InvalidDimensions { cols, rows });
        }
        if cell_width <= 0 || cell_height <= 0 {
            return Err(MazeError::InvalidCellSize {
                width: cell_width,
                height: cell_height,
            });
        }

        // every cell rectangle lies inside the extent, so checking its far
        // corner once keeps all later geometry in range
        if far_edge(origin.x, cols, cell_width).is_none() || far_edge(origin.y, rows, cell_height).is_none() {
            return Err(MazeError::LayoutOverflow {
                x: origin.x,
                y: origin.y,
                cols,
                rows,
                width: cell_width,
                height: cell_height,
            });
        }

        Ok(Self {
            origin,
            cols,
            rows,
            cell_width,
            cell_height,
        })
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn cell_rect(&self, pos: Position) -> Rect {
        let x1 = self.origin.x + pos.col as i32 * self.cell_width;
        let y1 = self.origin.y + pos.row as i32 * self.cell_height;

        Rect {
            x1,
            y1,
            x2: x1 + self.cell_width,
            y2: y1 + self.cell_height,
        }
    }

    pub fn center(&self, pos: Position) -> Point {
        self.cell_rect(pos).center()
    }

    /// Bounding rectangle of the whole maze.
    pub fn extent(&self) -> Rect {
        Rect {
            x1: self.origin.x,
            y1: self.origin.y,
            x2: self.origin.x + self.cols as i32 * self.cell_width,
            y2: self.origin.y + self.rows as i32 * self.cell_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_rect_and_center() {
        let layout = MazeConfig::new(15, 15).with_anchor(50, 40).layout().unwrap();
        let rect = layout.cell_rect(Position::new(2, 1));

        assert_eq!(rect, Rect { x1: 70, y1: 50, x2: 80, y2: 60 });
        assert_eq!(layout.center(Position::new(2, 1)), Point::new(75, 55));
        assert_eq!(layout.extent(), Rect { x1: 50, y1: 40, x2: 200, y2: 190 });
    }

    #[test]
    fn test_center_floors_odd_sizes() {
        let layout = Layout::new(Point::new(-3, 0), 2, 1, 3, 5).unwrap();

        assert_eq!(layout.center(Position::new(0, 0)), Point::new(-2, 2));
        assert_eq!(layout.center(Position::new(1, 0)), Point::new(1, 2));
    }

    #[test]
    fn test_invalid_configs() {
        assert_eq!(
            MazeConfig::new(0, 3).layout(),
            Err(MazeError::InvalidDimensions { cols: 0, rows: 3 })
        );
        assert_eq!(
            MazeConfig::new(3, 3).with_cell_size(0, 10).layout(),
            Err(MazeError::InvalidCellSize { width: 0, height: 10 })
        );
        assert_eq!(
            MazeConfig::new(3, 3).with_cell_size(10, -4).layout(),
            Err(MazeError::InvalidCellSize { width: 10, height: -4 })
        );
    }

    #[test]
    fn test_layout_must_fit_pixel_coordinates() {
        assert_eq!(
            MazeConfig::new(1000, 1).with_cell_size(3_000_000, 10).layout(),
            Err(MazeError::LayoutOverflow {
                x: 0,
                y: 0,
                cols: 1000,
                rows: 1,
                width: 3_000_000,
                height: 10,
            })
        );
        assert!(Layout::new(Point::new(0, i32::MAX - 5), 1, 1, 10, 10).is_err());
        assert!(Layout::new(Point::new(0, 0), i32::MAX as usize + 1, 1, 1, 1).is_err());
        assert!(Layout::new(Point::new(-10, 0), 1, 1, 10, 1).is_ok());
    }

    #[test]
    fn test_largest_layout_geometry() {
        let layout = Layout::new(Point::new(0, i32::MAX - 4), 2, 1, i32::MAX / 2, 4).unwrap();
        let last = Position::new(1, 0);

        assert_eq!(layout.extent().x2, i32::MAX - 1);
        assert_eq!(layout.cell_rect(last).x2, i32::MAX - 1);
        assert_eq!(layout.center(last), Point::new(i32::MAX / 2 + i32::MAX / 4, i32::MAX - 2));
    }

    #[test]
    fn test_config_json_defaults() {
        let config: MazeConfig = serde_json::from_str(r#"{"num_cols": 4, "num_rows": 6}"#).unwrap();

        assert_eq!(config, MazeConfig::new(4, 6));

        let seeded: MazeConfig =
            serde_json::from_str(r#"{"num_cols": 4, "num_rows": 6, "cell_size_x": 2, "seed": 9}"#).unwrap();
        assert_eq!(seeded.seed, Some(9));
        assert_eq!(seeded.cell_size_x, 2);
        assert_eq!(seeded.cell_size_y, DEFAULT_CELL_SIZE);
    }
}
