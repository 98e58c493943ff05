//! Grid and cell model
//!
//! Cells are stored column-major and addressed as `(col, row)`. Every cell
//! keeps its own copy of the four walls around it, so the wall between two
//! neighbours exists twice. Nothing in this module mirrors a wall on its own
//! except [`Grid::remove_wall_between`]; callers that flip single walls with
//! [`Cell::set_wall`] are responsible for keeping both sides in agreement.
//!
//! Coordinates are not bounds-checked in release builds. Passing a position
//! outside the grid is a caller bug.

use serde::{Deserialize, Serialize};

use crate::error::MazeError;

/// Cardinal direction, in the fixed order used by the solver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// North, east, south, west.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Slot of this direction in a cell's wall array.
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// `(dcol, drow)` step; rows grow downwards.
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }
}

/// A grid coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub col: usize,
    pub row: usize,
}

impl Position {
    pub const fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }
}

/// One maze cell: four walls plus the scratch `visited` flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    walls: [bool; 4], // [NORTH, EAST, SOUTH, WEST]
    #[serde(default)]
    visited: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self::new()
    }
}

impl Cell {
    /// A fully walled, unvisited cell.
    pub const fn new() -> Self {
        Self {
            walls: [true; 4],
            visited: false,
        }
    }

    pub fn has_wall(&self, direction: Direction) -> bool {
        self.walls[direction.index()]
    }

    /// Sets a single wall. The neighbour's matching wall is left untouched.
    pub fn set_wall(&mut self, direction: Direction, present: bool) {
        self.walls[direction.index()] = present;
    }

    pub fn has_top_wall(&self) -> bool {
        self.has_wall(Direction::North)
    }

    pub fn has_right_wall(&self) -> bool {
        self.has_wall(Direction::East)
    }

    pub fn has_bottom_wall(&self) -> bool {
        self.has_wall(Direction::South)
    }

    pub fn has_left_wall(&self) -> bool {
        self.has_wall(Direction::West)
    }

    /// Walls in `[north, east, south, west]` order.
    pub fn walls(&self) -> [bool; 4] {
        self.walls
    }

    pub fn visited(&self) -> bool {
        self.visited
    }

    pub fn set_visited(&mut self, visited: bool) {
        self.visited = visited;
    }
}

/// Fixed-size `cols x rows` grid of cells.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridRepr", into = "GridRepr")]
pub struct Grid {
    cols: usize,
    rows: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Allocates a grid with every wall present and nothing visited.
    pub fn new(cols: usize, rows: usize) -> Result<Self, MazeError> {
        if cols == 0 || rows == 0 {
            return Err(MazeError::InvalidDimensions { cols, rows });
        }

        Ok(Self {
            cols,
            rows,
            cells: vec![Cell::new(); cols * rows],
        })
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Top-left cell, `(0, 0)`.
    pub fn entrance(&self) -> Position {
        Position::new(0, 0)
    }

    /// Bottom-right cell, `(cols - 1, rows - 1)`.
    pub fn exit(&self) -> Position {
        Position::new(self.cols - 1, self.rows - 1)
    }

    fn index(&self, pos: Position) -> usize {
        debug_assert!(
            pos.col < self.cols && pos.row < self.rows,
            "cell coordinates are out of bounds"
        );

        pos.col * self.rows + pos.row
    }

    pub fn cell(&self, pos: Position) -> &Cell {
        &self.cells[self.index(pos)]
    }

    pub fn cell_mut(&mut self, pos: Position) -> &mut Cell {
        let index = self.index(pos);
        &mut self.cells[index]
    }

    /// The cell one step away in `direction`, if it lies inside the grid.
    pub fn neighbor(&self, pos: Position, direction: Direction) -> Option<Position> {
        let (dcol, drow) = direction.offset();
        let col = pos.col.checked_add_signed(dcol)?;
        let row = pos.row.checked_add_signed(drow)?;

        (col < self.cols && row < self.rows).then_some(Position::new(col, row))
    }

    /// Removes the wall between `pos` and its neighbour on both sides.
    ///
    /// Returns the neighbour, or `None` (and changes nothing) when `pos`
    /// sits on the border in that direction.
    pub fn remove_wall_between(&mut self, pos: Position, direction: Direction) -> Option<Position> {
        let next = self.neighbor(pos, direction)?;
        self.cell_mut(pos).set_wall(direction, false);
        self.cell_mut(next).set_wall(direction.opposite(), false);
        Some(next)
    }

    /// Whether the wall on `pos`'s side in `direction` is open.
    pub fn has_passage(&self, pos: Position, direction: Direction) -> bool {
        !self.cell(pos).has_wall(direction)
    }

    pub fn reset_visited(&mut self) {
        for cell in &mut self.cells {
            cell.set_visited(false);
        }
    }

    /// All positions, column by column.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.cols).flat_map(move |col| (0..self.rows).map(move |row| Position::new(col, row)))
    }

    /// Finds the first wall whose mirror on the neighbouring cell differs.
    pub fn check_walls(&self) -> Result<(), MazeError> {
        for pos in self.positions() {
            for direction in [Direction::East, Direction::South] {
                let Some(next) = self.neighbor(pos, direction) else {
                    continue;
                };

                if self.cell(pos).has_wall(direction) != self.cell(next).has_wall(direction.opposite()) {
                    return Err(MazeError::InconsistentWalls {
                        col: pos.col,
                        row: pos.row,
                        direction,
                    });
                }
            }
        }

        Ok(())
    }

    pub fn is_wall_consistent(&self) -> bool {
        self.check_walls().is_ok()
    }

    /// Number of open walls between pairs of cells inside the grid.
    pub fn passage_count(&self) -> usize {
        self.positions()
            .map(|pos| {
                [Direction::East, Direction::South]
                    .into_iter()
                    .filter(|&dir| self.neighbor(pos, dir).is_some() && self.has_passage(pos, dir))
                    .count()
            })
            .sum()
    }

    /// Binary matrix view of the walls: `0` = wall, `1` = open.
    ///
    /// The matrix is `(rows * 2 + 1) x (cols * 2 + 1)`, indexed `[y][x]`.
    /// Cell centres sit at `(row * 2 + 1, col * 2 + 1)` and every missing
    /// wall opens the byte between two centres, or between a centre and the
    /// border for the entrance and exit.
    pub fn to_binary_grid(&self) -> Vec<Vec<u8>> {
        let mut grid = vec![vec![0u8; self.cols * 2 + 1]; self.rows * 2 + 1];

        for pos in self.positions() {
            let cell = self.cell(pos);
            let gr = pos.row * 2 + 1;
            let gc = pos.col * 2 + 1;

            grid[gr][gc] = 1;

            if !cell.has_top_wall() {
                grid[gr - 1][gc] = 1;
            }
            if !cell.has_bottom_wall() {
                grid[gr + 1][gc] = 1;
            }
            if !cell.has_right_wall() {
                grid[gr][gc + 1] = 1;
            }
            if !cell.has_left_wall() {
                grid[gr][gc - 1] = 1;
            }
        }

        grid
    }

    /// [`Grid::to_binary_grid`] as text, `#` for walls and `.` for openings.
    pub fn to_text_rows(&self) -> Vec<String> {
        self.to_binary_grid()
            .iter()
            .map(|row| row.iter().map(|&b| if b == 1 { '.' } else { '#' }).collect())
            .collect()
    }
}

#[derive(Serialize, Deserialize)]
struct GridRepr {
    cols: usize,
    rows: usize,
    cells: Vec<Cell>,
}

impl From<Grid> for GridRepr {
    fn from(grid: Grid) -> Self {
        Self {
            cols: grid.cols,
            rows: grid.rows,
            cells: grid.cells,
        }
    }
}

impl TryFrom<GridRepr> for Grid {
    type Error = MazeError;

    fn try_from(repr: GridRepr) -> Result<Self, Self::Error> {
        let mut grid = Grid::new(repr.cols, repr.rows)?;

        if repr.cells.len() != grid.cells.len() {
            return Err(MazeError::CellCountMismatch {
                expected: grid.cells.len(),
                actual: repr.cells.len(),
            });
        }

        grid.cells = repr.cells;
        grid.check_walls()?;
        Ok(grid)
    }
}
