//! Depth-first maze solver with backtracking
//!
//! Starting at the entrance, the solver tries north, east, south and west in
//! that order, stepping through every open wall into cells it has not seen.
//! The first route that reaches the exit wins; there is no attempt to find
//! the shortest one. A branch that runs dead is drawn again in the undo
//! style as the search backs out of it.
//!
//! `visited` is never cleared here, so afterwards the grid shows every cell
//! the search touched. Since no cell is entered twice, the search always
//! terminates after at most one visit per reachable cell.

use crate::grid::{Direction, Grid, Position};
use crate::render::{Canvas, RenderSurface};

struct Frame {
    pos: Position,
    next: usize,
}

/// Whether a route from the entrance to the exit exists.
pub fn solve<S: RenderSurface + ?Sized>(grid: &mut Grid, canvas: &mut Canvas<'_, S>) -> bool {
    find_path(grid, canvas).is_some()
}

/// Entrance-to-exit cell sequence found by the search, or `None` when the
/// exit cannot be reached.
pub fn find_path<S: RenderSurface + ?Sized>(
    grid: &mut Grid,
    canvas: &mut Canvas<'_, S>,
) -> Option<Vec<Position>> {
    let entrance = grid.entrance();
    let exit = grid.exit();
    let mut moves = 0usize;
    let mut undos = 0usize;

    canvas.animate();
    grid.cell_mut(entrance).set_visited(true);
    let mut stack = vec![Frame {
        pos: entrance,
        next: 0,
    }];

    if entrance == exit {
        tracing::info!(moves, undos, length = 1, "maze solved");
        return Some(vec![entrance]);
    }

    while let Some(frame) = stack.last_mut() {
        let Some(&direction) = Direction::ALL.get(frame.next) else {
            let dead_end = frame.pos;
            stack.pop();
            if let Some(parent) = stack.last() {
                tracing::trace!(from = ?parent.pos, to = ?dead_end, "backtrack");
                canvas.draw_move(parent.pos, dead_end, true);
                canvas.animate();
                undos += 1;
            }
            continue;
        };
        frame.next += 1;
        let pos = frame.pos;

        let Some(next) = grid.neighbor(pos, direction) else {
            continue;
        };
        if grid.cell(next).visited() || !grid.has_passage(pos, direction) {
            continue;
        }

        canvas.draw_move(pos, next, false);
        moves += 1;
        canvas.animate();
        grid.cell_mut(next).set_visited(true);
        stack.push(Frame { pos: next, next: 0 });

        if next == exit {
            let path: Vec<Position> = stack.iter().map(|frame| frame.pos).collect();
            tracing::info!(moves, undos, length = path.len(), "maze solved");
            return Some(path);
        }
    }

    tracing::info!(moves, undos, "no route to the exit");
    None
}
