pub mod text_surface;

use std::error::Error;
use std::fs;
use std::io::Write;
use std::time::Duration;

use maze_core::{Grid, Maze, MazeConfig, Position};
use serde::{Deserialize, Serialize};

pub use text_surface::TextSurface;

/// Cell size that makes the text raster match the binary grid view.
pub const TEXT_CELL_SIZE: i32 = 2;

/// Pause between animation frames when `--animate` is given without `--delay-ms`.
pub const DEFAULT_FRAME_DELAY: Duration = Duration::from_millis(10);

const MAX_REPORT_BYTES: u64 = 50_000_000;

/// Outcome of one generate/solve run, as written to disk.
///
/// `binary_grid` is for people and other tools; only `grid` is read back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MazeReport {
    /// Seed the maze was generated from, absent for re-solved grids
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,

    pub cols: usize,
    pub rows: usize,

    /// Whether the solver reached the exit
    pub solved: bool,

    /// Entrance-to-exit route, empty when unsolved
    pub path: Vec<Position>,

    /// `#` = wall, `.` = open
    #[serde(default)]
    pub binary_grid: Vec<String>,

    /// Wall layout; visited flags reflect the solve
    pub grid: Grid,
}

/// A finished run: the report plus the final picture.
pub struct MazeRun {
    pub report: MazeReport,
    pub picture: String,
    pub frames: usize,
}

impl MazeRun {
    fn finish<W: Write>(maze: Maze<TextSurface<W>>, path: Option<Vec<Position>>) -> Self {
        let seed = maze.seed();
        let (grid, surface) = maze.into_parts();

        let report = MazeReport {
            seed,
            cols: grid.cols(),
            rows: grid.rows(),
            solved: path.is_some(),
            path: path.unwrap_or_default(),
            binary_grid: grid.to_text_rows(),
            grid,
        };

        Self {
            report,
            picture: surface.render(),
            frames: surface.frames(),
        }
    }
}

/// Generate a maze from `config` and solve it, drawing on a text raster.
///
/// Frames go to `out` on every pacing call when it is set.
///
/// # Example
/// ```
/// use host::run_maze;
/// use maze_core::MazeConfig;
/// use std::time::Duration;
///
/// let config = MazeConfig::new(4, 4).with_cell_size(2, 2).with_seed(12345);
/// let run = run_maze(config, None::<std::io::Sink>, Duration::ZERO).unwrap();
/// assert!(run.report.solved);
/// assert_eq!(run.report.path.len(), 7);
/// ```
pub fn run_maze<W: Write>(
    config: MazeConfig,
    out: Option<W>,
    delay: Duration,
) -> Result<MazeRun, Box<dyn Error>> {
    tracing::info!(
        "Running {}x{} maze (seed: {:?})",
        config.num_cols,
        config.num_rows,
        config.seed
    );

    let layout = config.layout()?;
    let surface = TextSurface::new(&layout, out, delay);
    let mut maze = Maze::new(config, surface)?;
    let path = maze.find_path();

    Ok(MazeRun::finish(maze, path))
}

/// Solve the grid stored in `report` again from scratch.
///
/// Only the anchor and cell size of `config` are used; the dimensions come
/// from the grid itself.
pub fn solve_report<W: Write>(
    report: &MazeReport,
    config: MazeConfig,
    out: Option<W>,
    delay: Duration,
) -> Result<MazeRun, Box<dyn Error>> {
    let grid = report.grid.clone();
    if grid.cols() != report.cols || grid.rows() != report.rows {
        return Err(format!(
            "Report says {}x{} but its grid is {}x{}",
            report.cols,
            report.rows,
            grid.cols(),
            grid.rows()
        )
        .into());
    }

    tracing::info!("Solving stored {}x{} maze", grid.cols(), grid.rows());

    let config = MazeConfig {
        num_cols: grid.cols(),
        num_rows: grid.rows(),
        ..config
    };
    let layout = config.layout()?;
    let surface = TextSurface::new(&layout, out, delay);
    let mut maze = Maze::from_grid(grid, &config, surface)?;
    let path = maze.find_path();

    let mut run = MazeRun::finish(maze, path);
    run.report.seed = report.seed;
    Ok(run)
}

pub fn save_report(report: &MazeReport, path: &str) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json)?;
    Ok(())
}

pub fn load_report(path: &str) -> Result<MazeReport, Box<dyn Error>> {
    // Validate file size (prevent loading gigabytes into memory)
    if fs::metadata(path)?.len() > MAX_REPORT_BYTES {
        return Err("Report file is too large (max 50MB)".into());
    }

    let json = fs::read_to_string(path)?;
    let report: MazeReport = serde_json::from_str(&json)?;
    Ok(report)
}

pub fn load_config(path: &str) -> Result<MazeConfig, Box<dyn Error>> {
    let json = fs::read_to_string(path)?;
    let config: MazeConfig = serde_json::from_str(&json)?;
    config.layout()?;
    Ok(config)
}
