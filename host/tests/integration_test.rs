use host::text_surface::{BLANK, FORWARD, UNDO};
use host::{load_config, load_report, run_maze, save_report, solve_report, MazeReport, TextSurface};
use maze_core::{Direction, Grid, Maze, MazeConfig, Position};
use std::io::Sink;
use std::time::Duration;

/// The known maze seed for testing
const MAZE_SEED: u32 = 42;

fn text_config(cols: usize, rows: usize) -> MazeConfig {
    MazeConfig::new(cols, rows).with_cell_size(2, 2)
}

fn quiet_run(config: MazeConfig) -> host::MazeRun {
    run_maze(config, None::<Sink>, Duration::ZERO).expect("maze run failed")
}

fn temp_path(name: &str) -> String {
    std::env::temp_dir()
        .join(format!("maze-host-{}-{}", std::process::id(), name))
        .to_string_lossy()
        .into_owned()
}

#[test]
fn test_seed_42_is_solved() {
    let run = quiet_run(text_config(15, 15).with_seed(MAZE_SEED));
    let report = &run.report;

    assert!(report.solved);
    assert_eq!(report.seed, Some(MAZE_SEED));
    assert_eq!(report.path.len(), 145);
    assert_eq!(report.path.first(), Some(&Position::new(0, 0)));
    assert_eq!(report.path.last(), Some(&Position::new(14, 14)));
    assert_eq!(report.binary_grid.len(), 31);
    assert_eq!(report.binary_grid[0], "#.#############################");
    assert_eq!(report.binary_grid[30], "#############################.#");

    // generation: 225 cells + entrance + exit + 224 carves; solving: entry + 198 moves + 54 undos
    assert_eq!(run.frames, 451 + 253);
}

#[test]
fn test_picture_shows_route_and_dead_ends() {
    let config = text_config(15, 15).with_seed(MAZE_SEED);
    let layout = config.layout().unwrap();
    let mut maze = Maze::new(config, TextSurface::offscreen(&layout)).unwrap();

    // before solving the raster is the binary grid with blank cell centres
    let expected: Vec<String> = maze
        .grid()
        .to_text_rows()
        .iter()
        .enumerate()
        .map(|(y, row)| {
            row.chars()
                .enumerate()
                .map(|(x, c)| if x % 2 == 1 && y % 2 == 1 { ' ' } else { c })
                .collect()
        })
        .collect();
    assert_eq!(maze.surface().rows(), expected);

    let path = maze.find_path().unwrap();
    let surface = maze.surface();

    // every route cell and every wall crossed between them
    assert_eq!(surface.count(FORWARD), path.len() * 2 - 1);
    // 54 abandoned cells, each with the wall leading into it
    assert_eq!(surface.count(UNDO), 54 * 2);
    for pos in &path {
        let centre = maze.layout().center(*pos);
        assert_eq!(surface.pixel(centre.x, centre.y), Some(FORWARD));
    }
}

#[test]
fn test_single_cell_maze() {
    let run = quiet_run(text_config(1, 1).with_seed(MAZE_SEED));

    assert!(run.report.solved);
    assert_eq!(run.report.path, vec![Position::new(0, 0)]);
    assert_eq!(run.report.binary_grid, vec!["#.#", "#.#", "#.#"]);
    assert_eq!(run.picture, "#.#\n# #\n#.#");
}

#[test]
fn test_unseeded_runs_are_reproducible_from_report() {
    let first = quiet_run(text_config(9, 6));
    let seed = first.report.seed.expect("generated maze must report its seed");

    let again = quiet_run(text_config(9, 6).with_seed(seed));
    assert_eq!(first.report.grid, again.report.grid);
    assert_eq!(first.report.path, again.report.path);
}

#[test]
fn test_invalid_config_is_rejected() {
    let err = run_maze(MazeConfig::new(0, 3), None::<Sink>, Duration::ZERO)
        .err()
        .expect("zero columns must fail");
    assert!(err.to_string().contains("invalid maze dimensions"), "{err}");

    let err = run_maze(text_config(3, 3).with_cell_size(2, 0), None::<Sink>, Duration::ZERO)
        .err()
        .expect("zero cell height must fail");
    assert!(err.to_string().contains("invalid cell size"), "{err}");
}

#[test]
fn test_report_roundtrip_and_resolve() {
    let run = quiet_run(text_config(12, 8).with_seed(7));
    let path = temp_path("report.json");

    save_report(&run.report, &path).unwrap();
    let loaded = load_report(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded.grid, run.report.grid);
    assert_eq!(loaded.seed, Some(7));

    let resolved = solve_report(&loaded, text_config(1, 1), None::<Sink>, Duration::ZERO).unwrap();
    assert!(resolved.report.solved);
    assert_eq!(resolved.report.path, run.report.path);
    assert_eq!(resolved.picture, run.picture);
}

#[test]
fn test_unsolvable_report() {
    // two cells, nothing carved between them
    let mut grid = Grid::new(2, 1).unwrap();
    grid.cell_mut(Position::new(0, 0)).set_wall(Direction::North, false);
    grid.cell_mut(Position::new(1, 0)).set_wall(Direction::South, false);
    let report = MazeReport {
        seed: None,
        cols: 2,
        rows: 1,
        solved: false,
        path: Vec::new(),
        binary_grid: Vec::new(),
        grid,
    };

    let run = solve_report(&report, text_config(2, 1), None::<Sink>, Duration::ZERO).unwrap();

    assert!(!run.report.solved);
    assert!(run.report.path.is_empty());
    assert_eq!(run.picture, "#.###\n# # #\n###.#");
    assert_eq!(run.picture.bytes().filter(|&b| b == BLANK).count(), 2);
}

#[test]
fn test_tampered_report_is_rejected() {
    let run = quiet_run(text_config(3, 3).with_seed(5));
    let mut json: serde_json::Value = serde_json::to_value(&run.report).unwrap();

    // open one side of an interior wall only
    json["grid"]["cells"][0]["walls"][1] = serde_json::Value::Bool(!run.report.grid.cell(Position::new(0, 0)).has_right_wall());
    let path = temp_path("tampered.json");
    std::fs::write(&path, json.to_string()).unwrap();

    let err = load_report(&path).err().expect("inconsistent walls must be rejected");
    std::fs::remove_file(&path).ok();
    assert!(err.to_string().contains("disagrees"), "{err}");
}

#[test]
fn test_oversized_report_is_rejected_before_reading() {
    let path = temp_path("huge.json");
    // sparse file: the size check must not need the contents
    let file = std::fs::File::create(&path).unwrap();
    file.set_len(50_000_001).unwrap();
    drop(file);

    let err = load_report(&path).err().expect("oversized report must fail");
    std::fs::remove_file(&path).ok();
    assert!(err.to_string().contains("too large"), "{err}");
}

#[test]
fn test_missing_report_file() {
    assert!(load_report(&temp_path("does-not-exist.json")).is_err());
}

#[test]
fn test_mismatched_report_dimensions() {
    let run = quiet_run(text_config(3, 2).with_seed(5));
    let mut report = run.report.clone();
    report.cols = 4;

    let err = solve_report(&report, text_config(1, 1), None::<Sink>, Duration::ZERO)
        .err()
        .expect("dimension mismatch must fail");
    assert!(err.to_string().contains("Report says 4x2"), "{err}");
}

#[test]
fn test_load_config_file() {
    let path = temp_path("config.json");
    std::fs::write(
        &path,
        r#"{"num_cols": 5, "num_rows": 3, "cell_size_x": 2, "cell_size_y": 2, "seed": 7}"#,
    )
    .unwrap();

    let config = load_config(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(config, text_config(5, 3).with_seed(7));

    let run = quiet_run(config);
    assert_eq!(
        run.report.binary_grid,
        vec![
            "#.#########",
            "#.#.......#",
            "#.#.#####.#",
            "#...#...#.#",
            "#####.###.#",
            "#.........#",
            "#########.#",
        ]
    );
    assert_eq!(run.report.path.len(), 9);
}

#[test]
fn test_invalid_config_file() {
    let path = temp_path("bad-config.json");
    std::fs::write(&path, r#"{"num_cols": 5, "num_rows": 0}"#).unwrap();

    let result = load_config(&path);
    std::fs::remove_file(&path).ok();
    assert!(result.is_err());
}

#[test]
fn test_animation_writes_every_frame() {
    let config = text_config(2, 2).with_seed(3);
    let layout = config.layout().unwrap();
    let surface = TextSurface::new(&layout, Some(Vec::new()), Duration::ZERO);
    let mut maze = Maze::new(config, surface).unwrap();
    assert!(maze.solve());

    let (_, surface) = maze.into_parts();
    let frames = surface.frames();
    let out = String::from_utf8(surface.into_writer().unwrap()).unwrap();
    assert_eq!(out.matches("\x1b[2J\x1b[H").count(), frames);
    // 4 cells + entrance + exit + 3 carves, then at least the solver's first pace
    assert!(frames > 9);
}
