use host::{
    load_config, load_report, run_maze, save_report, solve_report, MazeRun, DEFAULT_FRAME_DELAY,
    TEXT_CELL_SIZE,
};
use maze_core::MazeConfig;
use std::env;
use std::io;
use std::time::{Duration, Instant};

/// Flags shared by every command.
#[derive(Default)]
struct Flags {
    seed: Option<u32>,
    cell_size: Option<(i32, i32)>,
    delay: Option<Duration>,
    animate: bool,
    output: Option<String>,
}

impl Flags {
    fn parse(args: &[String]) -> Result<Self, String> {
        let mut flags = Flags::default();
        let mut iter = args.iter();

        while let Some(arg) = iter.next() {
            let mut value = |name: &str| {
                iter.next()
                    .cloned()
                    .ok_or_else(|| format!("{} requires a value", name))
            };

            match arg.as_str() {
                "--seed" => {
                    let raw = value("--seed")?;
                    let seed = raw
                        .parse()
                        .map_err(|_| format!("Invalid seed '{}'. Must be a non-negative integer.", raw))?;
                    flags.seed = Some(seed);
                }
                "--cell-size" => {
                    let raw = value("--cell-size")?;
                    flags.cell_size = Some(parse_cell_size(&raw)?);
                }
                "--delay-ms" => {
                    let raw = value("--delay-ms")?;
                    let ms = raw
                        .parse()
                        .map_err(|_| format!("Invalid delay '{}'. Must be milliseconds.", raw))?;
                    flags.delay = Some(Duration::from_millis(ms));
                }
                "--output" => flags.output = Some(value("--output")?),
                "--animate" => flags.animate = true,
                other => return Err(format!("Unknown option: {}", other)),
            }
        }

        Ok(flags)
    }

    fn delay(&self) -> Duration {
        match self.delay {
            Some(delay) => delay,
            None if self.animate => DEFAULT_FRAME_DELAY,
            None => Duration::ZERO,
        }
    }

    fn apply(&self, mut config: MazeConfig) -> MazeConfig {
        if let Some((width, height)) = self.cell_size {
            config = config.with_cell_size(width, height);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config
    }
}

fn parse_cell_size(raw: &str) -> Result<(i32, i32), String> {
    let invalid = || format!("Invalid cell size '{}'. Expected WxH, e.g. 4x2.", raw);
    let (width, height) = raw.split_once(['x', 'X']).ok_or_else(invalid)?;
    let width = width.parse().map_err(|_| invalid())?;
    let height = height.parse().map_err(|_| invalid())?;
    Ok((width, height))
}

fn parse_dimension(raw: &str, name: &str) -> usize {
    raw.parse().unwrap_or_else(|_| {
        eprintln!("❌ Error: Invalid {} '{}'. Must be a positive integer.", name, raw);
        std::process::exit(1);
    })
}

fn parse_flags(args: &[String]) -> Flags {
    Flags::parse(args).unwrap_or_else(|e| {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    })
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage(&args[0]);
        std::process::exit(1);
    }

    let command = &args[1];

    match command.as_str() {
        "run" => {
            if args.len() < 4 {
                eprintln!("Usage: {} run <cols> <rows> [options]", args[0]);
                std::process::exit(1);
            }

            let cols = parse_dimension(&args[2], "column count");
            let rows = parse_dimension(&args[3], "row count");
            let flags = parse_flags(&args[4..]);
            let config = flags.apply(MazeConfig::new(cols, rows).with_cell_size(TEXT_CELL_SIZE, TEXT_CELL_SIZE));

            run_command(config, &flags);
        }

        "config" => {
            if args.len() < 3 {
                eprintln!("Usage: {} config <config_file> [options]", args[0]);
                std::process::exit(1);
            }

            let config = load_config(&args[2]).unwrap_or_else(|e| {
                eprintln!("❌ Error loading config: {}", e);
                std::process::exit(1);
            });
            let flags = parse_flags(&args[3..]);

            run_command(flags.apply(config), &flags);
        }

        "solve" => {
            if args.len() < 3 {
                eprintln!("Usage: {} solve <report_file> [options]", args[0]);
                std::process::exit(1);
            }

            let flags = parse_flags(&args[3..]);
            solve_command(&args[2], &flags);
        }

        _ => {
            eprintln!("❌ Unknown command: {}", command);
            print_usage(&args[0]);
            std::process::exit(1);
        }
    }
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} <command> [options]", program);
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  run <cols> <rows> [options]");
    eprintln!("      Generate a maze and solve it");
    eprintln!("  config <config_file> [options]");
    eprintln!("      Like run, with parameters from a JSON maze config");
    eprintln!("      ({{\"num_cols\": 20, \"num_rows\": 20, \"cell_size_x\": 2, \"cell_size_y\": 2, \"seed\": 42}})");
    eprintln!("  solve <report_file> [options]");
    eprintln!("      Solve the maze stored in a report written by --output");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --seed <n>          Seed for generation (default: random, printed)");
    eprintln!("  --cell-size <WxH>   Characters per cell (default: {0}x{0})", TEXT_CELL_SIZE);
    eprintln!("  --animate           Print every frame while generating and solving");
    eprintln!("  --delay-ms <n>      Pause after each frame (default: 10 when animating, else 0)");
    eprintln!("  --output <file>     Save a JSON report of the finished maze");
    eprintln!();
    eprintln!("Legend: # wall, . removed wall, * route, x abandoned branch");
    eprintln!("Set RUST_LOG=debug for per-phase logging.");
}

fn animation_writer(flags: &Flags) -> Option<io::Stdout> {
    flags.animate.then(io::stdout)
}

fn run_command(config: MazeConfig, flags: &Flags) {
    let start = Instant::now();

    let run = run_maze(config, animation_writer(flags), flags.delay()).unwrap_or_else(|e| {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    });

    print_run(&run, start);
    save_if_requested(&run, flags);
}

fn solve_command(report_file: &str, flags: &Flags) {
    let report = load_report(report_file).unwrap_or_else(|e| {
        eprintln!("❌ Error loading report: {}", e);
        std::process::exit(1);
    });

    let config = flags.apply(
        MazeConfig::new(report.cols, report.rows).with_cell_size(TEXT_CELL_SIZE, TEXT_CELL_SIZE),
    );
    let start = Instant::now();

    let run = solve_report(&report, config, animation_writer(flags), flags.delay()).unwrap_or_else(|e| {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    });

    print_run(&run, start);
    save_if_requested(&run, flags);

    if !run.report.solved {
        std::process::exit(2);
    }
}

fn print_run(run: &MazeRun, start: Instant) {
    let report = &run.report;

    println!("{}", run.picture);
    println!();
    println!("{}", "=".repeat(40));
    println!("  Size: {}x{} cells", report.cols, report.rows);
    if let Some(seed) = report.seed {
        println!("  Seed: {}", seed);
    }
    println!("  Frames: {}", run.frames);
    println!("  Time: {:.2}s", start.elapsed().as_secs_f64());
    if report.solved {
        println!("✅ Solved, route is {} cells long", report.path.len());
    } else {
        println!("❌ No route from entrance to exit");
    }
}

fn save_if_requested(run: &MazeRun, flags: &Flags) {
    let Some(output) = flags.output.as_deref() else {
        return;
    };

    match save_report(&run.report, output) {
        Ok(()) => println!("💾 Report saved to: {}", output),
        Err(e) => {
            eprintln!("❌ Error saving report: {}", e);
            std::process::exit(1);
        }
    }
}
