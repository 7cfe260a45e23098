//! shardfall CLI - find the order in which to drop shards back into a window.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use shardfall::{PlacementKind, Puzzle, SolveSettings, Solution, Triangle};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "shardfall")]
#[command(about = "Drop-order solver for triangle-tiled rectangles", long_about = None)]
struct Cli {
    /// Log solver decisions (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a puzzle file and print the drop order
    Solve {
        /// Puzzle file
        file: PathBuf,
        /// Print every placement with the frontier left behind
        #[arg(long)]
        steps: bool,
        /// Print the solution as JSON
        #[arg(long)]
        json: bool,
        /// Give up after this many insertions
        #[arg(long)]
        max_steps: Option<usize>,
        /// TOML file with solve settings
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Describe a puzzle file: border and every shard's sides
    Info {
        /// Puzzle file
        file: PathBuf,
    },
    /// Solve the bundled demo window
    Demo {
        /// Save the demo puzzle to this file instead of printing it
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Parse and validate a puzzle file without solving it
    Check {
        /// Puzzle file
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Solve {
            file,
            steps,
            json,
            max_steps,
            config,
        } => {
            let mut settings = load_settings(config.as_deref())?;
            if max_steps.is_some() {
                settings.max_steps = max_steps;
            }
            settings.record_trace |= steps || json;
            solve_file(&file, &settings, steps, json)?;
        }
        Commands::Info { file } => {
            show_info(&file)?;
        }
        Commands::Demo { output } => {
            run_demo(output.as_deref())?;
        }
        Commands::Check { file } => {
            let puzzle = load_puzzle(&file)?;
            puzzle.validate()?;
            println!(
                "{}: {} triangles, border {}",
                file.display(),
                puzzle.triangles.len(),
                puzzle.border()?
            );
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_settings(path: Option<&Path>) -> Result<SolveSettings> {
    let Some(path) = path else {
        return Ok(SolveSettings::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading settings {}", path.display()))?;
    let settings: SolveSettings =
        toml::from_str(&text).with_context(|| format!("parsing settings {}", path.display()))?;
    Ok(settings)
}

fn load_puzzle(path: &Path) -> Result<Puzzle> {
    Puzzle::read(path).with_context(|| format!("loading puzzle {}", path.display()))
}

fn solve_file(path: &Path, settings: &SolveSettings, steps: bool, json: bool) -> Result<()> {
    let puzzle = load_puzzle(path)?;
    tracing::info!(
        file = %path.display(),
        triangles = puzzle.triangles.len(),
        "loaded puzzle"
    );
    let solution = match puzzle.solve(settings) {
        Ok(solution) => solution,
        Err(err) if err.is_unsolvable() => {
            let err = anyhow::Error::new(err);
            return Err(err.context("No solution! The puzzle cannot be solved."));
        }
        Err(err) => return Err(err.into()),
    };

    if json {
        #[derive(Serialize)]
        struct Report<'a> {
            order: Vec<usize>,
            steps: &'a [shardfall::SolveStep],
        }
        let report = Report {
            order: solution.ids(),
            steps: &solution.steps,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if steps {
        print_steps(&solution);
    }
    print_solution(&solution);
    Ok(())
}

fn print_solution(solution: &Solution) {
    let ids: Vec<String> = solution.ids().iter().map(|id| id.to_string()).collect();
    println!("Solution: {}", ids.join(" "));
}

fn print_steps(solution: &Solution) {
    for (n, step) in solution.steps.iter().enumerate() {
        let how = match step.kind {
            PlacementKind::Start => "floor",
            PlacementKind::Insert => "onto",
        };
        println!(
            "Step {:>3}: triangle {} {} {}",
            n + 1,
            step.triangle,
            how,
            step.contact
        );
        if let Some(line) = step.obstructed {
            println!("          overhang clears {}", line);
        }
        for (k, line) in step.frontier.iter().enumerate() {
            println!("          boundary {}: {}", k + 1, line);
        }
    }
}

fn print_triangle(triangle: &Triangle) {
    println!("******triangle {}******", triangle.id);
    for (k, edge) in triangle.edges().iter().enumerate() {
        println!("Line {}: {}", k + 1, edge);
    }
    println!();
}

fn show_info(path: &Path) -> Result<()> {
    let puzzle = load_puzzle(path)?;

    println!("Puzzle: {}", path.display());
    println!("  Triangles: {}", puzzle.triangles.len());
    println!("  Border: {}", puzzle.border()?);
    println!();
    for triangle in &puzzle.triangles {
        print_triangle(triangle);
    }

    Ok(())
}

fn run_demo(output: Option<&Path>) -> Result<()> {
    let puzzle = Puzzle::demo();
    match output {
        Some(path) => {
            puzzle
                .write(path)
                .with_context(|| format!("writing {}", path.display()))?;
            println!("Saved demo puzzle to {}", path.display());
        }
        None => print!("{}", puzzle.to_text()),
    }

    let solution = puzzle.solve(&SolveSettings::default())?;
    print_solution(&solution);
    Ok(())
}
