use anyhow::{Context, Result};
use clap::Parser;
use dedoku::{Grid, SolveLog, Solver};
use std::{fs, path::PathBuf};

#[derive(Parser, Debug)]
#[command(name = "dedoku", version, about = "Logical sudoku solver: deduction only, no guessing")]
struct Cli {
    /// Puzzle file: 81 cells row-major; `_`, `.`, `0`, or `-1` for blanks
    input: PathBuf,

    /// Print each deduction as it is made
    #[arg(short, long)]
    verbose: bool,

    /// Colorize deduction output (implies --verbose)
    #[arg(long)]
    color: bool,

    /// Append the deduction trace to this file
    #[arg(long)]
    trace: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let text = fs::read_to_string(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;
    let grid = Grid::parse(&text).context("parse puzzle")?;

    let console = cli.verbose || cli.color;
    let mut log = match &cli.trace {
        Some(path) => SolveLog::to_file(path, console, cli.color)?,
        None if console => SolveLog::console(cli.color),
        None => SolveLog::quiet(),
    };

    let mut solver = Solver::new(grid);
    let solved = solver.solve(&mut log)?;

    println!("\n{}", solver.grid);
    if solved {
        println!("Solved in {} deduction(s).", log.entries());
    } else {
        // stalling short of a full grid is an outcome, not an error
        println!(
            "Could not solve by deduction alone ({} cells left).",
            81 - solver.grid.filled()
        );
    }
    Ok(())
}
