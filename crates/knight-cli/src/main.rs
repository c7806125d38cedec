mod args;
mod render;

use args::Args;
use clap::Parser;
use knight_core::{Board, SearchStats, SolverConfig, TourSolver};
use serde::Serialize;
use std::io;
use std::process::ExitCode;

/// Machine-readable result for `--json`.
#[derive(Serialize)]
struct SolveReport<'a> {
    found: bool,
    rows: usize,
    cols: usize,
    closed_tour: bool,
    magic_tour: bool,
    grid: &'a [Vec<i32>],
    stats: &'a SearchStats,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let setup = args.board_setup()?;
    let mut board = Board::new(setup.rows, setup.cols, &setup.excluded, setup.start)?;

    let config = SolverConfig {
        closed_tour: args.closed,
        magic_tour: args.magic,
        ..SolverConfig::default()
    };
    let mut solver = TourSolver::with_config(config);
    if !args.quiet && !args.json {
        solver = solver.on_progress(|report| {
            println!(
                "{}0 million paths tested... <{:.1}% complete.",
                report.batches, report.percent
            );
        });
        println!("Searching for a solution...");
    }

    let found = solver.run(&mut board);

    if args.json {
        let report = SolveReport {
            found,
            rows: board.rows(),
            cols: board.cols(),
            closed_tour: args.closed,
            magic_tour: args.magic,
            grid: board.move_numbers(),
            stats: solver.stats(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if found {
        println!("Solution found!");
        render::render_board(&mut io::stdout(), &board)?;
        println!(
            "Dead ends explored: {}",
            solver.stats().total_dead_ends(config.report_interval)
        );
    } else {
        println!("No solution was found from this starting point.");
    }

    Ok(())
}
