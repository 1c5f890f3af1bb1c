use std::io;
use std::process::ExitCode;

use clap::Parser;

use gridplan_core::Grid;
use gridplan_crossterm::CrosstermAnimator;
use gridplan_demos::{PlannerArgs, report, run_headless};

fn run(args: PlannerArgs) -> Result<(), Box<dyn std::error::Error>> {
    let grid = Grid::generate(&args.grid_config())?;
    let label = args.algorithm.label();
    let summary = grid.summary();
    println!("{label}  |  {summary}");

    let mut stdout = io::stdout();
    if args.headless {
        run_headless(&mut stdout, &grid, args.algorithm)?;
        return Ok(());
    }

    let animator = CrosstermAnimator::new(args.animation());
    let title = format!("{label} – {summary}");
    let path = animator.run(&grid, args.algorithm.search(&grid), &title)?;
    report(&mut stdout, path.as_deref())?;
    Ok(())
}

fn main() -> ExitCode {
    let args = PlannerArgs::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_filter()))
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
