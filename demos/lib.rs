//! Command-line plumbing for the `planner` binary.

use std::io::{self, Write};

use clap::Parser;

use gridplan_core::{Cell, Grid, GridConfig};
use gridplan_crossterm::AnimationConfig;
use gridplan_paths::Algorithm;

/// Animate a grid search in the terminal.
#[derive(Debug, Parser)]
#[command(name = "planner", version, about)]
pub struct PlannerArgs {
    /// Search algorithm: bfs, dfs, best_first, dijkstra, astar or jps
    #[arg(short, long, default_value = "astar")]
    pub algorithm: Algorithm,

    /// Number of grid rows (default: 20)
    #[arg(long)]
    pub rows: Option<i32>,

    /// Number of grid columns (default: 30)
    #[arg(long)]
    pub cols: Option<i32>,

    /// Start cell as row,col (default: 0,0)
    #[arg(long, value_parser = parse_cell)]
    pub start: Option<Cell>,

    /// Goal cell as row,col (default: bottom-right corner)
    #[arg(long, value_parser = parse_cell)]
    pub goal: Option<Cell>,

    /// Fraction of cells that are obstacles (default: 0.2)
    #[arg(long)]
    pub obstacle_pct: Option<f64>,

    /// Random seed for reproducible obstacle placement
    #[arg(long)]
    pub seed: Option<u64>,

    /// Search steps drawn per frame
    #[arg(long)]
    pub steps_per_frame: Option<usize>,

    /// Delay between frames in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Run the search without a terminal display
    #[arg(long)]
    pub headless: bool,

    /// Log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl PlannerArgs {
    /// Grid construction parameters, defaults filled in.
    pub fn grid_config(&self) -> GridConfig {
        let d = GridConfig::default();
        GridConfig {
            rows: self.rows.unwrap_or(d.rows),
            cols: self.cols.unwrap_or(d.cols),
            start: self.start.unwrap_or(d.start),
            goal: self.goal.or(d.goal),
            obstacle_pct: self.obstacle_pct.unwrap_or(d.obstacle_pct),
            seed: self.seed.or(d.seed),
        }
    }

    pub fn animation(&self) -> AnimationConfig {
        let d = AnimationConfig::default();
        AnimationConfig {
            steps_per_frame: self.steps_per_frame.unwrap_or(d.steps_per_frame),
            delay_ms: self.delay_ms.unwrap_or(d.delay_ms),
            ..d
        }
    }

    /// Log level filter for the `-v` count.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Parse a `row,col` pair.
pub fn parse_cell(s: &str) -> Result<Cell, String> {
    let (r, c) = s
        .split_once(',')
        .ok_or_else(|| format!("expected row,col but got {s:?}"))?;
    let r = r
        .trim()
        .parse()
        .map_err(|e| format!("bad row {r:?}: {e}"))?;
    let c = c
        .trim()
        .parse()
        .map_err(|e| format!("bad column {c:?}: {e}"))?;
    Ok(Cell::new(r, c))
}

/// Print the final outcome line.
pub fn report(out: &mut impl Write, path: Option<&[Cell]>) -> io::Result<()> {
    match path {
        Some(p) => writeln!(out, "Path length: {}", p.len()),
        None => writeln!(out, "No path found!"),
    }
}

/// Drain the search without a display and report the outcome.
pub fn run_headless(
    out: &mut impl Write,
    grid: &Grid,
    algorithm: Algorithm,
) -> io::Result<Option<Vec<Cell>>> {
    let mut search = algorithm.search(grid);
    let path = search.by_ref().last().and_then(|s| s.path);
    writeln!(out, "Expansions: {}", search.expansions())?;
    report(out, path.as_deref())?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_cells() {
        assert_eq!(parse_cell("3,4"), Ok(Cell::new(3, 4)));
        assert_eq!(parse_cell(" 0 , 12 "), Ok(Cell::new(0, 12)));
        assert!(parse_cell("3").is_err());
        assert!(parse_cell("a,1").is_err());
    }

    #[test]
    fn defaults_match_grid_config() {
        let args = PlannerArgs::parse_from(["planner"]);
        assert_eq!(args.algorithm, Algorithm::AStar);
        assert_eq!(args.grid_config(), GridConfig::default());
        assert_eq!(args.animation(), AnimationConfig::default());
        assert!(!args.headless);
        assert_eq!(args.log_filter(), "warn");
    }

    #[test]
    fn flags_override_defaults() {
        let args = PlannerArgs::parse_from([
            "planner",
            "-a",
            "jps",
            "--rows",
            "10",
            "--cols",
            "12",
            "--start",
            "1,1",
            "--goal",
            "8,9",
            "--obstacle-pct",
            "0.25",
            "--seed",
            "42",
            "--steps-per-frame",
            "2",
            "--headless",
            "-vv",
        ]);
        assert_eq!(args.algorithm, Algorithm::Jps);
        let cfg = args.grid_config();
        assert_eq!((cfg.rows, cfg.cols), (10, 12));
        assert_eq!(cfg.start, Cell::new(1, 1));
        assert_eq!(cfg.resolved_goal(), Cell::new(8, 9));
        assert_eq!(cfg.obstacle_pct, 0.25);
        assert_eq!(cfg.seed, Some(42));
        assert_eq!(args.animation().steps_per_frame, 2);
        assert!(args.headless);
        assert_eq!(args.log_filter(), "debug");
    }

    #[test]
    fn rejects_unknown_algorithm() {
        assert!(PlannerArgs::try_parse_from(["planner", "-a", "greedy"]).is_err());
    }

    #[test]
    fn headless_reports_path_and_expansions() {
        let grid = Grid::from_ascii("S..\n.#.\n..G").unwrap();
        let mut out = Vec::new();
        let path = run_headless(&mut out, &grid, Algorithm::Bfs).unwrap();
        assert_eq!(path.map(|p| p.len()), Some(5));
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Expansions: "));
        assert!(text.ends_with("Path length: 5\n"));

        let walled = Grid::from_ascii("S#.\n##.\n..G").unwrap();
        let mut out = Vec::new();
        assert!(run_headless(&mut out, &walled, Algorithm::Dfs).unwrap().is_none());
        assert!(String::from_utf8(out).unwrap().ends_with("No path found!\n"));
    }
}
