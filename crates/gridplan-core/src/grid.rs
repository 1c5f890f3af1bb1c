//! The [`Grid`] type: an immutable 2D occupancy map with one start and one
//! goal cell.
//!
//! A grid is built once per search run, either from a seeded random obstacle
//! layout ([`Grid::generate`]), from an explicit obstacle list
//! ([`Grid::with_obstacles`]) or from a text map ([`Grid::from_ascii`]). It is
//! never mutated afterwards, so any number of searches may borrow it at once.

use std::fmt;

use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

use crate::error::{Endpoint, GridError};
use crate::geom::{Cell, Direction};

// ---------------------------------------------------------------------------
// CellState / Connectivity
// ---------------------------------------------------------------------------

/// What occupies a single grid cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    #[default]
    Free,
    Obstacle,
    Start,
    Goal,
}

impl CellState {
    /// The character used for this state in text maps.
    pub const fn glyph(self) -> char {
        match self {
            Self::Free => '.',
            Self::Obstacle => '#',
            Self::Start => 'S',
            Self::Goal => 'G',
        }
    }

    /// Human-readable name.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Free => "Free",
            Self::Obstacle => "Obstacle",
            Self::Start => "Start",
            Self::Goal => "Goal",
        }
    }
}

/// Movement model used when enumerating neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Connectivity {
    /// Up, down, left, right.
    Four,
    /// The four cardinals plus diagonals, without cutting obstacle corners.
    Eight,
}

// ---------------------------------------------------------------------------
// GridConfig
// ---------------------------------------------------------------------------

/// Construction parameters for [`Grid::generate`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridConfig {
    pub rows: i32,
    pub cols: i32,
    pub start: Cell,
    /// `None` means the bottom-right corner.
    pub goal: Option<Cell>,
    /// Fraction of all cells to turn into obstacles, in `[0, 1)`.
    pub obstacle_pct: f64,
    /// `None` gives a different layout on every run.
    pub seed: Option<u64>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: 20,
            cols: 30,
            start: Cell::new(0, 0),
            goal: None,
            obstacle_pct: 0.2,
            seed: None,
        }
    }
}

impl GridConfig {
    /// The goal cell this configuration resolves to.
    pub fn resolved_goal(&self) -> Cell {
        self.goal
            .unwrap_or_else(|| Cell::new(self.rows - 1, self.cols - 1))
    }
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A dense, row-major occupancy map.
///
/// Invariants: exactly one start and one goal, neither of them an obstacle.
/// When start and goal coincide the shared cell is stored as
/// [`CellState::Goal`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: i32,
    cols: i32,
    start: Cell,
    goal: Cell,
    cells: Vec<CellState>,
}

impl Grid {
    /// Build a grid with a random obstacle layout.
    ///
    /// Every cell except start and goal is a candidate; a seeded partial
    /// Fisher–Yates shuffle picks `floor(rows * cols * obstacle_pct)` of them
    /// (capped at the number of candidates). `StdRng` and its `usize` range
    /// sampling are portable, so a given seed yields the same layout on every
    /// platform.
    pub fn generate(config: &GridConfig) -> Result<Self, GridError> {
        check_size(config.rows, config.cols)?;
        if !(0.0..1.0).contains(&config.obstacle_pct) {
            return Err(GridError::ObstacleFraction(config.obstacle_pct));
        }
        let mut grid = Self::blank(
            config.rows,
            config.cols,
            config.start,
            config.resolved_goal(),
        )?;

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);

        let mut candidates: Vec<Cell> = grid
            .cells()
            .filter(|&c| c != grid.start && c != grid.goal)
            .collect();
        let wanted = (grid.len() as f64 * config.obstacle_pct).floor() as usize;
        let wanted = wanted.min(candidates.len());

        for i in 0..wanted {
            let j = rng.random_range(i..candidates.len());
            candidates.swap(i, j);
        }
        for &c in &candidates[..wanted] {
            let idx = grid.index(c);
            grid.cells[idx] = CellState::Obstacle;
        }

        log::debug!(
            "generated {}×{} grid: {} obstacles, seed {}",
            grid.rows,
            grid.cols,
            wanted,
            seed
        );
        Ok(grid)
    }

    /// Build a grid from an explicit obstacle list.
    ///
    /// Obstacles outside the grid or on the start/goal cell are ignored.
    pub fn with_obstacles(
        rows: i32,
        cols: i32,
        start: Cell,
        goal: Cell,
        obstacles: impl IntoIterator<Item = Cell>,
    ) -> Result<Self, GridError> {
        let mut grid = Self::blank(rows, cols, start, goal)?;
        for c in obstacles {
            if grid.in_bounds(c) && c != start && c != goal {
                let idx = grid.index(c);
                grid.cells[idx] = CellState::Obstacle;
            }
        }
        Ok(grid)
    }

    /// Parse a rectangular text map.
    ///
    /// `.` is free, `#` an obstacle, `S` the start, `G` the goal and `*` a cell
    /// that is both. Surrounding whitespace and blank lines are ignored.
    pub fn from_ascii(map: &str) -> Result<Self, GridError> {
        let lines: Vec<&str> = map
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let width = lines.first().map_or(0, |l| l.chars().count());
        check_size(lines.len() as i32, width as i32)?;

        let mut start = None;
        let mut goal = None;
        let mut obstacles = Vec::new();
        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(GridError::RaggedMap {
                    line: row,
                    expected: width,
                    found,
                });
            }
            for (col, glyph) in line.chars().enumerate() {
                let cell = Cell::new(row as i32, col as i32);
                match glyph {
                    '.' => {}
                    '#' => obstacles.push(cell),
                    'S' => place(&mut start, cell, Endpoint::Start)?,
                    'G' => place(&mut goal, cell, Endpoint::Goal)?,
                    '*' => {
                        place(&mut start, cell, Endpoint::Start)?;
                        place(&mut goal, cell, Endpoint::Goal)?;
                    }
                    _ => return Err(GridError::InvalidGlyph { glyph, cell }),
                }
            }
        }

        let start = start.ok_or(GridError::MissingEndpoint(Endpoint::Start))?;
        let goal = goal.ok_or(GridError::MissingEndpoint(Endpoint::Goal))?;
        Self::with_obstacles(lines.len() as i32, width as i32, start, goal, obstacles)
    }

    /// An obstacle-free grid with start and goal marked.
    fn blank(rows: i32, cols: i32, start: Cell, goal: Cell) -> Result<Self, GridError> {
        check_size(rows, cols)?;
        let mut grid = Self {
            rows,
            cols,
            start,
            goal,
            cells: vec![CellState::Free; (rows as usize) * (cols as usize)],
        };
        for (endpoint, cell) in [(Endpoint::Start, start), (Endpoint::Goal, goal)] {
            if !grid.in_bounds(cell) {
                return Err(GridError::OutOfBounds {
                    endpoint,
                    cell,
                    rows,
                    cols,
                });
            }
        }
        let si = grid.index(start);
        grid.cells[si] = CellState::Start;
        let gi = grid.index(goal);
        grid.cells[gi] = CellState::Goal;
        Ok(grid)
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    #[inline]
    pub fn start(&self) -> Cell {
        self.start
    }

    #[inline]
    pub fn goal(&self) -> Cell {
        self.goal
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`: a grid has at least one cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `c` lies inside the grid.
    #[inline]
    pub fn in_bounds(&self, c: Cell) -> bool {
        c.row >= 0 && c.col >= 0 && c.row < self.rows && c.col < self.cols
    }

    /// Dense integer key of an in-bounds cell (`row * cols + col`).
    #[inline]
    pub fn index(&self, c: Cell) -> usize {
        debug_assert!(self.in_bounds(c));
        (c.row as usize) * (self.cols as usize) + (c.col as usize)
    }

    /// The state of cell `c`.
    ///
    /// # Panics
    ///
    /// If `c` is out of bounds.
    pub fn get(&self, c: Cell) -> CellState {
        self.assert_in_bounds(c);
        self.cells[self.index(c)]
    }

    /// Whether the in-bounds cell `c` is an obstacle.
    ///
    /// # Panics
    ///
    /// If `c` is out of bounds.
    pub fn is_obstacle(&self, c: Cell) -> bool {
        self.get(c) == CellState::Obstacle
    }

    /// In bounds and not an obstacle. Never panics.
    #[inline]
    pub fn walkable(&self, c: Cell) -> bool {
        self.in_bounds(c) && self.cells[self.index(c)] != CellState::Obstacle
    }

    /// Walkable cardinal neighbours in the order up, down, left, right.
    ///
    /// # Panics
    ///
    /// If `c` is out of bounds.
    pub fn neighbours4(&self, c: Cell) -> Vec<Cell> {
        self.assert_in_bounds(c);
        Direction::CARDINALS
            .iter()
            .map(|&d| c + d)
            .filter(|&n| self.walkable(n))
            .collect()
    }

    /// Walkable neighbours in the order up, down, left, right, NW, NE, SW, SE.
    ///
    /// A diagonal neighbour is only included when both cells it squeezes
    /// between are free, so paths never cut an obstacle corner.
    ///
    /// # Panics
    ///
    /// If `c` is out of bounds.
    pub fn neighbours8(&self, c: Cell) -> Vec<Cell> {
        let mut out = self.neighbours4(c);
        out.extend(
            Direction::DIAGONALS
                .iter()
                .filter(|&&d| self.diagonal_clear(c, d))
                .map(|&d| c + d),
        );
        out
    }

    /// Neighbours under the given movement model.
    pub fn neighbours(&self, c: Cell, connectivity: Connectivity) -> Vec<Cell> {
        match connectivity {
            Connectivity::Four => self.neighbours4(c),
            Connectivity::Eight => self.neighbours8(c),
        }
    }

    /// Whether the diagonal step `c -> c + d` is legal: the target and both
    /// orthogonal cells beside the step are walkable.
    #[inline]
    pub fn diagonal_clear(&self, c: Cell, d: Direction) -> bool {
        self.walkable(c + d) && self.walkable(c + d.vertical()) && self.walkable(c + d.horizontal())
    }

    /// Number of obstacle cells.
    pub fn obstacle_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|&&s| s == CellState::Obstacle)
            .count()
    }

    /// One-line status text: dimensions, endpoints and obstacle density.
    pub fn summary(&self) -> String {
        let total = self.len();
        let obstacles = self.obstacle_count();
        format!(
            "Grid {}×{}  |  Start {}  |  Goal {}  |  Obstacles {}/{} ({:.1}%)",
            self.rows,
            self.cols,
            self.start,
            self.goal,
            obstacles,
            total,
            100.0 * obstacles as f64 / total as f64
        )
    }

    /// Row-major iterator over every cell coordinate.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + use<> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |row| (0..cols).map(move |col| Cell::new(row, col)))
    }

    /// Row-major iterator over `(Cell, CellState)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, CellState)> + '_ {
        self.cells().zip(self.cells.iter().copied())
    }

    fn assert_in_bounds(&self, c: Cell) {
        assert!(
            self.in_bounds(c),
            "cell {c} is outside the {}×{} grid",
            self.rows,
            self.cols
        );
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (cell, state) in self.iter() {
            if cell.col == 0 && cell.row > 0 {
                f.write_str("\n")?;
            }
            let glyph = if cell == self.start && self.start == self.goal {
                '*'
            } else {
                state.glyph()
            };
            write!(f, "{glyph}")?;
        }
        Ok(())
    }
}

fn check_size(rows: i32, cols: i32) -> Result<(), GridError> {
    if rows < 1 || cols < 1 {
        return Err(GridError::EmptyGrid { rows, cols });
    }
    Ok(())
}

fn place(slot: &mut Option<Cell>, cell: Cell, endpoint: Endpoint) -> Result<(), GridError> {
    if slot.replace(cell).is_some() {
        return Err(GridError::DuplicateEndpoint(endpoint));
    }
    Ok(())
}
