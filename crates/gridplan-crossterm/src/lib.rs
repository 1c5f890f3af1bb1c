//! Crossterm terminal driver for gridplan.
//!
//! Provides a [`CrosstermAnimator`] that pulls [`SearchState`] snapshots from
//! a running search at a fixed cadence and paints the grid in the terminal,
//! one cell as two coloured columns.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use gridplan_core::{Cell, CellState, Grid};
use gridplan_paths::SearchState;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Pacing of the animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationConfig {
    /// Snapshots pulled between two repaints.
    pub steps_per_frame: usize,
    /// Pause after each search frame.
    pub delay_ms: u64,
    /// Pause after each cell of the final path.
    pub path_delay_ms: u64,
    /// How long the finished picture stays up; any key skips it.
    pub pause_before_close_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            steps_per_frame: 5,
            delay_ms: 30,
            path_delay_ms: 20,
            pause_before_close_ms: 1500,
        }
    }
}

/// What a single grid cell is drawn as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Paint {
    Free,
    Obstacle,
    Start,
    Goal,
    Visited,
    Frontier,
    Current,
    Path,
}

impl Paint {
    fn base(state: CellState) -> Self {
        match state {
            CellState::Free => Self::Free,
            CellState::Obstacle => Self::Obstacle,
            CellState::Start => Self::Start,
            CellState::Goal => Self::Goal,
        }
    }

    /// The two characters printed for the cell.
    fn text(self) -> &'static str {
        match self {
            Self::Start => "S ",
            Self::Goal => "G ",
            _ => "  ",
        }
    }
}

/// Background colours per [`Paint`], plus the text colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub free: Color,
    pub obstacle: Color,
    pub start: Color,
    pub goal: Color,
    pub visited: Color,
    pub frontier: Color,
    pub current: Color,
    pub path: Color,
    pub text: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            free: Color::Rgb { r: 235, g: 235, b: 235 },
            obstacle: Color::Rgb { r: 40, g: 40, b: 40 },
            start: Color::Rgb { r: 0, g: 180, b: 0 },
            goal: Color::Rgb { r: 220, g: 0, b: 0 },
            visited: Color::Rgb { r: 150, g: 190, b: 255 },
            frontier: Color::Rgb { r: 255, g: 220, b: 100 },
            current: Color::Rgb { r: 255, g: 140, b: 0 },
            path: Color::Rgb { r: 180, g: 60, b: 220 },
            text: Color::Rgb { r: 255, g: 255, b: 255 },
        }
    }
}

impl Palette {
    pub fn color(&self, paint: Paint) -> Color {
        match paint {
            Paint::Free => self.free,
            Paint::Obstacle => self.obstacle,
            Paint::Start => self.start,
            Paint::Goal => self.goal,
            Paint::Visited => self.visited,
            Paint::Frontier => self.frontier,
            Paint::Current => self.current,
            Paint::Path => self.path,
        }
    }
}

// ---------------------------------------------------------------------------
// Composition
// ---------------------------------------------------------------------------

/// Lay a snapshot over the grid, row by row.
///
/// Later layers win: base cells, then visited, frontier, the current cell,
/// the path, and finally start and goal, which always stay visible.
pub fn compose(grid: &Grid, state: &SearchState) -> Vec<Vec<Paint>> {
    layers(grid, state, state.path.as_deref())
}

fn layers(grid: &Grid, state: &SearchState, path: Option<&[Cell]>) -> Vec<Vec<Paint>> {
    let mut rows: Vec<Vec<Paint>> = (0..grid.rows())
        .map(|r| {
            (0..grid.cols())
                .map(|c| Paint::base(grid.get(Cell::new(r, c))))
                .collect()
        })
        .collect();

    let mut set = |c: Cell, paint: Paint| {
        if grid.in_bounds(c) {
            rows[c.row as usize][c.col as usize] = paint;
        }
    };
    state.visited.iter().for_each(|&c| set(c, Paint::Visited));
    state.frontier.iter().for_each(|&c| set(c, Paint::Frontier));
    if let Some(c) = state.current {
        set(c, Paint::Current);
    }
    for &c in path.unwrap_or_default() {
        set(c, Paint::Path);
    }
    set(grid.start(), Paint::Start);
    set(grid.goal(), Paint::Goal);

    rows
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// Raw mode and the alternate screen for as long as it lives.
struct Screen;

impl Screen {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let screen = Screen;
        execute!(
            io::stdout(),
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        log::debug!("terminal initialised");
        Ok(screen)
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        let _ = execute!(
            io::stdout(),
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
        log::debug!("terminal restored");
    }
}

/// Whether a key event asks to stop the animation.
fn is_cancel(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Animates searches in the terminal.
#[derive(Debug, Clone, Default)]
pub struct CrosstermAnimator {
    config: AnimationConfig,
    palette: Palette,
}

impl CrosstermAnimator {
    pub fn new(config: AnimationConfig) -> Self {
        Self {
            config,
            palette: Palette::default(),
        }
    }

    /// Use `palette` instead of the default colours.
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// Animate `search` over `grid` until it finishes or the user presses
    /// `q` or `Esc`.
    ///
    /// Returns the path if the search reached the goal, `None` if it failed
    /// or was cancelled before finishing. The terminal is restored on every
    /// exit path, errors included.
    pub fn run(
        &self,
        grid: &Grid,
        search: impl IntoIterator<Item = SearchState>,
        title: &str,
    ) -> io::Result<Option<Vec<Cell>>> {
        let (term_cols, term_rows) = terminal::size()?;
        let (need_cols, need_rows) = (grid.cols() as u32 * 2, grid.rows() as u32 + 2);
        if u32::from(term_cols) < need_cols || u32::from(term_rows) < need_rows {
            log::warn!(
                "terminal is {term_cols}×{term_rows}, the grid needs {need_cols}×{need_rows}; \
                 the picture will be clipped"
            );
        }

        let _screen = Screen::enter()?;
        let mut out = io::stdout();
        let steps = self.config.steps_per_frame.max(1);
        let mut snapshots = search.into_iter();
        let mut last = SearchState::default();
        let mut pulled = 0usize;

        loop {
            let mut exhausted = false;
            for _ in 0..steps {
                match snapshots.next() {
                    Some(s) => {
                        last = s;
                        pulled += 1;
                    }
                    None => {
                        exhausted = true;
                        break;
                    }
                }
            }
            let status = format!("{pulled} steps  |  q/Esc: quit");
            self.draw(&mut out, &compose(grid, &last), title, &status)?;
            if self.wait(self.config.delay_ms, false)? {
                log::debug!("cancelled after {pulled} snapshots");
                return Ok(None);
            }
            if exhausted {
                break;
            }
        }

        let Some(path) = last.path.clone() else {
            let status = "No path found!  |  any key: close";
            self.draw(&mut out, &compose(grid, &last), title, status)?;
            self.wait(self.config.pause_before_close_ms, true)?;
            return Ok(None);
        };

        for n in 1..=path.len() {
            let status = format!("Path {n}/{}  |  q/Esc: skip", path.len());
            let paints = layers(grid, &last, Some(&path[..n]));
            self.draw(&mut out, &paints, title, &status)?;
            if self.wait(self.config.path_delay_ms, false)? {
                return Ok(Some(path));
            }
        }

        let status = format!("Path length: {}  |  any key: close", path.len());
        self.draw(&mut out, &compose(grid, &last), title, &status)?;
        self.wait(self.config.pause_before_close_ms, true)?;
        Ok(Some(path))
    }

    /// Sleep for `ms` while watching the keyboard. Returns `true` as soon as
    /// a cancelling key, or with `any_key` any key at all, is pressed.
    fn wait(&self, ms: u64, any_key: bool) -> io::Result<bool> {
        let deadline = Instant::now() + Duration::from_millis(ms);
        loop {
            let left = deadline.saturating_duration_since(Instant::now());
            if !event::poll(left)? {
                return Ok(false);
            }
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && (any_key || is_cancel(&key)) {
                    return Ok(true);
                }
            }
            if left.is_zero() {
                return Ok(false);
            }
        }
    }

    fn draw(
        &self,
        out: &mut impl Write,
        paints: &[Vec<Paint>],
        title: &str,
        status: &str,
    ) -> io::Result<()> {
        queue!(
            out,
            cursor::MoveTo(0, 0),
            ResetColor,
            Print(title),
            terminal::Clear(ClearType::UntilNewLine)
        )?;
        let mut y: u16 = 1;
        for row in paints {
            queue!(out, cursor::MoveTo(0, y), SetForegroundColor(self.palette.text))?;
            for &paint in row {
                queue!(
                    out,
                    SetBackgroundColor(self.palette.color(paint)),
                    Print(paint.text())
                )?;
            }
            queue!(out, ResetColor)?;
            y = y.saturating_add(1);
        }
        queue!(
            out,
            cursor::MoveTo(0, y),
            Print(status),
            terminal::Clear(ClearType::UntilNewLine)
        )?;
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn grid() -> Grid {
        Grid::from_ascii(
            "
            S.#
            ...
            ..G
            ",
        )
        .unwrap()
    }

    #[test]
    fn base_layer_mirrors_the_grid() {
        let g = grid();
        let rows = compose(&g, &SearchState::default());
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec![Paint::Start, Paint::Free, Paint::Obstacle]);
        assert_eq!(rows[2][2], Paint::Goal);
    }

    #[test]
    fn later_layers_win() {
        let g = grid();
        let state = SearchState {
            current: Some(Cell::new(1, 1)),
            visited: HashSet::from([Cell::new(0, 0), Cell::new(1, 0), Cell::new(1, 1)]),
            frontier: HashSet::from([Cell::new(2, 0), Cell::new(1, 1), Cell::new(0, 1)]),
            path: None,
        };
        let rows = compose(&g, &state);
        // Start stays on top of visited.
        assert_eq!(rows[0][0], Paint::Start);
        assert_eq!(rows[1][0], Paint::Visited);
        assert_eq!(rows[0][1], Paint::Frontier);
        assert_eq!(rows[2][0], Paint::Frontier);
        // Current beats both visited and frontier.
        assert_eq!(rows[1][1], Paint::Current);
        assert_eq!(rows[1][2], Paint::Free);
    }

    #[test]
    fn path_covers_search_layers_but_not_endpoints() {
        let g = grid();
        let path = vec![
            Cell::new(0, 0),
            Cell::new(1, 0),
            Cell::new(1, 1),
            Cell::new(2, 1),
            Cell::new(2, 2),
        ];
        let state = SearchState {
            current: Some(Cell::new(2, 2)),
            visited: path.iter().copied().collect(),
            frontier: HashSet::from([Cell::new(0, 1)]),
            path: Some(path.clone()),
        };
        let rows = compose(&g, &state);
        assert_eq!(rows[0][0], Paint::Start);
        assert_eq!(rows[1][0], Paint::Path);
        assert_eq!(rows[2][1], Paint::Path);
        assert_eq!(rows[2][2], Paint::Goal);
        assert_eq!(rows[0][1], Paint::Frontier);

        // A partial path only paints its prefix.
        let rows = layers(&g, &state, Some(&path[..2]));
        assert_eq!(rows[1][0], Paint::Path);
        assert_eq!(rows[1][1], Paint::Visited);
    }

    #[test]
    fn only_endpoints_carry_text() {
        assert_eq!(Paint::Start.text(), "S ");
        assert_eq!(Paint::Goal.text(), "G ");
        assert_eq!(Paint::Path.text(), "  ");
        let p = Palette::default();
        assert_eq!(p.color(Paint::Obstacle), p.obstacle);
    }
}
