//! The lazy snapshot sequence shared by every algorithm.

use std::collections::HashSet;
use std::fmt;
use std::iter::FusedIterator;
use std::mem;

use gridplan_core::{Cell, Grid};

use crate::algorithm::Algorithm;
use crate::state::SearchState;

/// Frontier and visited bookkeeping of one algorithm.
///
/// [`Search`] drives a strategy one expansion at a time and turns its state
/// into snapshots; the strategy decides which cell comes next and what gets
/// discovered from it.
pub(crate) trait Strategy: Send {
    /// Take the next cell to expand and mark it visited.
    fn next_cell(&mut self) -> Option<Cell>;
    /// Cells expanded so far.
    fn visited(&self) -> &HashSet<Cell>;
    /// A copy of the cells waiting to be expanded.
    fn frontier(&self) -> HashSet<Cell>;
    /// Discover the successors of `current`.
    fn expand(&mut self, grid: &Grid, current: Cell);
    /// The reconstructed start-to-`goal` path.
    fn path_to(&self, goal: Cell) -> Vec<Cell>;
}

enum Phase {
    Searching,
    /// The goal snapshot has been yielded; the path snapshot is next.
    Found(SearchState),
    Done,
}

/// A stepwise search over a [`Grid`].
///
/// Yields one [`SearchState`] per expanded cell. When the goal is expanded
/// its snapshot is followed by one more carrying the path; if the open set
/// runs dry a single snapshot with `current: None` ends the sequence. After
/// that the iterator stays exhausted: run a fresh search to repeat it.
///
/// Dropping the iterator early is the way to cancel a search.
pub struct Search<'g> {
    grid: &'g Grid,
    algorithm: Algorithm,
    strategy: Box<dyn Strategy>,
    phase: Phase,
    expansions: usize,
}

impl<'g> Search<'g> {
    pub(crate) fn new(grid: &'g Grid, algorithm: Algorithm, strategy: Box<dyn Strategy>) -> Self {
        Self {
            grid,
            algorithm,
            strategy,
            phase: Phase::Searching,
            expansions: 0,
        }
    }

    /// The algorithm driving this search.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// The grid being searched.
    pub fn grid(&self) -> &'g Grid {
        self.grid
    }

    /// Number of cells expanded so far.
    pub fn expansions(&self) -> usize {
        self.expansions
    }

    /// Whether the terminal snapshot has already been produced.
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Done)
    }

    /// Drain the search and return the path, or `None` if the goal is
    /// unreachable.
    pub fn solve(self) -> Option<Vec<Cell>> {
        self.last().and_then(|s| s.path)
    }

    fn advance(&mut self) -> SearchState {
        let Some(current) = self.strategy.next_cell() else {
            log::debug!(
                "{}: no path after {} expansions",
                self.algorithm,
                self.expansions
            );
            self.phase = Phase::Done;
            return SearchState::exhausted(self.strategy.visited().clone());
        };
        self.expansions += 1;

        let snapshot = SearchState::step(
            current,
            self.strategy.visited().clone(),
            self.strategy.frontier(),
        );
        log::trace!(
            "{}: expanded {current}, frontier {}",
            self.algorithm,
            snapshot.frontier.len()
        );

        if current == self.grid.goal() {
            let path = self.strategy.path_to(current);
            log::debug!(
                "{}: reached goal after {} expansions, path of {} cells",
                self.algorithm,
                self.expansions,
                path.len()
            );
            self.phase = Phase::Found(snapshot.clone().with_path(path));
        } else {
            self.strategy.expand(self.grid, current);
        }
        snapshot
    }
}

impl Iterator for Search<'_> {
    type Item = SearchState;

    fn next(&mut self) -> Option<SearchState> {
        match mem::replace(&mut self.phase, Phase::Done) {
            Phase::Done => None,
            Phase::Found(state) => Some(state),
            Phase::Searching => {
                self.phase = Phase::Searching;
                Some(self.advance())
            }
        }
    }
}

impl FusedIterator for Search<'_> {}

impl fmt::Debug for Search<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Search")
            .field("algorithm", &self.algorithm)
            .field("expansions", &self.expansions)
            .field("finished", &self.is_finished())
            .finish()
    }
}
