//! Stepwise search over a [`Grid`].
//!
//! Six algorithms, each exposed as a lazy [`Search`] that yields one
//! [`SearchState`] snapshot per expanded cell:
//!
//! | Entry point | Moves | Expands by | Shortest path |
//! |---|---|---|---|
//! | [`bfs`] | 4-way | queue order | yes |
//! | [`dfs`] | 4-way | stack order | no |
//! | [`best_first`] | 4-way | Manhattan distance to goal | no |
//! | [`dijkstra`] | 4-way | cost so far | yes |
//! | [`astar`] | 4-way | cost so far + Manhattan | yes |
//! | [`jps`] | 8-way, no corner cutting | cost so far + Chebyshev, over jump points | yes |
//!
//! The last snapshot either carries the path ([`SearchState::is_success`]) or
//! has no current cell ([`SearchState::is_failure`]). Stop pulling to cancel.
//!
//! ```
//! use gridplan_core::Grid;
//!
//! let grid = Grid::from_ascii("S..\n.#.\n..G").unwrap();
//! let path = gridplan_paths::astar(&grid).solve().unwrap();
//! assert_eq!(path.len(), 5);
//! ```

mod algorithm;
mod best_first;
mod costed;
mod distance;
mod jps;
mod queue;
mod reconstruct;
mod search;
mod state;
mod traversal;

use gridplan_core::Grid;

pub use algorithm::{Algorithm, UnknownAlgorithm};
pub use distance::{chebyshev, manhattan};
pub use queue::PriorityQueue;
pub use reconstruct::{Predecessors, expand_jumps};
pub use search::Search;
pub use state::SearchState;

use best_first::BestFirst;
use costed::{CostedSearch, Manhattan, Uniform};
use jps::JumpPoints;
use traversal::{Order, Traversal};

/// Breadth-first search.
pub fn bfs(grid: &Grid) -> Search<'_> {
    let strategy = Traversal::new(grid.start(), Order::Fifo);
    Search::new(grid, Algorithm::Bfs, Box::new(strategy))
}

/// Depth-first search.
pub fn dfs(grid: &Grid) -> Search<'_> {
    let strategy = Traversal::new(grid.start(), Order::Lifo);
    Search::new(grid, Algorithm::Dfs, Box::new(strategy))
}

/// Greedy best-first search on Manhattan distance.
pub fn best_first(grid: &Grid) -> Search<'_> {
    let strategy = BestFirst::new(grid.start(), grid.goal());
    Search::new(grid, Algorithm::BestFirst, Box::new(strategy))
}

/// Dijkstra's algorithm with unit step costs.
pub fn dijkstra(grid: &Grid) -> Search<'_> {
    let strategy = CostedSearch::new(Uniform, grid.start(), grid.goal());
    Search::new(grid, Algorithm::Dijkstra, Box::new(strategy))
}

/// A* with the Manhattan heuristic.
pub fn astar(grid: &Grid) -> Search<'_> {
    let strategy = CostedSearch::new(Manhattan, grid.start(), grid.goal());
    Search::new(grid, Algorithm::AStar, Box::new(strategy))
}

/// Jump point search. Snapshots list jump points only; the final path is
/// expanded to every cell it crosses.
pub fn jps(grid: &Grid) -> Search<'_> {
    let strategy = CostedSearch::new(JumpPoints, grid.start(), grid.goal());
    Search::new(grid, Algorithm::Jps, Box::new(strategy))
}
