//! Cost-ordered search with a closed set: the shared core of Dijkstra, A*
//! and jump point search.
//!
//! Each variant is a [`CostModel`] that supplies successors, step costs and
//! an admissible estimate; [`CostedSearch`] owns the open list, the closed
//! set and the relaxation rule.

use std::collections::{HashMap, HashSet};

use gridplan_core::{Cell, Grid};

use crate::distance::manhattan;
use crate::queue::PriorityQueue;
use crate::reconstruct::Predecessors;
use crate::search::Strategy;

/// Movement and cost rules of one cost-ordered algorithm.
pub(crate) trait CostModel: Send {
    /// Append `(successor, step cost)` pairs for `current` into `buf`.
    /// `parent` is the predecessor of `current`, `None` at the start.
    /// The caller clears `buf` before calling.
    fn successors(
        &self,
        grid: &Grid,
        current: Cell,
        parent: Option<Cell>,
        goal: Cell,
        buf: &mut Vec<(Cell, i32)>,
    );

    /// Estimate of the remaining cost from `from` to `goal`. Must never
    /// overestimate.
    fn estimate(&self, from: Cell, goal: Cell) -> i32;

    /// Turn the reconstructed predecessor chain into the reported path.
    fn finish_path(&self, chain: Vec<Cell>) -> Vec<Cell> {
        chain
    }
}

/// Uniform-cost 4-connected moves with no estimate: Dijkstra.
pub(crate) struct Uniform;

impl CostModel for Uniform {
    fn successors(
        &self,
        grid: &Grid,
        current: Cell,
        _parent: Option<Cell>,
        _goal: Cell,
        buf: &mut Vec<(Cell, i32)>,
    ) {
        buf.extend(grid.neighbours4(current).into_iter().map(|n| (n, 1)));
    }

    fn estimate(&self, _from: Cell, _goal: Cell) -> i32 {
        0
    }
}

/// Uniform-cost 4-connected moves guided by Manhattan distance: A*.
pub(crate) struct Manhattan;

impl CostModel for Manhattan {
    fn successors(
        &self,
        grid: &Grid,
        current: Cell,
        parent: Option<Cell>,
        goal: Cell,
        buf: &mut Vec<(Cell, i32)>,
    ) {
        Uniform.successors(grid, current, parent, goal, buf);
    }

    fn estimate(&self, from: Cell, goal: Cell) -> i32 {
        manhattan(from, goal)
    }
}

pub(crate) struct CostedSearch<M> {
    model: M,
    goal: Cell,
    g: HashMap<Cell, i32>,
    came_from: Predecessors,
    open: PriorityQueue<Cell>,
    in_open: HashSet<Cell>,
    closed: HashSet<Cell>,
    buf: Vec<(Cell, i32)>,
}

impl<M: CostModel> CostedSearch<M> {
    pub(crate) fn new(model: M, start: Cell, goal: Cell) -> Self {
        let mut open = PriorityQueue::new();
        open.push(model.estimate(start, goal), start);
        Self {
            model,
            goal,
            g: HashMap::from([(start, 0)]),
            came_from: Predecessors::new(start),
            open,
            in_open: HashSet::from([start]),
            closed: HashSet::new(),
            buf: Vec::with_capacity(8),
        }
    }

    /// Best known cost from the start to `c`.
    #[cfg(test)]
    pub(crate) fn cost(&self, c: Cell) -> Option<i32> {
        self.g.get(&c).copied()
    }
}

impl<M: CostModel> Strategy for CostedSearch<M> {
    fn next_cell(&mut self) -> Option<Cell> {
        while let Some((_, current)) = self.open.pop() {
            // Stale entry for a cell closed through a cheaper route.
            if !self.closed.insert(current) {
                continue;
            }
            self.in_open.remove(&current);
            return Some(current);
        }
        None
    }

    fn visited(&self) -> &HashSet<Cell> {
        &self.closed
    }

    fn frontier(&self) -> HashSet<Cell> {
        self.in_open.clone()
    }

    fn expand(&mut self, grid: &Grid, current: Cell) {
        let current_g = self.g[&current];
        let parent = self.came_from.get(current);

        let mut buf = std::mem::take(&mut self.buf);
        buf.clear();
        self.model
            .successors(grid, current, parent, self.goal, &mut buf);

        for &(next, step) in &buf {
            if self.closed.contains(&next) {
                continue;
            }
            let tentative = current_g + step;
            // Strictly cheaper only: the first route found among equals wins.
            if self.g.get(&next).is_some_and(|&known| tentative >= known) {
                continue;
            }
            self.g.insert(next, tentative);
            self.came_from.link(next, current);
            self.open
                .push(tentative + self.model.estimate(next, self.goal), next);
            self.in_open.insert(next);
        }

        self.buf = buf;
    }

    fn path_to(&self, goal: Cell) -> Vec<Cell> {
        self.model.finish_path(self.came_from.chain(goal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run<M: CostModel>(s: &mut CostedSearch<M>, grid: &Grid) -> Vec<Cell> {
        let mut order = Vec::new();
        while let Some(c) = s.next_cell() {
            order.push(c);
            if c == grid.goal() {
                break;
            }
            s.expand(grid, c);
        }
        order
    }

    #[test]
    fn dijkstra_costs_are_shortest_distances() {
        let g = Grid::from_ascii(
            "
            S.#..
            .##.#
            ....G
            ",
        )
        .unwrap();
        let mut s = CostedSearch::new(Uniform, g.start(), g.goal());
        let order = run(&mut s, &g);
        assert_eq!(order.last(), Some(&g.goal()));
        assert_eq!(s.cost(g.goal()), Some(6));
        assert_eq!(s.cost(Cell::new(0, 3)), Some(7));
        // Expansion order never decreases in cost.
        let costs: Vec<i32> = order.iter().map(|&c| s.cost(c).unwrap()).collect();
        assert!(costs.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn astar_expands_fewer_cells_than_dijkstra() {
        let g = Grid::from_ascii(
            "
            ........
            S......G
            ........
            ",
        )
        .unwrap();
        let mut d = CostedSearch::new(Uniform, g.start(), g.goal());
        let mut a = CostedSearch::new(Manhattan, g.start(), g.goal());
        let dijkstra = run(&mut d, &g).len();
        let astar = run(&mut a, &g).len();
        assert_eq!(a.cost(g.goal()), Some(7));
        assert_eq!(astar, 8);
        assert!(astar < dijkstra);
    }

    #[test]
    fn equal_cost_routes_keep_the_first_predecessor() {
        let g = Grid::from_ascii(
            "
            S.
            .G
            ",
        )
        .unwrap();
        let mut s = CostedSearch::new(Uniform, g.start(), g.goal());
        run(&mut s, &g);
        // (1,0) is discovered first (down before right) and reaches G first.
        assert_eq!(
            s.path_to(g.goal()),
            vec![Cell::new(0, 0), Cell::new(1, 0), Cell::new(1, 1)]
        );
    }
}
