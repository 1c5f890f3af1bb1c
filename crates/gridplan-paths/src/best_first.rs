//! Greedy best-first search: always expand the pending cell that looks
//! closest to the goal. Fast on open maps, not optimal.

use std::collections::HashSet;

use gridplan_core::{Cell, Grid};

use crate::distance::manhattan;
use crate::queue::PriorityQueue;
use crate::reconstruct::Predecessors;
use crate::search::Strategy;

pub(crate) struct BestFirst {
    goal: Cell,
    open: PriorityQueue<Cell>,
    in_open: HashSet<Cell>,
    came_from: Predecessors,
    visited: HashSet<Cell>,
}

impl BestFirst {
    pub(crate) fn new(start: Cell, goal: Cell) -> Self {
        let mut open = PriorityQueue::new();
        open.push(manhattan(start, goal), start);
        Self {
            goal,
            open,
            in_open: HashSet::from([start]),
            came_from: Predecessors::new(start),
            visited: HashSet::new(),
        }
    }
}

impl Strategy for BestFirst {
    fn next_cell(&mut self) -> Option<Cell> {
        // A cell enters the queue only on first discovery, so every pop is fresh.
        let (_, current) = self.open.pop()?;
        self.in_open.remove(&current);
        self.visited.insert(current);
        Some(current)
    }

    fn visited(&self) -> &HashSet<Cell> {
        &self.visited
    }

    fn frontier(&self) -> HashSet<Cell> {
        self.in_open.clone()
    }

    fn expand(&mut self, grid: &Grid, current: Cell) {
        for n in grid.neighbours4(current) {
            if !self.came_from.contains(n) {
                self.came_from.link(n, current);
                self.open.push(manhattan(n, self.goal), n);
                self.in_open.insert(n);
            }
        }
    }

    fn path_to(&self, goal: Cell) -> Vec<Cell> {
        self.came_from.chain(goal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heads_straight_for_the_goal_on_open_ground() {
        let g = Grid::from_ascii(
            "
            S....
            .....
            ....G
            ",
        )
        .unwrap();
        let mut bf = BestFirst::new(g.start(), g.goal());
        let mut expanded = 0;
        while let Some(c) = bf.next_cell() {
            expanded += 1;
            if c == g.goal() {
                break;
            }
            bf.expand(&g, c);
        }
        // Every expansion lowers the heuristic by one: no detours.
        assert_eq!(expanded, 7);
        assert_eq!(bf.path_to(g.goal()).len(), 7);
    }
}
