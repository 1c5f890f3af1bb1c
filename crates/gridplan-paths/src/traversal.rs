//! Uninformed traversal: breadth-first (FIFO) and depth-first (LIFO).

use std::collections::{HashSet, VecDeque};

use gridplan_core::{Cell, Grid};

use crate::reconstruct::Predecessors;
use crate::search::Strategy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Order {
    /// Queue: breadth-first.
    Fifo,
    /// Stack: depth-first.
    Lifo,
}

/// 4-connected traversal where a cell is pending at most once: it is queued
/// when first discovered and never re-queued.
pub(crate) struct Traversal {
    order: Order,
    pending: VecDeque<Cell>,
    came_from: Predecessors,
    visited: HashSet<Cell>,
}

impl Traversal {
    pub(crate) fn new(start: Cell, order: Order) -> Self {
        Self {
            order,
            pending: VecDeque::from([start]),
            came_from: Predecessors::new(start),
            visited: HashSet::new(),
        }
    }
}

impl Strategy for Traversal {
    fn next_cell(&mut self) -> Option<Cell> {
        let current = match self.order {
            Order::Fifo => self.pending.pop_front(),
            Order::Lifo => self.pending.pop_back(),
        }?;
        self.visited.insert(current);
        Some(current)
    }

    fn visited(&self) -> &HashSet<Cell> {
        &self.visited
    }

    fn frontier(&self) -> HashSet<Cell> {
        self.pending.iter().copied().collect()
    }

    fn expand(&mut self, grid: &Grid, current: Cell) {
        for n in grid.neighbours4(current) {
            if !self.came_from.contains(n) {
                self.came_from.link(n, current);
                self.pending.push_back(n);
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

    fn drain(grid: &Grid, order: Order) -> Vec<Cell> {
        let mut t = Traversal::new(grid.start(), order);
        let mut seen = Vec::new();
        while let Some(c) = t.next_cell() {
            seen.push(c);
            t.expand(grid, c);
        }
        seen
    }

    #[test]
    fn fifo_expands_level_by_level() {
        let g = Grid::from_ascii(
            "
            S..
            ...
            ..G
            ",
        )
        .unwrap();
        let order = drain(&g, Order::Fifo);
        assert_eq!(order.len(), 9);
        // Neighbour order down-before-right puts (1,0) ahead of (0,1).
        assert_eq!(&order[..3], &[Cell::new(0, 0), Cell::new(1, 0), Cell::new(0, 1)]);
        assert_eq!(order[8], Cell::new(2, 2));
    }

    #[test]
    fn lifo_follows_the_last_discovered_neighbour() {
        let g = Grid::from_ascii(
            "
            S..
            ...
            ..G
            ",
        )
        .unwrap();
        let order = drain(&g, Order::Lifo);
        // Right is pushed last, so the first dive goes along row 0.
        assert_eq!(&order[..3], &[Cell::new(0, 0), Cell::new(0, 1), Cell::new(0, 2)]);
        assert_eq!(order.len(), 9);
    }

    #[test]
    fn never_requeues_a_cell() {
        let g = Grid::from_ascii(
            "
            S...
            ....
            ...G
            ",
        )
        .unwrap();
        for order in [Order::Fifo, Order::Lifo] {
            let seen = drain(&g, order);
            let unique: HashSet<_> = seen.iter().copied().collect();
            assert_eq!(seen.len(), unique.len());
        }
    }
}
