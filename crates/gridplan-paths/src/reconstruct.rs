//! Predecessor bookkeeping and path reconstruction.

use std::collections::HashMap;

use gridplan_core::Cell;

/// Maps each reached cell to the cell it was reached from.
///
/// The start is recorded with no predecessor, so "has been reached" and
/// "has a link" are the same question for every cell, start included.
#[derive(Debug, Clone, Default)]
pub struct Predecessors {
    links: HashMap<Cell, Option<Cell>>,
}

impl Predecessors {
    /// A map containing only `start`.
    pub fn new(start: Cell) -> Self {
        let mut links = HashMap::new();
        links.insert(start, None);
        Self { links }
    }

    /// Whether `c` has been reached.
    #[inline]
    pub fn contains(&self, c: Cell) -> bool {
        self.links.contains_key(&c)
    }

    /// Record (or replace) the predecessor of `c`.
    #[inline]
    pub fn link(&mut self, c: Cell, from: Cell) {
        self.links.insert(c, Some(from));
    }

    /// The predecessor of `c`; `None` for the start or an unreached cell.
    #[inline]
    pub fn get(&self, c: Cell) -> Option<Cell> {
        self.links.get(&c).copied().flatten()
    }

    /// Walk back from `goal` and return the chain start-first.
    pub fn chain(&self, goal: Cell) -> Vec<Cell> {
        let mut path = vec![goal];
        let mut node = goal;
        while let Some(prev) = self.get(node) {
            path.push(prev);
            node = prev;
        }
        path.reverse();
        path
    }
}

/// Expand a chain of jump points into a dense cell-by-cell path.
///
/// Consecutive jump points lie on a common row, column or diagonal, so
/// stepping by the sign of each coordinate difference visits every cell of
/// the segment. The first jump point appears once at the head.
pub fn expand_jumps(jumps: &[Cell]) -> Vec<Cell> {
    let Some(&first) = jumps.first() else {
        return Vec::new();
    };
    let mut path = vec![first];
    for pair in jumps.windows(2) {
        let (mut c, to) = (pair[0], pair[1]);
        while c != to {
            c = c + c.direction_to(to);
            path.push(c);
        }
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_walks_back_to_start() {
        let s = Cell::new(0, 0);
        let mut p = Predecessors::new(s);
        p.link(Cell::new(0, 1), s);
        p.link(Cell::new(1, 1), Cell::new(0, 1));
        assert!(p.contains(s));
        assert_eq!(p.get(s), None);
        assert_eq!(
            p.chain(Cell::new(1, 1)),
            vec![s, Cell::new(0, 1), Cell::new(1, 1)]
        );
        assert_eq!(p.chain(s), vec![s]);
    }

    #[test]
    fn relinking_replaces_predecessor() {
        let s = Cell::new(0, 0);
        let mut p = Predecessors::new(s);
        p.link(Cell::new(2, 0), Cell::new(1, 0));
        p.link(Cell::new(2, 0), s);
        assert_eq!(p.get(Cell::new(2, 0)), Some(s));
    }

    #[test]
    fn expand_straight_and_diagonal_segments() {
        let jumps = [Cell::new(0, 0), Cell::new(3, 3), Cell::new(3, 5), Cell::new(1, 5)];
        assert_eq!(
            expand_jumps(&jumps),
            vec![
                Cell::new(0, 0),
                Cell::new(1, 1),
                Cell::new(2, 2),
                Cell::new(3, 3),
                Cell::new(3, 4),
                Cell::new(3, 5),
                Cell::new(2, 5),
                Cell::new(1, 5),
            ]
        );
    }

    #[test]
    fn expand_degenerate_chains() {
        assert!(expand_jumps(&[]).is_empty());
        assert_eq!(expand_jumps(&[Cell::new(2, 2)]), vec![Cell::new(2, 2)]);
    }
}
