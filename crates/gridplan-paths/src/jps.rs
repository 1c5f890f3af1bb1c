//! Jump Point Search (JPS) on uniform-cost 8-connected grids.
//!
//! JPS is A* that, instead of adding every neighbour to the open list,
//! "jumps" along straight lines and diagonals and only stops at *jump
//! points*: cells where an obstacle creates a forced neighbour, or the goal.
//! Symmetric paths through open space are never generated.
//!
//! Moves follow the grid's no-corner-cutting rule: a diagonal step is legal
//! only when both orthogonal cells it passes between are walkable. The
//! forced-neighbour tests below are the ones that hold under that rule.
//! Costs are Chebyshev distances, so a diagonal step costs the same as a
//! straight one.

use gridplan_core::{Cell, Direction, Grid};

use crate::costed::CostModel;
use crate::distance::chebyshev;
use crate::reconstruct::expand_jumps;

pub(crate) struct JumpPoints;

impl CostModel for JumpPoints {
    fn successors(
        &self,
        grid: &Grid,
        current: Cell,
        parent: Option<Cell>,
        goal: Cell,
        buf: &mut Vec<(Cell, i32)>,
    ) {
        let dirs = match parent {
            Some(p) => pruned_directions(grid, current, p.direction_to(current)),
            None => Direction::ALL.to_vec(),
        };
        for d in dirs {
            if let Some(jp) = jump(grid, current, d, goal) {
                buf.push((jp, chebyshev(current, jp)));
            }
        }
    }

    fn estimate(&self, from: Cell, goal: Cell) -> i32 {
        chebyshev(from, goal)
    }

    fn finish_path(&self, chain: Vec<Cell>) -> Vec<Cell> {
        expand_jumps(&chain)
    }
}

/// Directions worth exploring from `c` when it was entered moving along `d`.
///
/// After a diagonal move the natural neighbours are the diagonal itself and
/// its two components. After a straight move only the continuation is
/// natural; each side whose neighbour is forced adds the side step and the
/// forward diagonal on that side.
fn pruned_directions(grid: &Grid, c: Cell, d: Direction) -> Vec<Direction> {
    if d.is_diagonal() {
        return vec![d, d.vertical(), d.horizontal()];
    }
    let mut dirs = vec![d];
    for side in sides(d) {
        if forced(grid, c, d, side) {
            dirs.push(Direction::new(d.dr + side.dr, d.dc + side.dc));
            dirs.push(side);
        }
    }
    dirs
}

/// The two unit steps perpendicular to the straight direction `d`.
fn sides(d: Direction) -> [Direction; 2] {
    if d.dr != 0 {
        [Direction::LEFT, Direction::RIGHT]
    } else {
        [Direction::UP, Direction::DOWN]
    }
}

/// Whether `c + side` is a forced neighbour of `c` entered moving along `d`:
/// it is open, but the cell behind it is blocked, so the previous cell on the
/// ray could not have reached it diagonally.
#[inline]
fn forced(grid: &Grid, c: Cell, d: Direction, side: Direction) -> bool {
    grid.walkable(c + side) && !grid.walkable(c + side - d)
}

/// Walk from `from` along `d` and return the first jump point, if any.
fn jump(grid: &Grid, from: Cell, d: Direction, goal: Cell) -> Option<Cell> {
    let mut c = from;
    loop {
        let next = c + d;
        if !grid.walkable(next) {
            return None;
        }
        // Dead end: the diagonal would squeeze past an obstacle corner.
        if d.is_diagonal() && !(grid.walkable(c + d.vertical()) && grid.walkable(c + d.horizontal())) {
            return None;
        }
        if next == goal {
            return Some(next);
        }

        if d.is_diagonal() {
            // A diagonal cell is a jump point when either straight ray out
            // of it finds one.
            if jump(grid, next, d.vertical(), goal).is_some()
                || jump(grid, next, d.horizontal(), goal).is_some()
            {
                return Some(next);
            }
        } else if sides(d).into_iter().any(|side| forced(grid, next, d, side)) {
            return Some(next);
        }

        c = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(map: &str) -> Grid {
        Grid::from_ascii(map).unwrap()
    }

    #[test]
    fn straight_jump_runs_to_the_goal() {
        let g = grid("S....G");
        assert_eq!(
            jump(&g, g.start(), Direction::RIGHT, g.goal()),
            Some(g.goal())
        );
        assert_eq!(jump(&g, g.start(), Direction::LEFT, g.goal()), None);
    }

    #[test]
    fn straight_jump_stops_at_forced_neighbour() {
        let g = grid(
            "
            ..#...
            S.....
            .....G
            ",
        );
        // At (1,3) the cell above is open while (0,2) behind it is blocked.
        assert_eq!(
            jump(&g, g.start(), Direction::RIGHT, g.goal()),
            Some(Cell::new(1, 3))
        );
    }

    #[test]
    fn straight_jump_without_forced_neighbours_dies_at_the_wall() {
        let g = grid(
            "
            S....
            .....
            ....G
            ",
        );
        assert_eq!(jump(&g, g.start(), Direction::RIGHT, g.goal()), None);
    }

    #[test]
    fn diagonal_jump_stops_where_a_straight_ray_succeeds() {
        let g = grid(
            "
            S.....
            ......
            ......
            ..G...
            ",
        );
        // From (2,2) the downward ray hits the goal.
        assert_eq!(
            jump(&g, g.start(), Direction::DOWN_RIGHT, g.goal()),
            Some(Cell::new(2, 2))
        );
    }

    #[test]
    fn diagonal_jump_refuses_to_cut_a_corner() {
        let g = grid(
            "
            S#.
            #..
            ..G
            ",
        );
        assert_eq!(jump(&g, g.start(), Direction::DOWN_RIGHT, g.goal()), None);
        let g = grid(
            "
            S..
            #..
            ..G
            ",
        );
        assert_eq!(jump(&g, g.start(), Direction::DOWN_RIGHT, g.goal()), None);
    }

    #[test]
    fn pruning_after_straight_move() {
        let g = grid(
            "
            #...
            S..G
            ....
            ",
        );
        // Entered (1,1) moving right: the cell above is forced, below is not.
        let dirs = pruned_directions(&g, Cell::new(1, 1), Direction::RIGHT);
        assert_eq!(
            dirs,
            vec![Direction::RIGHT, Direction::UP_RIGHT, Direction::UP]
        );
        let dirs = pruned_directions(&g, Cell::new(1, 2), Direction::RIGHT);
        assert_eq!(dirs, vec![Direction::RIGHT]);
    }

    #[test]
    fn pruning_after_diagonal_move() {
        let g = grid("S..\n...\n..G");
        assert_eq!(
            pruned_directions(&g, Cell::new(1, 1), Direction::UP_LEFT),
            vec![Direction::UP_LEFT, Direction::UP, Direction::LEFT]
        );
    }
}
