use std::collections::HashSet;

use gridplan_core::Cell;

/// One snapshot of a running search.
///
/// `visited` and `frontier` are owned copies taken when the snapshot was
/// produced; later progress of the search never changes them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchState {
    /// The cell just expanded, `None` on the failure snapshot.
    pub current: Option<Cell>,
    /// Cells expanded so far, `current` included.
    pub visited: HashSet<Cell>,
    /// Cells discovered but not yet expanded.
    pub frontier: HashSet<Cell>,
    /// Start-to-goal path, present only on the success snapshot.
    pub path: Option<Vec<Cell>>,
}

impl SearchState {
    pub(crate) fn step(current: Cell, visited: HashSet<Cell>, frontier: HashSet<Cell>) -> Self {
        Self {
            current: Some(current),
            visited,
            frontier,
            path: None,
        }
    }

    pub(crate) fn exhausted(visited: HashSet<Cell>) -> Self {
        Self {
            current: None,
            visited,
            frontier: HashSet::new(),
            path: None,
        }
    }

    pub(crate) fn with_path(mut self, path: Vec<Cell>) -> Self {
        self.path = Some(path);
        self
    }

    /// Terminal snapshot of a search that reached the goal.
    #[inline]
    pub fn is_success(&self) -> bool {
        self.path.is_some()
    }

    /// Terminal snapshot of a search that ran out of cells.
    #[inline]
    pub fn is_failure(&self) -> bool {
        self.current.is_none()
    }
}
