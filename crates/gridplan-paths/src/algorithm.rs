use std::fmt;
use std::str::FromStr;

use gridplan_core::{Connectivity, Grid};

use crate::search::Search;

/// The six search strategies, selectable by their short identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Algorithm {
    Bfs,
    Dfs,
    BestFirst,
    Dijkstra,
    #[cfg_attr(feature = "serde", serde(rename = "astar"))]
    AStar,
    Jps,
}

impl Algorithm {
    pub const ALL: [Self; 6] = [
        Self::Bfs,
        Self::Dfs,
        Self::BestFirst,
        Self::Dijkstra,
        Self::AStar,
        Self::Jps,
    ];

    /// Short identifier, as accepted by [`FromStr`].
    pub const fn id(self) -> &'static str {
        match self {
            Self::Bfs => "bfs",
            Self::Dfs => "dfs",
            Self::BestFirst => "best_first",
            Self::Dijkstra => "dijkstra",
            Self::AStar => "astar",
            Self::Jps => "jps",
        }
    }

    /// Display name.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bfs => "BFS",
            Self::Dfs => "DFS",
            Self::BestFirst => "Best-First",
            Self::Dijkstra => "Dijkstra",
            Self::AStar => "A*",
            Self::Jps => "JPS",
        }
    }

    /// Movement model the algorithm searches under.
    pub const fn connectivity(self) -> Connectivity {
        match self {
            Self::Jps => Connectivity::Eight,
            _ => Connectivity::Four,
        }
    }

    /// Whether returned paths are shortest under [`Self::connectivity`].
    pub const fn is_optimal(self) -> bool {
        !matches!(self, Self::Dfs | Self::BestFirst)
    }

    /// Start a search of `grid` with this algorithm.
    pub fn search(self, grid: &Grid) -> Search<'_> {
        match self {
            Self::Bfs => crate::bfs(grid),
            Self::Dfs => crate::dfs(grid),
            Self::BestFirst => crate::best_first(grid),
            Self::Dijkstra => crate::dijkstra(grid),
            Self::AStar => crate::astar(grid),
            Self::Jps => crate::jps(grid),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.id() == s)
            .ok_or_else(|| UnknownAlgorithm(s.to_owned()))
    }
}

/// A selector string that names no known algorithm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAlgorithm(pub String);

impl fmt::Display for UnknownAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown algorithm {:?} (expected one of", self.0)?;
        for (i, a) in Algorithm::ALL.iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{sep}{}", a.id())?;
        }
        f.write_str(")")
    }
}

impl std::error::Error for UnknownAlgorithm {}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn serializes_as_id() {
        for alg in Algorithm::ALL {
            let json = serde_json::to_string(&alg).unwrap();
            assert_eq!(json, format!("\"{}\"", alg.id()));
            let back: Algorithm = serde_json::from_str(&json).unwrap();
            assert_eq!(back, alg);
        }
    }
}
