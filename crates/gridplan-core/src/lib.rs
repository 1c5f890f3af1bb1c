//! **gridplan-core**: the occupancy grid searched by *gridplan*.
//!
//! This crate provides the foundational types shared by the search engine and
//! its front ends: [`Cell`] coordinates, unit [`Direction`] steps, and the
//! immutable [`Grid`] with its seeded random construction.

pub mod error;
pub mod geom;
pub mod grid;

pub use error::{Endpoint, GridError};
pub use geom::{Cell, Direction};
pub use grid::{CellState, Connectivity, Grid, GridConfig};
