//! **lift-core**: core types for lift routing.
//!
//! This crate provides the foundational types shared by the routing crates:
//! grid coordinates, rectangular ranges, and the immutable cost grid that
//! describes a building (rows are floors, columns are rooms).

pub mod geom;
pub mod grid;

pub use geom::{Coord, ParseCoordError, Range, RangeIter};
pub use grid::{CostGrid, GridError, IMPASSABLE};
