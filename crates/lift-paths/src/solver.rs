//! A solver that owns a grid and caches its graph.

use std::sync::OnceLock;

use lift_core::{Coord, CostGrid};

use crate::graph::Graph;
use crate::path::{PathError, Route, shortest_path, try_shortest_path};

/// Owns a cost grid and the graph derived from it.
///
/// The graph is built on first use and reused by every later query. Queries
/// take `&self` and keep all per-solve state local, so a `Solver` can be
/// shared between threads without locking.
#[derive(Debug)]
pub struct Solver {
    grid: CostGrid,
    graph: OnceLock<Graph>,
}

impl Solver {
    /// Create a solver for `grid`. No work is done until the first query.
    pub fn new(grid: CostGrid) -> Self {
        Self {
            grid,
            graph: OnceLock::new(),
        }
    }

    /// The grid this solver routes over.
    #[inline]
    pub fn grid(&self) -> &CostGrid {
        &self.grid
    }

    /// The graph for the grid, building it if this is the first call.
    pub fn graph(&self) -> &Graph {
        self.graph.get_or_init(|| Graph::build(&self.grid))
    }

    /// Whether the graph has been built yet.
    pub fn is_built(&self) -> bool {
        self.graph.get().is_some()
    }

    /// See [`shortest_path`].
    pub fn shortest_path(&self, start: Coord, end: Coord) -> Vec<Coord> {
        shortest_path(self.graph(), start, end)
    }

    /// See [`try_shortest_path`].
    pub fn route(&self, start: Coord, end: Coord) -> Result<Route, PathError> {
        try_shortest_path(self.graph(), start, end)
    }
}

impl From<CostGrid> for Solver {
    fn from(grid: CostGrid) -> Self {
        Self::new(grid)
    }
}

/// One-shot query: build the graph for `grid` and route `start` to `end`.
///
/// Use a [`Solver`] instead when routing repeatedly over the same grid.
pub fn solve(grid: &CostGrid, start: Coord, end: Coord) -> Vec<Coord> {
    shortest_path(&Graph::build(grid), start, end)
}
