//! Shortest-path queries over a [`Graph`].
//!
//! "No route" is a normal outcome and is reported as an empty path. Only
//! requests that name cells outside the grid are errors, and only through
//! the `try_` entry point.

use lift_core::Coord;

use crate::graph::Graph;
use crate::weights::build_weights;

/// Errors for malformed route requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// The coordinate lies outside the grid the graph was built from.
    #[error("cell {0} is outside the grid")]
    OutOfBounds(Coord),
}

/// A computed route and its total cost.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    /// Cells from start to end inclusive; empty if there is no route.
    pub path: Vec<Coord>,
    /// Sum of the weights of every cell after the first.
    pub cost: u64,
}

impl Route {
    /// Whether no route was found.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Number of cells on the route, endpoints included.
    #[inline]
    pub fn len(&self) -> usize {
        self.path.len()
    }
}

/// Compute the least-cost route from `start` to `end`.
///
/// Returns the cells from `start` to `end` inclusive, `[start]` when both are
/// the same passable cell, and an empty vector when either endpoint is
/// impassable or outside the grid, or when no route connects them.
pub fn shortest_path(graph: &Graph, start: Coord, end: Coord) -> Vec<Coord> {
    if !graph.connected(start, end) {
        log::trace!("no route {start} -> {end}: endpoints not connected");
        return Vec::new();
    }
    build_weights(graph, start, end).path_to(end)
}

/// Like [`shortest_path`], but rejects out-of-bounds endpoints and reports
/// the route cost.
pub fn try_shortest_path(graph: &Graph, start: Coord, end: Coord) -> Result<Route, PathError> {
    for c in [start, end] {
        if !graph.bounds().contains(c) {
            return Err(PathError::OutOfBounds(c));
        }
    }
    if !graph.connected(start, end) {
        return Ok(Route::default());
    }
    let weights = build_weights(graph, start, end);
    Ok(Route {
        path: weights.path_to(end),
        cost: weights.cost(end).unwrap_or_default(),
    })
}

/// Total cost of walking `path`: the weights of every cell after the first.
///
/// Returns `None` if a cell is impassable or two consecutive cells are not
/// orthogonally adjacent.
pub fn path_cost(graph: &Graph, path: &[Coord]) -> Option<u64> {
    if let Some(&first) = path.first() {
        graph.id_at(first)?;
    }
    let mut total = 0u64;
    for pair in path.windows(2) {
        if !pair[0].is_adjacent(pair[1]) {
            return None;
        }
        total += u64::from(graph.node_at(pair[1])?.weight());
    }
    Some(total)
}
