//! Least-cost routing over building cost grids.
//!
//! Routing happens in two stages:
//!
//! - **Graph building** ([`Graph::build`]): every passable cell of a
//!   [`CostGrid`](lift_core::CostGrid) becomes a node linked to its passable
//!   orthogonal neighbours.
//! - **Path finding** ([`shortest_path`], [`build_weights`]): cheapest-first
//!   relaxation from the start cell records, per node, the best accumulated
//!   cost and its predecessor; the route is read back from the end cell.
//!
//! [`Solver`] ties the two together and caches the graph for its grid.
//!
//! # Costs and ties
//!
//! Moving into a cell costs that cell's value; the start cell is free. When
//! several routes share the minimal cost, neighbours are explored up, down,
//! left, right, and the route discovered first is returned.

mod graph;
mod path;
mod solver;
mod weights;

pub use graph::{Graph, Node, NodeId};
pub use path::{PathError, Route, path_cost, shortest_path, try_shortest_path};
pub use solver::{Solver, solve};
pub use weights::{WeightRecord, Weights, build_weights};
