//! Grid-to-graph construction.
//!
//! Every passable cell becomes a [`Node`] in a single arena owned by the
//! [`Graph`]. Nodes refer to each other by [`NodeId`] (an arena index), and
//! coordinates map to ids through a dense per-cell table.

use lift_core::{Coord, CostGrid, Range};

/// Index of a node in its [`Graph`]'s arena.
///
/// Ids are dense (`0..graph.len()`), assigned in row-major order, and stable
/// for the lifetime of the graph that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The arena index.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A passable cell and its orthogonal out-edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    id: NodeId,
    pos: Coord,
    weight: u32,
    neighbors: Vec<NodeId>,
}

impl Node {
    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[inline]
    pub fn pos(&self) -> Coord {
        self.pos
    }

    /// Cost of moving into this node. Always positive.
    #[inline]
    pub fn weight(&self) -> u32 {
        self.weight
    }

    /// Passable orthogonal neighbours, in scan order (up, down, left, right).
    #[inline]
    pub fn neighbors(&self) -> &[NodeId] {
        &self.neighbors
    }
}

/// Navigable graph derived from a [`CostGrid`].
///
/// Built once and read-only afterwards; any number of solves may borrow it
/// at the same time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Graph {
    bounds: Range,
    nodes: Vec<Node>,
    /// Per-cell lookup, indexed by `bounds.index(coord)`.
    index: Vec<Option<NodeId>>,
    /// Connected-component label per node.
    labels: Vec<usize>,
    component_count: usize,
}

impl Graph {
    /// Build the graph for `grid`.
    ///
    /// One node per positive cell; each node links to the in-bounds positive
    /// cells one step up, down, left and right, in that order.
    pub fn build(grid: &CostGrid) -> Self {
        let bounds = grid.bounds();
        let mut index = vec![None; bounds.len()];
        let mut nodes = Vec::with_capacity(grid.passable_count());

        for (pos, weight) in grid.iter() {
            if weight == 0 {
                continue;
            }
            let id = NodeId(nodes.len());
            if let Some(i) = bounds.index(pos) {
                index[i] = Some(id);
            }
            nodes.push(Node {
                id,
                pos,
                weight,
                neighbors: Vec::with_capacity(4),
            });
        }

        let mut edges = 0usize;
        for node in nodes.iter_mut() {
            for n in node.pos.neighbors_4() {
                if let Some(nid) = bounds.index(n).and_then(|i| index[i]) {
                    node.neighbors.push(nid);
                }
            }
            edges += node.neighbors.len();
        }

        let mut graph = Self {
            bounds,
            nodes,
            index,
            labels: Vec::new(),
            component_count: 0,
        };
        graph.label_components();

        log::debug!(
            "built graph over {bounds}: {} nodes, {edges} edges, {} components",
            graph.nodes.len(),
            graph.component_count
        );
        graph
    }

    /// Label every node with a connected-component id.
    fn label_components(&mut self) {
        const UNLABELLED: usize = usize::MAX;
        let mut labels = vec![UNLABELLED; self.nodes.len()];
        let mut stack = Vec::new();
        let mut label = 0;

        for start in 0..self.nodes.len() {
            if labels[start] != UNLABELLED {
                continue;
            }

            // Iterative DFS from `start`.
            stack.clear();
            stack.push(start);
            labels[start] = label;

            while let Some(ci) = stack.pop() {
                for &NodeId(ni) in &self.nodes[ci].neighbors {
                    if labels[ni] == UNLABELLED {
                        labels[ni] = label;
                        stack.push(ni);
                    }
                }
            }

            label += 1;
        }

        self.labels = labels;
        self.component_count = label;
    }

    /// The grid rectangle the graph was built over.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Number of nodes (passable cells).
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in id order.
    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// The node with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` did not come from this graph.
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Id of the node at `c`, or `None` if `c` is impassable or out of bounds.
    #[inline]
    pub fn id_at(&self, c: Coord) -> Option<NodeId> {
        self.bounds.index(c).and_then(|i| self.index[i])
    }

    /// The node at `c`, if any.
    #[inline]
    pub fn node_at(&self, c: Coord) -> Option<&Node> {
        self.id_at(c).map(|id| self.node(id))
    }

    /// Out-neighbours of `id`.
    #[inline]
    pub fn neighbors(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].neighbors
    }

    /// Number of connected components.
    #[inline]
    pub fn component_count(&self) -> usize {
        self.component_count
    }

    /// Connected-component label of the node at `c`.
    pub fn component(&self, c: Coord) -> Option<usize> {
        self.id_at(c).map(|id| self.labels[id.0])
    }

    /// Whether a route exists between `a` and `b`.
    pub fn connected(&self, a: Coord, b: Coord) -> bool {
        match (self.component(a), self.component(b)) {
            (Some(la), Some(lb)) => la == lb,
            _ => false,
        }
    }
}
