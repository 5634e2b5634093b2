//! Cheapest-first cost relaxation for a single solve.

use std::collections::BinaryHeap;

use lift_core::Coord;

use crate::graph::{Graph, NodeId};

/// Best known accumulated cost to a node and the node it was reached from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeightRecord {
    /// Sum of the weights of every node entered after the start.
    pub cost: u64,
    /// Predecessor on the best known route; `None` only for the start.
    pub from: Option<NodeId>,
}

/// Heap entry, ordered so that `BinaryHeap` pops the lowest cost first and,
/// among equal costs, the entry discovered first.
#[derive(Clone, Copy, Eq, PartialEq)]
struct Frontier {
    cost: u64,
    seq: u64,
    id: NodeId,
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Weight records produced by one solve.
///
/// Borrowed from the graph; allocated fresh per call and never shared, so
/// the graph itself is never written during pathfinding.
#[derive(Debug, Clone)]
pub struct Weights<'g> {
    graph: &'g Graph,
    start: Option<NodeId>,
    records: Vec<Option<WeightRecord>>,
    settled: Vec<bool>,
}

/// Compute weight records from `start` until `end` is settled.
///
/// Nodes are expanded cheapest first. Neighbours are relaxed in scan order
/// (up, down, left, right) and a record is replaced only by a strictly
/// cheaper candidate, so among equal-cost routes the first discovered one is
/// kept. The search stops as soon as `end` is settled; an `end` without a
/// node just means the whole component of `start` is explored.
///
/// If `start` has no node the result holds no records.
pub fn build_weights(graph: &Graph, start: Coord, end: Coord) -> Weights<'_> {
    let n = graph.len();
    let mut weights = Weights {
        graph,
        start: None,
        records: vec![None; n],
        settled: vec![false; n],
    };

    let Some(start_id) = graph.id_at(start) else {
        return weights;
    };
    let end_id = graph.id_at(end);

    weights.start = Some(start_id);
    weights.records[start_id.index()] = Some(WeightRecord {
        cost: 0,
        from: None,
    });

    let mut open: BinaryHeap<Frontier> = BinaryHeap::new();
    let mut seq = 0u64;
    open.push(Frontier {
        cost: 0,
        seq,
        id: start_id,
    });

    let mut expanded = 0usize;
    while let Some(current) = open.pop() {
        let ci = current.id.index();
        // Stale entry: the node was already settled at a lower cost.
        if weights.settled[ci] {
            continue;
        }
        weights.settled[ci] = true;
        expanded += 1;

        if Some(current.id) == end_id {
            break;
        }

        for &nid in graph.neighbors(current.id) {
            let ni = nid.index();
            if weights.settled[ni] {
                continue;
            }
            let candidate = current.cost + u64::from(graph.node(nid).weight());
            if let Some(rec) = weights.records[ni] {
                if candidate >= rec.cost {
                    continue;
                }
            }
            weights.records[ni] = Some(WeightRecord {
                cost: candidate,
                from: Some(current.id),
            });
            seq += 1;
            open.push(Frontier {
                cost: candidate,
                seq,
                id: nid,
            });
        }
    }

    log::trace!("weights {start} -> {end}: expanded {expanded} of {n} nodes");
    weights
}

impl<'g> Weights<'g> {
    /// The graph these records were computed on.
    #[inline]
    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    /// The record at `c`, if the search reached it.
    pub fn record(&self, c: Coord) -> Option<WeightRecord> {
        self.graph.id_at(c).and_then(|id| self.records[id.index()])
    }

    /// Accumulated cost to `c`, if reached.
    pub fn cost(&self, c: Coord) -> Option<u64> {
        self.record(c).map(|r| r.cost)
    }

    /// Whether `c` was settled, i.e. its record is final and optimal.
    ///
    /// Records of reached but unsettled nodes are upper bounds only.
    pub fn is_settled(&self, c: Coord) -> bool {
        self.graph
            .id_at(c)
            .is_some_and(|id| self.settled[id.index()])
    }

    /// Number of nodes that received a record.
    pub fn reached(&self) -> usize {
        self.records.iter().filter(|r| r.is_some()).count()
    }

    /// Reconstruct the route to `target` by following predecessors back to
    /// the start.
    ///
    /// Returns start..=target, or an empty vector if there is no start or
    /// `target` was never reached.
    pub fn path_to(&self, target: Coord) -> Vec<Coord> {
        let mut path = Vec::new();
        if self.start.is_none() {
            return path;
        }
        let Some(mut id) = self.graph.id_at(target) else {
            return path;
        };

        while let Some(rec) = self.records[id.index()] {
            path.push(self.graph.node(id).pos());
            match rec.from {
                Some(prev) => id = prev,
                None => break,
            }
        }
        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lift_core::CostGrid;

    fn graph(rows: &[&[u32]]) -> Graph {
        Graph::build(&CostGrid::from_rows(rows).unwrap())
    }

    #[test]
    fn start_record_is_zero_without_predecessor() {
        let g = graph(&[&[4, 5], &[6, 7]]);
        let w = build_weights(&g, Coord::new(1, 1), Coord::new(0, 0));
        assert_eq!(
            w.record(Coord::new(1, 1)),
            Some(WeightRecord {
                cost: 0,
                from: None,
            })
        );
    }

    #[test]
    fn costs_accumulate_entered_weights() {
        let g = graph(&[&[1, 2, 3]]);
        let w = build_weights(&g, Coord::new(0, 0), Coord::new(0, 2));
        assert_eq!(w.cost(Coord::new(0, 1)), Some(2));
        assert_eq!(w.cost(Coord::new(0, 2)), Some(5));
        let mid = g.id_at(Coord::new(0, 1));
        assert_eq!(w.record(Coord::new(0, 2)).unwrap().from, mid);
    }

    #[test]
    fn each_record_is_predecessor_plus_own_weight() {
        let g = graph(&[&[1, 9, 2], &[3, 1, 4], &[2, 2, 1]]);
        let w = build_weights(&g, Coord::new(0, 0), Coord::new(-1, -1));
        for node in g.nodes() {
            let rec = w.record(node.pos()).unwrap();
            if let Some(prev) = rec.from {
                let prev_cost = w.cost(g.node(prev).pos()).unwrap();
                assert_eq!(rec.cost, prev_cost + u64::from(node.weight()));
            }
        }
        assert_eq!(w.reached(), g.len());
    }

    #[test]
    fn unreachable_target_has_no_record() {
        let g = graph(&[&[1, 0, 1]]);
        let w = build_weights(&g, Coord::new(0, 0), Coord::new(0, 2));
        assert_eq!(w.record(Coord::new(0, 2)), None);
        assert!(w.path_to(Coord::new(0, 2)).is_empty());
    }

    #[test]
    fn missing_start_yields_no_records() {
        let g = graph(&[&[0, 1]]);
        let w = build_weights(&g, Coord::new(0, 0), Coord::new(0, 1));
        assert_eq!(w.reached(), 0);
        assert!(w.path_to(Coord::new(0, 1)).is_empty());
    }

    #[test]
    fn search_stops_once_end_is_settled() {
        let g = graph(&[&[1, 1, 1, 1, 1, 1]]);
        let w = build_weights(&g, Coord::new(0, 0), Coord::new(0, 1));
        assert!(w.is_settled(Coord::new(0, 1)));
        assert!(!w.is_settled(Coord::new(0, 3)));
        assert_eq!(w.record(Coord::new(0, 4)), None);
    }

    #[test]
    fn path_to_walks_predecessors() {
        let g = graph(&[&[1, 1], &[0, 1]]);
        let w = build_weights(&g, Coord::new(0, 0), Coord::new(1, 1));
        assert_eq!(
            w.path_to(Coord::new(1, 1)),
            vec![Coord::new(0, 0), Coord::new(0, 1), Coord::new(1, 1)]
        );
        assert_eq!(w.path_to(Coord::new(0, 0)), vec![Coord::new(0, 0)]);
    }

    #[test]
    fn frontier_pops_cheapest_then_earliest() {
        let mut heap = BinaryHeap::new();
        let id = NodeId(0);
        heap.push(Frontier { cost: 5, seq: 1, id });
        heap.push(Frontier { cost: 3, seq: 4, id });
        heap.push(Frontier { cost: 3, seq: 2, id });
        let order: Vec<_> = std::iter::from_fn(|| heap.pop())
            .map(|f| (f.cost, f.seq))
            .collect();
        assert_eq!(order, vec![(3, 2), (3, 4), (5, 1)]);
    }
}
