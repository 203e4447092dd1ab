//! Unweighted shortest-path search over the walk graph.

use std::collections::VecDeque;

use crate::graph::{Move, VertexId, WorldGraph};

/// Per-vertex record produced by the breadth-first search: visitation flag,
/// hop distance from the source, and the predecessor edge used to reach the
/// vertex first.
#[derive(Clone, Debug, Default)]
pub struct SearchRecord {
    nodes: Vec<SearchNode>,
}

#[derive(Clone, Copy, Debug, Default)]
struct SearchNode {
    visited: bool,
    distance: u32,
    predecessor: Option<(VertexId, Move)>,
}

impl SearchRecord {
    fn new(len: usize) -> Self {
        Self {
            nodes: vec![SearchNode::default(); len],
        }
    }

    fn discover(&mut self, vertex: VertexId, distance: u32, predecessor: Option<(VertexId, Move)>) {
        if let Some(node) = self.nodes.get_mut(vertex.0) {
            node.visited = true;
            node.distance = distance;
            node.predecessor = predecessor;
        }
    }

    pub fn visited(&self, vertex: VertexId) -> bool {
        self.nodes.get(vertex.0).is_some_and(|node| node.visited)
    }

    /// Hop distance from the source, for visited vertices.
    pub fn distance(&self, vertex: VertexId) -> Option<u32> {
        self.nodes
            .get(vertex.0)
            .filter(|node| node.visited)
            .map(|node| node.distance)
    }

    /// The edge the vertex was first discovered through. `None` for the
    /// source and for unvisited vertices.
    pub fn predecessor(&self, vertex: VertexId) -> Option<(VertexId, Move)> {
        self.nodes
            .get(vertex.0)
            .filter(|node| node.visited)
            .and_then(|node| node.predecessor)
    }
}

impl WorldGraph {
    /// Breadth-first shortest path from `src` to `dst`.
    ///
    /// All edges count one hop, the frontier is FIFO, and the search halts
    /// the moment `dst` is discovered, so the recorded predecessor chain is
    /// a minimum-hop path. Returns `None` when the frontier exhausts
    /// without reaching `dst` (disconnected or empty graph), or when `src`
    /// is not a vertex of this graph.
    pub fn shortest_path(&self, src: VertexId, dst: VertexId) -> Option<SearchRecord> {
        self.vertex(src)?;

        let mut record = SearchRecord::new(self.len());
        record.discover(src, 0, None);
        if src == dst {
            return Some(record);
        }

        let mut frontier = VecDeque::new();
        frontier.push_back(src);

        while let Some(current) = frontier.pop_front() {
            let Some(vertex) = self.vertex(current) else {
                continue;
            };
            let Some(distance) = record.distance(current) else {
                continue;
            };
            for &(next, step) in vertex.edges() {
                if record.visited(next) {
                    continue;
                }
                record.discover(next, distance + 1, Some((current, step)));
                if next == dst {
                    return Some(record);
                }
                frontier.push_back(next);
            }
        }

        None
    }
}
