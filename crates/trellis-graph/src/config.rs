//! Construction-time settings for graphs.

/// Settings applied when a graph is created.
///
/// ```
/// use trellis_graph::{DirectedGraph, GraphConfig, GraphMut};
///
/// let config = GraphConfig::default().with_self_loops(false);
/// let mut graph = DirectedGraph::<(), u32>::with_config(config);
/// let a = graph.add_vertex(()).unwrap();
/// assert!(graph.add_edge(a, a, 1).is_err());
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct GraphConfig {
    /// Number of vertex slots to preallocate in the store.
    pub vertex_capacity: usize,
    /// Whether a directed graph accepts edges from a vertex to itself. Undirected graphs never
    /// accept them.
    pub self_loops: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            vertex_capacity: 0,
            self_loops: true,
        }
    }
}

impl GraphConfig {
    /// Set the number of vertex slots to preallocate.
    pub fn with_vertex_capacity(mut self, capacity: usize) -> Self {
        self.vertex_capacity = capacity;
        self
    }

    /// Set whether self-loops are accepted by directed graphs.
    pub fn with_self_loops(mut self, allow: bool) -> Self {
        self.self_loops = allow;
        self
    }
}
