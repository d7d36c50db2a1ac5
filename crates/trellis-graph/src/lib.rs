#![warn(missing_docs)]
//! # Graph datastructures
//!
//! Implements in-memory graphs carrying arbitrary vertex and edge data, and algorithms working
//! with them.
//!
//! Vertices live in an index-addressed [`AdjacencyList`] and are referred to through
//! [`VertexId`] handles. A handle stays valid until its vertex is removed; afterwards its index
//! may be handed out again to a new vertex. Handles are tied to the graph that issued them, and a
//! handle from one graph is never equal to a handle from another.
//!
//! The graphs are not synchronized. Mutating a graph while iterating over its vertices or edges
//! is prevented by the borrow checker; sharing a graph between threads is up to the caller.
//!
//! ```
//! use trellis_graph::{Graph, GraphMut, UndirectedGraph};
//!
//! let mut graph = UndirectedGraph::<&str, u32>::new();
//! let a = graph.add_vertex("a").unwrap();
//! let b = graph.add_vertex("b").unwrap();
//! graph.add_edge(a, b, 4).unwrap();
//!
//! assert!(graph.contains_edge(b, a).unwrap());
//! assert_eq!(graph.num_edges(), 1);
//! ```
use crate::errors::{GraphError, Result};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

pub mod adjacency;
pub mod algorithms;
pub mod config;
pub mod directed;
pub mod errors;
pub mod labeled;
pub mod undirected;

pub use adjacency::AdjacencyList;
pub use config::GraphConfig;
pub use directed::DirectedGraph;
pub use labeled::{LabeledDirectedGraph, LabeledGraph, LabeledUndirectedGraph};
pub use undirected::UndirectedGraph;

/// Identity of a graph instance. Every graph, including every clone, gets its own.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct GraphId(u64);

impl GraphId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Handle to a vertex: the issuing graph together with the vertex's slot index.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct VertexId {
    graph: GraphId,
    index: usize,
}

impl VertexId {
    pub(crate) fn new(graph: GraphId, index: usize) -> Self {
        Self { graph, index }
    }

    /// Graph which issued this handle.
    pub fn graph(&self) -> GraphId {
        self.graph
    }

    /// Slot index of the vertex in its graph's store.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the slot index if this handle was issued by `graph`.
    pub(crate) fn index_in(self, graph: GraphId) -> Result<usize> {
        if self.graph == graph {
            Ok(self.index)
        } else {
            Err(GraphError::InvalidOperation("vertex handle belongs to another graph"))
        }
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index)
    }
}

/// Edge data, connecting two vertices together.
#[derive(Debug, Eq, PartialEq)]
pub struct Edge<'a, E> {
    /// Source vertex
    pub from: VertexId,
    /// Target vertex
    pub to: VertexId,
    /// Data carried by the edge
    pub data: &'a E,
}

impl<E> Clone for Edge<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for Edge<'_, E> {}

/// Read access to a graph.
///
/// The algorithms in [`algorithms`] only go through this trait.
///
/// # Examples
///
/// ```
/// use trellis_graph::{DirectedGraph, Graph, GraphMut};
///
/// let mut graph = DirectedGraph::<(), ()>::new();
/// let node1 = graph.add_vertex(()).unwrap();
/// let node2 = graph.add_vertex(()).unwrap();
/// graph.add_edge(node1, node2, ()).unwrap();
///
/// assert!(graph.contains_vertex(node1));
/// assert!(graph.contains_edge(node1, node2).unwrap());
/// assert!(!graph.contains_edge(node2, node1).unwrap());
/// ```
pub trait Graph {
    /// Data carried by each vertex.
    type VertexData;
    /// Data carried by each edge.
    type EdgeData;

    /// Identity of this graph, shared by every handle it issues.
    fn id(&self) -> GraphId;

    /// Returns true if edges have a direction.
    fn is_directed(&self) -> bool;

    /// Handle of the live vertex at this index, if there is one.
    fn handle(&self, index: usize) -> Option<VertexId>;

    /// Returns an iterator over all vertices, in ascending index order.
    fn vertices(&self) -> impl '_ + Iterator<Item = VertexId>;

    /// Returns an iterator over all edges. Each undirected edge is yielded once.
    fn edges(&self) -> impl '_ + Iterator<Item = Edge<'_, Self::EdgeData>>;

    /// Returns an iterator over the edges leaving a vertex. In undirected graphs these are all
    /// the edges incident to the vertex, oriented away from it.
    fn edges_from(
        &self,
        vertex: VertexId,
    ) -> Result<impl '_ + Iterator<Item = Edge<'_, Self::EdgeData>>>;

    /// Returns an iterator over the vertices reachable through one edge from this vertex.
    fn neighbors(&self, vertex: VertexId) -> Result<impl '_ + Iterator<Item = VertexId>>;

    /// Data of this vertex.
    fn vertex_data(&self, vertex: VertexId) -> Result<&Self::VertexData>;

    /// Data of the edge between two vertices.
    fn edge_data(&self, from: VertexId, to: VertexId) -> Result<&Self::EdgeData>;

    /// Checks whether the graph contains a specific edge.
    ///
    /// # Errors
    ///
    /// Fails if either vertex is not in the graph.
    fn contains_edge(&self, from: VertexId, to: VertexId) -> Result<bool>;

    /// Checks whether the graph contains a specific vertex.
    ///
    /// Handles issued by other graphs are never contained.
    fn contains_vertex(&self, vertex: VertexId) -> bool {
        self.vertices().any(|id| id == vertex)
    }

    /// Returns the total number of vertices in the graph.
    fn num_vertices(&self) -> usize {
        self.vertices().count()
    }

    /// Returns the total number of edges in the graph.
    fn num_edges(&self) -> usize {
        self.edges().count()
    }
}

/// A graph which can be modified.
///
/// Every mutation either applies completely or fails without changing the graph.
pub trait GraphMut: Graph {
    /// Adds a new vertex into the graph.
    fn add_vertex(&mut self, data: Self::VertexData) -> Result<VertexId>;

    /// Removes a vertex and every edge touching it, returning its data.
    fn remove_vertex(&mut self, vertex: VertexId) -> Result<Self::VertexData>;

    /// Replaces the data of a vertex, returning the previous data.
    fn set_vertex_data(
        &mut self,
        vertex: VertexId,
        data: Self::VertexData,
    ) -> Result<Self::VertexData>;

    /// Adds an edge to the graph. An edge already joining the same vertices is replaced, and its
    /// data returned.
    ///
    /// # Arguments
    ///
    /// - `from`: Source vertex.
    /// - `to`  : Target vertex.
    /// - `data`: Edge data.
    fn add_edge(
        &mut self,
        from: VertexId,
        to: VertexId,
        data: Self::EdgeData,
    ) -> Result<Option<Self::EdgeData>>;

    /// Removes the edge between two vertices, returning its data.
    fn remove_edge(&mut self, from: VertexId, to: VertexId) -> Result<Self::EdgeData>;

    /// Replaces the data of an existing edge, returning the previous data.
    fn set_edge_data(
        &mut self,
        from: VertexId,
        to: VertexId,
        data: Self::EdgeData,
    ) -> Result<Self::EdgeData>;

    /// Removes every edge, keeping all vertices and their handles.
    fn clear_edges(&mut self);

    /// Removes every vertex and edge. Indices start from zero again afterwards.
    fn clear(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_handles_are_graph_specific() {
        let mut first = DirectedGraph::<(), ()>::new();
        let mut second = DirectedGraph::<(), ()>::new();
        let a = first.add_vertex(()).unwrap();
        let b = second.add_vertex(()).unwrap();

        assert_eq!(a.index(), b.index());
        assert_ne!(a, b);
        assert!(!second.contains_vertex(a));
        assert_eq!(
            second.vertex_data(a),
            Err(GraphError::InvalidOperation("vertex handle belongs to another graph"))
        );
    }

    #[test]
    fn test_contains_vertex_matches_vertices() {
        let mut graph = UndirectedGraph::<u32, u32>::new();
        let ids = (0..6).map(|i| graph.add_vertex(i).unwrap()).collect::<Vec<_>>();
        graph.remove_vertex(ids[2]).unwrap();
        graph.remove_vertex(ids[4]).unwrap();

        let listed = graph.vertices().collect::<HashSet<_>>();
        for id in ids {
            assert_eq!(graph.contains_vertex(id), listed.contains(&id));
        }
    }

    #[test]
    fn test_handle_translation() {
        let mut graph = DirectedGraph::<(), ()>::new();
        let a = graph.add_vertex(()).unwrap();
        let copy = graph.clone();

        assert_ne!(copy.id(), graph.id());
        assert_eq!(copy.handle(a.index()).map(|v| v.index()), Some(a.index()));
        assert_eq!(copy.handle(7), None);
    }
}
