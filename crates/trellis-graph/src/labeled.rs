//! Graphs addressed by their vertex data.
//!
//! A labeled graph keeps a map from each vertex's data to its index, so vertex data doubles as a
//! unique label. [`LabeledGraph`] wraps such a graph and takes labels wherever the plain graphs
//! take [`VertexId`] handles. Looking up a label that is not present is an error; it never creates
//! a vertex.
use crate::adjacency::{AdjacencyList, Indexed};
use crate::errors::{GraphError, Result};
use crate::{
    DirectedGraph, Edge, Graph, GraphConfig, GraphId, GraphMut, UndirectedGraph, VertexId,
};
use std::hash::Hash;

/// A graph which can find vertices by their data.
pub trait Labeled: Graph {
    /// Handle of the vertex holding this label, if there is one.
    fn find(&self, label: &Self::VertexData) -> Option<VertexId>;
}

/// Label-addressed directed graph.
pub type LabeledDirectedGraph<V, E = ()> =
    LabeledGraph<DirectedGraph<V, E, AdjacencyList<V, E, Indexed<V>>>>;

/// Label-addressed undirected graph.
pub type LabeledUndirectedGraph<V, E = ()> =
    LabeledGraph<UndirectedGraph<V, E, AdjacencyList<V, E, Indexed<V>>>>;

/// Edge between two labeled vertices.
#[derive(Debug, Eq, PartialEq)]
pub struct LabeledEdge<'a, V, E> {
    /// Label of the source vertex
    pub from: &'a V,
    /// Label of the target vertex
    pub to: &'a V,
    /// Data carried by the edge
    pub data: &'a E,
}

/// Wrapper translating labels to handles before delegating to the wrapped graph, and handles back
/// to labels on the way out.
///
/// The wrapper also implements [`Graph`] and [`GraphMut`] by delegation, so the
/// [`algorithms`](crate::algorithms) accept it directly; use [`handle_of`](Self::handle_of) to get
/// the handles they expect.
///
/// ```
/// use trellis_graph::LabeledDirectedGraph;
///
/// let mut graph = LabeledDirectedGraph::<&str, u32>::new();
/// graph.add_vertex("Denver").unwrap();
/// graph.add_vertex("L.A.").unwrap();
/// graph.add_edge(&"Denver", &"L.A.", 100).unwrap();
///
/// assert_eq!(*graph.edge_data(&"Denver", &"L.A.").unwrap(), 100);
/// assert!(graph.add_vertex("Denver").is_err());
/// assert!(graph.neighbors(&"Miami").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct LabeledGraph<G> {
    graph: G,
}

impl<V: Eq + Hash + Clone, E> LabeledDirectedGraph<V, E> {
    /// Create a new, empty labeled directed graph.
    pub fn new() -> Self {
        Self::with_config(GraphConfig::default())
    }

    /// Create a new, empty labeled directed graph with the given settings.
    pub fn with_config(config: GraphConfig) -> Self {
        Self {
            graph: DirectedGraph::from_parts(
                AdjacencyList::with_capacity(config.vertex_capacity),
                config,
            ),
        }
    }
}

impl<V: Eq + Hash + Clone, E> Default for LabeledDirectedGraph<V, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Eq + Hash + Clone, E> LabeledUndirectedGraph<V, E> {
    /// Create a new, empty labeled undirected graph.
    pub fn new() -> Self {
        Self::with_config(GraphConfig::default())
    }

    /// Create a new, empty labeled undirected graph with the given settings.
    pub fn with_config(config: GraphConfig) -> Self {
        Self {
            graph: UndirectedGraph::from_parts(
                AdjacencyList::with_capacity(config.vertex_capacity),
                config,
            ),
        }
    }
}

impl<V: Eq + Hash + Clone, E> Default for LabeledUndirectedGraph<V, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G> LabeledGraph<G> {
    /// Wrapped graph.
    pub fn inner(&self) -> &G {
        &self.graph
    }

    /// Unwrap into the wrapped graph.
    pub fn into_inner(self) -> G {
        self.graph
    }
}

impl<G: Labeled> LabeledGraph<G> {
    /// Handle of the vertex holding this label.
    ///
    /// # Errors
    ///
    /// [`GraphError::NoSuchVertex`] if no vertex holds the label.
    pub fn handle_of(&self, label: &G::VertexData) -> Result<VertexId> {
        self.graph.find(label).ok_or(GraphError::NoSuchVertex(None))
    }

    /// Label of the vertex behind a handle.
    pub fn label(&self, vertex: VertexId) -> Result<&G::VertexData> {
        self.graph.vertex_data(vertex)
    }

    /// Returns true if a vertex holds this label.
    pub fn contains_vertex(&self, label: &G::VertexData) -> bool {
        self.graph.find(label).is_some()
    }

    /// Labels of all vertices, in ascending index order.
    pub fn vertices(&self) -> impl '_ + Iterator<Item = &G::VertexData> {
        self.graph
            .vertices()
            .filter_map(move |v| self.graph.vertex_data(v).ok())
    }

    /// All edges, labeled. Each undirected edge is yielded once.
    pub fn edges(&self) -> impl '_ + Iterator<Item = LabeledEdge<'_, G::VertexData, G::EdgeData>> {
        self.graph.edges().filter_map(move |edge| self.relabel(edge))
    }

    /// Edges leaving the vertex holding this label.
    pub fn edges_from(
        &self,
        label: &G::VertexData,
    ) -> Result<impl '_ + Iterator<Item = LabeledEdge<'_, G::VertexData, G::EdgeData>>> {
        let edges = self.graph.edges_from(self.handle_of(label)?)?;
        Ok(edges.filter_map(move |edge| self.relabel(edge)))
    }

    /// Labels of the vertices one edge away from this one.
    pub fn neighbors(
        &self,
        label: &G::VertexData,
    ) -> Result<impl '_ + Iterator<Item = &G::VertexData>> {
        let neighbors = self.graph.neighbors(self.handle_of(label)?)?;
        Ok(neighbors.filter_map(move |v| self.graph.vertex_data(v).ok()))
    }

    /// Checks whether an edge joins the two labeled vertices.
    pub fn contains_edge(&self, from: &G::VertexData, to: &G::VertexData) -> Result<bool> {
        self.graph.contains_edge(self.handle_of(from)?, self.handle_of(to)?)
    }

    /// Data of the edge joining the two labeled vertices.
    pub fn edge_data(&self, from: &G::VertexData, to: &G::VertexData) -> Result<&G::EdgeData> {
        self.graph.edge_data(self.handle_of(from)?, self.handle_of(to)?)
    }

    /// Returns the total number of vertices in the graph.
    pub fn num_vertices(&self) -> usize {
        self.graph.num_vertices()
    }

    /// Returns the total number of edges in the graph.
    pub fn num_edges(&self) -> usize {
        self.graph.num_edges()
    }

    fn relabel<'a>(
        &'a self,
        edge: Edge<'a, G::EdgeData>,
    ) -> Option<LabeledEdge<'a, G::VertexData, G::EdgeData>> {
        Some(LabeledEdge {
            from: self.graph.vertex_data(edge.from).ok()?,
            to: self.graph.vertex_data(edge.to).ok()?,
            data: edge.data,
        })
    }
}

impl<G: Labeled + GraphMut> LabeledGraph<G> {
    /// Adds a vertex holding this label.
    ///
    /// # Errors
    ///
    /// [`GraphError::DuplicateVertex`] if another vertex already holds the label.
    pub fn add_vertex(&mut self, label: G::VertexData) -> Result<VertexId> {
        self.graph.add_vertex(label)
    }

    /// Removes the vertex holding this label, along with every edge touching it.
    pub fn remove_vertex(&mut self, label: &G::VertexData) -> Result<G::VertexData> {
        self.graph.remove_vertex(self.handle_of(label)?)
    }

    /// Changes the label of a vertex, keeping its handle and edges. Returns the old label.
    pub fn rename_vertex(
        &mut self,
        label: &G::VertexData,
        renamed: G::VertexData,
    ) -> Result<G::VertexData> {
        self.graph.set_vertex_data(self.handle_of(label)?, renamed)
    }

    /// Adds an edge between two labeled vertices, replacing any edge already joining them.
    pub fn add_edge(
        &mut self,
        from: &G::VertexData,
        to: &G::VertexData,
        data: G::EdgeData,
    ) -> Result<Option<G::EdgeData>> {
        let (from, to) = (self.handle_of(from)?, self.handle_of(to)?);
        self.graph.add_edge(from, to, data)
    }

    /// Removes the edge between two labeled vertices, returning its data.
    pub fn remove_edge(&mut self, from: &G::VertexData, to: &G::VertexData) -> Result<G::EdgeData> {
        let (from, to) = (self.handle_of(from)?, self.handle_of(to)?);
        self.graph.remove_edge(from, to)
    }

    /// Replaces the data of the edge between two labeled vertices, returning the previous data.
    pub fn set_edge_data(
        &mut self,
        from: &G::VertexData,
        to: &G::VertexData,
        data: G::EdgeData,
    ) -> Result<G::EdgeData> {
        let (from, to) = (self.handle_of(from)?, self.handle_of(to)?);
        self.graph.set_edge_data(from, to, data)
    }

    /// Removes every edge.
    pub fn clear_edges(&mut self) {
        self.graph.clear_edges();
    }

    /// Removes every vertex and edge.
    pub fn clear(&mut self) {
        self.graph.clear();
    }
}

impl<G: Graph> Graph for LabeledGraph<G> {
    type VertexData = G::VertexData;
    type EdgeData = G::EdgeData;

    fn id(&self) -> GraphId {
        self.graph.id()
    }

    fn is_directed(&self) -> bool {
        self.graph.is_directed()
    }

    fn handle(&self, index: usize) -> Option<VertexId> {
        self.graph.handle(index)
    }

    fn vertices(&self) -> impl '_ + Iterator<Item = VertexId> {
        self.graph.vertices()
    }

    fn edges(&self) -> impl '_ + Iterator<Item = Edge<'_, G::EdgeData>> {
        self.graph.edges()
    }

    fn edges_from(
        &self,
        vertex: VertexId,
    ) -> Result<impl '_ + Iterator<Item = Edge<'_, G::EdgeData>>> {
        self.graph.edges_from(vertex)
    }

    fn neighbors(&self, vertex: VertexId) -> Result<impl '_ + Iterator<Item = VertexId>> {
        self.graph.neighbors(vertex)
    }

    fn vertex_data(&self, vertex: VertexId) -> Result<&G::VertexData> {
        self.graph.vertex_data(vertex)
    }

    fn edge_data(&self, from: VertexId, to: VertexId) -> Result<&G::EdgeData> {
        self.graph.edge_data(from, to)
    }

    fn contains_edge(&self, from: VertexId, to: VertexId) -> Result<bool> {
        self.graph.contains_edge(from, to)
    }

    fn contains_vertex(&self, vertex: VertexId) -> bool {
        self.graph.contains_vertex(vertex)
    }

    fn num_vertices(&self) -> usize {
        self.graph.num_vertices()
    }

    fn num_edges(&self) -> usize {
        self.graph.num_edges()
    }
}

impl<G: GraphMut> GraphMut for LabeledGraph<G> {
    fn add_vertex(&mut self, data: G::VertexData) -> Result<VertexId> {
        self.graph.add_vertex(data)
    }

    fn remove_vertex(&mut self, vertex: VertexId) -> Result<G::VertexData> {
        self.graph.remove_vertex(vertex)
    }

    fn set_vertex_data(&mut self, vertex: VertexId, data: G::VertexData) -> Result<G::VertexData> {
        self.graph.set_vertex_data(vertex, data)
    }

    fn add_edge(
        &mut self,
        from: VertexId,
        to: VertexId,
        data: G::EdgeData,
    ) -> Result<Option<G::EdgeData>> {
        self.graph.add_edge(from, to, data)
    }

    fn remove_edge(&mut self, from: VertexId, to: VertexId) -> Result<G::EdgeData> {
        self.graph.remove_edge(from, to)
    }

    fn set_edge_data(
        &mut self,
        from: VertexId,
        to: VertexId,
        data: G::EdgeData,
    ) -> Result<G::EdgeData> {
        self.graph.set_edge_data(from, to, data)
    }

    fn clear_edges(&mut self) {
        self.graph.clear_edges();
    }

    fn clear(&mut self) {
        self.graph.clear();
    }
}

impl<G: Labeled> Labeled for LabeledGraph<G> {
    fn find(&self, label: &G::VertexData) -> Option<VertexId> {
        self.graph.find(label)
    }
}
