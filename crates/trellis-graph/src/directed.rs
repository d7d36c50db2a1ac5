//! Directed graphs: each edge is one connection in the store.
use crate::adjacency::{AdjacencyList, EdgeStore, LabelStore, VertexStore};
use crate::errors::{GraphError, Result};
use crate::labeled::Labeled;
use crate::{Edge, Graph, GraphConfig, GraphId, GraphMut, VertexId};
use std::marker::PhantomData;

/// A directed graph over an adjacency store.
///
/// ```
/// use trellis_graph::{DirectedGraph, Graph, GraphMut};
///
/// let mut graph = DirectedGraph::<&str, u32>::new();
/// let ny = graph.add_vertex("New York").unwrap();
/// let chicago = graph.add_vertex("Chicago").unwrap();
/// graph.add_edge(ny, chicago, 75).unwrap();
///
/// assert_eq!(graph.neighbors(ny).unwrap().collect::<Vec<_>>(), vec![chicago]);
/// assert_eq!(graph.neighbors(chicago).unwrap().count(), 0);
/// ```
#[derive(Debug)]
pub struct DirectedGraph<V = (), E = (), S = AdjacencyList<V, E>> {
    pub(crate) id: GraphId,
    pub(crate) config: GraphConfig,
    pub(crate) store: S,
    __data: PhantomData<fn() -> (V, E)>,
}

impl<V, E> DirectedGraph<V, E> {
    /// Create a new, empty directed graph.
    pub fn new() -> Self {
        Self::with_config(GraphConfig::default())
    }

    /// Create a new, empty directed graph with the given settings.
    pub fn with_config(config: GraphConfig) -> Self {
        Self::from_parts(AdjacencyList::with_capacity(config.vertex_capacity), config)
    }
}

impl<V, E> Default for DirectedGraph<V, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, E, S> DirectedGraph<V, E, S> {
    pub(crate) fn from_parts(store: S, config: GraphConfig) -> Self {
        Self {
            id: GraphId::next(),
            config,
            store,
            __data: PhantomData,
        }
    }

    /// Underlying adjacency store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Settings this graph was created with.
    pub fn config(&self) -> GraphConfig {
        self.config
    }
}

impl<V, E, S: Clone> Clone for DirectedGraph<V, E, S> {
    fn clone(&self) -> Self {
        Self::from_parts(self.store.clone(), self.config)
    }
}

impl<V, E, S: VertexStore<V> + EdgeStore<E>> Graph for DirectedGraph<V, E, S> {
    type VertexData = V;
    type EdgeData = E;

    fn id(&self) -> GraphId {
        self.id
    }

    fn is_directed(&self) -> bool {
        true
    }

    fn handle(&self, index: usize) -> Option<VertexId> {
        self.store
            .contains_vertex(index)
            .then(|| VertexId::new(self.id, index))
    }

    fn vertices(&self) -> impl '_ + Iterator<Item = VertexId> {
        let id = self.id;
        self.store.vertex_indices().map(move |i| VertexId::new(id, i))
    }

    fn edges(&self) -> impl '_ + Iterator<Item = Edge<'_, E>> {
        let id = self.id;
        self.store.all_connections().map(move |(from, c)| Edge {
            from: VertexId::new(id, from),
            to: VertexId::new(id, c.to),
            data: &c.data,
        })
    }

    fn edges_from(&self, vertex: VertexId) -> Result<impl '_ + Iterator<Item = Edge<'_, E>>> {
        let id = self.id;
        let connections = self.store.connections(vertex.index_in(id)?)?;
        Ok(connections.iter().map(move |c| Edge {
            from: vertex,
            to: VertexId::new(id, c.to),
            data: &c.data,
        }))
    }

    fn neighbors(&self, vertex: VertexId) -> Result<impl '_ + Iterator<Item = VertexId>> {
        let id = self.id;
        let connections = self.store.connections(vertex.index_in(id)?)?;
        Ok(connections.iter().map(move |c| VertexId::new(id, c.to)))
    }

    fn vertex_data(&self, vertex: VertexId) -> Result<&V> {
        self.store.vertex_data(vertex.index_in(self.id)?)
    }

    fn edge_data(&self, from: VertexId, to: VertexId) -> Result<&E> {
        self.store
            .connection_data(from.index_in(self.id)?, to.index_in(self.id)?)
    }

    fn contains_edge(&self, from: VertexId, to: VertexId) -> Result<bool> {
        self.store
            .contains_connection(from.index_in(self.id)?, to.index_in(self.id)?)
    }

    fn contains_vertex(&self, vertex: VertexId) -> bool {
        vertex.graph() == self.id && self.store.contains_vertex(vertex.index())
    }

    fn num_vertices(&self) -> usize {
        self.store.num_vertices()
    }

    fn num_edges(&self) -> usize {
        self.store.num_connections()
    }
}

impl<V, E, S: VertexStore<V> + EdgeStore<E>> GraphMut for DirectedGraph<V, E, S> {
    fn add_vertex(&mut self, data: V) -> Result<VertexId> {
        let index = self.store.add_vertex(data)?;
        Ok(VertexId::new(self.id, index))
    }

    fn remove_vertex(&mut self, vertex: VertexId) -> Result<V> {
        self.store.remove_vertex(vertex.index_in(self.id)?)
    }

    fn set_vertex_data(&mut self, vertex: VertexId, data: V) -> Result<V> {
        self.store.set_vertex_data(vertex.index_in(self.id)?, data)
    }

    fn add_edge(&mut self, from: VertexId, to: VertexId, data: E) -> Result<Option<E>> {
        let (from, to) = (from.index_in(self.id)?, to.index_in(self.id)?);
        if from == to && !self.config.self_loops {
            return Err(GraphError::InvalidOperation("self-loops are disabled for this graph"));
        }
        self.store.connect(from, to, data)
    }

    fn remove_edge(&mut self, from: VertexId, to: VertexId) -> Result<E> {
        self.store
            .disconnect(from.index_in(self.id)?, to.index_in(self.id)?)
    }

    fn set_edge_data(&mut self, from: VertexId, to: VertexId, data: E) -> Result<E> {
        let (from, to) = (from.index_in(self.id)?, to.index_in(self.id)?);
        let previous = self.store.disconnect(from, to)?;
        self.store.connect(from, to, data)?;
        Ok(previous)
    }

    fn clear_edges(&mut self) {
        self.store.clear_connections();
    }

    fn clear(&mut self) {
        self.store.clear();
    }
}

impl<V, E, S: LabelStore<V> + EdgeStore<E>> Labeled for DirectedGraph<V, E, S> {
    fn find(&self, label: &V) -> Option<VertexId> {
        self.store
            .try_get_index(label)
            .map(|i| VertexId::new(self.id, i))
    }
}
