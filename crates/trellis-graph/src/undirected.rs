//! Undirected graphs.
//!
//! An undirected edge between `u` and `v` is stored as two connections carrying the same data:
//! `u -> v` and `v -> u`. The one going from the smaller index to the larger is the *real* edge
//! and is the only one enumerated by [`Graph::edges`]; its mirror is a *shadow* edge which only
//! exists so that neighbor queries are symmetric.
use crate::adjacency::{AdjacencyList, EdgeStore, LabelStore, VertexStore};
use crate::errors::{GraphError, Result};
use crate::labeled::Labeled;
use crate::{Edge, Graph, GraphConfig, GraphId, GraphMut, VertexId};
use std::marker::PhantomData;

/// An undirected graph over an adjacency store.
///
/// Self-loops are rejected: a connection from a vertex to itself has no mirror to tell it apart
/// from.
///
/// ```
/// use trellis_graph::{Graph, GraphMut, UndirectedGraph};
///
/// let mut graph = UndirectedGraph::<char, u32>::new();
/// let a = graph.add_vertex('a').unwrap();
/// let b = graph.add_vertex('b').unwrap();
/// graph.add_edge(b, a, 4).unwrap();
///
/// assert_eq!(graph.edge_data(a, b).unwrap(), graph.edge_data(b, a).unwrap());
/// let edges = graph.edges().map(|e| (e.from, e.to)).collect::<Vec<_>>();
/// assert_eq!(edges, vec![(a, b)]);
/// ```
#[derive(Debug)]
pub struct UndirectedGraph<V = (), E = (), S = AdjacencyList<V, E>> {
    pub(crate) id: GraphId,
    pub(crate) config: GraphConfig,
    pub(crate) store: S,
    __data: PhantomData<fn() -> (V, E)>,
}

impl<V, E> UndirectedGraph<V, E> {
    /// Create a new, empty undirected graph.
    pub fn new() -> Self {
        Self::with_config(GraphConfig::default())
    }

    /// Create a new, empty undirected graph with the given settings.
    pub fn with_config(config: GraphConfig) -> Self {
        Self::from_parts(AdjacencyList::with_capacity(config.vertex_capacity), config)
    }
}

impl<V, E> Default for UndirectedGraph<V, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, E, S> UndirectedGraph<V, E, S> {
    pub(crate) fn from_parts(store: S, config: GraphConfig) -> Self {
        Self {
            id: GraphId::next(),
            config,
            store,
            __data: PhantomData,
        }
    }

    /// Underlying adjacency store. It holds two connections per edge.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Settings this graph was created with.
    pub fn config(&self) -> GraphConfig {
        self.config
    }
}

impl<V, E, S: VertexStore<V> + EdgeStore<E>> UndirectedGraph<V, E, S> {
    fn endpoints(&self, from: VertexId, to: VertexId) -> Result<(usize, usize)> {
        let (from, to) = (from.index_in(self.id)?, to.index_in(self.id)?);
        for index in [from, to] {
            if !self.store.contains_vertex(index) {
                return Err(GraphError::no_such_vertex(index));
            }
        }
        Ok((from, to))
    }
}

impl<V, E, S: Clone> Clone for UndirectedGraph<V, E, S> {
    fn clone(&self) -> Self {
        Self::from_parts(self.store.clone(), self.config)
    }
}

impl<V, E, S: VertexStore<V> + EdgeStore<E>> Graph for UndirectedGraph<V, E, S> {
    type VertexData = V;
    type EdgeData = E;

    fn id(&self) -> GraphId {
        self.id
    }

    fn is_directed(&self) -> bool {
        false
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
        self.store
            .all_connections()
            .filter(|(from, c)| *from < c.to)
            .map(move |(from, c)| Edge {
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
        self.store.num_connections() / 2
    }
}

impl<V, E: Clone, S: VertexStore<V> + EdgeStore<E>> GraphMut for UndirectedGraph<V, E, S> {
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
        let (from, to) = self.endpoints(from, to)?;
        if from == to {
            return Err(GraphError::InvalidOperation("undirected graphs cannot hold self-loops"));
        }
        let previous = self.store.connect(from, to, data.clone())?;
        // Both endpoints exist, so this only fails on a store refusing the mirrored arc.
        if let Err(err) = self.store.connect(to, from, data) {
            let restored = match previous {
                Some(old) => self.store.connect(from, to, old).map(drop),
                None => self.store.disconnect(from, to).map(drop),
            };
            if let Err(rollback) = restored {
                log::error!("Failed to roll back connection {from} -> {to}: {rollback}");
            }
            return Err(err);
        }
        Ok(previous)
    }

    fn remove_edge(&mut self, from: VertexId, to: VertexId) -> Result<E> {
        let (from, to) = self.endpoints(from, to)?;
        let forward = self.store.disconnect(from, to);
        let backward = self.store.disconnect(to, from);
        match (forward, backward) {
            (Ok(data), _) | (Err(_), Ok(data)) => Ok(data),
            (Err(err), Err(_)) => Err(err),
        }
    }

    fn set_edge_data(&mut self, from: VertexId, to: VertexId, data: E) -> Result<E> {
        let (f, t) = self.endpoints(from, to)?;
        match (
            self.store.contains_connection(f, t)?,
            self.store.contains_connection(t, f)?,
        ) {
            (true, true) => {}
            (false, false) => return Err(GraphError::NoSuchEdge { from: f, to: t }),
            _ => {
                return Err(GraphError::InvalidOperation(
                    "edge is missing its mirrored connection",
                ))
            }
        }
        let previous = self.remove_edge(from, to)?;
        self.add_edge(from, to, data)?;
        Ok(previous)
    }

    fn clear_edges(&mut self) {
        self.store.clear_connections();
    }

    fn clear(&mut self) {
        self.store.clear();
    }
}

impl<V, E, S: LabelStore<V> + EdgeStore<E>> Labeled for UndirectedGraph<V, E, S> {
    fn find(&self, label: &V) -> Option<VertexId> {
        self.store
            .try_get_index(label)
            .map(|i| VertexId::new(self.id, i))
    }
}
