//! A module providing the adjacency list store that backs every graph in this crate.
//!
//! The store is an arena: a dense vector of optional vertex slots, a pool of vacated slot
//! indices waiting to be reused, and optionally a map from vertex labels to slot indices. It
//! knows nothing about edge direction; each [`Connection`] is a single directed arc, and the
//! graph types decide how many arcs a logical edge is made of.
use crate::errors::{GraphError, Result};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::hash::Hash;
use std::mem;

/// One outgoing arc stored under its source vertex.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Connection<E> {
    /// Index of the target vertex.
    pub to: usize,
    /// Data carried by the arc.
    pub data: E,
}

/// Vertex payload together with its outgoing connections, in insertion order.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct VertexRecord<V, E> {
    /// Data carried by the vertex.
    pub data: V,
    /// Outgoing connections. At most one per target index.
    pub connections: Vec<Connection<E>>,
}

impl<V, E> VertexRecord<V, E> {
    fn new(data: V) -> Self {
        Self {
            data,
            connections: Vec::new(),
        }
    }

    fn position(&self, to: usize) -> Option<usize> {
        self.connections.iter().position(|c| c.to == to)
    }
}

/// Storage of vertices addressed by index.
pub trait VertexStore<V> {
    /// Stores a new vertex and returns its index. The smallest vacated index is reused first;
    /// otherwise the store grows by one slot.
    ///
    /// # Errors
    ///
    /// [`GraphError::DuplicateVertex`] if the store keeps a label index and another live vertex
    /// already holds this label.
    fn add_vertex(&mut self, data: V) -> Result<usize>;

    /// Removes a vertex, severs every connection pointing to or from it, and releases its index
    /// for reuse. Returns the vertex data.
    fn remove_vertex(&mut self, index: usize) -> Result<V>;

    /// Returns true if a vertex currently occupies this index.
    fn contains_vertex(&self, index: usize) -> bool;

    /// Data of the vertex at this index.
    fn vertex_data(&self, index: usize) -> Result<&V>;

    /// Replaces the data of a vertex, returning the previous data.
    fn set_vertex_data(&mut self, index: usize, data: V) -> Result<V>;

    /// Indices of all live vertices, in ascending order.
    fn vertex_indices(&self) -> impl '_ + Iterator<Item = usize>;

    /// Number of live vertices.
    fn num_vertices(&self) -> usize;

    /// Removes every vertex and connection, and forgets all vacated indices.
    fn clear(&mut self);
}

/// Storage of directed connections between stored vertices.
pub trait EdgeStore<E> {
    /// Connects `from` to `to`. An existing connection between the same ordered pair is replaced
    /// and its data returned.
    fn connect(&mut self, from: usize, to: usize, data: E) -> Result<Option<E>>;

    /// Removes the connection from `from` to `to`, returning its data.
    fn disconnect(&mut self, from: usize, to: usize) -> Result<E>;

    /// Returns true if `from` is connected to `to`. Fails if either vertex is absent.
    fn contains_connection(&self, from: usize, to: usize) -> Result<bool>;

    /// Data of the connection from `from` to `to`.
    fn connection_data(&self, from: usize, to: usize) -> Result<&E>;

    /// Outgoing connections of a vertex.
    fn connections(&self, index: usize) -> Result<&[Connection<E>]>;

    /// Every stored connection exactly once, grouped by source index in ascending order.
    fn all_connections<'a>(&'a self) -> impl 'a + Iterator<Item = (usize, &'a Connection<E>)>
    where
        E: 'a;

    /// Number of stored connections.
    fn num_connections(&self) -> usize;

    /// Removes every connection, keeping vertices in place.
    fn clear_connections(&mut self);
}

/// Vertex storage which can also find vertices by their data.
pub trait LabelStore<V>: VertexStore<V> {
    /// Index of the live vertex holding this label, if there is one.
    fn try_get_index(&self, label: &V) -> Option<usize>;

    /// Index of the live vertex holding this label.
    ///
    /// # Errors
    ///
    /// [`GraphError::NoSuchVertex`] if no live vertex holds the label.
    fn get_index(&self, label: &V) -> Result<usize> {
        self.try_get_index(label).ok_or(GraphError::NoSuchVertex(None))
    }
}

/// Bookkeeping of vertex labels, chosen at the type level by [`AdjacencyList`].
pub trait LabelIndex<V>: Default {
    /// Index currently holding the label.
    fn lookup(&self, label: &V) -> Option<usize>;
    /// Records that `index` now holds `label`.
    fn insert(&mut self, label: &V, index: usize);
    /// Forgets the label.
    fn remove(&mut self, label: &V);
    /// Forgets every label.
    fn clear(&mut self);
}

/// No label index: vertices are addressed by index only and their data need not be unique.
#[derive(Debug, Copy, Clone, Default)]
pub struct Unindexed;

impl<V> LabelIndex<V> for Unindexed {
    fn lookup(&self, _: &V) -> Option<usize> {
        None
    }

    fn insert(&mut self, _: &V, _: usize) {}

    fn remove(&mut self, _: &V) {}

    fn clear(&mut self) {}
}

/// Label index mapping each live vertex's data to its index. Vertex data must be unique.
#[derive(Debug, Clone)]
pub struct Indexed<V>(HashMap<V, usize>);

impl<V> Default for Indexed<V> {
    fn default() -> Self {
        Self(HashMap::new())
    }
}

impl<V: Eq + Hash + Clone> LabelIndex<V> for Indexed<V> {
    fn lookup(&self, label: &V) -> Option<usize> {
        self.0.get(label).copied()
    }

    fn insert(&mut self, label: &V, index: usize) {
        self.0.insert(label.clone(), index);
    }

    fn remove(&mut self, label: &V) {
        self.0.remove(label);
    }

    fn clear(&mut self) {
        self.0.clear();
    }
}

/// Index-addressed adjacency list with slot recycling.
///
/// Invariants held after every operation:
///
/// - the free pool holds exactly the vacant indices below [`slot_count`](Self::slot_count);
/// - every connection points from a live vertex to a live vertex;
/// - with an [`Indexed`] label index, the label map and the live vertices are in bijection.
///
/// ```
/// use trellis_graph::adjacency::{AdjacencyList, EdgeStore, VertexStore};
///
/// let mut store = AdjacencyList::<char, u32>::new();
/// let a = store.add_vertex('a').unwrap();
/// let b = store.add_vertex('b').unwrap();
/// store.connect(a, b, 5).unwrap();
///
/// store.remove_vertex(a).unwrap();
/// assert_eq!(store.num_connections(), 0);
/// assert_eq!(store.add_vertex('c').unwrap(), a);
/// ```
#[derive(Debug, Clone)]
pub struct AdjacencyList<V, E, I = Unindexed> {
    slots: Vec<Option<VertexRecord<V, E>>>,
    free: BinaryHeap<Reverse<usize>>,
    labels: I,
    num_vertices: usize,
    num_connections: usize,
}

impl<V, E, I: LabelIndex<V>> Default for AdjacencyList<V, E, I> {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl<V, E, I: LabelIndex<V>> AdjacencyList<V, E, I> {
    /// Create a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new, empty store with room for `capacity` vertices before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: BinaryHeap::new(),
            labels: I::default(),
            num_vertices: 0,
            num_connections: 0,
        }
    }

    /// Number of slots, live or vacant. Never decreases except through [`VertexStore::clear`].
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Vacant indices waiting for reuse, in ascending order.
    pub fn free_indices(&self) -> Vec<usize> {
        let mut indices = self.free.iter().map(|Reverse(i)| *i).collect::<Vec<_>>();
        indices.sort_unstable();
        indices
    }

    /// Vertex record at this index.
    pub fn record(&self, index: usize) -> Result<&VertexRecord<V, E>> {
        self.slots
            .get(index)
            .and_then(Option::as_ref)
            .ok_or(GraphError::no_such_vertex(index))
    }

    /// Indices this vertex has connections to.
    pub fn neighbors(&self, index: usize) -> Result<impl '_ + Iterator<Item = usize>> {
        Ok(self.record(index)?.connections.iter().map(|c| c.to))
    }

    fn record_mut(&mut self, index: usize) -> Result<&mut VertexRecord<V, E>> {
        self.slots
            .get_mut(index)
            .and_then(Option::as_mut)
            .ok_or(GraphError::no_such_vertex(index))
    }

    fn check_pair(&self, from: usize, to: usize) -> Result<()> {
        self.record(from)?;
        self.record(to)?;
        Ok(())
    }
}

impl<V, E, I: LabelIndex<V>> VertexStore<V> for AdjacencyList<V, E, I> {
    fn add_vertex(&mut self, data: V) -> Result<usize> {
        if let Some(existing) = self.labels.lookup(&data) {
            return Err(GraphError::DuplicateVertex(existing));
        }
        let index = match self.free.pop() {
            Some(Reverse(index)) => {
                log::trace!("Reusing vertex slot {index}");
                index
            }
            None => {
                self.slots.push(None);
                self.slots.len() - 1
            }
        };
        self.labels.insert(&data, index);
        self.slots[index] = Some(VertexRecord::new(data));
        self.num_vertices += 1;
        Ok(index)
    }

    fn remove_vertex(&mut self, index: usize) -> Result<V> {
        let record = self
            .slots
            .get_mut(index)
            .and_then(Option::take)
            .ok_or(GraphError::no_such_vertex(index))?;
        let mut pruned = 0;
        for other in self.slots.iter_mut().flatten() {
            let before = other.connections.len();
            other.connections.retain(|c| c.to != index);
            pruned += before - other.connections.len();
        }
        log::trace!(
            "Removed vertex {index}: {} outgoing and {pruned} incoming connections severed",
            record.connections.len()
        );
        self.num_connections -= pruned + record.connections.len();
        self.num_vertices -= 1;
        self.labels.remove(&record.data);
        self.free.push(Reverse(index));
        Ok(record.data)
    }

    fn contains_vertex(&self, index: usize) -> bool {
        matches!(self.slots.get(index), Some(Some(_)))
    }

    fn vertex_data(&self, index: usize) -> Result<&V> {
        self.record(index).map(|r| &r.data)
    }

    fn set_vertex_data(&mut self, index: usize, data: V) -> Result<V> {
        self.record(index)?;
        match self.labels.lookup(&data) {
            Some(existing) if existing != index => {
                return Err(GraphError::DuplicateVertex(existing))
            }
            _ => {}
        }
        let record = self
            .slots
            .get_mut(index)
            .and_then(Option::as_mut)
            .ok_or(GraphError::no_such_vertex(index))?;
        self.labels.remove(&record.data);
        self.labels.insert(&data, index);
        Ok(mem::replace(&mut record.data, data))
    }

    fn vertex_indices(&self) -> impl '_ + Iterator<Item = usize> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|_| i))
    }

    fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.labels.clear();
        self.num_vertices = 0;
        self.num_connections = 0;
    }
}

impl<V, E, I: LabelIndex<V>> EdgeStore<E> for AdjacencyList<V, E, I> {
    fn connect(&mut self, from: usize, to: usize, data: E) -> Result<Option<E>> {
        self.check_pair(from, to)?;
        let record = self.record_mut(from)?;
        match record.position(to) {
            Some(pos) => Ok(Some(mem::replace(&mut record.connections[pos].data, data))),
            None => {
                record.connections.push(Connection { to, data });
                self.num_connections += 1;
                log::trace!("Connected {from} -> {to}");
                Ok(None)
            }
        }
    }

    fn disconnect(&mut self, from: usize, to: usize) -> Result<E> {
        self.check_pair(from, to)?;
        let record = self.record_mut(from)?;
        let pos = record.position(to).ok_or(GraphError::NoSuchEdge { from, to })?;
        let connection = record.connections.remove(pos);
        self.num_connections -= 1;
        log::trace!("Disconnected {from} -> {to}");
        Ok(connection.data)
    }

    fn contains_connection(&self, from: usize, to: usize) -> Result<bool> {
        self.check_pair(from, to)?;
        Ok(self.record(from)?.position(to).is_some())
    }

    fn connection_data(&self, from: usize, to: usize) -> Result<&E> {
        self.check_pair(from, to)?;
        let record = self.record(from)?;
        record
            .position(to)
            .map(|pos| &record.connections[pos].data)
            .ok_or(GraphError::NoSuchEdge { from, to })
    }

    fn connections(&self, index: usize) -> Result<&[Connection<E>]> {
        self.record(index).map(|r| r.connections.as_slice())
    }

    fn all_connections<'a>(&'a self) -> impl 'a + Iterator<Item = (usize, &'a Connection<E>)>
    where
        E: 'a,
    {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|r| (i, r)))
            .flat_map(|(i, r)| r.connections.iter().map(move |c| (i, c)))
    }

    fn num_connections(&self) -> usize {
        self.num_connections
    }

    fn clear_connections(&mut self) {
        for record in self.slots.iter_mut().flatten() {
            record.connections.clear();
        }
        self.num_connections = 0;
    }
}

impl<V: Eq + Hash + Clone, E> LabelStore<V> for AdjacencyList<V, E, Indexed<V>> {
    fn try_get_index(&self, label: &V) -> Option<usize> {
        self.labels.lookup(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    type Store = AdjacencyList<u32, u32>;
    type LabeledStore = AdjacencyList<&'static str, u32, Indexed<&'static str>>;

    #[test]
    fn test_add_vertex_grows() {
        let mut store = Store::new();
        assert_eq!(store.add_vertex(10).unwrap(), 0);
        assert_eq!(store.add_vertex(11).unwrap(), 1);
        assert_eq!(store.slot_count(), 2);
        assert_eq!(store.num_vertices(), 2);
        assert_eq!(*store.vertex_data(1).unwrap(), 11);
    }

    #[test]
    fn test_reuses_smallest_free_index() {
        let mut store = Store::new();
        for i in 0..5 {
            store.add_vertex(i).unwrap();
        }
        store.remove_vertex(3).unwrap();
        store.remove_vertex(1).unwrap();
        assert_eq!(store.free_indices(), vec![1, 3]);

        assert_eq!(store.add_vertex(20).unwrap(), 1);
        assert_eq!(store.add_vertex(21).unwrap(), 3);
        assert_eq!(store.add_vertex(22).unwrap(), 5);
        assert!(store.free_indices().is_empty());
    }

    #[test]
    fn test_add_then_remove_leaves_empty_store() {
        let mut store = Store::new();
        let v = store.add_vertex(0).unwrap();
        store.remove_vertex(v).unwrap();
        assert_eq!(store.vertex_indices().count(), 0);
        assert_eq!(store.num_vertices(), 0);
        assert_eq!(store.slot_count(), 1);
        assert_eq!(store.free_indices(), vec![0]);
    }

    #[test]
    fn test_remove_missing_vertex() {
        let mut store = Store::new();
        assert_eq!(store.remove_vertex(0), Err(GraphError::NoSuchVertex(Some(0))));
        let v = store.add_vertex(0).unwrap();
        store.remove_vertex(v).unwrap();
        assert_eq!(store.remove_vertex(v), Err(GraphError::NoSuchVertex(Some(v))));
    }

    #[test]
    fn test_remove_prunes_both_directions() {
        let mut store = Store::new();
        let a = store.add_vertex(0).unwrap();
        let b = store.add_vertex(1).unwrap();
        let c = store.add_vertex(2).unwrap();
        store.connect(a, b, 1).unwrap();
        store.connect(b, a, 1).unwrap();
        store.connect(c, b, 2).unwrap();
        store.connect(b, b, 3).unwrap();

        store.remove_vertex(b).unwrap();
        assert_eq!(store.num_connections(), 0);
        assert_eq!(store.neighbors(a).unwrap().count(), 0);
        assert_eq!(store.neighbors(c).unwrap().count(), 0);
    }

    #[test]
    fn test_connect_replaces_existing() {
        let mut store = Store::new();
        let a = store.add_vertex(0).unwrap();
        let b = store.add_vertex(1).unwrap();
        assert_eq!(store.connect(a, b, 1).unwrap(), None);
        assert_eq!(store.connect(a, b, 2).unwrap(), Some(1));
        assert_eq!(store.num_connections(), 1);
        assert_eq!(*store.connection_data(a, b).unwrap(), 2);
        assert!(!store.contains_connection(b, a).unwrap());
    }

    #[test]
    fn test_connect_missing_endpoint() {
        let mut store = Store::new();
        let a = store.add_vertex(0).unwrap();
        assert_eq!(store.connect(a, 7, 1), Err(GraphError::NoSuchVertex(Some(7))));
        assert_eq!(store.connect(7, a, 1), Err(GraphError::NoSuchVertex(Some(7))));
        assert_eq!(store.num_connections(), 0);
    }

    #[test]
    fn test_disconnect_missing_edge() {
        let mut store = Store::new();
        let a = store.add_vertex(0).unwrap();
        let b = store.add_vertex(1).unwrap();
        assert_eq!(
            store.disconnect(a, b),
            Err(GraphError::NoSuchEdge { from: a, to: b })
        );
        store.connect(a, b, 4).unwrap();
        assert_eq!(store.disconnect(a, b), Ok(4));
        assert_eq!(store.num_connections(), 0);
    }

    #[test]
    fn test_self_loop() {
        let mut store = Store::new();
        let a = store.add_vertex(0).unwrap();
        store.connect(a, a, 9).unwrap();
        assert_eq!(store.neighbors(a).unwrap().collect::<Vec<_>>(), vec![a]);
        store.remove_vertex(a).unwrap();
        assert_eq!(store.num_connections(), 0);
    }

    #[test]
    fn test_all_connections_once() {
        let mut store = Store::new();
        let a = store.add_vertex(0).unwrap();
        let b = store.add_vertex(1).unwrap();
        store.connect(a, b, 1).unwrap();
        store.connect(b, a, 2).unwrap();
        let arcs = store
            .all_connections()
            .map(|(from, c)| (from, c.to, c.data))
            .collect::<Vec<_>>();
        assert_eq!(arcs, vec![(a, b, 1), (b, a, 2)]);
        assert_eq!(store.all_connections().count(), store.num_connections());
    }

    #[test]
    fn test_clear_connections_keeps_vertices() {
        let mut store = Store::new();
        let a = store.add_vertex(0).unwrap();
        let b = store.add_vertex(1).unwrap();
        store.connect(a, b, 1).unwrap();
        store.clear_connections();
        assert_eq!(store.num_connections(), 0);
        assert_eq!(store.vertex_indices().collect::<Vec<_>>(), vec![a, b]);
    }

    #[test]
    fn test_clear() {
        let mut store = LabeledStore::new();
        store.add_vertex("a").unwrap();
        let b = store.add_vertex("b").unwrap();
        store.remove_vertex(b).unwrap();
        store.clear();
        assert_eq!(store.slot_count(), 0);
        assert!(store.free_indices().is_empty());
        assert_eq!(store.try_get_index(&"a"), None);
        assert_eq!(store.add_vertex("a").unwrap(), 0);
    }

    #[test]
    fn test_labeled_duplicate() {
        let mut store = LabeledStore::new();
        let a = store.add_vertex("a").unwrap();
        assert_eq!(store.add_vertex("a"), Err(GraphError::DuplicateVertex(a)));
        assert_eq!(store.num_vertices(), 1);
        assert_eq!(store.slot_count(), 1);
    }

    #[test]
    fn test_labeled_lookup_follows_removal() {
        let mut store = LabeledStore::new();
        let a = store.add_vertex("a").unwrap();
        assert_eq!(store.get_index(&"a"), Ok(a));
        store.remove_vertex(a).unwrap();
        assert_eq!(store.try_get_index(&"a"), None);
        assert_eq!(store.get_index(&"a"), Err(GraphError::NoSuchVertex(None)));
        assert_eq!(store.add_vertex("a").unwrap(), a);
    }

    #[test]
    fn test_labeled_set_vertex_data() {
        let mut store = LabeledStore::new();
        let a = store.add_vertex("a").unwrap();
        let b = store.add_vertex("b").unwrap();
        assert_eq!(store.set_vertex_data(a, "b"), Err(GraphError::DuplicateVertex(b)));
        assert_eq!(store.set_vertex_data(a, "a"), Ok("a"));
        assert_eq!(store.set_vertex_data(a, "z"), Ok("a"));
        assert_eq!(store.try_get_index(&"z"), Some(a));
        assert_eq!(store.try_get_index(&"a"), None);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add,
        Remove(usize),
        Connect(usize, usize, u32),
        Disconnect(usize, usize),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            Just(Op::Add),
            (0..12usize).prop_map(Op::Remove),
            (0..12usize, 0..12usize, 0..100u32).prop_map(|(a, b, w)| Op::Connect(a, b, w)),
            (0..12usize, 0..12usize).prop_map(|(a, b)| Op::Disconnect(a, b)),
        ]
    }

    proptest! {
        #[test]
        fn proptest_store_invariants(ops in prop::collection::vec(op(), 1..200)) {
            let mut store = AdjacencyList::<u32, u32, Indexed<u32>>::new();
            let mut next_label = 0;
            for op in ops {
                match op {
                    Op::Add => {
                        let expected = store
                            .free_indices()
                            .first()
                            .copied()
                            .unwrap_or(store.slot_count());
                        let index = store.add_vertex(next_label).unwrap();
                        prop_assert_eq!(index, expected);
                        next_label += 1;
                    }
                    Op::Remove(i) => {
                        let present = store.contains_vertex(i);
                        prop_assert_eq!(store.remove_vertex(i).is_ok(), present);
                    }
                    Op::Connect(a, b, w) => {
                        let valid = store.contains_vertex(a) && store.contains_vertex(b);
                        prop_assert_eq!(store.connect(a, b, w).is_ok(), valid);
                    }
                    Op::Disconnect(a, b) => {
                        let _ = store.disconnect(a, b);
                    }
                }

                let live = store.vertex_indices().collect::<HashSet<_>>();
                let vacant = (0..store.slot_count())
                    .filter(|i| !live.contains(i))
                    .collect::<Vec<_>>();
                prop_assert_eq!(store.free_indices(), vacant);
                prop_assert_eq!(live.len(), store.num_vertices());
                prop_assert_eq!(store.all_connections().count(), store.num_connections());
                for (from, connection) in store.all_connections() {
                    prop_assert!(live.contains(&from));
                    prop_assert!(live.contains(&connection.to));
                }
                for &index in &live {
                    let label = *store.vertex_data(index).unwrap();
                    prop_assert_eq!(store.try_get_index(&label), Some(index));
                }
            }
        }
    }
}
