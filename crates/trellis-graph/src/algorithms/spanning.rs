//! Module of spanning tree algorithms.
use super::Weight;
use crate::errors::{GraphError, Result};
use crate::{Graph, GraphMut, VertexId};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

/// Edge leaving the tree, waiting in the frontier.
struct Crossing<W> {
    weight: W,
    seq: usize,
    from: VertexId,
    to: VertexId,
}

impl<W: PartialOrd> PartialEq for Crossing<W> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<W: PartialOrd> Eq for Crossing<W> {}

impl<W: PartialOrd> PartialOrd for Crossing<W> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<W: PartialOrd> Ord for Crossing<W> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .partial_cmp(&self.weight)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Minimum spanning tree of the component containing `start`, using Prim's algorithm with the edge
/// data as weights.
///
/// See [`prim_by`].
///
/// ```
/// use trellis_graph::{Graph, GraphMut, UndirectedGraph};
/// use trellis_graph::algorithms::prim;
///
/// let mut graph = UndirectedGraph::<(), u32>::new();
/// let a = graph.add_vertex(()).unwrap();
/// let b = graph.add_vertex(()).unwrap();
/// let c = graph.add_vertex(()).unwrap();
/// graph.add_edge(a, b, 1).unwrap();
/// graph.add_edge(b, c, 2).unwrap();
/// graph.add_edge(a, c, 3).unwrap();
///
/// let tree = prim(&graph, a).unwrap();
/// assert_eq!(tree.num_edges(), 2);
/// assert_eq!(tree.edges().map(|e| *e.data).sum::<u32>(), 3);
/// ```
pub fn prim<G>(graph: &G, start: VertexId) -> Result<G>
where
    G: GraphMut + Clone,
    G::EdgeData: Weight,
{
    prim_by(graph, start, |weight| *weight)
}

/// Minimum spanning tree of the component containing `start`, using Prim's algorithm.
///
/// The tree is returned as a copy of `graph` with the same vertices at the same indices, holding
/// only the tree edges. Being a new graph, it issues its own handles; pass the old handle's index
/// to [`Graph::handle`](crate::Graph::handle) to translate. Vertices not connected to `start` are
/// kept but stay isolated, so a disconnected graph yields a spanning tree of one component, not
/// an error.
///
/// Among edges of equal weight, the one discovered first is taken.
///
/// ### Errors
///
/// - [`GraphError::InvalidOperation`] if `graph` is directed.
/// - [`GraphError::NoSuchVertex`] if `start` is not in `graph`.
pub fn prim_by<G, W>(
    graph: &G,
    start: VertexId,
    edge_weight: impl Fn(&G::EdgeData) -> W,
) -> Result<G>
where
    G: GraphMut + Clone,
    G::EdgeData: Clone,
    W: Weight,
{
    if graph.is_directed() {
        return Err(GraphError::InvalidOperation(
            "spanning trees are only defined on undirected graphs",
        ));
    }
    graph.vertex_data(start)?;

    let mut tree = graph.clone();
    tree.clear_edges();
    let mut in_tree = HashSet::from([start]);
    let mut frontier = BinaryHeap::new();
    let mut seq = 0;
    let mut grow = |frontier: &mut BinaryHeap<Crossing<W>>,
                    from: VertexId,
                    in_tree: &HashSet<VertexId>|
     -> Result<()> {
        for edge in graph.edges_from(from)? {
            if !in_tree.contains(&edge.to) {
                frontier.push(Crossing {
                    weight: edge_weight(edge.data),
                    seq,
                    from,
                    to: edge.to,
                });
                seq += 1;
            }
        }
        Ok(())
    };

    grow(&mut frontier, start, &in_tree)?;
    while let Some(Crossing { from, to, .. }) = frontier.pop() {
        if !in_tree.insert(to) {
            continue;
        }
        let data = graph.edge_data(from, to)?.clone();
        let (tree_from, tree_to) = (translate(&tree, from)?, translate(&tree, to)?);
        tree.add_edge(tree_from, tree_to, data)?;
        grow(&mut frontier, to, &in_tree)?;
    }

    log::debug!(
        "Spanning tree from {start}: {} edges, {} vertices unreached",
        tree.num_edges(),
        graph.num_vertices() - in_tree.len()
    );
    Ok(tree)
}

fn translate<G: Graph>(tree: &G, vertex: VertexId) -> Result<VertexId> {
    tree.handle(vertex.index())
        .ok_or(GraphError::no_such_vertex(vertex.index()))
}
