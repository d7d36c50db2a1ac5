//! Module of shortest path algorithms.
use super::Weight;
use crate::errors::Result;
use crate::{Graph, VertexId};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

/// Cost and predecessor tables produced by [`dijkstra`].
///
/// Only reachable vertices appear in the tables; an absent vertex has no path from the source.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPaths<W> {
    source: VertexId,
    costs: HashMap<VertexId, W>,
    predecessors: HashMap<VertexId, VertexId>,
}

impl<W: Copy> ShortestPaths<W> {
    /// Vertex the paths start from.
    pub fn source(&self) -> VertexId {
        self.source
    }

    /// Minimum total weight from the source to this vertex.
    pub fn cost(&self, vertex: VertexId) -> Option<W> {
        self.costs.get(&vertex).copied()
    }

    /// Vertex preceding this one on a shortest path. The source has none.
    pub fn predecessor(&self, vertex: VertexId) -> Option<VertexId> {
        self.predecessors.get(&vertex).copied()
    }

    /// Returns true if a shortest path to this vertex was found.
    pub fn is_reached(&self, vertex: VertexId) -> bool {
        self.costs.contains_key(&vertex)
    }

    /// Cost table.
    pub fn costs(&self) -> &HashMap<VertexId, W> {
        &self.costs
    }

    /// Predecessor table.
    pub fn predecessors(&self) -> &HashMap<VertexId, VertexId> {
        &self.predecessors
    }

    /// Vertices of a shortest path from the source to `target`, both included. Returns [`None`]
    /// if `target` was not reached.
    pub fn path_to(&self, target: VertexId) -> Option<Vec<VertexId>> {
        if !self.is_reached(target) {
            return None;
        }
        let mut path = vec![target];
        let mut current = target;
        while let Some(&previous) = self.predecessors.get(&current) {
            path.push(previous);
            current = previous;
        }
        path.reverse();
        Some(path)
    }

    /// Split into the cost table and the predecessor table.
    pub fn into_tables(self) -> (HashMap<VertexId, W>, HashMap<VertexId, VertexId>) {
        (self.costs, self.predecessors)
    }
}

/// Frontier entry. Ordered so that [`BinaryHeap`] pops the cheapest, lowest-index vertex first.
struct Candidate<W> {
    cost: W,
    vertex: VertexId,
}

impl<W: PartialOrd> PartialEq for Candidate<W> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<W: PartialOrd> Eq for Candidate<W> {}

impl<W: PartialOrd> PartialOrd for Candidate<W> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<W: PartialOrd> Ord for Candidate<W> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .partial_cmp(&self.cost)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

/// Finds the cheapest paths from `source` using Dijkstra's algorithm, with the edge data as
/// weights.
///
/// See [`dijkstra_by`].
///
/// ```
/// use trellis_graph::{DirectedGraph, GraphMut};
/// use trellis_graph::algorithms::dijkstra;
///
/// let mut graph = DirectedGraph::<&str, u32>::new();
/// let ny = graph.add_vertex("New York").unwrap();
/// let chicago = graph.add_vertex("Chicago").unwrap();
/// let denver = graph.add_vertex("Denver").unwrap();
/// graph.add_edge(ny, chicago, 75).unwrap();
/// graph.add_edge(ny, denver, 100).unwrap();
/// graph.add_edge(chicago, denver, 20).unwrap();
///
/// let paths = dijkstra(&graph, ny, None).unwrap();
/// assert_eq!(paths.cost(denver), Some(95));
/// assert_eq!(paths.path_to(denver), Some(vec![ny, chicago, denver]));
/// ```
pub fn dijkstra<G>(
    graph: &G,
    source: VertexId,
    target: Option<VertexId>,
) -> Result<ShortestPaths<G::EdgeData>>
where
    G: Graph,
    G::EdgeData: Weight,
{
    dijkstra_by(graph, source, target, |weight| *weight)
}

/// Finds the cheapest paths from `source` using Dijkstra's algorithm.
///
/// ### Arguments
///
/// - `graph`: Graph to search. Edges are followed in their direction; undirected edges both ways.
/// - `source`: Vertex the paths start from.
/// - `target`: Vertex the caller is interested in. It must be in the graph, but does not change
///   the result: the tables are the same whether or not a target is given.
/// - `edge_weight`: Weight of an edge, computed from its data. Must not be negative.
///
/// ### Errors
///
/// Fails with [`GraphError::NoSuchVertex`](crate::errors::GraphError::NoSuchVertex) if `source`
/// or `target` is not in the graph.
///
/// ### Notes
///
/// Between vertices of equal cost, the one with the lowest index is settled first. The costs never
/// depend on this order; predecessors may when several shortest paths exist.
pub fn dijkstra_by<G: Graph, W: Weight>(
    graph: &G,
    source: VertexId,
    target: Option<VertexId>,
    edge_weight: impl Fn(&G::EdgeData) -> W,
) -> Result<ShortestPaths<W>> {
    graph.vertex_data(source)?;
    if let Some(target) = target {
        graph.vertex_data(target)?;
    }
    log::debug!("Shortest paths from {source} over {} vertices", graph.num_vertices());

    let mut tentative = HashMap::from([(source, (W::zero(), None))]);
    let mut costs = HashMap::new();
    let mut predecessors = HashMap::new();
    let mut frontier = BinaryHeap::from([Candidate {
        cost: W::zero(),
        vertex: source,
    }]);

    while let Some(Candidate { cost, vertex }) = frontier.pop() {
        if costs.contains_key(&vertex) {
            continue;
        }
        costs.insert(vertex, cost);
        if let Some(&(_, Some(previous))) = tentative.get(&vertex) {
            predecessors.insert(vertex, previous);
        }
        if target == Some(vertex) {
            log::debug!("Reached target {vertex} at position {}", costs.len());
        }

        for edge in graph.edges_from(vertex)? {
            if costs.contains_key(&edge.to) {
                continue;
            }
            let next = cost + edge_weight(edge.data);
            let improves = match tentative.get(&edge.to) {
                Some(&(known, _)) => next < known,
                None => true,
            };
            if improves {
                tentative.insert(edge.to, (next, Some(vertex)));
                frontier.push(Candidate {
                    cost: next,
                    vertex: edge.to,
                });
            }
        }
    }

    log::debug!("Settled {} vertices from {source}", costs.len());
    Ok(ShortestPaths {
        source,
        costs,
        predecessors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::GraphError;
    use crate::{
        DirectedGraph, GraphMut, LabeledDirectedGraph, LabeledUndirectedGraph, UndirectedGraph,
    };
    use approx::assert_relative_eq;
    use rstest::{fixture, rstest};
    use std::fmt::Write;

    type Canonical = LabeledUndirectedGraph<char, u32>;
    type Cities = LabeledDirectedGraph<&'static str, u32>;

    #[fixture]
    fn canonical() -> Canonical {
        let mut graph = Canonical::new();
        for label in 'a'..='i' {
            graph.add_vertex(label).unwrap();
        }
        for (from, to, weight) in [
            ('a', 'b', 4),
            ('a', 'h', 8),
            ('b', 'c', 8),
            ('b', 'h', 11),
            ('c', 'd', 7),
            ('c', 'f', 4),
            ('c', 'i', 2),
            ('d', 'e', 9),
            ('d', 'f', 14),
            ('e', 'f', 10),
            ('f', 'g', 2),
            ('g', 'h', 1),
            ('g', 'i', 6),
            ('h', 'i', 7),
        ] {
            graph.add_edge(&from, &to, weight).unwrap();
        }
        graph
    }

    #[fixture]
    fn cities() -> Cities {
        let mut graph = Cities::new();
        for (from, to, cost) in [
            ("New York", "Dallas", 125),
            ("New York", "Miami", 90),
            ("New York", "Denver", 100),
            ("New York", "Chicago", 75),
            ("Chicago", "San Francisco", 25),
            ("Chicago", "Denver", 20),
            ("Denver", "San Francisco", 75),
            ("Denver", "L.A.", 100),
            ("Dallas", "L.A.", 80),
            ("Dallas", "San Diego", 90),
            ("Miami", "Dallas", 50),
            ("San Diego", "L.A.", 45),
            ("San Francisco", "L.A.", 45),
        ] {
            for city in [from, to] {
                if !graph.contains_vertex(&city) {
                    graph.add_vertex(city).unwrap();
                }
            }
            graph.add_edge(&from, &to, cost).unwrap();
        }
        graph
    }

    fn labels<G: crate::labeled::Labeled>(
        graph: &crate::LabeledGraph<G>,
        path: Vec<VertexId>,
    ) -> Vec<G::VertexData>
    where
        G::VertexData: Clone,
    {
        path.into_iter()
            .map(|v| graph.label(v).unwrap().clone())
            .collect()
    }

    #[rstest]
    fn test_canonical_costs(canonical: Canonical) {
        let a = canonical.handle_of(&'a').unwrap();
        let paths = dijkstra(&canonical, a, None).unwrap();

        let mut table = String::new();
        for label in 'a'..='i' {
            let vertex = canonical.handle_of(&label).unwrap();
            let previous = paths
                .predecessor(vertex)
                .map(|p| *canonical.label(p).unwrap())
                .unwrap_or('-');
            writeln!(table, "{label}: {} via {previous}", paths.cost(vertex).unwrap()).unwrap();
        }
        insta::assert_snapshot!(table, @r"
        a: 0 via -
        b: 4 via a
        c: 12 via b
        d: 19 via c
        e: 21 via f
        f: 11 via g
        g: 9 via h
        h: 8 via a
        i: 14 via c
        ");
    }

    #[rstest]
    fn test_canonical_path(canonical: Canonical) {
        let a = canonical.handle_of(&'a').unwrap();
        let e = canonical.handle_of(&'e').unwrap();
        let paths = dijkstra(&canonical, a, None).unwrap();
        assert_eq!(paths.cost(e), Some(21));
        assert_eq!(
            labels(&canonical, paths.path_to(e).unwrap()),
            vec!['a', 'h', 'g', 'f', 'e']
        );
        assert_eq!(paths.path_to(a), Some(vec![a]));
        assert_eq!(paths.source(), a);
    }

    #[rstest]
    fn test_cities(cities: Cities) {
        let ny = cities.handle_of(&"New York").unwrap();
        let la = cities.handle_of(&"L.A.").unwrap();
        let paths = dijkstra(&cities, ny, Some(la)).unwrap();
        assert_eq!(paths.cost(la), Some(145));
        assert_eq!(
            labels(&cities, paths.path_to(la).unwrap()),
            vec!["New York", "Chicago", "San Francisco", "L.A."]
        );
    }

    #[rstest]
    fn test_directed_unreachable(cities: Cities) {
        let ny = cities.handle_of(&"New York").unwrap();
        let la = cities.handle_of(&"L.A.").unwrap();
        let paths = dijkstra(&cities, la, None).unwrap();
        assert_eq!(paths.costs().len(), 1);
        assert!(!paths.is_reached(ny));
        assert_eq!(paths.path_to(ny), None);
        assert!(paths.predecessors().is_empty());
    }

    #[rstest]
    fn test_idempotent(canonical: Canonical) {
        let c = canonical.handle_of(&'c').unwrap();
        assert_eq!(
            dijkstra(&canonical, c, None).unwrap(),
            dijkstra(&canonical, c, None).unwrap()
        );
    }

    #[rstest]
    #[case('a', 'h')]
    #[case('a', 'e')]
    #[case('e', 'a')]
    #[case('c', 'c')]
    fn test_target_keeps_full_tables(
        canonical: Canonical,
        #[case] source: char,
        #[case] target: char,
    ) {
        let source = canonical.handle_of(&source).unwrap();
        let target = canonical.handle_of(&target).unwrap();
        let full = dijkstra(&canonical, source, None).unwrap();
        let targeted = dijkstra(&canonical, source, Some(target)).unwrap();
        assert_eq!(targeted, full);
        assert_eq!(targeted.costs().len(), 9);
    }

    #[test]
    fn test_target_does_not_cut_other_branches() {
        let mut graph = DirectedGraph::<&str, u32>::new();
        let ny = graph.add_vertex("New York").unwrap();
        let chicago = graph.add_vertex("Chicago").unwrap();
        let la = graph.add_vertex("L.A.").unwrap();
        let miami = graph.add_vertex("Miami").unwrap();
        graph.add_edge(ny, chicago, 75).unwrap();
        graph.add_edge(chicago, la, 70).unwrap();
        graph.add_edge(ny, miami, 200).unwrap();

        let targeted = dijkstra(&graph, ny, Some(la)).unwrap();
        assert_eq!(targeted.cost(la), Some(145));
        assert_eq!(targeted.cost(miami), Some(200));
        assert_eq!(targeted.predecessor(miami), Some(ny));
        assert_eq!(targeted, dijkstra(&graph, ny, None).unwrap());
    }

    #[test]
    fn test_missing_source() {
        let mut graph = DirectedGraph::<(), u32>::new();
        let a = graph.add_vertex(()).unwrap();
        let b = graph.add_vertex(()).unwrap();
        graph.remove_vertex(b).unwrap();

        assert_eq!(
            dijkstra(&graph, b, None),
            Err(GraphError::NoSuchVertex(Some(b.index())))
        );
        assert_eq!(
            dijkstra(&graph, a, Some(b)),
            Err(GraphError::NoSuchVertex(Some(b.index())))
        );

        let other = DirectedGraph::<(), u32>::new();
        assert!(matches!(
            dijkstra(&other, a, None),
            Err(GraphError::InvalidOperation(_))
        ));
    }

    #[test]
    fn test_float_weights() {
        let mut graph = DirectedGraph::<(), f64>::new();
        let a = graph.add_vertex(()).unwrap();
        let b = graph.add_vertex(()).unwrap();
        let c = graph.add_vertex(()).unwrap();
        graph.add_edge(a, b, 0.1).unwrap();
        graph.add_edge(b, c, 0.2).unwrap();
        graph.add_edge(a, c, 0.5).unwrap();

        let paths = dijkstra(&graph, a, None).unwrap();
        assert_relative_eq!(paths.cost(c).unwrap(), 0.3, epsilon = 1e-12);
        assert_eq!(paths.predecessor(c), Some(b));
    }

    #[test]
    fn test_costs_up_to_weight_max() {
        let mut graph = UndirectedGraph::<(), u8>::new();
        let a = graph.add_vertex(()).unwrap();
        let b = graph.add_vertex(()).unwrap();
        let c = graph.add_vertex(()).unwrap();
        graph.add_edge(a, b, 200).unwrap();
        graph.add_edge(b, c, 55).unwrap();

        // Edges back into settled vertices are never summed.
        let paths = dijkstra(&graph, a, None).unwrap();
        assert_eq!(paths.cost(c), Some(u8::MAX));
        assert_eq!(paths.path_to(c), Some(vec![a, b, c]));
    }

    #[test]
    fn test_weight_function() {
        let mut graph = DirectedGraph::<(), &str>::new();
        let a = graph.add_vertex(()).unwrap();
        let b = graph.add_vertex(()).unwrap();
        let c = graph.add_vertex(()).unwrap();
        graph.add_edge(a, b, "long road").unwrap();
        graph.add_edge(b, c, "x").unwrap();
        graph.add_edge(a, c, "a very long road").unwrap();

        let paths = dijkstra_by(&graph, a, None, |name| name.len()).unwrap();
        assert_eq!(paths.cost(c), Some(10));
        let (costs, predecessors) = paths.into_tables();
        assert_eq!(costs.len(), 3);
        assert_eq!(predecessors.get(&c), Some(&b));
    }
}
