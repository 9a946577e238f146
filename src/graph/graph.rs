//! `Graph` - a simple undirected graph whose vertices and edges live in arenas.
//!
//! Vertices and edges are allocated in two address-stable [`Arena`]s and refer to
//! each other through branded slot handles instead of pointers, so there are no
//! ownership cycles to break. Each vertex indexes its incident edges by neighbor
//! handle for O(1) adjacency lookup.
//!
//! # Invariants
//! - A handle returned by `add_vertex`/`add_edge` stays valid, and keeps
//!   dereferencing to the same entity, for the life of the graph.
//! - `v.neighbors()` contains `u -> e` iff edge `e` joins `v` and `u`; for a
//!   self-loop the key is the vertex itself.
//! - At most one edge joins any unordered pair of vertices.
//! - A failed insertion leaves the graph unchanged.
//!
//! # Performance
//! - `add_vertex`: O(1)
//! - `add_edge`: O(1) amortized (two hash insertions)
//! - `find_edge`, `contains_edge`, `degree`: O(1)
//! - `vertex_list`, `edge_list`: O(n) in insertion order

use super::config::GraphConfig;
use super::edge::Edge;
use super::handle::{EdgeHandle, VertexHandle};
use super::vertex::Vertex;
use crate::alloc::arena::{self, Arena, ArenaStats};
use crate::error::{ArenaError, GraphError, Result};
use crate::token::{GraphToken, InvariantLifetime};
use core::alloc::Layout;
use core::fmt;
use core::ops::{Index, IndexMut};
use serde::Serialize;

const VERTEX_CHUNK: usize = 64;
const EDGE_CHUNK: usize = 128;

/// Insertion-ordered iterator over the vertices of a graph.
pub type VertexList<'a, 'brand, V> = arena::Iter<'a, Vertex<'brand, V>, VERTEX_CHUNK>;

/// Insertion-ordered iterator over the edges of a graph.
pub type EdgeList<'a, 'brand, W> = arena::Iter<'a, Edge<'brand, W>, EDGE_CHUNK>;

/// Occupancy of both arenas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    /// Vertex arena snapshot.
    pub vertices: ArenaStats,
    /// Edge arena snapshot.
    pub edges: ArenaStats,
}

/// A finite, simple, undirected graph with vertex payloads `V` and edge weights `W`.
///
/// `W` defaults to `()`, the unit weight of an unweighted graph.
///
/// # Example
///
/// ```rust
/// use tether::{Graph, GraphToken};
///
/// GraphToken::new(|token| {
///     let mut graph = Graph::new(token);
///     let a = graph.add_vertex("a");
///     let b = graph.add_vertex("b");
///     let ab = graph.add_edge(a, b, 5);
///
///     assert_eq!(graph[a].neighbors().get(b), Some(ab));
///     assert_eq!(graph[b].neighbors().get(a), Some(ab));
///     assert_eq!(*graph[ab].weight(), 5);
/// });
/// ```
pub struct Graph<'brand, V, W = ()> {
    vertices: Arena<Vertex<'brand, V>, VERTEX_CHUNK>,
    edges: Arena<Edge<'brand, W>, EDGE_CHUNK>,
    config: GraphConfig,
    _brand: InvariantLifetime<'brand>,
}

impl<'brand, V, W> Graph<'brand, V, W> {
    /// Creates an empty, unbounded graph, consuming the brand token.
    pub fn new(token: GraphToken<'brand>) -> Self {
        Self::with_config(token, GraphConfig::default())
    }

    /// Creates an empty graph with room for `vertices` and `edges` without regrowing.
    pub fn with_capacity(token: GraphToken<'brand>, vertices: usize, edges: usize) -> Self {
        let config = GraphConfig::default()
            .with_vertex_capacity(vertices)
            .with_edge_capacity(edges);
        Self::with_config(token, config)
    }

    /// Creates an empty graph from `config`, validating it first.
    ///
    /// Besides [`GraphConfig::validate`], rejects capacity hints whose slot storage
    /// would not fit in `isize::MAX` bytes. Prefer this over
    /// [`with_config`](Self::with_config) for configurations read from outside.
    ///
    /// ```rust
    /// use tether::{Graph, GraphConfig, GraphError, GraphToken};
    ///
    /// GraphToken::new(|token| {
    ///     let config = GraphConfig::default().with_vertex_capacity(usize::MAX / 2);
    ///     let result: Result<Graph<'_, u64>, _> = Graph::try_with_config(token, config);
    ///     assert!(matches!(result, Err(GraphError::Config(_))));
    /// });
    /// ```
    pub fn try_with_config(token: GraphToken<'brand>, config: GraphConfig) -> Result<Self> {
        config.validate()?;
        check_slot_storage::<Vertex<'brand, V>>("vertex_capacity", config.vertex_capacity)?;
        check_slot_storage::<Edge<'brand, W>>("edge_capacity", config.edge_capacity)?;
        Ok(Self::with_config(token, config))
    }

    /// Creates an empty graph from `config`.
    ///
    /// Capacity hints larger than their limit are clamped to the limit. No other
    /// check is made: a hint too large to reserve aborts on allocation failure.
    /// Use [`try_with_config`](Self::try_with_config) for untrusted configurations.
    pub fn with_config(token: GraphToken<'brand>, config: GraphConfig) -> Self {
        Self {
            vertices: Arena::with_capacity_and_limit(config.vertex_capacity, config.max_vertices),
            edges: Arena::with_capacity_and_limit(config.edge_capacity, config.max_edges),
            config,
            _brand: token.brand(),
        }
    }

    /// Returns the configuration the graph was built with.
    #[inline]
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Adds a vertex holding `value` and returns its handle.
    ///
    /// # Panics
    /// Panics if the vertex limit has been reached.
    pub fn add_vertex(&mut self, value: V) -> VertexHandle<'brand> {
        match self.try_add_vertex(value) {
            Ok(handle) => handle,
            Err(err) => panic!("{err}"),
        }
    }

    /// Adds a vertex holding `value`, failing if the vertex limit has been reached.
    pub fn try_add_vertex(&mut self, value: V) -> Result<VertexHandle<'brand>> {
        let idx = self
            .vertices
            .try_alloc(Vertex::new(value))
            .map_err(|err| match err.error() {
                ArenaError::Exhausted { limit } => GraphError::VertexCapacityExhausted { limit },
            })?;
        trace_event!(trace, vertex = idx, "vertex added");
        Ok(VertexHandle::new(idx))
    }

    /// Adds one vertex per value, returning the handles in order.
    ///
    /// # Panics
    /// Panics if the vertex limit is reached part-way; vertices added before
    /// that point remain in the graph.
    pub fn add_vertices<I>(&mut self, values: I) -> Vec<VertexHandle<'brand>>
    where
        I: IntoIterator<Item = V>,
    {
        let values = values.into_iter();
        self.vertices.reserve(values.size_hint().0);
        values.map(|value| self.add_vertex(value)).collect()
    }

    /// Connects `v1` and `v2` with an edge of the given weight.
    ///
    /// If the pair (in either order) is already connected, nothing changes and the
    /// existing edge is returned; `weight` is dropped. A self-loop (`v1 == v2`) is
    /// registered once in the vertex's own neighbor map.
    ///
    /// # Panics
    /// Panics if the edge limit has been reached.
    pub fn add_edge(&mut self, v1: VertexHandle<'brand>, v2: VertexHandle<'brand>, weight: W) -> EdgeHandle<'brand> {
        if let Some(existing) = self.existing_edge(v1, v2) {
            trace_event!(debug, %v1, %v2, %existing, "edge already present");
            return existing;
        }
        match self.link(v1, v2, weight) {
            Ok(handle) => handle,
            Err(err) => panic!("{err}"),
        }
    }

    /// Connects `v1` and `v2` with the default weight (`()` for unweighted graphs).
    ///
    /// Follows the same duplicate policy as [`add_edge`](Self::add_edge).
    pub fn add_edge_default(&mut self, v1: VertexHandle<'brand>, v2: VertexHandle<'brand>) -> EdgeHandle<'brand>
    where
        W: Default,
    {
        self.add_edge(v1, v2, W::default())
    }

    /// Connects `v1` and `v2`, reporting duplicates and exhaustion as errors.
    ///
    /// Returns [`GraphError::DuplicateEdge`] if the pair is already connected and
    /// [`GraphError::EdgeCapacityExhausted`] if the edge limit has been reached.
    /// On error the graph is unchanged.
    pub fn try_add_edge(&mut self, v1: VertexHandle<'brand>, v2: VertexHandle<'brand>, weight: W) -> Result<EdgeHandle<'brand>> {
        if let Some(existing) = self.existing_edge(v1, v2) {
            trace_event!(debug, %v1, %v2, %existing, "duplicate edge rejected");
            return Err(GraphError::DuplicateEdge {
                existing: existing.index(),
            });
        }
        self.link(v1, v2, weight)
    }

    /// Validates both handles and returns the edge already joining them, if any.
    fn existing_edge(&self, v1: VertexHandle<'brand>, v2: VertexHandle<'brand>) -> Option<EdgeHandle<'brand>> {
        self.expect_vertex(v2);
        self.expect_vertex(v1).edge_to(v2)
    }

    fn link(&mut self, v1: VertexHandle<'brand>, v2: VertexHandle<'brand>, weight: W) -> Result<EdgeHandle<'brand>> {
        // Allocate before touching either neighbor map so exhaustion leaves no trace.
        let idx = self
            .edges
            .try_alloc(Edge::new(v1, v2, weight))
            .map_err(|err| match err.error() {
                ArenaError::Exhausted { limit } => GraphError::EdgeCapacityExhausted { limit },
            })?;
        let edge = EdgeHandle::new(idx);

        self[v1].register_edge(v2, edge);
        if v1 != v2 {
            self[v2].register_edge(v1, edge);
        }
        trace_event!(trace, %v1, %v2, %edge, "edge added");
        Ok(edge)
    }

    /// Returns the vertex behind `handle`.
    #[inline]
    pub fn vertex(&self, handle: VertexHandle<'brand>) -> Option<&Vertex<'brand, V>> {
        self.vertices.get(handle.index())
    }

    /// Returns the vertex behind `handle` mutably.
    #[inline]
    pub fn vertex_mut(&mut self, handle: VertexHandle<'brand>) -> Option<&mut Vertex<'brand, V>> {
        self.vertices.get_mut(handle.index())
    }

    /// Returns the edge behind `handle`.
    #[inline]
    pub fn edge(&self, handle: EdgeHandle<'brand>) -> Option<&Edge<'brand, W>> {
        self.edges.get(handle.index())
    }

    /// Returns the edge behind `handle` mutably.
    #[inline]
    pub fn edge_mut(&mut self, handle: EdgeHandle<'brand>) -> Option<&mut Edge<'brand, W>> {
        self.edges.get_mut(handle.index())
    }

    /// Returns the edge joining `a` and `b` (in either order), if any.
    #[inline]
    pub fn find_edge(&self, a: VertexHandle<'brand>, b: VertexHandle<'brand>) -> Option<EdgeHandle<'brand>> {
        self.vertex(a)?.edge_to(b)
    }

    /// Returns `true` if `a` and `b` are adjacent.
    #[inline]
    pub fn contains_edge(&self, a: VertexHandle<'brand>, b: VertexHandle<'brand>) -> bool {
        self.find_edge(a, b).is_some()
    }

    /// Iterates `(neighbor, edge)` pairs of `v` in unspecified order.
    pub fn neighbors(
        &self,
        v: VertexHandle<'brand>,
    ) -> impl Iterator<Item = (VertexHandle<'brand>, EdgeHandle<'brand>)> + '_ {
        self.expect_vertex(v).neighbors().iter()
    }

    /// Number of distinct neighbors of `v` (a self-loop counts once).
    #[inline]
    pub fn degree(&self, v: VertexHandle<'brand>) -> usize {
        self.expect_vertex(v).degree()
    }

    /// Number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` if the graph has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Iterates all vertices in insertion order.
    #[inline]
    pub fn vertex_list(&self) -> VertexList<'_, 'brand, V> {
        self.vertices.iter()
    }

    /// Iterates all edges in insertion order.
    #[inline]
    pub fn edge_list(&self) -> EdgeList<'_, 'brand, W> {
        self.edges.iter()
    }

    /// Iterates `(handle, vertex)` pairs in insertion order.
    pub fn vertices(&self) -> impl ExactSizeIterator<Item = (VertexHandle<'brand>, &Vertex<'brand, V>)> + '_ {
        self.vertices
            .iter()
            .enumerate()
            .map(|(idx, vertex)| (VertexHandle::new(idx), vertex))
    }

    /// Iterates `(handle, edge)` pairs in insertion order.
    pub fn edges(&self) -> impl ExactSizeIterator<Item = (EdgeHandle<'brand>, &Edge<'brand, W>)> + '_ {
        self.edges
            .iter()
            .enumerate()
            .map(|(idx, edge)| (EdgeHandle::new(idx), edge))
    }

    /// Iterates vertex handles in insertion order.
    pub fn vertex_handles(&self) -> impl ExactSizeIterator<Item = VertexHandle<'brand>> {
        (0..self.vertices.len()).map(VertexHandle::new)
    }

    /// Iterates edge handles in insertion order.
    pub fn edge_handles(&self) -> impl ExactSizeIterator<Item = EdgeHandle<'brand>> {
        (0..self.edges.len()).map(EdgeHandle::new)
    }

    /// Reserves room for `additional` vertices (clamped to the vertex limit).
    pub fn reserve_vertices(&mut self, additional: usize) {
        self.vertices.reserve(additional);
    }

    /// Reserves room for `additional` edges (clamped to the edge limit).
    pub fn reserve_edges(&mut self, additional: usize) {
        self.edges.reserve(additional);
    }

    /// Returns an occupancy snapshot of both arenas.
    pub fn stats(&self) -> GraphStats {
        GraphStats {
            vertices: self.vertices.stats(),
            edges: self.edges.stats(),
        }
    }

    #[inline]
    #[track_caller]
    fn expect_vertex(&self, handle: VertexHandle<'brand>) -> &Vertex<'brand, V> {
        match self.vertices.get(handle.index()) {
            Some(vertex) => vertex,
            None => invalid_handle(handle),
        }
    }
}

fn check_slot_storage<T>(field: &str, capacity: usize) -> Result<()> {
    match Layout::array::<T>(capacity) {
        Ok(_) => Ok(()),
        Err(_) => Err(GraphError::Config(format!(
            "{field} {capacity} exceeds the addressable size for {} byte slots",
            core::mem::size_of::<T>()
        ))),
    }
}

#[cold]
#[inline(never)]
#[track_caller]
fn invalid_handle(handle: impl fmt::Debug) -> ! {
    panic!("{handle:?} does not belong to this graph")
}

impl<'brand, V, W> Index<VertexHandle<'brand>> for Graph<'brand, V, W> {
    type Output = Vertex<'brand, V>;

    #[track_caller]
    fn index(&self, handle: VertexHandle<'brand>) -> &Self::Output {
        self.expect_vertex(handle)
    }
}

impl<'brand, V, W> IndexMut<VertexHandle<'brand>> for Graph<'brand, V, W> {
    #[track_caller]
    fn index_mut(&mut self, handle: VertexHandle<'brand>) -> &mut Self::Output {
        match self.vertices.get_mut(handle.index()) {
            Some(vertex) => vertex,
            None => invalid_handle(handle),
        }
    }
}

impl<'brand, V, W> Index<EdgeHandle<'brand>> for Graph<'brand, V, W> {
    type Output = Edge<'brand, W>;

    #[track_caller]
    fn index(&self, handle: EdgeHandle<'brand>) -> &Self::Output {
        match self.edges.get(handle.index()) {
            Some(edge) => edge,
            None => invalid_handle(handle),
        }
    }
}

impl<'brand, V, W> IndexMut<EdgeHandle<'brand>> for Graph<'brand, V, W> {
    #[track_caller]
    fn index_mut(&mut self, handle: EdgeHandle<'brand>) -> &mut Self::Output {
        match self.edges.get_mut(handle.index()) {
            Some(edge) => edge,
            None => invalid_handle(handle),
        }
    }
}

impl<'brand, V, W> fmt::Debug for Graph<'brand, V, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("vertices", &self.vertex_count())
            .field("edges", &self.edge_count())
            .field("max_vertices", &self.config.max_vertices)
            .field("max_edges", &self.config.max_edges)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GraphToken;

    #[test]
    fn add_vertex_returns_dense_handles() {
        GraphToken::new(|token| {
            let mut graph: Graph<'_, &str> = Graph::new(token);
            let a = graph.add_vertex("a");
            let b = graph.add_vertex("b");
            assert_eq!(a.index(), 0);
            assert_eq!(b.index(), 1);
            assert_eq!(*graph[a], "a");
            assert_eq!(graph.vertex_count(), 2);
            assert_eq!(graph.edge_count(), 0);
            assert!(!graph.is_empty());
        });
    }

    #[test]
    fn add_edge_registers_both_endpoints() {
        GraphToken::new(|token| {
            let mut graph = Graph::new(token);
            let a = graph.add_vertex(1);
            let b = graph.add_vertex(2);
            let e = graph.add_edge(a, b, 0.25f32);

            assert_eq!(graph[a].edge_to(b), Some(e));
            assert_eq!(graph[b].edge_to(a), Some(e));
            assert_eq!(graph[e].endpoints(), (a, b));
            assert_eq!(graph.find_edge(b, a), Some(e));
            assert_eq!(graph.degree(a), 1);
        });
    }

    #[test]
    fn duplicate_pair_is_a_noop() {
        GraphToken::new(|token| {
            let mut graph = Graph::new(token);
            let a = graph.add_vertex('a');
            let b = graph.add_vertex('b');
            let first = graph.add_edge(a, b, 1);
            let again = graph.add_edge(b, a, 99);

            assert_eq!(first, again);
            assert_eq!(graph.edge_count(), 1);
            assert_eq!(*graph[first].weight(), 1);
            assert_eq!(
                graph.try_add_edge(a, b, 7),
                Err(GraphError::DuplicateEdge { existing: first.index() })
            );
        });
    }

    #[test]
    fn self_loop_counts_once() {
        GraphToken::new(|token| {
            let mut graph: Graph<'_, u8> = Graph::new(token);
            let a = graph.add_vertex(0);
            let e = graph.add_edge_default(a, a);
            assert_eq!(graph[a].edge_to(a), Some(e));
            assert_eq!(graph.degree(a), 1);
            assert!(graph[e].is_self_loop());
            assert_eq!(graph.add_edge_default(a, a), e);
            assert_eq!(graph.edge_count(), 1);
        });
    }

    #[test]
    fn edge_exhaustion_leaves_graph_unchanged() {
        let config = GraphConfig::default().with_max_edges(1);
        GraphToken::new(|token| {
            let mut graph: Graph<'_, u8> = Graph::with_config(token, config);
            let a = graph.add_vertex(0);
            let b = graph.add_vertex(1);
            let c = graph.add_vertex(2);
            graph.add_edge_default(a, b);

            assert_eq!(
                graph.try_add_edge(b, c, ()),
                Err(GraphError::EdgeCapacityExhausted { limit: 1 })
            );
            assert_eq!(graph.edge_count(), 1);
            assert!(!graph[b].is_adjacent(c));
            assert!(graph[c].neighbors().is_empty());
        });
    }

    #[test]
    fn vertex_exhaustion_is_reported() {
        let config = GraphConfig::default().with_max_vertices(1);
        GraphToken::new(|token| {
            let mut graph: Graph<'_, u8> = Graph::with_config(token, config);
            graph.add_vertex(0);
            assert_eq!(
                graph.try_add_vertex(1),
                Err(GraphError::VertexCapacityExhausted { limit: 1 })
            );
            assert_eq!(graph.vertex_count(), 1);
        });
    }

    #[test]
    #[should_panic(expected = "edge capacity exhausted")]
    fn add_edge_panics_when_exhausted() {
        let config = GraphConfig::default().with_max_edges(0);
        GraphToken::new(|token| {
            let mut graph: Graph<'_, u8> = Graph::with_config(token, config);
            let a = graph.add_vertex(0);
            graph.add_edge(a, a, ());
        });
    }

    #[test]
    fn payload_and_weight_mutation_through_handles() {
        GraphToken::new(|token| {
            let mut graph = Graph::new(token);
            let a = graph.add_vertex(String::from("a"));
            let b = graph.add_vertex(String::from("b"));
            let e = graph.add_edge(a, b, 3u32);

            graph[a].push('!');
            *graph[e].weight_mut() += 1;
            assert_eq!(graph.edge_mut(e).map(|edge| edge.set_weight(10)), Some(4));

            assert_eq!(graph[a].value(), "a!");
            assert_eq!(*graph[e].weight(), 10);
            assert_eq!(graph.vertex_mut(b).map(|v| v.len()), Some(1));
        });
    }

    #[test]
    fn iteration_is_insertion_ordered() {
        GraphToken::new(|token| {
            let mut graph = Graph::with_capacity(token, 4, 4);
            let handles = graph.add_vertices(["x", "y", "z"]);
            graph.add_edge(handles[2], handles[0], 'p');
            graph.add_edge(handles[0], handles[1], 'q');

            let values: Vec<_> = graph.vertex_list().map(|v| *v.value()).collect();
            assert_eq!(values, ["x", "y", "z"]);
            let weights: Vec<_> = graph.edge_list().map(|e| *e.weight()).collect();
            assert_eq!(weights, ['p', 'q']);
            assert_eq!(graph.vertex_handles().collect::<Vec<_>>(), handles);
            assert_eq!(graph.edges().len(), 2);
            assert_eq!(graph.edge_handles().map(EdgeHandle::index).collect::<Vec<_>>(), [0, 1]);
            assert!(graph.vertices().all(|(h, v)| graph[h].value() == v.value()));
        });
    }

    #[test]
    fn try_with_config_rejects_unreservable_capacity() {
        let config = GraphConfig::from_json(&format!(r#"{{ "vertex_capacity": {} }}"#, usize::MAX / 2)).unwrap();
        GraphToken::new(|token| {
            let result: Result<Graph<'_, u64>> = Graph::try_with_config(token, config);
            match result {
                Err(GraphError::Config(msg)) => assert!(msg.contains("vertex_capacity")),
                other => panic!("expected config error, got {other:?}"),
            }
        });

        let config = GraphConfig::default().with_edge_capacity(usize::MAX);
        GraphToken::new(|token| {
            let result: Result<Graph<'_, u8>> = Graph::try_with_config(token, config);
            assert!(matches!(result, Err(GraphError::Config(msg)) if msg.contains("edge_capacity")));
        });
    }

    #[test]
    fn try_with_config_validates_limits_and_accepts_sane_hints() {
        let bad = GraphConfig::default().with_vertex_capacity(10).with_max_vertices(2);
        GraphToken::new(|token| {
            let result: Result<Graph<'_, u8>> = Graph::try_with_config(token, bad);
            assert!(matches!(result, Err(GraphError::Config(_))));
        });

        let good = GraphConfig::default().with_vertex_capacity(100).with_edge_capacity(200);
        GraphToken::new(|token| {
            let graph: Graph<'_, u8> = Graph::try_with_config(token, good).unwrap();
            assert!(graph.stats().vertices.capacity >= 100);
            assert!(graph.stats().edges.capacity >= 200);
            assert_eq!(graph.config(), &good);
        });
    }

    #[test]
    fn stats_track_both_arenas() {
        GraphToken::new(|token| {
            let mut graph: Graph<'_, u32> = Graph::new(token);
            for i in 0..65 {
                graph.add_vertex(i);
            }
            let stats = graph.stats();
            assert_eq!(stats.vertices.len, 65);
            assert_eq!(stats.vertices.chunks, 2);
            assert_eq!(stats.edges.len, 0);
            assert_eq!(stats.edges.chunks, 0);
        });
    }

    #[test]
    fn debug_reports_counts() {
        GraphToken::new(|token| {
            let mut graph: Graph<'_, u32> = Graph::new(token);
            graph.add_vertex(1);
            assert_eq!(
                format!("{graph:?}"),
                "Graph { vertices: 1, edges: 0, max_vertices: None, max_edges: None }"
            );
        });
    }
}
