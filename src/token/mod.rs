//! `GraphToken` - the brand that ties handles to exactly one graph.
//!
//! A token is a zero-sized capability created through rank-2 polymorphism:
//! every call to [`GraphToken::new`] introduces a fresh, invariant `'brand`
//! lifetime that cannot be named outside the closure.
//!
//! ## Core invariant (one graph per brand)
//!
//! `GraphToken<'brand>` is intentionally **not** `Copy`/`Clone`, and
//! [`Graph::new`](crate::Graph::new) consumes it. At most one graph can therefore
//! carry a given brand, and a `VertexHandle<'brand>` obtained from that graph
//! cannot be passed to any other graph: the mismatch is a type error.

/// Invariant lifetime definitions for branding.
pub mod invariant;

pub use invariant::InvariantLifetime;

/// A zero-sized token that brands a single graph and its handles.
///
/// Handles minted by one graph are rejected by every other graph:
///
/// ```compile_fail
/// use tether::{Graph, GraphToken};
///
/// GraphToken::new(|outer| {
///     GraphToken::new(move |inner| {
///         let mut g1: Graph<'_, u8> = Graph::new(outer);
///         let g2: Graph<'_, u8> = Graph::new(inner);
///         let a = g1.add_vertex(0);
///         let _ = g2.vertex(a);
///     });
/// });
/// ```
///
/// and a token cannot be duplicated to build a second graph with the same brand:
///
/// ```compile_fail
/// use tether::{Graph, GraphToken};
///
/// GraphToken::new(|token| {
///     let g1: Graph<'_, u8> = Graph::new(token);
///     let g2: Graph<'_, u8> = Graph::new(token);
/// });
/// ```
#[derive(Debug)]
pub struct GraphToken<'brand>(InvariantLifetime<'brand>);

impl<'brand> GraphToken<'brand> {
    /// Creates a new token and executes a closure with it.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tether::{Graph, GraphToken};
    ///
    /// let edges = GraphToken::new(|token| {
    ///     let mut graph: Graph<'_, &str> = Graph::new(token);
    ///     let a = graph.add_vertex("a");
    ///     let b = graph.add_vertex("b");
    ///     graph.add_edge(a, b, ());
    ///     graph.edge_count()
    /// });
    /// assert_eq!(edges, 1);
    /// ```
    pub fn new<F, R>(f: F) -> R
    where
        F: for<'new_brand> FnOnce(GraphToken<'new_brand>) -> R,
    {
        f(GraphToken(InvariantLifetime::new()))
    }

    /// Returns the brand marker carried by this token.
    #[inline(always)]
    pub(crate) const fn brand(&self) -> InvariantLifetime<'brand> {
        self.0
    }
}

// NOTE:
// `GraphToken` is intentionally NOT `Copy`/`Clone`. Duplicating it would allow two
// graphs with the same brand, and a handle minted by one could then index the other.
