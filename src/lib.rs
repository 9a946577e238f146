//! # `tether` - Arena-backed Simple Graphs with Branded Handles
//!
//! A finite, simple, undirected graph built for incremental construction and for
//! embedding inside larger graph algorithms. Vertices carry an arbitrary payload,
//! edges carry a weight (or `()` when unweighted), and every insertion returns a
//! lightweight handle that stays valid as the graph keeps growing.
//!
//! ## Guarantees
//!
//! ### Handle stability
//! - **No relocation**: vertices and edges are allocated in chunked arenas whose
//!   chunks are never reallocated, so entities keep their slot and their address.
//! - **No invalidation**: nothing is ever removed, so a handle obtained from an
//!   earlier insertion keeps dereferencing to the same entity.
//!
//! ### Provenance
//! - **Branded handles**: a graph consumes a `GraphToken<'brand>` and every handle it
//!   mints carries that `'brand`. Passing a handle to a different graph does not
//!   compile.
//!
//! ### Adjacency
//! - **O(1) neighbor lookup**: each vertex maps neighbor handle to edge handle in a
//!   hash map keyed by slot identity, never by payload equality.
//! - **Simple graph**: at most one edge per unordered pair; self-loops are allowed.
//!
//! ## Architecture
//!
//! 1. **Branding** (`GraphToken<'brand>`): a zero-sized, linear capability created
//!    with rank-2 polymorphism; one token builds exactly one graph.
//! 2. **Arena** (`Arena<T, CHUNK>`): address-stable pool with optional hard limits
//!    and bulk release on drop.
//! 3. **Entities** (`Vertex`, `Edge`): a vertex owns its payload and `NeighborMap`;
//!    an edge owns two fixed endpoint handles and its weight.
//! 4. **Graph** (`Graph<'brand, V, W>`): owns both arenas and keeps the neighbor maps
//!    of both endpoints in sync on every insertion.
//!
//! ## Example
//!
//! ```rust
//! use tether::{Graph, GraphToken};
//!
//! GraphToken::new(|token| {
//!     let mut graph: Graph<'_, &str> = Graph::new(token);
//!     let a = graph.add_vertex("a");
//!     let b = graph.add_vertex("b");
//!     let c = graph.add_vertex("c");
//!
//!     let ab = graph.add_edge_default(a, b);
//!     let bc = graph.add_edge_default(b, c);
//!
//!     assert_eq!(graph[b].neighbors().get(a), Some(ab));
//!     assert_eq!(graph[b].neighbors().get(c), Some(bc));
//!     assert_eq!(graph.edge_list().len(), 2);
//! });
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

#[macro_use]
mod macros;

pub mod alloc;
pub mod error;
pub mod graph;
pub mod token;

pub use alloc::{Arena, ArenaStats};
pub use error::{AllocError, ArenaError, GraphError, Result};
pub use graph::{Edge, EdgeHandle, Graph, GraphConfig, GraphStats, NeighborMap, Vertex, VertexHandle};
pub use token::GraphToken;

// Compile-time assertions for memory layout claims.
const _: () = {
    use core::mem;

    // Tokens and brands are ZSTs.
    assert!(mem::size_of::<GraphToken<'static>>() == 0);
    assert!(mem::size_of::<token::InvariantLifetime<'static>>() == 0);

    // Handles are exactly one slot index wide.
    assert!(mem::size_of::<VertexHandle<'static>>() == mem::size_of::<usize>());
    assert!(mem::size_of::<EdgeHandle<'static>>() == mem::size_of::<usize>());
};
