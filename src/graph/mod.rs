//! The graph and its entities.
//!
//! - `handle`: branded `VertexHandle` / `EdgeHandle`
//! - `vertex`: `Vertex` payload holder and its `NeighborMap`
//! - `edge`: `Edge` endpoints and weight
//! - `config`: `GraphConfig` capacity hints and limits
//! - `graph`: `Graph`, which owns the arenas and links entities together

pub mod config;
pub mod edge;
#[allow(clippy::module_inception)]
pub mod graph;
pub mod handle;
pub mod vertex;

pub use config::GraphConfig;
pub use edge::Edge;
pub use graph::{EdgeList, Graph, GraphStats, VertexList};
pub use handle::{EdgeHandle, VertexHandle};
pub use vertex::{NeighborMap, Vertex};
