//! Vertex entity and its neighbor index.
//!
//! Each vertex owns a hash map from the handle of an adjacent vertex to the
//! handle of the connecting edge. Keys hash by slot index (identity), so two
//! vertices with equal payloads are still distinct neighbors.

use super::handle::{EdgeHandle, VertexHandle};
use core::ops::{Deref, DerefMut};
use rustc_hash::FxBuildHasher;

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

/// Read-only view of a vertex's adjacency: neighbor handle to connecting edge.
///
/// Iteration order is unspecified.
#[derive(Clone, Default)]
pub struct NeighborMap<'brand> {
    entries: HashMap<VertexHandle<'brand>, EdgeHandle<'brand>>,
}

impl<'brand> NeighborMap<'brand> {
    /// Returns the edge connecting to `neighbor`, if any.
    #[inline]
    pub fn get(&self, neighbor: VertexHandle<'brand>) -> Option<EdgeHandle<'brand>> {
        self.entries.get(&neighbor).copied()
    }

    /// Returns `true` if an edge connects to `neighbor`.
    #[inline]
    pub fn contains(&self, neighbor: VertexHandle<'brand>) -> bool {
        self.entries.contains_key(&neighbor)
    }

    /// Number of distinct neighbors (a self-loop counts once).
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the vertex is isolated.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(neighbor, edge)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (VertexHandle<'brand>, EdgeHandle<'brand>)> + '_ {
        self.entries.iter().map(|(&v, &e)| (v, e))
    }

    /// Iterates neighbor handles.
    pub fn keys(&self) -> impl Iterator<Item = VertexHandle<'brand>> + '_ {
        self.entries.keys().copied()
    }

    /// Iterates incident edge handles.
    pub fn edges(&self) -> impl Iterator<Item = EdgeHandle<'brand>> + '_ {
        self.entries.values().copied()
    }

    fn insert(&mut self, neighbor: VertexHandle<'brand>, edge: EdgeHandle<'brand>) -> Option<EdgeHandle<'brand>> {
        self.entries.insert(neighbor, edge)
    }
}

impl<'a, 'brand> IntoIterator for &'a NeighborMap<'brand> {
    type Item = (&'a VertexHandle<'brand>, &'a EdgeHandle<'brand>);
    type IntoIter = hashbrown::hash_map::Iter<'a, VertexHandle<'brand>, EdgeHandle<'brand>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<'brand> core::fmt::Debug for NeighborMap<'brand> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}

/// A vertex: a user payload plus its neighbor index.
///
/// Dereferences to the payload.
#[derive(Debug)]
pub struct Vertex<'brand, V> {
    value: V,
    neighbors: NeighborMap<'brand>,
}

impl<'brand, V> Vertex<'brand, V> {
    pub(crate) fn new(value: V) -> Self {
        Self {
            value,
            neighbors: NeighborMap::default(),
        }
    }

    /// Returns the payload.
    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Returns the payload mutably.
    #[inline]
    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    /// Returns the adjacency index.
    #[inline]
    pub fn neighbors(&self) -> &NeighborMap<'brand> {
        &self.neighbors
    }

    /// Number of distinct neighbors.
    #[inline]
    pub fn degree(&self) -> usize {
        self.neighbors.len()
    }

    /// Returns the edge connecting this vertex to `neighbor`.
    #[inline]
    pub fn edge_to(&self, neighbor: VertexHandle<'brand>) -> Option<EdgeHandle<'brand>> {
        self.neighbors.get(neighbor)
    }

    /// Returns `true` if this vertex is adjacent to `neighbor`.
    #[inline]
    pub fn is_adjacent(&self, neighbor: VertexHandle<'brand>) -> bool {
        self.neighbors.contains(neighbor)
    }

    /// Records `edge` as the connection to `neighbor`.
    ///
    /// Only the graph calls this, after checking that the pair is not already
    /// connected, so an existing entry is never overwritten.
    pub(crate) fn register_edge(&mut self, neighbor: VertexHandle<'brand>, edge: EdgeHandle<'brand>) {
        let previous = self.neighbors.insert(neighbor, edge);
        debug_assert!(previous.is_none(), "neighbor {neighbor:?} registered twice");
    }
}

impl<'brand, V> Deref for Vertex<'brand, V> {
    type Target = V;

    #[inline]
    fn deref(&self) -> &V {
        &self.value
    }
}

impl<'brand, V> DerefMut for Vertex<'brand, V> {
    #[inline]
    fn deref_mut(&mut self) -> &mut V {
        &mut self.value
    }
}
