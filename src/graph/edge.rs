//! Edge entity: two fixed endpoints and a mutable weight.

use super::handle::VertexHandle;

/// An undirected edge between two vertices of the same graph.
///
/// Endpoints are fixed at construction; only the weight can change. For an
/// unweighted graph `W` is `()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge<'brand, W = ()> {
    endpoint1: VertexHandle<'brand>,
    endpoint2: VertexHandle<'brand>,
    weight: W,
}

impl<'brand, W> Edge<'brand, W> {
    pub(crate) fn new(endpoint1: VertexHandle<'brand>, endpoint2: VertexHandle<'brand>, weight: W) -> Self {
        Self {
            endpoint1,
            endpoint2,
            weight,
        }
    }

    /// First endpoint, as passed to `add_edge`.
    #[inline]
    pub fn endpoint1(&self) -> VertexHandle<'brand> {
        self.endpoint1
    }

    /// Second endpoint, as passed to `add_edge`.
    #[inline]
    pub fn endpoint2(&self) -> VertexHandle<'brand> {
        self.endpoint2
    }

    /// Both endpoints in insertion order.
    #[inline]
    pub fn endpoints(&self) -> (VertexHandle<'brand>, VertexHandle<'brand>) {
        (self.endpoint1, self.endpoint2)
    }

    /// Returns `true` if both endpoints are the same vertex.
    #[inline]
    pub fn is_self_loop(&self) -> bool {
        self.endpoint1 == self.endpoint2
    }

    /// Returns `true` if this edge joins `a` and `b`, in either order.
    #[inline]
    pub fn connects(&self, a: VertexHandle<'brand>, b: VertexHandle<'brand>) -> bool {
        (self.endpoint1 == a && self.endpoint2 == b) || (self.endpoint1 == b && self.endpoint2 == a)
    }

    /// Returns the endpoint across from `v`, or `None` if `v` is not an endpoint.
    ///
    /// For a self-loop the opposite of its vertex is the vertex itself.
    #[inline]
    pub fn opposite(&self, v: VertexHandle<'brand>) -> Option<VertexHandle<'brand>> {
        if v == self.endpoint1 {
            Some(self.endpoint2)
        } else if v == self.endpoint2 {
            Some(self.endpoint1)
        } else {
            None
        }
    }

    /// Returns the weight.
    #[inline]
    pub fn weight(&self) -> &W {
        &self.weight
    }

    /// Returns the weight mutably.
    #[inline]
    pub fn weight_mut(&mut self) -> &mut W {
        &mut self.weight
    }

    /// Replaces the weight, returning the old one.
    #[inline]
    pub fn set_weight(&mut self, weight: W) -> W {
        core::mem::replace(&mut self.weight, weight)
    }
}
