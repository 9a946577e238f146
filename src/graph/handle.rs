//! Branded handles to vertex and edge slots.
//!
//! A handle is a copyable slot index tagged with the graph's `'brand`. It carries
//! no ownership and stays valid for as long as the graph that minted it is alive,
//! since slots are never freed or reused.

use crate::token::InvariantLifetime;
use core::fmt;

macro_rules! define_handle {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[repr(transparent)]
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name<'brand> {
            index: usize,
            _brand: InvariantLifetime<'brand>,
        }

        impl<'brand> $name<'brand> {
            #[inline(always)]
            pub(crate) const fn new(index: usize) -> Self {
                Self {
                    index,
                    _brand: InvariantLifetime::new(),
                }
            }

            /// Returns the slot index, which is also the insertion rank.
            #[inline(always)]
            pub const fn index(self) -> usize {
                self.index
            }
        }

        impl<'brand> fmt::Debug for $name<'brand> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, "({})"), self.index)
            }
        }

        impl<'brand> fmt::Display for $name<'brand> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, "#{}"), self.index)
            }
        }
    };
}

define_handle!(
    /// A stable reference to a vertex of a `Graph<'brand, ..>`.
    ///
    /// Equality and hashing are by slot identity, never by payload.
    VertexHandle,
    "Vertex"
);

define_handle!(
    /// A stable reference to an edge of a `Graph<'brand, ..>`.
    EdgeHandle,
    "Edge"
);
