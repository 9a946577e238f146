//! Error types for arena allocation and graph construction.

use core::fmt;
use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T, E = GraphError> = core::result::Result<T, E>;

/// Failure reported by an [`Arena`](crate::alloc::Arena).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArenaError {
    /// The arena already holds `limit` objects and cannot allocate another.
    #[error("arena exhausted: limit of {limit} objects reached")]
    Exhausted {
        /// Configured object limit.
        limit: usize,
    },
}

/// A failed allocation, carrying the value that could not be stored.
///
/// The arena is left exactly as it was before the call.
pub struct AllocError<T> {
    error: ArenaError,
    value: T,
}

impl<T> AllocError<T> {
    pub(crate) fn new(error: ArenaError, value: T) -> Self {
        Self { error, value }
    }

    /// Returns the reason the allocation failed.
    pub fn error(&self) -> ArenaError {
        self.error
    }

    /// Recovers the rejected value.
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T> fmt::Debug for AllocError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AllocError").field("error", &self.error).finish_non_exhaustive()
    }
}

impl<T> fmt::Display for AllocError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)
    }
}

impl<T> std::error::Error for AllocError<T> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Failure reported by a [`Graph`](crate::Graph) operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// The vertex arena reached its configured limit.
    #[error("vertex capacity exhausted: limit of {limit} vertices reached")]
    VertexCapacityExhausted {
        /// Configured vertex limit.
        limit: usize,
    },

    /// The edge arena reached its configured limit.
    #[error("edge capacity exhausted: limit of {limit} edges reached")]
    EdgeCapacityExhausted {
        /// Configured edge limit.
        limit: usize,
    },

    /// The two vertices are already connected; the graph is simple.
    #[error("vertices are already connected by edge #{existing}")]
    DuplicateEdge {
        /// Slot index of the edge that already connects the pair.
        existing: usize,
    },

    /// A configuration could not be parsed or is inconsistent.
    #[error("invalid graph configuration: {0}")]
    Config(String),
}

impl From<serde_json::Error> for GraphError {
    fn from(err: serde_json::Error) -> Self {
        GraphError::Config(err.to_string())
    }
}
