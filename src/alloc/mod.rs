//! Storage for graph entities.

pub mod arena;

pub use arena::{Arena, ArenaStats};
pub use crate::error::{AllocError, ArenaError};
