//! Construction-time configuration for a [`Graph`](crate::Graph).

use crate::error::{GraphError, Result};
use serde::{Deserialize, Serialize};

/// Capacity hints and hard limits for the vertex and edge arenas.
///
/// Every field is optional when deserializing:
///
/// ```rust
/// use tether::GraphConfig;
///
/// let config = GraphConfig::from_json(r#"{ "vertex_capacity": 16, "max_edges": 64 }"#).unwrap();
/// assert_eq!(config.vertex_capacity, 16);
/// assert_eq!(config.max_edges, Some(64));
/// assert_eq!(config.max_vertices, None);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GraphConfig {
    /// Number of vertex slots to reserve up front.
    pub vertex_capacity: usize,
    /// Number of edge slots to reserve up front.
    pub edge_capacity: usize,
    /// Maximum number of vertices; `None` means unbounded.
    pub max_vertices: Option<usize>,
    /// Maximum number of edges; `None` means unbounded.
    pub max_edges: Option<usize>,
}

impl GraphConfig {
    /// Sets the vertex capacity hint.
    #[must_use]
    pub fn with_vertex_capacity(mut self, capacity: usize) -> Self {
        self.vertex_capacity = capacity;
        self
    }

    /// Sets the edge capacity hint.
    #[must_use]
    pub fn with_edge_capacity(mut self, capacity: usize) -> Self {
        self.edge_capacity = capacity;
        self
    }

    /// Bounds the number of vertices.
    #[must_use]
    pub fn with_max_vertices(mut self, limit: usize) -> Self {
        self.max_vertices = Some(limit);
        self
    }

    /// Bounds the number of edges.
    #[must_use]
    pub fn with_max_edges(mut self, limit: usize) -> Self {
        self.max_edges = Some(limit);
        self
    }

    /// Parses and validates a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration as JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Rejects capacity hints that exceed their limit.
    ///
    /// Hints are not checked against the size of the stored entities here;
    /// [`Graph::try_with_config`](crate::Graph::try_with_config) does that.
    pub fn validate(&self) -> Result<()> {
        if let Some(limit) = self.max_vertices {
            if self.vertex_capacity > limit {
                return Err(GraphError::Config(format!(
                    "vertex_capacity {} exceeds max_vertices {limit}",
                    self.vertex_capacity
                )));
            }
        }
        if let Some(limit) = self.max_edges {
            if self.edge_capacity > limit {
                return Err(GraphError::Config(format!(
                    "edge_capacity {} exceeds max_edges {limit}",
                    self.edge_capacity
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unbounded() {
        let config = GraphConfig::default();
        assert_eq!(config.max_vertices, None);
        assert_eq!(config.max_edges, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder_sets_fields() {
        let config = GraphConfig::default()
            .with_vertex_capacity(8)
            .with_edge_capacity(28)
            .with_max_vertices(8)
            .with_max_edges(36);
        assert_eq!(
            config,
            GraphConfig {
                vertex_capacity: 8,
                edge_capacity: 28,
                max_vertices: Some(8),
                max_edges: Some(36),
            }
        );
    }

    #[test]
    fn json_roundtrip_and_validation() {
        let config = GraphConfig::default().with_max_vertices(3);
        let json = config.to_json().unwrap();
        assert_eq!(GraphConfig::from_json(&json).unwrap(), config);

        let err = GraphConfig::from_json(r#"{ "vertex_capacity": 10, "max_vertices": 2 }"#).unwrap_err();
        assert_eq!(
            err,
            GraphError::Config("vertex_capacity 10 exceeds max_vertices 2".to_string())
        );
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = GraphConfig::from_json(r#"{ "directed": true }"#).unwrap_err();
        assert!(matches!(err, GraphError::Config(_)));
    }
}
