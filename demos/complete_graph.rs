//! Builds a small complete graph by connecting every ordered pair of vertices,
//! self pairs included, and prints what the simple-graph policy kept.
//!
//! Run with `RUST_LOG=tether=trace cargo run --example complete_graph --features tracing`
//! to see the insertion events.

use anyhow::{ensure, Context, Result};
use tether::{Graph, GraphConfig, GraphToken};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let names = ["a", "b", "c", "d", "e"];
    let config = GraphConfig::default()
        .with_vertex_capacity(names.len())
        .with_edge_capacity(names.len() * (names.len() + 1) / 2);

    GraphToken::new(|token| -> Result<()> {
        let mut graph: Graph<'_, String> = Graph::try_with_config(token, config).context("demo configuration")?;
        let vertices = graph.add_vertices(names.map(String::from));

        for &v1 in &vertices {
            for &v2 in &vertices {
                graph.add_edge_default(v1, v2);
            }
        }

        tracing::info!(
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            "complete graph built"
        );
        ensure!(graph.edge_count() == 15, "expected 15 edges, found {}", graph.edge_count());

        for (handle, vertex) in graph.vertices() {
            let mut neighbors: Vec<&str> = vertex
                .neighbors()
                .keys()
                .map(|n| graph[n].value().as_str())
                .collect();
            neighbors.sort_unstable();
            println!("{handle} {:>2} -> {}", vertex.value(), neighbors.join(", "));
        }

        let stats = serde_json::to_string_pretty(&graph.stats()).context("serialize stats")?;
        println!("{stats}");
        Ok(())
    })
}
