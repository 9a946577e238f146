use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use petgraph::graph::UnGraph;
use tether::{Graph, GraphToken};

fn bench_add_vertices(c: &mut Criterion) {
    let size = 10_000;
    let mut group = c.benchmark_group("add_vertices");

    group.bench_function("tether_graph", |b| {
        b.iter(|| {
            GraphToken::new(|token| {
                let mut graph: Graph<'_, usize> = Graph::new(token);
                for i in 0..size {
                    black_box(graph.add_vertex(i));
                }
                graph.vertex_count()
            })
        });
    });

    group.bench_function("tether_graph_reserved", |b| {
        b.iter(|| {
            GraphToken::new(|token| {
                let mut graph: Graph<'_, usize> = Graph::with_capacity(token, size, 0);
                for i in 0..size {
                    black_box(graph.add_vertex(i));
                }
                graph.vertex_count()
            })
        });
    });

    group.bench_function("petgraph_ungraph", |b| {
        b.iter(|| {
            let mut graph: UnGraph<usize, ()> = UnGraph::new_undirected();
            for i in 0..size {
                black_box(graph.add_node(i));
            }
            graph.node_count()
        });
    });

    group.finish();
}

fn bench_complete_graph(c: &mut Criterion) {
    let mut group = c.benchmark_group("complete_graph");

    for &n in &[16usize, 64, 128] {
        group.bench_with_input(BenchmarkId::new("tether_graph", n), &n, |b, &n| {
            b.iter(|| {
                GraphToken::new(|token| {
                    let mut graph: Graph<'_, usize> = Graph::new(token);
                    let handles = graph.add_vertices(0..n);
                    // Every ordered pair; the reversed half are duplicate no-ops.
                    for &u in &handles {
                        for &v in &handles {
                            graph.add_edge_default(u, v);
                        }
                    }
                    graph.edge_count()
                })
            });
        });

        group.bench_with_input(BenchmarkId::new("petgraph_ungraph", n), &n, |b, &n| {
            b.iter(|| {
                let mut graph: UnGraph<usize, ()> = UnGraph::new_undirected();
                let nodes: Vec<_> = (0..n).map(|i| graph.add_node(i)).collect();
                for &u in &nodes {
                    for &v in &nodes {
                        if graph.find_edge(u, v).is_none() {
                            graph.add_edge(u, v, ());
                        }
                    }
                }
                graph.edge_count()
            });
        });
    }

    group.finish();
}

fn bench_neighbor_lookup(c: &mut Criterion) {
    let n = 256;
    let mut group = c.benchmark_group("neighbor_lookup");

    group.bench_function("tether_find_edge", |b| {
        GraphToken::new(|token| {
            let mut graph: Graph<'_, usize> = Graph::new(token);
            let handles = graph.add_vertices(0..n);
            for (i, &u) in handles.iter().enumerate() {
                for &v in handles.iter().skip(i).step_by(3) {
                    graph.add_edge_default(u, v);
                }
            }
            b.iter(|| {
                let mut found = 0usize;
                for &u in &handles {
                    for &v in &handles {
                        found += usize::from(graph.contains_edge(black_box(u), black_box(v)));
                    }
                }
                found
            });
        });
    });

    group.bench_function("petgraph_find_edge", |b| {
        let mut graph: UnGraph<usize, ()> = UnGraph::new_undirected();
        let nodes: Vec<_> = (0..n).map(|i| graph.add_node(i)).collect();
        for (i, &u) in nodes.iter().enumerate() {
            for &v in nodes.iter().skip(i).step_by(3) {
                graph.add_edge(u, v, ());
            }
        }
        b.iter(|| {
            let mut found = 0usize;
            for &u in &nodes {
                for &v in &nodes {
                    found += usize::from(graph.find_edge(black_box(u), black_box(v)).is_some());
                }
            }
            found
        });
    });

    group.finish();
}

criterion_group!(benches, bench_add_vertices, bench_complete_graph, bench_neighbor_lookup);
criterion_main!(benches);
