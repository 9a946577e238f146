/// Creates a fresh brand and binds a new, empty [`Graph`](crate::Graph) to `$graph`.
///
/// This is shorthand for `GraphToken::new(|token| { let mut g = Graph::new(token); ... })`.
///
/// # Example
///
/// ```rust
/// use tether::graph_scope;
///
/// let degree = graph_scope!(|graph| {
///     let a = graph.add_vertex(1u32);
///     let b = graph.add_vertex(2u32);
///     graph.add_edge(a, b, 0.5f64);
///     graph.degree(a)
/// });
/// assert_eq!(degree, 1);
/// ```
///
/// The graph type may be annotated, which is needed when no edge is ever added
/// (the weight type cannot be inferred otherwise), and a
/// [`GraphConfig`](crate::GraphConfig) may be supplied with `with`:
///
/// ```rust
/// use tether::{graph_scope, Graph, GraphConfig};
///
/// let limit = graph_scope!(|graph: Graph<'_, &str>| with GraphConfig::default().with_max_vertices(4), {
///     graph.add_vertex("only");
///     graph.config().max_vertices
/// });
/// assert_eq!(limit, Some(4));
/// ```
#[macro_export]
macro_rules! graph_scope {
    (|$graph:ident : $ty:ty| with $config:expr, $body:expr) => {
        $crate::GraphToken::new(|token| {
            #[allow(unused_mut)]
            let mut $graph: $ty = $crate::Graph::with_config(token, $config);
            $body
        })
    };
    (|$graph:ident| with $config:expr, $body:expr) => {
        $crate::GraphToken::new(|token| {
            #[allow(unused_mut)]
            let mut $graph = $crate::Graph::with_config(token, $config);
            $body
        })
    };
    (|$graph:ident : $ty:ty| $body:expr) => {
        $crate::GraphToken::new(|token| {
            #[allow(unused_mut)]
            let mut $graph: $ty = $crate::Graph::new(token);
            $body
        })
    };
    (|$graph:ident| $body:expr) => {
        $crate::GraphToken::new(|token| {
            #[allow(unused_mut)]
            let mut $graph = $crate::Graph::new(token);
            $body
        })
    };
}

/// Forwards to `tracing` when the `tracing` feature is enabled; expands to nothing otherwise.
macro_rules! trace_event {
    ($level:ident, $($arg:tt)+) => {
        #[cfg(feature = "tracing")]
        {
            ::tracing::$level!($($arg)+);
        }
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn graph_scope_binds_graph() {
        let count = graph_scope!(|graph: crate::Graph<'_, &str>| {
            graph.add_vertex("x");
            graph.add_vertex("y");
            graph.vertex_count()
        });
        assert_eq!(count, 2);
    }

    #[test]
    fn graph_scope_with_config() {
        let config = crate::GraphConfig::default().with_max_vertices(1);
        let exhausted = graph_scope!(|graph: crate::Graph<'_, u8>| with config, {
            graph.add_vertex(0u8);
            graph.try_add_vertex(1u8).is_err()
        });
        assert!(exhausted);
    }

    #[test]
    fn trace_event_compiles_in_statement_position() {
        let value = 7;
        trace_event!(trace, value, "macro smoke test");
        assert_eq!(value, 7);
    }
}
