//! Incremental graphlet-count updates (C4).
//!
//! A single node insertion or edge toggle only changes the class of
//! subgraphs that touch the new node or the toggled edge's endpoints.
//! Rather than recount the whole graph, each function here asks
//! [`crate::graphlet`] for counts restricted to subgraphs containing those
//! fixed nodes, before and after the change, and returns the difference.
//! Grounded on `update_counts_node`/`update_counts_edge` in the reference
//! implementation, which walk the same fixed-node neighbourhood but via
//! explicit nested loops with a dedup blacklist at each depth; here the
//! dedup and depth-walking are both delegated to
//! `graphlet::count_containing`.

use crate::graph::{Graph, NodeId};
use crate::graphlet::{self, Arity};

/// Graphlet-count delta from inserting `n`, given the graph *after* `n` and
/// its edges have been added. Every subgraph touching `n` is new, since `n`
/// did not exist before.
#[must_use]
pub fn node_added(g: &Graph, n: NodeId, arity: Arity) -> Vec<i64> {
    let mut delta = vec![0i64; arity.names().len()];
    for &k in arity.sizes() {
        let counts = graphlet::count_containing(g, &[n], k, arity);
        add_into(&mut delta, arity, &counts, 1);
    }
    delta
}

/// Graphlet-count delta from adding the edge `(u, v)`, given the graph
/// *after* the edge has been added.
#[must_use]
pub fn edge_added(g_after: &Graph, u: NodeId, v: NodeId, arity: Arity) -> Vec<i64> {
    let mut g_before = g_after.clone();
    g_before.remove_edge(u, v);
    edge_toggle_delta(&g_before, g_after, u, v, arity)
}

/// Graphlet-count delta from removing the edge `(u, v)`, given the graph
/// *after* the edge has been removed.
#[must_use]
pub fn edge_removed(g_after: &Graph, u: NodeId, v: NodeId, arity: Arity) -> Vec<i64> {
    let mut g_before = g_after.clone();
    g_before.add_edge(u, v);
    edge_toggle_delta(&g_before, g_after, u, v, arity)
}

fn edge_toggle_delta(
    g_before: &Graph,
    g_after: &Graph,
    u: NodeId,
    v: NodeId,
    arity: Arity,
) -> Vec<i64> {
    let mut delta = vec![0i64; arity.names().len()];
    for &k in arity.sizes() {
        let before = graphlet::count_containing(g_before, &[u, v], k, arity);
        let after = graphlet::count_containing(g_after, &[u, v], k, arity);
        add_into(&mut delta, arity, &before, -1);
        add_into(&mut delta, arity, &after, 1);
    }
    delta
}

fn add_into(
    delta: &mut [i64],
    arity: Arity,
    counts: &std::collections::HashMap<&'static str, i64>,
    sign: i64,
) {
    for (idx, name) in arity.names().iter().enumerate() {
        if let Some(&c) = counts.get(name) {
            delta[idx] += sign * c;
        }
    }
}

/// Apply a graphlet-count delta in place, e.g. to a running total maintained
/// across a generator's accept/reject loop.
pub fn apply_delta(counts: &mut [i64], delta: &[i64]) {
    for (c, d) in counts.iter_mut().zip(delta) {
        *c += d;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphlet;

    #[test]
    fn node_added_matches_full_recount() {
        let mut g = Graph::with_nodes(3);
        g.add_edge(0, 1);
        g.add_edge(1, 2);
        let before = graphlet::three_counts(&g);

        let n = g.add_node();
        g.add_edge(n, 0);
        g.add_edge(n, 2);
        let after = graphlet::three_counts(&g);

        let delta = node_added(&g, n, Arity::Three);
        for (idx, d) in delta.iter().enumerate() {
            assert_eq!(before[idx] + d, after[idx]);
        }
    }

    #[test]
    fn edge_added_matches_full_recount() {
        let mut g = Graph::with_nodes(4);
        g.add_edge(0, 1);
        g.add_edge(1, 2);
        g.add_edge(2, 3);
        let before = graphlet::four_counts(&g);

        g.add_edge(0, 3);
        let after = graphlet::four_counts(&g);

        let delta = edge_added(&g, 0, 3, Arity::Four);
        for (idx, d) in delta.iter().enumerate() {
            assert_eq!(before[idx] + d, after[idx]);
        }
    }

    #[test]
    fn edge_removed_matches_full_recount() {
        let mut g = Graph::with_nodes(4);
        g.add_edge(0, 1);
        g.add_edge(1, 2);
        g.add_edge(2, 3);
        g.add_edge(3, 0);
        let before = graphlet::four_counts(&g);

        g.remove_edge(3, 0);
        let after = graphlet::four_counts(&g);

        let delta = edge_removed(&g, 3, 0, Arity::Four);
        for (idx, d) in delta.iter().enumerate() {
            assert_eq!(before[idx] + d, after[idx]);
        }
    }

    #[test]
    fn apply_delta_accumulates() {
        let mut counts = vec![1, 2, 3];
        apply_delta(&mut counts, &[1, -1, 0]);
        assert_eq!(counts, vec![2, 1, 3]);
    }
}
