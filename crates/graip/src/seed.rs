//! Barabasi-Albert preferential-attachment seeding helper.
//!
//! Not public API: GRAIP's own seeding step needs a quick, plausible
//! starting graph for its accept/reject loop to refine, not a general
//! purpose network model. The dual-parameter baseline generator in the
//! reference implementation (`BA_graph`, matching both node count and edge
//! count independently) is out of scope; this is the textbook
//! single-parameter model, used only to produce GRAIP's initial candidate.

use rand::Rng;

use crate::graph::{Graph, NodeId};

/// Build a preferential-attachment graph on `n` nodes, where each node
/// added after the first `m` connects to `m` existing nodes chosen with
/// probability proportional to their current degree.
///
/// # Panics
///
/// Panics if `m == 0` or `m >= n`.
pub(crate) fn barabasi_albert(n: usize, m: usize, rng: &mut impl Rng) -> Graph {
    assert!(m > 0 && m < n, "barabasi_albert requires 0 < m < n");

    let mut g = Graph::with_nodes(m);
    let mut repeated_nodes: Vec<NodeId> = Vec::new();

    for _ in m..n {
        let new_id = g.add_node();

        let mut targets = std::collections::HashSet::new();
        while targets.len() < m {
            let candidate = if repeated_nodes.is_empty() {
                rng.gen_range(0..new_id)
            } else {
                repeated_nodes[rng.gen_range(0..repeated_nodes.len())]
            };
            targets.insert(candidate);
        }

        for &t in &targets {
            g.add_edge(new_id, t);
            repeated_nodes.push(t);
            repeated_nodes.push(new_id);
        }
    }

    g
}
