//! Exact induced graphlet counting (C3).
//!
//! Enumerates every connected induced subgraph of the target size exactly
//! once, using the canonical "exclusive neighbourhood" extension rule
//! (Wernicke's ESU): each subgraph is grown from its root, and a candidate
//! can only be added through a neighbour that is not already adjacent to
//! the subgraph being grown, which rules out reaching the same vertex set
//! by two different growth paths. The canonical order ESU roots against is
//! [`crate::orient::OrientedGraph`]'s degeneracy rank (C2), not raw
//! node id: any total order works for correctness, and ranking by
//! degeneracy keeps each root's initial extension set bounded by the
//! graph's degeneracy rather than by degree. `three_counts`/`four_counts`/
//! `five_counts` mirror the reference implementation's three entry points of
//! the same name; each classifies every enumerated subgraph with
//! [`super::codes::classify`] against the matching [`super::codes::Arity`]
//! table. Each entry point runs one enumeration pass per size `arity`
//! covers and merges the results (`count_cumulative`), since a single pass
//! at size `k` only ever records matches at that size — a 4-node
//! enumeration never produces a 3-node class on its own.

use std::collections::HashMap;

use super::codes::{self, Arity};
use crate::graph::{Graph, NodeId};
use crate::orient::OrientedGraph;

fn touches_subgraph(g: &Graph, subgraph: &[NodeId], candidate: NodeId) -> bool {
    subgraph.iter().any(|&m| g.has_edge(m, candidate))
}

fn extend(
    g: &Graph,
    dg: &OrientedGraph,
    subgraph: &mut Vec<NodeId>,
    mut extension: Vec<NodeId>,
    root_rank: u32,
    k: usize,
    arity: Arity,
    counts: &mut HashMap<&'static str, i64>,
) {
    if subgraph.len() == k {
        if let Some(name) = codes::classify(arity, codes::encode(g, subgraph)) {
            *counts.entry(name).or_insert(0) += 1;
        }
        return;
    }

    while let Some(w) = extension.pop() {
        let mut next_extension = extension.clone();
        for nb in g.neighbors(w) {
            if dg.rank(nb) > root_rank
                && !subgraph.contains(&nb)
                && !extension.contains(&nb)
                && !touches_subgraph(g, subgraph, nb)
            {
                next_extension.push(nb);
            }
        }
        subgraph.push(w);
        extend(g, dg, subgraph, next_extension, root_rank, k, arity, counts);
        subgraph.pop();
    }
}

fn count_connected_subgraphs(g: &Graph, k: usize, arity: Arity) -> HashMap<&'static str, i64> {
    let dg = OrientedGraph::orient(g);
    let mut counts = HashMap::new();
    for root in g.nodes() {
        let root_rank = dg.rank(root);
        let extension: Vec<NodeId> = g
            .neighbors(root)
            .filter(|&u| dg.rank(u) > root_rank)
            .collect();
        let mut subgraph = vec![root];
        extend(
            g,
            &dg,
            &mut subgraph,
            extension,
            root_rank,
            k,
            arity,
            &mut counts,
        );
    }
    counts
}

/// Count connected induced subgraphs at every size `arity` covers, merged
/// into one class-name-keyed map. A size-4 or size-5 enumeration only ever
/// records matches at its own size (`extend` stops growing once
/// `subgraph.len() == k`), so the smaller classes need their own pass at
/// their own size rather than falling out of the larger one for free.
fn count_cumulative(g: &Graph, arity: Arity) -> HashMap<&'static str, i64> {
    let mut counts = HashMap::new();
    for &k in arity.sizes() {
        for (name, c) in count_connected_subgraphs(g, k, arity) {
            *counts.entry(name).or_insert(0) += c;
        }
    }
    counts
}

/// Count connected induced subgraphs of exactly `k` nodes that contain every
/// node in `required`. Used by the incremental updater, which only needs
/// counts for subgraphs touching the nodes/edge that just changed rather
/// than a full recount.
pub(crate) fn count_containing(
    g: &Graph,
    required: &[NodeId],
    k: usize,
    arity: Arity,
) -> HashMap<&'static str, i64> {
    let mut counts = HashMap::new();
    let extra_target = k - required.len();

    if extra_target == 0 {
        if let Some(name) = codes::classify(arity, codes::encode(g, required)) {
            *counts.entry(name).or_insert(0) += 1;
        }
        return counts;
    }

    let mut seen: std::collections::HashSet<Vec<NodeId>> = std::collections::HashSet::new();
    let mut extra = Vec::new();
    grow_containing(
        g,
        required,
        &mut extra,
        extra_target,
        &mut seen,
        arity,
        &mut counts,
    );
    counts
}

fn grow_containing(
    g: &Graph,
    required: &[NodeId],
    extra: &mut Vec<NodeId>,
    extra_target: usize,
    seen: &mut std::collections::HashSet<Vec<NodeId>>,
    arity: Arity,
    counts: &mut HashMap<&'static str, i64>,
) {
    if extra.len() == extra_target {
        let mut key = extra.clone();
        key.sort_unstable();
        if !seen.insert(key) {
            return;
        }
        let mut full = required.to_vec();
        full.extend_from_slice(extra);
        if let Some(name) = codes::classify(arity, codes::encode(g, &full)) {
            *counts.entry(name).or_insert(0) += 1;
        }
        return;
    }

    let mut candidates = Vec::new();
    for &m in required.iter().chain(extra.iter()) {
        for nb in g.neighbors(m) {
            if !required.contains(&nb) && !extra.contains(&nb) && !candidates.contains(&nb) {
                candidates.push(nb);
            }
        }
    }

    for cand in candidates {
        extra.push(cand);
        grow_containing(g, required, extra, extra_target, seen, arity, counts);
        extra.pop();
    }
}

pub(crate) fn to_vector(arity: Arity, counts: &HashMap<&'static str, i64>) -> Vec<i64> {
    arity
        .names()
        .iter()
        .map(|name| *counts.get(name).unwrap_or(&0))
        .collect()
}

/// Count the two connected 3-node graphlets (wedge, triangle), in that
/// order.
#[must_use]
pub fn three_counts(g: &Graph) -> Vec<i64> {
    to_vector(Arity::Three, &count_cumulative(g, Arity::Three))
}

/// Count the eight connected 4-node-or-smaller graphlets, cumulative from
/// [`three_counts`].
#[must_use]
pub fn four_counts(g: &Graph) -> Vec<i64> {
    to_vector(Arity::Four, &count_cumulative(g, Arity::Four))
}

/// Count all 29 connected graphlets up to 5 nodes, cumulative from
/// [`four_counts`].
#[must_use]
pub fn five_counts(g: &Graph) -> Vec<i64> {
    to_vector(Arity::Five, &count_cumulative(g, Arity::Five))
}

/// Count graphlets up to `arity`'s size and return them in that arity's
/// fixed class order.
#[must_use]
pub fn count(g: &Graph, arity: Arity) -> Vec<i64> {
    match arity {
        Arity::Three => three_counts(g),
        Arity::Four => four_counts(g),
        Arity::Five => five_counts(g),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name_count(arity: Arity, counts: &[i64], name: &str) -> i64 {
        let idx = arity.names().iter().position(|&n| n == name).unwrap();
        counts[idx]
    }

    #[test]
    fn triangle_has_one_triangle_no_wedge() {
        let mut g = Graph::with_nodes(3);
        g.add_edge(0, 1);
        g.add_edge(1, 2);
        g.add_edge(0, 2);
        let counts = three_counts(&g);
        assert_eq!(name_count(Arity::Three, &counts, "wedge"), 0);
        assert_eq!(name_count(Arity::Three, &counts, "triangle"), 1);
    }

    #[test]
    fn path3_has_one_wedge_no_triangle() {
        let mut g = Graph::with_nodes(3);
        g.add_edge(0, 1);
        g.add_edge(1, 2);
        let counts = three_counts(&g);
        assert_eq!(name_count(Arity::Three, &counts, "wedge"), 1);
        assert_eq!(name_count(Arity::Three, &counts, "triangle"), 0);
    }

    #[test]
    fn star_k13_has_three_wedges() {
        let mut g = Graph::with_nodes(4);
        g.add_edge(0, 1);
        g.add_edge(0, 2);
        g.add_edge(0, 3);
        let counts = three_counts(&g);
        assert_eq!(name_count(Arity::Three, &counts, "wedge"), 3);
    }

    #[test]
    fn four_clique_has_one_clique_four_triangles_no_other_classes() {
        let n = 4;
        let mut g = Graph::with_nodes(n);
        for i in 0..n as NodeId {
            for j in (i + 1)..n as NodeId {
                g.add_edge(i, j);
            }
        }
        let counts = four_counts(&g);
        assert_eq!(name_count(Arity::Four, &counts, "4clique"), 1);
        assert_eq!(name_count(Arity::Four, &counts, "triangle"), 4);
        assert_eq!(name_count(Arity::Four, &counts, "4star"), 0);
        assert_eq!(name_count(Arity::Four, &counts, "4cycle"), 0);
        assert_eq!(name_count(Arity::Four, &counts, "diamond"), 0);
    }

    #[test]
    fn four_cycle_has_one_cycle_no_diamond_or_clique() {
        let mut g = Graph::with_nodes(4);
        g.add_edge(0, 1);
        g.add_edge(1, 2);
        g.add_edge(2, 3);
        g.add_edge(3, 0);
        let counts = four_counts(&g);
        assert_eq!(name_count(Arity::Four, &counts, "4cycle"), 1);
        assert_eq!(name_count(Arity::Four, &counts, "4clique"), 0);
        assert_eq!(name_count(Arity::Four, &counts, "diamond"), 0);
        assert_eq!(name_count(Arity::Four, &counts, "triangle"), 0);
    }

    #[test]
    fn five_clique_has_one_five_clique_and_ten_triangles() {
        let n = 5;
        let mut g = Graph::with_nodes(n);
        for i in 0..n as NodeId {
            for j in (i + 1)..n as NodeId {
                g.add_edge(i, j);
            }
        }
        let counts = five_counts(&g);
        assert_eq!(name_count(Arity::Five, &counts, "5clique"), 1);
        assert_eq!(name_count(Arity::Five, &counts, "triangle"), 10);
        assert_eq!(name_count(Arity::Five, &counts, "4clique"), 5);
    }

    #[test]
    fn five_cycle_has_one_five_cycle_and_five_wedges() {
        let mut g = Graph::with_nodes(5);
        g.add_edge(0, 1);
        g.add_edge(1, 2);
        g.add_edge(2, 3);
        g.add_edge(3, 4);
        g.add_edge(4, 0);
        let counts = five_counts(&g);
        assert_eq!(name_count(Arity::Five, &counts, "5cycle"), 1);
        assert_eq!(name_count(Arity::Five, &counts, "wedge"), 5);
        assert_eq!(name_count(Arity::Five, &counts, "triangle"), 0);
    }

    #[test]
    fn two_disjoint_triangles_have_no_cross_graphlets() {
        let mut g = Graph::with_nodes(6);
        g.add_edge(0, 1);
        g.add_edge(1, 2);
        g.add_edge(0, 2);
        g.add_edge(3, 4);
        g.add_edge(4, 5);
        g.add_edge(3, 5);
        let counts = five_counts(&g);
        assert_eq!(name_count(Arity::Five, &counts, "triangle"), 2);
        for name in Arity::Five.names() {
            if *name != "triangle" {
                assert_eq!(
                    name_count(Arity::Five, &counts, name),
                    0,
                    "unexpected count for {name}"
                );
            }
        }
    }
}
