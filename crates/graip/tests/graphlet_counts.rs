//! Known-topology regression tests for exact graphlet counting, plus a
//! brute-force cross-check against independent enumeration.
//!
//! Each scenario test uses a hand-crafted graph with an analytically known
//! graphlet-count vector (spec scenarios S1-S5). The brute-force test
//! cross-checks `count` against plain induced-subset enumeration on random
//! small graphs, catching double-counting or missed subgraphs in the
//! canonical ESU-style enumeration that the per-class unit tests in
//! `graphlet::count` can't see end to end.

use std::collections::HashMap;

use graip::graph::{Graph, NodeId};
use graip::graphlet::{self, Arity};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn vector_index(arity: Arity, name: &str) -> usize {
    arity.names().iter().position(|&n| n == name).unwrap()
}

fn at(vec: &[i64], arity: Arity, name: &str) -> i64 {
    vec[vector_index(arity, name)]
}

fn triangle() -> Graph {
    let mut g = Graph::with_nodes(3);
    g.add_edge(0, 1);
    g.add_edge(1, 2);
    g.add_edge(0, 2);
    g
}

fn path4() -> Graph {
    let mut g = Graph::with_nodes(4);
    g.add_edge(0, 1);
    g.add_edge(1, 2);
    g.add_edge(2, 3);
    g
}

fn complete5() -> Graph {
    let mut g = Graph::with_nodes(5);
    for u in 0..5u32 {
        for v in (u + 1)..5u32 {
            g.add_edge(u, v);
        }
    }
    g
}

fn two_triangles() -> Graph {
    let mut g = Graph::with_nodes(6);
    g.add_edge(0, 1);
    g.add_edge(1, 2);
    g.add_edge(0, 2);
    g.add_edge(3, 4);
    g.add_edge(4, 5);
    g.add_edge(3, 5);
    g
}

fn cycle5() -> Graph {
    let mut g = Graph::with_nodes(5);
    for i in 0..5u32 {
        g.add_edge(i, (i + 1) % 5);
    }
    g
}

#[test]
fn s1_triangle_three_vector() {
    let g = triangle();
    let v = graphlet::count(&g, Arity::Five);
    assert_eq!(at(&v, Arity::Five, "wedge"), 0);
    assert_eq!(at(&v, Arity::Five, "triangle"), 1);
    for &name in &Arity::Five.names()[2..] {
        assert_eq!(at(&v, Arity::Five, name), 0, "{name} should be zero");
    }
}

#[test]
fn s2_path4_four_vector() {
    let g = path4();
    let v = graphlet::count(&g, Arity::Four);
    assert_eq!(at(&v, Arity::Four, "4star"), 0);
    assert_eq!(at(&v, Arity::Four, "4path"), 1);
    assert_eq!(at(&v, Arity::Four, "wedge"), 2);
    assert_eq!(at(&v, Arity::Four, "triangle"), 0);
    for &name in &["tailed_tri", "4cycle", "diamond", "4clique"] {
        assert_eq!(at(&v, Arity::Four, name), 0, "{name} should be zero");
    }
}

#[test]
fn s3_complete5_five_vector() {
    let g = complete5();
    let v = graphlet::count(&g, Arity::Five);
    assert_eq!(at(&v, Arity::Five, "5clique"), 1);
    assert_eq!(at(&v, Arity::Five, "4clique"), 5);
    assert_eq!(at(&v, Arity::Five, "triangle"), 10);
    for &name in &Arity::Five.names()[..Arity::Five.names().len() - 1] {
        if name == "4clique" || name == "triangle" {
            continue;
        }
        assert_eq!(at(&v, Arity::Five, name), 0, "{name} should be zero in K5");
    }
}

#[test]
fn s4_two_disjoint_triangles() {
    let g = two_triangles();
    let v = graphlet::count(&g, Arity::Five);
    assert_eq!(at(&v, Arity::Five, "triangle"), 2);
    assert_eq!(at(&v, Arity::Five, "wedge"), 0);
    for &name in &Arity::Five.names()[2..] {
        assert_eq!(at(&v, Arity::Five, name), 0, "{name} should be zero");
    }
}

#[test]
fn s5_cycle5_five_vector() {
    // Deleting any single vertex from a 5-cycle leaves a path on the other
    // four, so `4path` is the only non-cumulative 4-node shape present.
    let g = cycle5();
    let v = graphlet::count(&g, Arity::Five);
    assert_eq!(at(&v, Arity::Five, "wedge"), 5);
    assert_eq!(at(&v, Arity::Five, "triangle"), 0);
    assert_eq!(at(&v, Arity::Four, "4path"), 5);
    for &name in &["4star", "tailed_tri", "4cycle", "diamond", "4clique"] {
        assert_eq!(at(&v, Arity::Four, name), 0, "{name} should be zero");
    }
    assert_eq!(at(&v, Arity::Five, "5cycle"), 1);
}

// ---------------------------------------------------------------------------
// Invariant 1: count() matches plain brute-force induced-subset enumeration.
// ---------------------------------------------------------------------------

fn combinations(items: &[NodeId], k: usize) -> Vec<Vec<NodeId>> {
    if k == 0 {
        return vec![Vec::new()];
    }
    if items.len() < k {
        return Vec::new();
    }
    let mut out = Vec::new();
    for (i, &first) in items.iter().enumerate() {
        for mut rest in combinations(&items[i + 1..], k - 1) {
            rest.insert(0, first);
            out.push(rest);
        }
    }
    out
}

fn is_connected_subset(g: &Graph, subset: &[NodeId]) -> bool {
    let set: std::collections::HashSet<NodeId> = subset.iter().copied().collect();
    let mut seen = std::collections::HashSet::new();
    let mut stack = vec![subset[0]];
    seen.insert(subset[0]);
    while let Some(n) = stack.pop() {
        for nb in g.neighbors(n) {
            if set.contains(&nb) && seen.insert(nb) {
                stack.push(nb);
            }
        }
    }
    seen.len() == subset.len()
}

/// Enumerate every connected induced subset at every size up to `max_size`,
/// not just exactly `max_size` — a graphlet vector is cumulative from
/// 3-node classes up, so a reference that only checked the top size would
/// validate the same missing-smaller-classes bug it's meant to catch.
fn brute_force_counts(g: &Graph, max_size: usize, arity: Arity) -> HashMap<&'static str, i64> {
    let nodes: Vec<NodeId> = g.nodes().collect();
    let mut counts = HashMap::new();
    for k in 3..=max_size {
        for combo in combinations(&nodes, k) {
            if is_connected_subset(g, &combo) {
                let code = graphlet::encode(g, &combo);
                if let Some(name) = graphlet::classify(arity, code) {
                    *counts.entry(name).or_insert(0) += 1;
                }
            }
        }
    }
    counts
}

fn random_graph(n: usize, density: f64, seed: u64) -> Graph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut g = Graph::with_nodes(n);
    for u in 0..n as u32 {
        for v in (u + 1)..n as u32 {
            if rng.gen_bool(density) {
                g.add_edge(u, v);
            }
        }
    }
    g
}

#[test]
fn count_matches_brute_force_enumeration_on_random_graphs() {
    for seed in 0..8u64 {
        let g = random_graph(9, 0.35, seed);
        for (arity, k) in [(Arity::Three, 3), (Arity::Four, 4), (Arity::Five, 5)] {
            let vector = graphlet::count(&g, arity);
            let brute = brute_force_counts(&g, k, arity);
            for &name in arity.names() {
                let expected = brute.get(name).copied().unwrap_or(0);
                assert_eq!(
                    at(&vector, arity, name),
                    expected,
                    "seed={seed} arity={arity:?} class={name}"
                );
            }
        }
    }
}
