//! GRAIP: graphlet-guided incremental generator (C7).
//!
//! Starts from a Barabasi-Albert candidate, then repeatedly proposes a
//! small local change (add/remove a node, or add/remove an edge), scores
//! the result with [`crate::score`], and accepts it if the score improves
//! or the rejection budget has been exhausted. Converges when every binned
//! degree count and every graphlet count falls within its target's
//! tolerance. Grounded on `GRAIP` in `generator/models.py`.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info, instrument};

use crate::binning::bin_degrees;
use crate::error::StopReason;
use crate::graph::{Graph, NodeId};
use crate::graphlet::{self, Arity};
use crate::sample::TargetStats;
use crate::score::{score, within_bounds, ScoreTarget};
use crate::seed::barabasi_albert;
use crate::update;

/// Driver parameters. Fields left `None` fall back to the defaults the
/// reference implementation derives from the target statistics.
#[derive(Debug, Clone)]
pub struct GraipConfig {
    pub arity: Arity,
    /// Do a node step every `node_step` edge steps.
    pub node_step: u32,
    /// Weight given to the degree-distribution term of the score;
    /// `1 - weight` goes to the graphlet term.
    pub weight: f64,
    pub max_steps: Option<u64>,
    pub max_rejections: Option<u64>,
}

impl GraipConfig {
    /// Defaults matching the reference implementation: `node_step = 5`,
    /// `weight = 2/3`, `max_steps = round(100 * E_e)`,
    /// `max_rejections = round(0.02 * E_e)`.
    #[must_use]
    pub fn defaults(arity: Arity) -> Self {
        Self {
            arity,
            node_step: 5,
            weight: 2.0 / 3.0,
            max_steps: None,
            max_rejections: None,
        }
    }
}

/// Outcome of a [`generate`] run.
#[derive(Debug, Clone)]
pub struct GraipResult {
    pub graph: Graph,
    pub stop_reason: StopReason,
    pub steps: u64,
}

fn global_clustering(stats: &TargetStats) -> f64 {
    let wedge = stats.mean_graphlets[0];
    let triangle = stats.mean_graphlets[1];
    let denom = wedge + 3.0 * triangle;
    if denom == 0.0 {
        0.0
    } else {
        3.0 * triangle / denom
    }
}

fn neighbor_edges(g: &Graph, n: NodeId) -> usize {
    let nbrs: Vec<NodeId> = g.neighbors(n).collect();
    let mut count = 0;
    for i in 0..nbrs.len() {
        for j in (i + 1)..nbrs.len() {
            if g.has_edge(nbrs[i], nbrs[j]) {
                count += 1;
            }
        }
    }
    count
}

fn pick_degree_weighted(g: &Graph, rng: &mut impl Rng) -> NodeId {
    let weights: Vec<f64> = g.nodes().map(|v| (g.degree(v) + 1) as f64).collect();
    let total: f64 = weights.iter().sum();
    let mut r = rng.gen::<f64>() * total;
    for (v, w) in weights.iter().enumerate() {
        r -= w;
        if r <= 0.0 {
            return v as NodeId;
        }
    }
    (g.node_count() - 1) as NodeId
}

fn bin_observed(target: &ScoreTarget, g: &Graph) -> Vec<f64> {
    let hist = g.degree_histogram();
    target.degree_bins.iter().map(|b| b.observed(&hist)).collect()
}

/// Bron-Kerbosch without pivoting, enumerating maximal cliques of the
/// subgraph induced on `v` and its neighbours only (cliques containing `v`
/// can't extend outside that set), and keeping the largest one seen.
fn bron_kerbosch(g: &Graph, r: Vec<NodeId>, mut p: Vec<NodeId>, mut x: Vec<NodeId>, best: &mut Vec<NodeId>) {
    if p.is_empty() && x.is_empty() {
        if r.len() > best.len() {
            *best = r;
        }
        return;
    }
    while let Some(v) = p.pop() {
        let mut r2 = r.clone();
        r2.push(v);
        let nbrs: HashSet<NodeId> = g.neighbors(v).collect();
        let p2: Vec<NodeId> = p.iter().copied().filter(|u| nbrs.contains(u)).collect();
        let x2: Vec<NodeId> = x.iter().copied().filter(|u| nbrs.contains(u)).collect();
        bron_kerbosch(g, r2, p2, x2, best);
        x.push(v);
    }
}

/// The largest clique containing `v`, found via Bron-Kerbosch restricted to
/// `v`'s closed neighbourhood.
fn max_clique_containing(g: &Graph, v: NodeId) -> Vec<NodeId> {
    let candidates: Vec<NodeId> = g.neighbors(v).collect();
    let mut best = vec![v];
    bron_kerbosch(g, vec![v], candidates, Vec::new(), &mut best);
    best
}

/// Add a node to `h` (committing it immediately, so its id is never reused
/// even if the proposal below is rejected). If the degree-weighted first
/// neighbour sits in a clique of at least 4 vertices, wire the new node to
/// every vertex of that clique; otherwise propose wiring it to that
/// neighbour and, with probability derived from the target's global
/// clustering coefficient, the neighbour's own neighbours.
fn add_node_step(
    h: &mut Graph,
    stats: &TargetStats,
    arity: Arity,
    rng: &mut impl Rng,
) -> (Graph, Vec<i64>) {
    let first = pick_degree_weighted(h, rng);
    let new_id = h.add_node();

    let mut proposal = h.clone();
    let clique = max_clique_containing(h, first);
    if clique.len() >= 4 {
        for &v in &clique {
            proposal.add_edge(new_id, v);
        }
    } else {
        proposal.add_edge(new_id, first);

        let cg = global_clustering(stats);
        let nbrs: Vec<NodeId> = h.neighbors(first).collect();
        let k0 = (nbrs.len().max(1)) as f64;
        let ne = neighbor_edges(h, first) as f64;
        let prob = (0.5 * (k0 + 1.0) * cg - ne / k0).clamp(0.0, 1.0);
        for nb in nbrs {
            if rng.gen_bool(prob) {
                proposal.add_edge(new_id, nb);
            }
        }
    }

    let delta = update::node_added(&proposal, new_id, arity);
    (proposal, delta)
}

fn remove_node_step(h: &Graph, arity: Arity, rng: &mut impl Rng) -> Option<(Graph, Vec<i64>)> {
    let nodes: Vec<NodeId> = h.nodes().collect();
    let &n = nodes.choose(rng)?;
    let delta: Vec<i64> = update::node_added(h, n, arity).iter().map(|d| -d).collect();
    let mut proposal = h.clone();
    proposal.remove_node(n);
    Some((proposal, delta))
}

fn node_step(
    h: &mut Graph,
    stats: &TargetStats,
    arity: Arity,
    rng: &mut impl Rng,
) -> (Graph, Vec<i64>) {
    let d = (stats.mean_nodes - h.node_count() as f64) / stats.std_nodes.max(1e-9);
    let prob_add = (1.0 / (1.0 + (-d).exp())).clamp(0.0, 1.0);

    if h.node_count() < 2 || rng.gen_bool(prob_add) {
        add_node_step(h, stats, arity, rng)
    } else {
        remove_node_step(h, arity, rng).unwrap_or_else(|| (h.clone(), vec![0; arity.names().len()]))
    }
}

fn add_edge_step(h: &Graph, arity: Arity, rng: &mut impl Rng) -> (Graph, Vec<i64>) {
    let nodes: Vec<NodeId> = h.nodes().collect();
    if nodes.len() < 2 {
        return (h.clone(), vec![0; arity.names().len()]);
    }
    for _ in 0..64 {
        let &u = nodes.choose(rng).expect("non-empty");
        let &v = nodes.choose(rng).expect("non-empty");
        if u != v && !h.has_edge(u, v) {
            let mut proposal = h.clone();
            proposal.add_edge(u, v);
            let delta = update::edge_added(&proposal, u, v, arity);
            return (proposal, delta);
        }
    }
    (h.clone(), vec![0; arity.names().len()])
}

fn remove_edge_step(h: &Graph, arity: Arity, rng: &mut impl Rng) -> (Graph, Vec<i64>) {
    let candidates: Vec<NodeId> = h.nodes().filter(|&v| h.degree(v) >= 1).collect();
    let Some(&u) = candidates.choose(rng) else {
        return (h.clone(), vec![0; arity.names().len()]);
    };
    let nbrs: Vec<NodeId> = h.neighbors(u).collect();
    let &v = nbrs.choose(rng).expect("degree >= 1");
    let mut proposal = h.clone();
    proposal.remove_edge(u, v);
    let delta = update::edge_removed(&proposal, u, v, arity);
    (proposal, delta)
}

fn edge_step(h: &Graph, stats: &TargetStats, arity: Arity, rng: &mut impl Rng) -> (Graph, Vec<i64>) {
    let expected_edges = stats.mean_edges * h.node_count() as f64 / stats.mean_nodes.max(1.0);
    let d = (expected_edges - h.edge_count() as f64) / stats.std_edges.max(1e-9);
    let prob_add = (1.0 / (1.0 + (-d).exp())).clamp(0.0, 1.0);

    if rng.gen_bool(prob_add) {
        add_edge_step(h, arity, rng)
    } else {
        remove_edge_step(h, arity, rng)
    }
}

fn seed_candidate(stats: &TargetStats, arity: Arity, target: &ScoreTarget, rng: &mut impl Rng) -> Graph {
    let seed_n = ((stats.mean_nodes * 0.2).round() as usize).max(arity.max_size() + 1);
    let avg_degree = (stats.mean_edges / stats.mean_nodes.max(1.0)).round() as usize;
    let seed_m = avg_degree.clamp(1, seed_n - 1);

    let mut best: Option<(Graph, f64)> = None;
    for _ in 0..10 {
        let candidate = barabasi_albert(seed_n, seed_m, rng);
        let gl = graphlet::count(&candidate, arity);
        let bins = bin_observed(target, &candidate);
        let s = score(&bins, &gl, target);
        if best.as_ref().map_or(true, |(_, best_s)| s < *best_s) {
            best = Some((candidate, s));
        }
    }
    best.expect("loop runs at least once").0
}

/// Run GRAIP to completion: seed a candidate, then refine it with
/// accept/reject steps until it converges or a budget is exhausted.
#[instrument(skip(stats, rng))]
pub fn generate(stats: &TargetStats, config: &GraipConfig, rng: &mut impl Rng) -> GraipResult {
    let max_steps = config
        .max_steps
        .unwrap_or_else(|| (stats.mean_edges * 100.0).round() as u64);
    let max_rejections = config
        .max_rejections
        .unwrap_or_else(|| (stats.mean_edges * 0.02).round() as u64);

    let degree_bins = bin_degrees(&stats.mean_degree_hist, &stats.std_degree_hist, stats.trials);
    let target = ScoreTarget {
        degree_bins,
        mean_graphlets: stats.mean_graphlets.clone(),
        std_graphlets: stats.std_graphlets.clone(),
        weight: config.weight,
    };

    let mut h = seed_candidate(stats, config.arity, &target, rng);
    let mut gl = graphlet::count(&h, config.arity);

    let mut node_step_counter = 0u32;
    let mut rejections = 0u64;
    let mut steps = 0u64;

    loop {
        let bin_counts = bin_observed(&target, &h);
        if within_bounds(&bin_counts, &gl, &target) {
            info!(steps, "GRAIP converged");
            return GraipResult {
                graph: h.largest_component(),
                stop_reason: StopReason::Converged,
                steps,
            };
        }
        if steps >= max_steps {
            info!(steps, "GRAIP stopped: max steps reached");
            return GraipResult {
                graph: h.largest_component(),
                stop_reason: StopReason::MaxStepsReached,
                steps,
            };
        }

        node_step_counter += 1;
        let (proposal, delta) = if node_step_counter >= config.node_step {
            node_step_counter = 0;
            node_step(&mut h, stats, config.arity, rng)
        } else {
            edge_step(&h, stats, config.arity, rng)
        };

        let mut proposed_gl = gl.clone();
        update::apply_delta(&mut proposed_gl, &delta);
        let proposed_bins = bin_observed(&target, &proposal);

        let current_score = score(&bin_counts, &gl, &target);
        let proposed_score = score(&proposed_bins, &proposed_gl, &target);

        if proposed_score < current_score || rejections >= max_rejections {
            h = proposal;
            gl = proposed_gl;
            rejections = 0;
        } else {
            rejections += 1;
        }

        steps += 1;

        let sweep_interval = stats.mean_edges.round().max(1.0) as u64;
        if steps % sweep_interval == 0 && h.connected_components().len() > 1 {
            debug!(steps, "GRAIP connectivity sweep: restricting to largest component");
            h = h.largest_component();
            gl = graphlet::count(&h, config.arity);
        }
    }
}
