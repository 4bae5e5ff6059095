//! Target-network sampling (C5).
//!
//! A probabilistic target network doesn't have one "true" graph: each edge
//! realizes independently with its own probability. [`sample`] Monte Carlo
//! estimates the structural statistics (node/edge counts, degree
//! histogram, graphlet counts) that a realized, largest-component subgraph
//! would have, by drawing `n_trials` realizations and accumulating mean and
//! population standard deviation. [`sample_parallel`] does the same work
//! spread across a `rayon` thread pool, for trial counts large enough that
//! per-trial graphlet counting dominates. Grounded on `sample` in
//! `generator/sampling.py`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::GraipError;
use crate::graph::{Graph, NodeId};
use crate::graphlet::{self, Arity};

/// A target network together with each edge's independent realization
/// probability.
#[derive(Debug, Clone)]
pub struct TargetGraph {
    graph: Graph,
    probability: std::collections::HashMap<(NodeId, NodeId), f64>,
}

impl TargetGraph {
    /// Build a target graph, validating that every edge carries a
    /// probability in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`GraipError::BadTarget`] if an edge has no entry in
    /// `probability` or its value falls outside `[0, 1]`.
    pub fn new(
        graph: Graph,
        probability: std::collections::HashMap<(NodeId, NodeId), f64>,
    ) -> Result<Self, GraipError> {
        for (u, v) in graph.edges() {
            match probability.get(&(u, v)) {
                None => {
                    return Err(GraipError::BadTarget {
                        u,
                        v,
                        reason: "missing realization probability".to_string(),
                    })
                }
                Some(&p) if !(0.0..=1.0).contains(&p) => {
                    return Err(GraipError::BadTarget {
                        u,
                        v,
                        reason: format!("probability {p} is outside [0, 1]"),
                    })
                }
                Some(_) => {}
            }
        }
        Ok(Self { graph, probability })
    }

    /// The underlying (unrealized) graph topology.
    #[must_use]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// The realization probability of edge `(u, v)`, if it exists.
    #[must_use]
    pub fn probability(&self, u: NodeId, v: NodeId) -> Option<f64> {
        let key = if u < v { (u, v) } else { (v, u) };
        self.probability.get(&key).copied()
    }

    fn realize(&self, rng: &mut impl Rng) -> Graph {
        let mut g = Graph::with_nodes(self.graph.node_count());
        for (u, v) in self.graph.edges() {
            let p = self.probability[&(u, v)];
            if rng.gen_bool(p) {
                g.add_edge(u, v);
            }
        }
        g
    }
}

/// Mean and population standard deviation of the target network's
/// structural statistics, estimated over `n_trials` Monte Carlo
/// realizations. Serializable so a generator run can reuse a previously
/// computed estimate instead of resampling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetStats {
    pub arity: Arity,
    pub trials: usize,
    pub mean_nodes: f64,
    pub std_nodes: f64,
    pub mean_edges: f64,
    pub std_edges: f64,
    pub mean_graphlets: Vec<f64>,
    pub std_graphlets: Vec<f64>,
    pub mean_degree_hist: Vec<f64>,
    pub std_degree_hist: Vec<f64>,
}

impl TargetStats {
    /// Serialize to a binary blob.
    ///
    /// # Errors
    ///
    /// Returns an error if `bincode` fails to encode the statistics.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Deserialize a binary blob produced by [`Self::to_bytes`].
    ///
    /// # Errors
    ///
    /// Returns an error if `bytes` is not a valid encoding of `TargetStats`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }
}

fn population_std(sum: f64, sum_sq: f64, n: f64) -> f64 {
    let mean = sum / n;
    let variance = (sum_sq / n) - mean * mean;
    variance.max(0.0).sqrt()
}

/// Estimate target-network statistics from `n_trials` independent Bernoulli
/// realizations, each restricted to its largest connected component.
pub fn sample(target: &TargetGraph, n_trials: usize, arity: Arity, rng: &mut impl Rng) -> TargetStats {
    let n = n_trials as f64;
    let degree_len = target.graph.degree_histogram().len();
    let n_classes = arity.names().len();

    let mut sum_nodes = 0.0;
    let mut sum_nodes_sq = 0.0;
    let mut sum_edges = 0.0;
    let mut sum_edges_sq = 0.0;
    let mut sum_gl = vec![0.0; n_classes];
    let mut sum_gl_sq = vec![0.0; n_classes];
    let mut sum_deg = vec![0.0; degree_len];
    let mut sum_deg_sq = vec![0.0; degree_len];

    let tick = (n_trials / 10).max(1);

    for trial in 0..n_trials {
        let realized = target.realize(rng).largest_component();

        let nodes = realized.node_count() as f64;
        let edges = realized.edge_count() as f64;
        sum_nodes += nodes;
        sum_nodes_sq += nodes * nodes;
        sum_edges += edges;
        sum_edges_sq += edges * edges;

        let gl = graphlet::count(&realized, arity);
        for (i, &c) in gl.iter().enumerate() {
            let c = c as f64;
            sum_gl[i] += c;
            sum_gl_sq[i] += c * c;
        }

        let hist = realized.degree_histogram();
        for (i, slot) in sum_deg.iter_mut().enumerate() {
            let c = hist.get(i).copied().unwrap_or(0) as f64;
            *slot += c;
            sum_deg_sq[i] += c * c;
        }

        if (trial + 1) % tick == 0 {
            info!(
                percent = (trial + 1) * 100 / n_trials,
                trial = trial + 1,
                total = n_trials,
                "target sampling progress"
            );
        }
    }

    TargetStats {
        arity,
        trials: n_trials,
        mean_nodes: sum_nodes / n,
        std_nodes: population_std(sum_nodes, sum_nodes_sq, n),
        mean_edges: sum_edges / n,
        std_edges: population_std(sum_edges, sum_edges_sq, n),
        mean_graphlets: sum_gl.iter().map(|s| s / n).collect(),
        std_graphlets: (0..n_classes)
            .map(|i| population_std(sum_gl[i], sum_gl_sq[i], n))
            .collect(),
        mean_degree_hist: sum_deg.iter().map(|s| s / n).collect(),
        std_degree_hist: (0..degree_len)
            .map(|i| population_std(sum_deg[i], sum_deg_sq[i], n))
            .collect(),
    }
}

struct TrialStats {
    nodes: f64,
    edges: f64,
    gl: Vec<i64>,
    hist: Vec<usize>,
}

fn trial_stats(target: &TargetGraph, arity: Arity, rng: &mut impl Rng) -> TrialStats {
    let realized = target.realize(rng).largest_component();
    TrialStats {
        nodes: realized.node_count() as f64,
        edges: realized.edge_count() as f64,
        gl: graphlet::count(&realized, arity),
        hist: realized.degree_histogram(),
    }
}

fn accumulate(trials: Vec<TrialStats>, arity: Arity, degree_len: usize) -> TargetStats {
    let n = trials.len() as f64;
    let n_classes = arity.names().len();

    let mut sum_nodes = 0.0;
    let mut sum_nodes_sq = 0.0;
    let mut sum_edges = 0.0;
    let mut sum_edges_sq = 0.0;
    let mut sum_gl = vec![0.0; n_classes];
    let mut sum_gl_sq = vec![0.0; n_classes];
    let mut sum_deg = vec![0.0; degree_len];
    let mut sum_deg_sq = vec![0.0; degree_len];

    for t in &trials {
        sum_nodes += t.nodes;
        sum_nodes_sq += t.nodes * t.nodes;
        sum_edges += t.edges;
        sum_edges_sq += t.edges * t.edges;
        for (i, &c) in t.gl.iter().enumerate() {
            let c = c as f64;
            sum_gl[i] += c;
            sum_gl_sq[i] += c * c;
        }
        for i in 0..degree_len {
            let c = t.hist.get(i).copied().unwrap_or(0) as f64;
            sum_deg[i] += c;
            sum_deg_sq[i] += c * c;
        }
    }

    TargetStats {
        arity,
        trials: trials.len(),
        mean_nodes: sum_nodes / n,
        std_nodes: population_std(sum_nodes, sum_nodes_sq, n),
        mean_edges: sum_edges / n,
        std_edges: population_std(sum_edges, sum_edges_sq, n),
        mean_graphlets: sum_gl.iter().map(|s| s / n).collect(),
        std_graphlets: (0..n_classes)
            .map(|i| population_std(sum_gl[i], sum_gl_sq[i], n))
            .collect(),
        mean_degree_hist: sum_deg.iter().map(|s| s / n).collect(),
        std_degree_hist: (0..degree_len)
            .map(|i| population_std(sum_deg[i], sum_deg_sq[i], n))
            .collect(),
    }
}

/// Parallel variant of [`sample`] for large trial counts. Trials are
/// independent, so each is run on its own RNG seeded from a value drawn off
/// `rng` up front; the draw order (and so the result, for a fixed seed) is
/// independent of the thread pool's size, but does not match `sample`'s
/// trial-by-trial accumulation.
pub fn sample_parallel(
    target: &TargetGraph,
    n_trials: usize,
    arity: Arity,
    rng: &mut impl Rng,
) -> TargetStats {
    let degree_len = target.graph.degree_histogram().len();
    let seeds: Vec<u64> = (0..n_trials).map(|_| rng.gen()).collect();

    let trials: Vec<TrialStats> = seeds
        .par_iter()
        .map(|&seed| {
            let mut trial_rng = StdRng::seed_from_u64(seed);
            trial_stats(target, arity, &mut trial_rng)
        })
        .collect();

    accumulate(trials, arity, degree_len)
}
