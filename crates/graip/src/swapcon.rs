//! SwapCon: configuration-model seeding followed by simulated-annealing
//! double-edge swaps (C8).
//!
//! Builds a configuration-model graph from a degree sequence drawn from
//! the target's degree distribution, then repeatedly swaps two disjoint
//! edges `(n1,n2)`, `(n3,n4)` to `(n1,n4)`, `(n2,n3)`, accepting the swap
//! via Metropolis criterion on an energy measuring distance from the
//! target graphlet counts, with geometric cooling. Grounded on `SwapCon`
//! in `generator/models.py`.

use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info, instrument};

use crate::error::{GraipError, StopReason};
use crate::graph::{Graph, NodeId};
use crate::graphlet::{self, Arity};
use crate::sample::TargetStats;
use crate::update;

/// Driver parameters. `max_rejections` falls back to `round(E_e)` when
/// left `None`.
#[derive(Debug, Clone)]
pub struct SwapConConfig {
    pub arity: Arity,
    pub temperature: f64,
    pub cooling: f64,
    pub threshold: f64,
    pub max_rejections: Option<u64>,
}

impl SwapConConfig {
    /// Defaults matching the reference implementation.
    #[must_use]
    pub fn defaults(arity: Arity) -> Self {
        Self {
            arity,
            temperature: 0.01,
            cooling: 0.99,
            threshold: 0.05,
            max_rejections: None,
        }
    }
}

/// Outcome of a [`generate`] run.
#[derive(Debug, Clone)]
pub struct SwapConResult {
    pub graph: Graph,
    pub stop_reason: StopReason,
    pub steps: u64,
}

fn is_graphical(seq: &[usize]) -> bool {
    let sum: usize = seq.iter().sum();
    if sum % 2 != 0 {
        return false;
    }
    let mut sorted = seq.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    let n = sorted.len();
    let mut prefix = vec![0usize; n + 1];
    for i in 0..n {
        prefix[i + 1] = prefix[i] + sorted[i];
    }
    for k in 1..=n {
        let lhs = prefix[k];
        let mut rhs = k * (k.saturating_sub(1));
        for &d in &sorted[k..] {
            rhs += d.min(k);
        }
        if lhs > rhs {
            return false;
        }
    }
    true
}

/// Repeatedly draw a length-`n` degree sequence from `(values, probs)`
/// until the draw is graphical.
fn generate_stubs(
    values: &[usize],
    probs: &[f64],
    n: usize,
    rng: &mut impl Rng,
) -> Result<Vec<usize>, GraipError> {
    let dist = WeightedIndex::new(probs).expect("degree distribution has positive mass");
    for _ in 0..1000 {
        let seq: Vec<usize> = (0..n).map(|_| values[dist.sample(rng)]).collect();
        if is_graphical(&seq) {
            return Ok(seq);
        }
    }
    Err(GraipError::NotGraphical {
        n,
        sum: values.iter().sum::<usize>() as u64,
    })
}

/// Pair stubs into a simple graph via the configuration model, restarting
/// from scratch if pairing gets stuck (100 consecutive failed picks), and
/// giving up after 100 restarts.
fn build_from_stubs(stubs: &[usize], rng: &mut impl Rng) -> Result<Graph, GraipError> {
    let n = stubs.len();
    for _ in 0..100 {
        let mut remaining = stubs.to_vec();
        let mut g = Graph::with_nodes(n);
        let mut consecutive_failures = 0u32;
        let mut stuck = false;

        while remaining.iter().any(|&r| r > 0) {
            let candidates: Vec<NodeId> = (0..n as NodeId)
                .filter(|&v| remaining[v as usize] > 0)
                .collect();
            if candidates.len() < 2 {
                stuck = true;
                break;
            }
            let weights: Vec<usize> = candidates.iter().map(|&v| remaining[v as usize]).collect();
            let dist = WeightedIndex::new(&weights).expect("remaining stubs are positive");
            let a = candidates[dist.sample(rng)];
            let b = candidates[dist.sample(rng)];

            if a == b || g.has_edge(a, b) {
                consecutive_failures += 1;
                if consecutive_failures >= 100 {
                    stuck = true;
                    break;
                }
                continue;
            }

            g.add_edge(a, b);
            remaining[a as usize] -= 1;
            remaining[b as usize] -= 1;
            consecutive_failures = 0;
        }

        if !stuck {
            return Ok(g);
        }
    }
    Err(GraipError::StuckStubs { attempts: 100 })
}

fn energy(gl: &[i64], target: &[f64]) -> f64 {
    let n = gl.len() as f64;
    let mut total = 0.0;
    for (&c, &e) in gl.iter().zip(target) {
        let c = c as f64;
        if c + e != 0.0 {
            total += (c - e).abs() / (c + e);
        }
    }
    total / n
}

fn try_swap(g: &Graph, rng: &mut impl Rng) -> Option<(NodeId, NodeId, NodeId, NodeId)> {
    let edges: Vec<(NodeId, NodeId)> = g.edges().collect();
    if edges.len() < 2 {
        return None;
    }
    for _ in 0..64 {
        let &(n1, n2) = edges.choose(rng)?;
        let &(n3, n4) = edges.choose(rng)?;
        if n1 == n3 || n1 == n4 || n2 == n3 || n2 == n4 {
            continue;
        }
        if g.has_edge(n1, n4) || g.has_edge(n2, n3) {
            continue;
        }
        return Some((n1, n2, n3, n4));
    }
    None
}

fn apply_swap(
    g: &mut Graph,
    arity: Arity,
    swap: (NodeId, NodeId, NodeId, NodeId),
) -> Vec<i64> {
    let (n1, n2, n3, n4) = swap;
    let mut delta = vec![0i64; arity.names().len()];

    g.remove_edge(n1, n2);
    update::apply_delta(&mut delta, &update::edge_removed(g, n1, n2, arity));
    g.remove_edge(n3, n4);
    update::apply_delta(&mut delta, &update::edge_removed(g, n3, n4, arity));
    g.add_edge(n1, n4);
    update::apply_delta(&mut delta, &update::edge_added(g, n1, n4, arity));
    g.add_edge(n2, n3);
    update::apply_delta(&mut delta, &update::edge_added(g, n2, n3, arity));

    delta
}

/// Seed a configuration-model graph from `(degree_values, degree_probs)`
/// and anneal it toward the target graphlet counts in `stats`.
///
/// # Errors
///
/// Returns [`GraipError::NotGraphical`] if no graphical degree sequence
/// was drawn in 1000 attempts, or [`GraipError::StuckStubs`] if stub
/// pairing could not complete in 100 restarts.
#[instrument(skip(stats, degree_values, degree_probs, rng))]
pub fn generate(
    stats: &TargetStats,
    degree_values: &[usize],
    degree_probs: &[f64],
    config: &SwapConConfig,
    rng: &mut impl Rng,
) -> Result<SwapConResult, GraipError> {
    let n = stats.mean_nodes.round().max(1.0) as usize;
    let stubs = generate_stubs(degree_values, degree_probs, n, rng)?;
    let mut g = build_from_stubs(&stubs, rng)?;
    let mut gl = graphlet::count(&g, config.arity);

    let max_rejections = config
        .max_rejections
        .unwrap_or_else(|| stats.mean_edges.round().max(1.0) as u64);
    let mut temperature = config.temperature;
    let mut rejections = 0u64;
    let mut steps = 0u64;

    loop {
        let e_h = energy(&gl, &stats.mean_graphlets);
        if e_h <= config.threshold {
            info!(steps, energy = e_h, "SwapCon reached energy threshold");
            return Ok(SwapConResult {
                graph: g.largest_component(),
                stop_reason: StopReason::EnergyThresholdReached,
                steps,
            });
        }
        if rejections >= max_rejections {
            info!(steps, "SwapCon stopped: rejection budget exhausted");
            return Ok(SwapConResult {
                graph: g.largest_component(),
                stop_reason: StopReason::MaxRejectionsReached,
                steps,
            });
        }

        let Some(swap) = try_swap(&g, rng) else {
            debug!(steps, "SwapCon: no eligible swap found, stopping");
            return Ok(SwapConResult {
                graph: g.largest_component(),
                stop_reason: StopReason::MaxRejectionsReached,
                steps,
            });
        };

        let mut proposal = g.clone();
        let delta = apply_swap(&mut proposal, config.arity, swap);
        let mut proposed_gl = gl.clone();
        update::apply_delta(&mut proposed_gl, &delta);
        let e_t = energy(&proposed_gl, &stats.mean_graphlets);

        let accept = e_t < e_h || rng.gen::<f64>() < ((e_h - e_t) / temperature.max(1e-9)).exp();
        if accept {
            g = proposal;
            gl = proposed_gl;
            rejections = 0;
        } else {
            rejections += 1;
        }

        temperature = (temperature * config.cooling).max(1e-6);
        steps += 1;
    }
}
