//! graip: a deterministic graph-sample generator that reproduces the
//! structural statistics of a probabilistic target network.
//!
//! # Conventions
//!
//! - Every fallible public entry point returns `Result<_, GraipError>`
//!   ([`error`]); non-fatal budget exhaustion is reported via
//!   [`error::StopReason`] alongside a still-usable graph, not as an `Err`.
//! - Randomness is always taken as `&mut impl rand::Rng` so callers control
//!   seeding and reproducibility; nothing in this crate seeds its own RNG.
//! - Graphs are the dense, `Vec`-indexed [`graph::Graph`] (C1) throughout;
//!   node ids are never reused, even across a rejected proposal.
//! - Instrumented with `tracing`; callers wanting progress output install a
//!   subscriber (see `tracing_subscriber::fmt`).
//!
//! # Pipeline
//!
//! 1. [`sample::TargetGraph`] wraps a target network and its per-edge
//!    realization probabilities.
//! 2. [`sample::sample`] Monte Carlo samples it into [`sample::TargetStats`],
//!    the summary statistics both generators reproduce.
//! 3. [`graip::generate`] (score-guided incremental growth) or
//!    [`swapcon::generate`] (configuration-model seed plus simulated
//!    annealing) turn those statistics into a single sample graph.

pub mod binning;
pub mod error;
pub mod graip;
pub mod graph;
pub mod graphlet;
pub mod orient;
pub mod sample;
pub mod score;
mod seed;
pub mod swapcon;
pub mod update;

pub use error::GraipError;
pub use graph::{Graph, NodeId};
