//! Bitmask encoding and classification of small ordered vertex tuples.
//!
//! A tuple of `k` node positions is encoded as a `u16`: bit `j*(j-1)/2+i` is
//! set iff an edge exists between positions `i < j`. This is the same
//! encoding the exact counters (C3) and incremental updater (C4) both use to
//! turn "which edges exist among these k nodes" into a table lookup against
//! [`super::tables`].

use std::collections::HashMap;
use std::sync::LazyLock;

use super::tables::{CODES_3, CODES_4, CODES_5};
use crate::graph::{Graph, NodeId};

fn bit(i: usize, j: usize) -> u32 {
    debug_assert!(i < j);
    (j * (j - 1) / 2 + i) as u32
}

/// Encode the induced subgraph on `nodes` (read in the given order) as a
/// bitmask.
#[must_use]
pub fn encode(g: &Graph, nodes: &[NodeId]) -> u16 {
    let mut code = 0u16;
    for j in 1..nodes.len() {
        for i in 0..j {
            if g.has_edge(nodes[i], nodes[j]) {
                code |= 1 << bit(i, j);
            }
        }
    }
    code
}

/// Extend a code computed for `nodes[..nodes.len() - 1]` by the edges the
/// newly appended last element of `nodes` makes with every prior position.
#[must_use]
pub fn extend(code: u16, g: &Graph, nodes: &[NodeId]) -> u16 {
    let j = nodes.len() - 1;
    let mut out = code;
    for i in 0..j {
        if g.has_edge(nodes[i], nodes[j]) {
            out |= 1 << bit(i, j);
        }
    }
    out
}

/// Toggle the bit for the edge between positions `i` and `j` (order
/// irrelevant).
#[must_use]
pub fn toggle_edge(code: u16, i: usize, j: usize) -> u16 {
    let (i, j) = if i < j { (i, j) } else { (j, i) };
    code ^ (1 << bit(i, j))
}

fn build_lookup(tables: &[&[(&'static str, &'static [u16])]]) -> HashMap<u16, &'static str> {
    let mut map = HashMap::new();
    for table in tables {
        for (name, codes) in *table {
            for &c in *codes {
                map.insert(c, *name);
            }
        }
    }
    map
}

static LOOKUP_3: LazyLock<HashMap<u16, &'static str>> = LazyLock::new(|| build_lookup(&[CODES_3]));
static LOOKUP_4: LazyLock<HashMap<u16, &'static str>> =
    LazyLock::new(|| build_lookup(&[CODES_3, CODES_4]));
static LOOKUP_5: LazyLock<HashMap<u16, &'static str>> =
    LazyLock::new(|| build_lookup(&[CODES_3, CODES_4, CODES_5]));

/// Graphlet class names for 4-node enumeration, in fixed external order,
/// cumulative from 3-node classes up.
pub static FOUR_NAMES: &[&str] = &[
    "wedge",
    "triangle",
    "4star",
    "4path",
    "tailed_tri",
    "4cycle",
    "diamond",
    "4clique",
];

/// Graphlet class names for 5-node enumeration, in fixed external order,
/// cumulative from 4-node classes up. This is also the row/column order of
/// [`super::tables::TRANSFORM_5`] restricted to its 5-node-only suffix.
pub static FIVE_NAMES: &[&str] = &[
    "wedge",
    "triangle",
    "4star",
    "4path",
    "tailed_tri",
    "4cycle",
    "diamond",
    "4clique",
    "5star",
    "prong",
    "5path",
    "fork_tailed_tri",
    "long_tailed_tri",
    "double_tailed_tri",
    "tailed_cycle",
    "5cycle",
    "hourglass",
    "cobra",
    "stingray",
    "hatted_cycle",
    "three_wedge",
    "three_tri",
    "tailed_clique",
    "triangle_strip",
    "diamond_wedge",
    "wheel",
    "hatted_clique",
    "bipyramid",
    "5clique",
];

/// Graphlet class names for 3-node enumeration, in fixed external order.
pub static THREE_NAMES: &[&str] = &["wedge", "triangle"];

/// The maximum graphlet size an enumeration or update targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Arity {
    Three,
    Four,
    Five,
}

impl Arity {
    /// Graphlet class names, in fixed external order, cumulative from
    /// 3-node classes up through `self`.
    #[must_use]
    pub fn names(self) -> &'static [&'static str] {
        match self {
            Arity::Three => THREE_NAMES,
            Arity::Four => FOUR_NAMES,
            Arity::Five => FIVE_NAMES,
        }
    }

    /// Largest graphlet size, in nodes, this arity enumerates.
    #[must_use]
    pub fn max_size(self) -> usize {
        match self {
            Arity::Three => 3,
            Arity::Four => 4,
            Arity::Five => 5,
        }
    }

    /// Graphlet sizes this arity counts, cumulative from 3 up to
    /// `max_size()`.
    #[must_use]
    pub fn sizes(self) -> &'static [usize] {
        match self {
            Arity::Three => &[3],
            Arity::Four => &[3, 4],
            Arity::Five => &[3, 4, 5],
        }
    }
}

/// Classify a bitmask code against the class table for `arity`. Returns
/// `None` if the induced subgraph it encodes is disconnected (no class
/// claims that code).
#[must_use]
pub fn classify(arity: Arity, code: u16) -> Option<&'static str> {
    let lookup = match arity {
        Arity::Three => &*LOOKUP_3,
        Arity::Four => &*LOOKUP_4,
        Arity::Five => &*LOOKUP_5,
    };
    lookup.get(&code).copied()
}
