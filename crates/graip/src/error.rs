//! Error types for graip.
//!
//! Every error explains what went wrong, why, and how to fix it, following
//! the same Error/Cause/Fix convention used across this workspace. Each
//! variant carries a stable `E####` code for programmatic handling.

/// Machine-readable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    BadTarget,
    BadArity,
    BadInputs,
    NotGraphical,
    MaxStepsReached,
    StuckStubs,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::BadTarget => "E1001",
            Self::BadArity => "E1002",
            Self::BadInputs => "E1003",
            Self::NotGraphical => "E1004",
            Self::MaxStepsReached => "E1005",
            Self::StuckStubs => "E1006",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors that can occur while counting graphlets, sampling a target
/// network, or generating a sample graph.
#[derive(Debug, thiserror::Error)]
pub enum GraipError {
    /// A target graph edge is missing its realization probability.
    #[error(
        "Error: Edge ({u}, {v}) has no realization probability\nCause: {reason}\nFix: Every edge in a target network must carry a probability in [0, 1] before sampling or generation can run."
    )]
    BadTarget {
        /// One endpoint of the offending edge.
        u: u32,
        /// The other endpoint.
        v: u32,
        /// What was wrong with it (missing, out of range, etc).
        reason: String,
    },

    /// An unsupported graphlet arity was requested.
    #[error(
        "Error: Graphlet size {requested} is not supported\nCause: Exact counting is only implemented for 3, 4, and 5-node graphlets\nFix: Pass one of Arity::Three, Arity::Four, or Arity::Five."
    )]
    BadArity {
        /// The requested (invalid) size.
        requested: usize,
    },

    /// Neither a cached statistics blob nor a sample count was given.
    #[error(
        "Error: No way to obtain target statistics\nCause: {reason}\nFix: Pass a sample count N to compute statistics from the target network, or a previously saved statistics blob."
    )]
    BadInputs {
        /// Which combination of inputs was missing.
        reason: String,
    },

    /// A requested degree sequence cannot be realized by any simple graph.
    #[error(
        "Error: Degree sequence is not graphical\nCause: No simple graph on {n} nodes realizes the drawn sequence (sum {sum} is odd, or it fails the Erdos-Gallai condition)\nFix: This is retried internally with a fresh draw; report a bug if it escapes to a caller."
    )]
    NotGraphical {
        /// Number of nodes in the attempted sequence.
        n: usize,
        /// Sum of the attempted degree sequence.
        sum: u64,
    },

    /// A configuration-model construction could not place remaining stubs
    /// without creating a self-loop or parallel edge, even after retrying.
    #[error(
        "Error: Stub pairing got stuck after {attempts} attempts\nCause: The remaining stub multiset cannot be paired without a self-loop or parallel edge\nFix: This is retried internally by restarting the pairing from scratch; report a bug if it escapes to a caller."
    )]
    StuckStubs {
        /// How many consecutive pairing attempts failed before giving up.
        attempts: u32,
    },
}

impl GraipError {
    /// Machine-readable error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::BadTarget { .. } => ErrorCode::BadTarget.code(),
            Self::BadArity { .. } => ErrorCode::BadArity.code(),
            Self::BadInputs { .. } => ErrorCode::BadInputs.code(),
            Self::NotGraphical { .. } => ErrorCode::NotGraphical.code(),
            Self::StuckStubs { .. } => ErrorCode::StuckStubs.code(),
        }
    }
}

/// Not a failure: a driver stopped because it ran out of budget, not because
/// it reached a passing score. Surfaced alongside the returned graph rather
/// than as an `Err`, since the graph is still usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Every binned degree probability and graphlet count landed within
    /// its target bounds.
    Converged,
    /// The step budget was exhausted before convergence.
    MaxStepsReached,
    /// The reject counter reached its budget before convergence (GRAIP).
    MaxRejectionsReached,
    /// The temperature-threshold energy target was reached (SwapCon).
    EnergyThresholdReached,
}
