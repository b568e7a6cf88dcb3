use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouteError {
    /// A cycle with negative total duration is reachable from `origin`.
    #[error("negative cycle detected, reachable from {origin}")]
    NegativeCycleDetected { origin: String },
}

/// Rejected form or command-line input, raised before anything reaches the graph.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("missing {0}")]
    MissingField(&'static str),

    #[error("flight duration must be a number, got {0:?}")]
    InvalidDuration(String),

    #[error("expected SRC,DST,DURATION, got {0:?}")]
    MalformedFlight(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EpidemicError {
    #[error("degree {degree} must be smaller than the node count {nodes}")]
    DegreeTooLarge { degree: usize, nodes: usize },

    #[error("no simple regular graph found after {attempts} attempts")]
    GenerationFailed { attempts: usize },

    #[error("transmission probability must lie in [0, 1], got {0}")]
    InvalidProbability(f64),
}
