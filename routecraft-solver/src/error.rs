//! Configuration errors raised by the search.

use thiserror::Error;

/// Lower bound of the accepted probability sum.
pub const MIN_PROBABILITY_SUM: f64 = 0.99;

/// Upper bound of the accepted probability sum.
pub const MAX_PROBABILITY_SUM: f64 = 1.01;

/// Errors returned when registering a strategy.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StrategyError {
    /// The selection probability lies outside `(0, 1]`.
    #[error("strategy {name} has probability {probability}, expected a value in (0, 1]")]
    InvalidProbability {
        /// Strategy name.
        name: String,
        /// Rejected probability.
        probability: f64,
    },
}

/// Fatal configuration errors detected before the search starts.
///
/// No listener is notified and no iteration runs when one of these is
/// returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AlgorithmError {
    /// No strategy was registered.
    #[error("no search strategy registered")]
    NoStrategies,
    /// Strategy probabilities do not sum to one within tolerance.
    #[error("strategy probabilities sum to {sum}, expected a value in [0.99, 1.01]")]
    ProbabilitySum {
        /// Observed sum.
        sum: f64,
    },
}
