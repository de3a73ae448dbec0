//! Search machinery for vehicle routing problems.
//!
//! [`SearchLoop`] repeatedly draws a [`SearchStrategy`] by weight from a
//! [`SearchStrategyManager`] and lets it work on a pool of solutions while
//! [`AlgorithmListener`]s observe the run. The bundled strategy,
//! [`RuinAndRecreate`], removes jobs from a selected solution and reinserts
//! them with a [`JobInsertionCalculator`].
//!
//! Two calculators are provided. [`ServiceInsertionCalculator`] prices every
//! position for a fixed departure time. [`TimeSchedulingInsertionCalculator`]
//! wraps any calculator and additionally probes earlier and later route
//! departures, which pays off when travel costs depend on the time of day.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod algorithm;
mod error;
pub mod insertion;
mod listener;
mod solutions;
pub mod strategy;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use algorithm::{IterationCounter, LoopState, SearchLoop, SearchLoopConfig};
pub use error::{AlgorithmError, MAX_PROBABILITY_SUM, MIN_PROBABILITY_SUM, StrategyError};
pub use insertion::{
    Insertion, InsertionData, JobInsertionCalculator, ServiceInsertionCalculator,
    TimeSchedulingConfig, TimeSchedulingInsertionCalculator, departure_times,
};
pub use listener::{AlgorithmListener, AlgorithmListeners};
pub use solutions::{best_solution, solution_cost};
pub use strategy::{
    BestInsertion, DEFAULT_UNASSIGNED_JOB_COST, GreedyAcceptance, RandomRuin, Recreate, Ruin,
    RuinAndRecreate, SearchStrategy, SearchStrategyManager, SelectBest, SelectRandomly,
    SolutionAcceptor, SolutionPool, SolutionSelector,
};
