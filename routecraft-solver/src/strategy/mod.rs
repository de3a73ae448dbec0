//! Search strategies and the building blocks of ruin and recreate.
//!
//! The search loop sees a strategy only through [`SearchStrategy`]: a name
//! and a `run` over the solution pool. [`RuinAndRecreate`] composes the
//! selector, ruin, recreate and acceptor traits defined here into one such
//! strategy.

mod acceptor;
mod manager;
mod recreate;
mod ruin;
mod ruin_and_recreate;
mod selector;

use rand::RngCore;
use routecraft_core::{Solution, VehicleRoutingProblem};

pub use acceptor::{GreedyAcceptance, SolutionAcceptor};
pub use manager::SearchStrategyManager;
pub use recreate::{BestInsertion, Recreate};
pub use ruin::{RandomRuin, Ruin};
pub use ruin_and_recreate::{DEFAULT_UNASSIGNED_JOB_COST, RuinAndRecreate};
pub use selector::{SelectBest, SelectRandomly, SolutionSelector};

/// The working set of solutions mutated by strategies.
pub type SolutionPool = Vec<Solution>;

/// A unit of search work selected at random each iteration.
///
/// A strategy holds the pool only for the duration of [`Self::run`]. It
/// returns `true` when it produced a solution that its acceptance policy
/// admitted into the pool.
pub trait SearchStrategy {
    /// Identifier reported to listeners.
    fn name(&self) -> &str;

    /// Perform one step against `pool`.
    fn run(
        &mut self,
        problem: &VehicleRoutingProblem,
        pool: &mut SolutionPool,
        rng: &mut dyn RngCore,
    ) -> bool;
}
