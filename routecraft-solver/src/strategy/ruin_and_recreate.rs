//! Ruin and recreate as a search strategy.

use rand::RngCore;
use routecraft_core::{Solution, VehicleRoutingProblem};

use super::{Recreate, Ruin, SearchStrategy, SolutionAcceptor, SolutionPool, SolutionSelector};
use crate::solution_cost;

/// Cost charged per job left out of a solution unless configured otherwise.
pub const DEFAULT_UNASSIGNED_JOB_COST: f64 = 10_000.0;

/// Selects a solution, ruins a copy of it, rebuilds it and offers the result
/// to the acceptor.
///
/// With an empty pool the strategy builds from an empty solution, so the
/// same strategy serves as the construction heuristic. Every problem job
/// missing from the ruined copy is offered to the recreate step. The
/// rebuilt solution is costed as the sum of its route costs plus a charge for
/// each job that could not be inserted.
pub struct RuinAndRecreate<S, R, C, A> {
    name: String,
    selector: S,
    ruin: R,
    recreate: C,
    acceptor: A,
    unassigned_job_cost: f64,
}

impl<S, R, C, A> RuinAndRecreate<S, R, C, A>
where
    S: SolutionSelector,
    R: Ruin,
    C: Recreate,
    A: SolutionAcceptor,
{
    /// Compose a strategy named `name`.
    pub fn new(name: impl Into<String>, selector: S, ruin: R, recreate: C, acceptor: A) -> Self {
        Self {
            name: name.into(),
            selector,
            ruin,
            recreate,
            acceptor,
            unassigned_job_cost: DEFAULT_UNASSIGNED_JOB_COST,
        }
    }

    /// Override the charge for each job left out of a solution.
    #[must_use]
    pub fn with_unassigned_job_cost(mut self, cost: f64) -> Self {
        self.unassigned_job_cost = cost;
        self
    }

    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "penalty scales a floating-point cost by a small count"
    )]
    fn evaluate(&self, problem: &VehicleRoutingProblem, solution: &mut Solution, unassigned: usize) {
        let cost = solution_cost(problem, solution) + self.unassigned_job_cost * unassigned as f64;
        solution.set_cost(cost);
    }
}

impl<S, R, C, A> SearchStrategy for RuinAndRecreate<S, R, C, A>
where
    S: SolutionSelector,
    R: Ruin,
    C: Recreate,
    A: SolutionAcceptor,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn run(
        &mut self,
        problem: &VehicleRoutingProblem,
        pool: &mut SolutionPool,
        rng: &mut dyn RngCore,
    ) -> bool {
        let mut candidate = self
            .selector
            .select(pool, rng)
            .map_or_else(|| Solution::unevaluated(Vec::new()), Solution::copy_of);
        self.ruin.ruin(problem, &mut candidate, rng);

        let missing = problem
            .jobs()
            .iter()
            .filter(|job| !candidate.contains_job(job.id()))
            .cloned()
            .collect();
        let unassigned = self.recreate.recreate(problem, &mut candidate, missing, rng);
        self.evaluate(problem, &mut candidate, unassigned.len());
        log::debug!(
            "{} built a solution costing {} with {} unassigned jobs",
            self.name,
            candidate.reported_cost(),
            unassigned.len()
        );
        self.acceptor.accept(pool, candidate)
    }
}
