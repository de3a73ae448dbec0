//! The iterative search loop.
//!
//! Each iteration draws one strategy by weight, lets it work on the solution
//! pool and notifies the listeners. The run ends after a fixed number of
//! iterations, or earlier once too many consecutive iterations have passed
//! without an accepted solution.

mod counter;

use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use routecraft_core::{Solution, VehicleRoutingProblem};

pub use counter::IterationCounter;

use crate::error::{MAX_PROBABILITY_SUM, MIN_PROBABILITY_SUM};
use crate::{AlgorithmError, AlgorithmListener, AlgorithmListeners, SearchStrategyManager};

/// Settings of [`SearchLoop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchLoopConfig {
    /// Maximum number of iterations.
    pub iterations: usize,
    /// Stop once more than this many consecutive iterations found nothing.
    /// `None` never stops early.
    pub premature_break: Option<usize>,
    /// Seed of the loop's random source.
    pub seed: u64,
}

impl Default for SearchLoopConfig {
    fn default() -> Self {
        Self {
            iterations: 100,
            premature_break: None,
            seed: 1,
        }
    }
}

/// Lifecycle of a [`SearchLoop`] run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    /// `search_solutions` has not been called.
    #[default]
    NotStarted,
    /// Iterations are in progress.
    Running,
    /// Every configured iteration ran.
    Completed,
    /// The premature-break threshold was exceeded.
    BrokenEarly,
}

/// Drives search strategies over a solution pool.
///
/// The loop owns its strategies, listeners and random source. The pool is
/// handed to one strategy at a time; listeners only ever see it read-only.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use routecraft_core::VehicleRoutingProblem;
/// use routecraft_core::test_support::{EuclideanCosts, job_at, vehicle_at};
/// use routecraft_solver::{
///     BestInsertion, GreedyAcceptance, RandomRuin, RuinAndRecreate, SearchLoop,
///     SearchStrategyManager, SelectBest, ServiceInsertionCalculator, best_solution,
/// };
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let problem = VehicleRoutingProblem::builder()
///     .add_vehicle(vehicle_at("v", 0.0))
///     .add_jobs([job_at("a", 1.0), job_at("b", 2.0)])
///     .transport_costs(Arc::new(EuclideanCosts))
///     .build()?;
/// let strategy = RuinAndRecreate::new(
///     "random_ruin",
///     SelectBest,
///     RandomRuin::new(0.5),
///     BestInsertion::new(ServiceInsertionCalculator::new(problem.shared_transport_costs())),
///     GreedyAcceptance::new(1),
/// );
/// let manager = SearchStrategyManager::new().with_strategy(strategy, 1.0)?;
/// let mut search = SearchLoop::new(problem, manager);
/// search.set_iterations(10);
/// let solutions = search.search_solutions()?;
/// assert_eq!(best_solution(&solutions).and_then(|s| s.cost()), Some(4.0));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SearchLoop {
    problem: VehicleRoutingProblem,
    config: SearchLoopConfig,
    strategy_manager: SearchStrategyManager,
    listeners: AlgorithmListeners,
    initial_solutions: Vec<Solution>,
    counter: IterationCounter,
    state: LoopState,
    rng: ChaCha8Rng,
}

impl SearchLoop {
    /// A loop over `problem` with default settings.
    pub fn new(problem: VehicleRoutingProblem, strategy_manager: SearchStrategyManager) -> Self {
        Self::with_config(problem, strategy_manager, SearchLoopConfig::default())
    }

    /// A loop over `problem` with explicit settings.
    pub fn with_config(
        problem: VehicleRoutingProblem,
        strategy_manager: SearchStrategyManager,
        config: SearchLoopConfig,
    ) -> Self {
        Self {
            problem,
            config,
            strategy_manager,
            listeners: AlgorithmListeners::new(),
            initial_solutions: Vec::new(),
            counter: IterationCounter::new("iterations"),
            state: LoopState::NotStarted,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
        }
    }

    /// Seed the pool of the next run with `solution`.
    pub fn add_initial_solution(&mut self, solution: Solution) {
        self.initial_solutions.push(solution);
    }

    /// Set the iteration budget.
    pub const fn set_iterations(&mut self, iterations: usize) {
        self.config.iterations = iterations;
    }

    /// Set or clear the premature-break threshold.
    pub const fn set_premature_break(&mut self, threshold: Option<usize>) {
        self.config.premature_break = threshold;
    }

    /// Register a listener after every earlier one.
    pub fn add_listener<L: AlgorithmListener + 'static>(&mut self, listener: L) {
        self.listeners.add(listener);
    }

    /// The registered listeners.
    pub const fn listeners_mut(&mut self) -> &mut AlgorithmListeners {
        &mut self.listeners
    }

    /// The problem being solved.
    pub const fn problem(&self) -> &VehicleRoutingProblem {
        &self.problem
    }

    /// Active settings.
    pub const fn config(&self) -> &SearchLoopConfig {
        &self.config
    }

    /// The registered strategies.
    pub const fn strategy_manager(&self) -> &SearchStrategyManager {
        &self.strategy_manager
    }

    /// Mutable access to the registered strategies.
    pub const fn strategy_manager_mut(&mut self) -> &mut SearchStrategyManager {
        &mut self.strategy_manager
    }

    /// Where the most recent run stands.
    pub const fn state(&self) -> LoopState {
        self.state
    }

    /// Iterations counted by the most recent run.
    pub const fn iteration_counter(&self) -> u64 {
        self.counter.count()
    }

    fn verify(&self) -> Result<(), AlgorithmError> {
        if self.strategy_manager.is_empty() {
            return Err(AlgorithmError::NoStrategies);
        }
        let sum = self.strategy_manager.probability_sum();
        if !(MIN_PROBABILITY_SUM..=MAX_PROBABILITY_SUM).contains(&sum) {
            return Err(AlgorithmError::ProbabilitySum { sum });
        }
        Ok(())
    }

    /// Run the search and return the final pool.
    ///
    /// # Errors
    /// Returns [`AlgorithmError`] when no strategy is registered or the
    /// strategy probabilities do not sum to one within 1 %. Nothing runs
    /// and no listener is notified in that case.
    pub fn search_solutions(&mut self) -> Result<Vec<Solution>, AlgorithmError> {
        self.verify()?;
        let started = Instant::now();
        log::info!("algorithm starts");
        self.state = LoopState::Running;
        self.counter.reset();
        let mut solutions = self.initial_solutions.clone();
        if !self.listeners.is_empty() {
            log::debug!("notifying {} listeners", self.listeners.len());
        }
        let mut listeners = std::mem::take(&mut self.listeners);
        listeners.algorithm_starts(&self.problem, self, &solutions);
        self.listeners = listeners;
        log::info!("iterations start");

        let mut without_improvement = 0_usize;
        for iteration in 1..=self.config.iterations {
            self.listeners
                .iteration_starts(iteration, &self.problem, &solutions);
            self.counter.increment();

            // `verify` guarantees a draw.
            let Some(strategy) = self.strategy_manager.random_strategy(&mut self.rng) else {
                log::warn!("no strategy could be drawn at iteration {iteration}");
                break;
            };
            let found = strategy.run(&self.problem, &mut solutions, &mut self.rng);
            log::debug!(
                "iteration {iteration}: strategy {} found={found}",
                strategy.name()
            );
            self.listeners
                .selected_strategy(strategy.name(), &self.problem, &solutions);

            without_improvement = if found { 0 } else { without_improvement + 1 };
            if self
                .config
                .premature_break
                .is_some_and(|threshold| without_improvement > threshold)
            {
                log::info!("premature break at iteration {iteration}");
                self.state = LoopState::BrokenEarly;
                break;
            }
            self.listeners
                .iteration_ends(iteration, &self.problem, &solutions);
        }

        if self.state == LoopState::Running {
            self.state = LoopState::Completed;
        }
        log::info!("iterations end at {} iterations", self.counter.count());
        self.listeners.algorithm_ends(&self.problem, &solutions);
        log::info!("total time: {:.3}s", started.elapsed().as_secs_f64());
        Ok(solutions)
    }
}
