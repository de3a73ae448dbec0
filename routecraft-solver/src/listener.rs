//! Observation of the search loop.
//!
//! Listeners are notified synchronously, in registration order, at five
//! points of a run. They see the solution pool read-only.

use std::fmt;

use routecraft_core::{Solution, VehicleRoutingProblem};

use crate::SearchLoop;

/// Callbacks fired by [`SearchLoop`](crate::SearchLoop).
///
/// All methods default to no-ops so implementations override only what they
/// need.
pub trait AlgorithmListener {
    /// A short identifier for logging.
    fn name(&self) -> &str {
        "AlgorithmListener"
    }

    /// Before the first iteration, with the initial pool.
    ///
    /// `search` is the running loop; its own listener set is detached for
    /// the duration of this call.
    fn algorithm_starts(
        &mut self,
        _problem: &VehicleRoutingProblem,
        _search: &SearchLoop,
        _solutions: &[Solution],
    ) {
    }

    /// At the start of iteration `iteration`, counted from one.
    fn iteration_starts(
        &mut self,
        _iteration: usize,
        _problem: &VehicleRoutingProblem,
        _solutions: &[Solution],
    ) {
    }

    /// After the strategy drawn for this iteration has run.
    fn selected_strategy(
        &mut self,
        _strategy: &str,
        _problem: &VehicleRoutingProblem,
        _solutions: &[Solution],
    ) {
    }

    /// At the end of iteration `iteration`.
    ///
    /// Not fired for the iteration that triggers a premature break.
    fn iteration_ends(
        &mut self,
        _iteration: usize,
        _problem: &VehicleRoutingProblem,
        _solutions: &[Solution],
    ) {
    }

    /// After the last iteration, however the loop ended.
    fn algorithm_ends(&mut self, _problem: &VehicleRoutingProblem, _solutions: &[Solution]) {}
}

/// Ordered, append-only set of listeners owned by one loop.
#[derive(Default)]
pub struct AlgorithmListeners {
    listeners: Vec<Box<dyn AlgorithmListener>>,
}

impl AlgorithmListeners {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `listener`; it is notified after every earlier one.
    pub fn add<L: AlgorithmListener + 'static>(&mut self, listener: L) {
        self.listeners.push(Box::new(listener));
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Whether no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl AlgorithmListener for AlgorithmListeners {
    fn name(&self) -> &str {
        "AlgorithmListeners"
    }

    fn algorithm_starts(
        &mut self,
        problem: &VehicleRoutingProblem,
        search: &SearchLoop,
        solutions: &[Solution],
    ) {
        for listener in &mut self.listeners {
            listener.algorithm_starts(problem, search, solutions);
        }
    }

    fn iteration_starts(
        &mut self,
        iteration: usize,
        problem: &VehicleRoutingProblem,
        solutions: &[Solution],
    ) {
        for listener in &mut self.listeners {
            listener.iteration_starts(iteration, problem, solutions);
        }
    }

    fn selected_strategy(
        &mut self,
        strategy: &str,
        problem: &VehicleRoutingProblem,
        solutions: &[Solution],
    ) {
        for listener in &mut self.listeners {
            listener.selected_strategy(strategy, problem, solutions);
        }
    }

    fn iteration_ends(
        &mut self,
        iteration: usize,
        problem: &VehicleRoutingProblem,
        solutions: &[Solution],
    ) {
        for listener in &mut self.listeners {
            listener.iteration_ends(iteration, problem, solutions);
        }
    }

    fn algorithm_ends(&mut self, problem: &VehicleRoutingProblem, solutions: &[Solution]) {
        for listener in &mut self.listeners {
            listener.algorithm_ends(problem, solutions);
        }
    }
}

impl fmt::Debug for AlgorithmListeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.listeners.iter().map(|listener| listener.name()))
            .finish()
    }
}
