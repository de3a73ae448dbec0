//! Test doubles for the search loop and insertion evaluators.
//!
//! Available under `cfg(test)` and the `test-support` feature.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::Arc;

use rand::RngCore;
use routecraft_core::test_support::{
    EuclideanCosts, TimeDependentCosts, job_at, point, vehicle_at,
};
use routecraft_core::{Driver, Job, Solution, Vehicle, VehicleRoute, VehicleRoutingProblem};

use crate::insertion::{Insertion, InsertionData, JobInsertionCalculator};
use crate::{AlgorithmListener, SearchLoop, SearchStrategy, SolutionPool};

/// Insertion calculator that replays scripted costs and records its calls.
///
/// Each call consumes the next scripted entry: `Some(cost)` yields a feasible
/// insertion at position zero, `None` or an exhausted script yields
/// [`Insertion::NotFound`].
#[derive(Debug, Default)]
pub struct RecordingCalculator {
    costs: RefCell<VecDeque<Option<f64>>>,
    departures: RefCell<Vec<f64>>,
    bounds: RefCell<Vec<Option<f64>>>,
}

impl RecordingCalculator {
    /// Replay `costs` in order.
    #[must_use]
    pub fn with_costs<const N: usize>(costs: [Option<f64>; N]) -> Self {
        Self {
            costs: RefCell::new(costs.into_iter().collect()),
            ..Self::default()
        }
    }

    /// Departure times passed to each call, in call order.
    #[must_use]
    pub fn departures(&self) -> Vec<f64> {
        self.departures.borrow().clone()
    }

    /// Best-known-cost bounds passed to each call, in call order.
    #[must_use]
    pub fn bounds(&self) -> Vec<Option<f64>> {
        self.bounds.borrow().clone()
    }
}

impl JobInsertionCalculator for RecordingCalculator {
    fn calculate(
        &self,
        _route: &VehicleRoute,
        _job: &Job,
        _vehicle: &Vehicle,
        departure_time: f64,
        _driver: &Driver,
        best_known_cost: Option<f64>,
    ) -> Insertion {
        self.departures.borrow_mut().push(departure_time);
        self.bounds.borrow_mut().push(best_known_cost);
        match self.costs.borrow_mut().pop_front().flatten() {
            Some(cost) => Insertion::Feasible(InsertionData::new(cost, 0, departure_time)),
            None => Insertion::NotFound,
        }
    }
}

/// A notification observed by a [`RecordingListener`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenerEvent {
    /// `algorithm_starts` with the loop's iteration budget and the size of
    /// the initial pool.
    AlgorithmStarts {
        /// Label of the recording listener.
        listener: String,
        /// Iteration budget of the starting loop.
        iterations: usize,
        /// Pool size.
        solutions: usize,
    },
    /// `iteration_starts`.
    IterationStarts {
        /// Label of the recording listener.
        listener: String,
        /// Iteration number.
        iteration: usize,
    },
    /// `selected_strategy`.
    SelectedStrategy {
        /// Label of the recording listener.
        listener: String,
        /// Strategy name.
        strategy: String,
    },
    /// `iteration_ends`.
    IterationEnds {
        /// Label of the recording listener.
        listener: String,
        /// Iteration number.
        iteration: usize,
    },
    /// `algorithm_ends` with the size of the final pool.
    AlgorithmEnds {
        /// Label of the recording listener.
        listener: String,
        /// Pool size.
        solutions: usize,
    },
}

/// Shared, ordered record of listener notifications.
pub type EventLog = Rc<RefCell<Vec<ListenerEvent>>>;

/// Listener appending every notification to an [`EventLog`].
#[derive(Debug)]
pub struct RecordingListener {
    label: String,
    log: EventLog,
}

impl RecordingListener {
    /// A listener with its own log.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self::with_log(label, EventLog::default())
    }

    /// A listener appending to `log`, so several listeners share one order.
    #[must_use]
    pub fn with_log(label: impl Into<String>, log: EventLog) -> Self {
        Self {
            label: label.into(),
            log,
        }
    }

    /// Handle on the log this listener writes to.
    #[must_use]
    pub fn log(&self) -> EventLog {
        Rc::clone(&self.log)
    }

    fn record(&self, event: ListenerEvent) {
        self.log.borrow_mut().push(event);
    }
}

impl AlgorithmListener for RecordingListener {
    fn name(&self) -> &str {
        &self.label
    }

    fn algorithm_starts(
        &mut self,
        _problem: &VehicleRoutingProblem,
        search: &SearchLoop,
        solutions: &[Solution],
    ) {
        self.record(ListenerEvent::AlgorithmStarts {
            listener: self.label.clone(),
            iterations: search.config().iterations,
            solutions: solutions.len(),
        });
    }

    fn iteration_starts(
        &mut self,
        iteration: usize,
        _problem: &VehicleRoutingProblem,
        _solutions: &[Solution],
    ) {
        self.record(ListenerEvent::IterationStarts {
            listener: self.label.clone(),
            iteration,
        });
    }

    fn selected_strategy(
        &mut self,
        strategy: &str,
        _problem: &VehicleRoutingProblem,
        _solutions: &[Solution],
    ) {
        self.record(ListenerEvent::SelectedStrategy {
            listener: self.label.clone(),
            strategy: strategy.to_owned(),
        });
    }

    fn iteration_ends(
        &mut self,
        iteration: usize,
        _problem: &VehicleRoutingProblem,
        _solutions: &[Solution],
    ) {
        self.record(ListenerEvent::IterationEnds {
            listener: self.label.clone(),
            iteration,
        });
    }

    fn algorithm_ends(&mut self, _problem: &VehicleRoutingProblem, solutions: &[Solution]) {
        self.record(ListenerEvent::AlgorithmEnds {
            listener: self.label.clone(),
            solutions: solutions.len(),
        });
    }
}

/// Strategy reporting scripted outcomes without touching the pool.
///
/// Once the script runs out every further run reports `false`, unless the
/// strategy was built with [`Self::always`].
#[derive(Debug, Clone)]
pub struct ScriptedStrategy {
    name: String,
    outcomes: VecDeque<bool>,
    fallback: bool,
    runs: usize,
}

impl ScriptedStrategy {
    /// Report `outcomes` in order, then `false`.
    #[must_use]
    pub fn new(name: impl Into<String>, outcomes: impl IntoIterator<Item = bool>) -> Self {
        Self {
            name: name.into(),
            outcomes: outcomes.into_iter().collect(),
            fallback: false,
            runs: 0,
        }
    }

    /// Report `outcome` on every run.
    #[must_use]
    pub fn always(name: impl Into<String>, outcome: bool) -> Self {
        Self {
            fallback: outcome,
            ..Self::new(name, std::iter::empty())
        }
    }

    /// Number of completed runs.
    #[must_use]
    pub const fn runs(&self) -> usize {
        self.runs
    }
}

impl SearchStrategy for ScriptedStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(
        &mut self,
        _problem: &VehicleRoutingProblem,
        _pool: &mut SolutionPool,
        _rng: &mut dyn RngCore,
    ) -> bool {
        self.runs = self.runs.saturating_add(1);
        self.outcomes.pop_front().unwrap_or(self.fallback)
    }
}

/// One vehicle at the origin serving one job at each `x` on a line.
///
/// Jobs are named `j0`, `j1` and so on. Costs are Euclidean.
///
/// # Panics
/// Never in practice: the generated problem always has a vehicle.
#[must_use]
#[expect(
    clippy::expect_used,
    reason = "fixture construction has no recoverable failure"
)]
pub fn line_problem(xs: &[f64]) -> VehicleRoutingProblem {
    VehicleRoutingProblem::builder()
        .add_vehicle(vehicle_at("v", 0.0))
        .add_jobs(
            xs.iter()
                .enumerate()
                .map(|(index, x)| job_at(&format!("j{index}"), *x)),
        )
        .transport_costs(Arc::new(EuclideanCosts))
        .build()
        .expect("line problem has a vehicle")
}

/// A single job 20 units from the depot under rush-hour pricing.
///
/// Legs departing before t = 50 cost and take twice as long. The vehicle
/// operates in `[0, 100]`, so the cheapest tour departs at 50 and costs 40.
///
/// # Panics
/// Never in practice: the window and problem are statically valid.
#[must_use]
#[expect(
    clippy::expect_used,
    reason = "fixture construction has no recoverable failure"
)]
pub fn rush_hour_problem() -> VehicleRoutingProblem {
    let vehicle = Vehicle::new("v", point("depot", 0.0))
        .with_operating_window(0.0, 100.0)
        .expect("ordered window");
    VehicleRoutingProblem::builder()
        .add_vehicle(vehicle)
        .add_job(job_at("customer", 20.0))
        .transport_costs(Arc::new(TimeDependentCosts::new(EuclideanCosts, 50.0, 2.0)))
        .build()
        .expect("rush hour problem has a vehicle")
}
