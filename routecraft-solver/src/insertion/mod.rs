//! Job insertion evaluation.
//!
//! A [`JobInsertionCalculator`] prices the insertion of one job into one
//! route without mutating either. Results are compared by cost; an
//! [`Insertion::NotFound`] result ranks behind every feasible one.

mod service;
mod time_scheduling;

use routecraft_core::{Driver, Job, Vehicle, VehicleRoute};

pub use service::ServiceInsertionCalculator;
pub use time_scheduling::{TimeSchedulingConfig, TimeSchedulingInsertionCalculator, departure_times};

/// Where and when a job can be inserted, and what it costs.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InsertionData {
    cost: f64,
    position: usize,
    departure_time: f64,
}

impl InsertionData {
    /// Describe a feasible insertion.
    pub const fn new(cost: f64, position: usize, departure_time: f64) -> Self {
        Self {
            cost,
            position,
            departure_time,
        }
    }

    /// Marginal cost of the insertion; lower is better.
    pub const fn cost(&self) -> f64 {
        self.cost
    }

    /// Index in the route's activity list before which the job goes.
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Departure of the vehicle from its start that the cost assumes.
    pub const fn departure_time(&self) -> f64 {
        self.departure_time
    }

    /// Replace the departure time the insertion was priced at.
    pub const fn set_departure_time(&mut self, departure_time: f64) {
        self.departure_time = departure_time;
    }
}

/// Outcome of pricing one insertion.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Insertion {
    /// The job fits.
    Feasible(InsertionData),
    /// No feasible placement exists, or none beats the best known cost.
    NotFound,
}

impl Insertion {
    /// Cost used for ranking: infinite when nothing was found.
    pub const fn cost(&self) -> f64 {
        match self {
            Self::Feasible(data) => data.cost(),
            Self::NotFound => f64::INFINITY,
        }
    }

    /// Whether a placement was found.
    pub const fn is_feasible(&self) -> bool {
        matches!(self, Self::Feasible(_))
    }

    /// The insertion details, when feasible.
    pub const fn data(&self) -> Option<&InsertionData> {
        match self {
            Self::Feasible(data) => Some(data),
            Self::NotFound => None,
        }
    }

    /// Stamp the departure time onto a feasible result.
    #[must_use]
    pub const fn with_departure_time(mut self, departure_time: f64) -> Self {
        if let Self::Feasible(data) = &mut self {
            data.set_departure_time(departure_time);
        }
        self
    }

    /// Whether `self` is strictly cheaper than `other`.
    pub fn is_better_than(&self, other: &Self) -> bool {
        self.cost() < other.cost()
    }
}

/// Prices the insertion of a job into a route.
///
/// Implementations are pure: neither the route nor the job is mutated. The
/// vehicle and driver may differ from the route's own when a strategy
/// considers switching vehicles or opening a new route.
pub trait JobInsertionCalculator {
    /// Price inserting `job` into `route`.
    ///
    /// `departure_time` is the proposed departure of `vehicle` from its
    /// start. `best_known_cost`, when given, is an upper bound: results that
    /// are not strictly cheaper may be reported as [`Insertion::NotFound`].
    fn calculate(
        &self,
        route: &VehicleRoute,
        job: &Job,
        vehicle: &Vehicle,
        departure_time: f64,
        driver: &Driver,
        best_known_cost: Option<f64>,
    ) -> Insertion;
}

impl<C: JobInsertionCalculator + ?Sized> JobInsertionCalculator for &C {
    fn calculate(
        &self,
        route: &VehicleRoute,
        job: &Job,
        vehicle: &Vehicle,
        departure_time: f64,
        driver: &Driver,
        best_known_cost: Option<f64>,
    ) -> Insertion {
        (**self).calculate(route, job, vehicle, departure_time, driver, best_known_cost)
    }
}

impl<C: JobInsertionCalculator + ?Sized> JobInsertionCalculator for Box<C> {
    fn calculate(
        &self,
        route: &VehicleRoute,
        job: &Job,
        vehicle: &Vehicle,
        departure_time: f64,
        driver: &Driver,
        best_known_cost: Option<f64>,
    ) -> Insertion {
        (**self).calculate(route, job, vehicle, departure_time, driver, best_known_cost)
    }
}
