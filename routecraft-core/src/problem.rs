//! The vehicle routing problem handed to the search.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::{Job, TransportCosts, Vehicle};

/// Errors returned by [`ProblemBuilder::build`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProblemError {
    /// No vehicle was added.
    #[error("problem must contain at least one vehicle")]
    NoVehicles,
    /// Two jobs share an identifier.
    #[error("duplicate job id {0}")]
    DuplicateJob(String),
    /// Two vehicles share an identifier.
    #[error("duplicate vehicle id {0}")]
    DuplicateVehicle(String),
    /// No transport cost model was supplied.
    #[error("problem requires transport costs")]
    MissingTransportCosts,
}

/// Whether vehicles are individual units or templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FleetSize {
    /// Each vehicle drives at most one route.
    #[default]
    Finite,
    /// Each vehicle is a type that may be instantiated for any number of
    /// routes.
    Infinite,
}

/// Jobs, vehicles and the transport cost model of one routing problem.
///
/// Immutable once built; share it behind `Arc` or borrow it.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use routecraft_core::{Driver, Job, Location, TransportCosts, Vehicle, VehicleRoutingProblem};
///
/// struct Free;
///
/// impl TransportCosts for Free {
///     fn transport_cost(&self, _: &Location, _: &Location, _: f64, _: &Driver, _: &Vehicle) -> f64 {
///         0.0
///     }
///     fn transport_time(&self, _: &Location, _: &Location, _: f64, _: &Driver, _: &Vehicle) -> f64 {
///         0.0
///     }
/// }
///
/// # fn main() -> Result<(), routecraft_core::ProblemError> {
/// let problem = VehicleRoutingProblem::builder()
///     .add_vehicle(Vehicle::new("v", Location::new("depot")))
///     .add_job(Job::new("j", Location::new("c")))
///     .transport_costs(Arc::new(Free))
///     .build()?;
/// assert_eq!(problem.jobs().len(), 1);
/// assert!(problem.job("j").is_some());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct VehicleRoutingProblem {
    jobs: Vec<Arc<Job>>,
    vehicles: Vec<Arc<Vehicle>>,
    fleet_size: FleetSize,
    transport_costs: Arc<dyn TransportCosts>,
}

impl VehicleRoutingProblem {
    /// Start assembling a problem.
    pub fn builder() -> ProblemBuilder {
        ProblemBuilder::default()
    }

    /// Every job to be served.
    pub fn jobs(&self) -> &[Arc<Job>] {
        &self.jobs
    }

    /// Look a job up by identifier.
    pub fn job(&self, id: &str) -> Option<&Arc<Job>> {
        self.jobs.iter().find(|job| job.id() == id)
    }

    /// Available vehicles.
    pub fn vehicles(&self) -> &[Arc<Vehicle>] {
        &self.vehicles
    }

    /// Fleet composition.
    pub const fn fleet_size(&self) -> FleetSize {
        self.fleet_size
    }

    /// Cost model for every leg.
    pub fn transport_costs(&self) -> &dyn TransportCosts {
        self.transport_costs.as_ref()
    }

    /// Shared handle on the cost model.
    pub fn shared_transport_costs(&self) -> Arc<dyn TransportCosts> {
        Arc::clone(&self.transport_costs)
    }
}

impl fmt::Debug for VehicleRoutingProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VehicleRoutingProblem")
            .field("jobs", &self.jobs.len())
            .field("vehicles", &self.vehicles.len())
            .field("fleet_size", &self.fleet_size)
            .finish_non_exhaustive()
    }
}

/// Incremental construction of a [`VehicleRoutingProblem`].
#[derive(Default)]
pub struct ProblemBuilder {
    jobs: Vec<Job>,
    vehicles: Vec<Vehicle>,
    fleet_size: FleetSize,
    transport_costs: Option<Arc<dyn TransportCosts>>,
}

impl ProblemBuilder {
    /// Add a job.
    #[must_use]
    pub fn add_job(mut self, job: Job) -> Self {
        self.jobs.push(job);
        self
    }

    /// Add several jobs.
    #[must_use]
    pub fn add_jobs<I>(mut self, jobs: I) -> Self
    where
        I: IntoIterator<Item = Job>,
    {
        self.jobs.extend(jobs);
        self
    }

    /// Add a vehicle.
    #[must_use]
    pub fn add_vehicle(mut self, vehicle: Vehicle) -> Self {
        self.vehicles.push(vehicle);
        self
    }

    /// Choose between a finite and an infinite fleet.
    #[must_use]
    pub fn fleet_size(mut self, fleet_size: FleetSize) -> Self {
        self.fleet_size = fleet_size;
        self
    }

    /// Set the transport cost model.
    #[must_use]
    pub fn transport_costs(mut self, costs: Arc<dyn TransportCosts>) -> Self {
        self.transport_costs = Some(costs);
        self
    }

    /// Validate and build the problem.
    ///
    /// # Errors
    /// Returns [`ProblemError`] when there is no vehicle, an id is used twice
    /// or no cost model was supplied.
    pub fn build(self) -> Result<VehicleRoutingProblem, ProblemError> {
        if self.vehicles.is_empty() {
            return Err(ProblemError::NoVehicles);
        }
        if let Some(id) = first_duplicate(self.jobs.iter().map(Job::id)) {
            return Err(ProblemError::DuplicateJob(id));
        }
        if let Some(id) = first_duplicate(self.vehicles.iter().map(Vehicle::id)) {
            return Err(ProblemError::DuplicateVehicle(id));
        }
        let transport_costs = self
            .transport_costs
            .ok_or(ProblemError::MissingTransportCosts)?;
        log::debug!(
            "built problem with {} jobs and {} vehicles ({:?} fleet)",
            self.jobs.len(),
            self.vehicles.len(),
            self.fleet_size
        );
        Ok(VehicleRoutingProblem {
            jobs: self.jobs.into_iter().map(Arc::new).collect(),
            vehicles: self.vehicles.into_iter().map(Arc::new).collect(),
            fleet_size: self.fleet_size,
            transport_costs,
        })
    }
}

fn first_duplicate<'a>(ids: impl Iterator<Item = &'a str>) -> Option<String> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Some(id.to_owned());
        }
    }
    None
}
