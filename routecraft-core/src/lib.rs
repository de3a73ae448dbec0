//! Core domain model for the routecraft vehicle routing engine.
//!
//! This crate holds the problem description ([`VehicleRoutingProblem`],
//! [`Job`], [`Vehicle`]), the mutable search state ([`VehicleRoute`],
//! [`Solution`]) and the [`TransportCosts`] boundary through which every leg
//! is priced. [`schedule_tour`] simulates a tour forward in time and is the
//! single place where arrival times, waiting and hard constraints are derived.
//!
//! Constructors validate their input and return `Result` so malformed data is
//! rejected before the search starts.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod job;
mod location;
mod problem;
mod route;
mod schedule;
mod solution;
mod transport;
mod vehicle;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use job::{Job, TimeWindow, TimeWindowError};
pub use location::Location;
pub use problem::{FleetSize, ProblemBuilder, ProblemError, VehicleRoutingProblem};
pub use route::{End, RouteError, ServiceActivity, Start, VehicleRoute};
pub use schedule::{ScheduleViolation, ScheduledVisit, TourSchedule, schedule_tour};
pub use solution::{NO_COST_YET, Solution};
pub use transport::TransportCosts;
pub use vehicle::{Driver, Vehicle, VehicleError};
