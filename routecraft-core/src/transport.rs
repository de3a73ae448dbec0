//! Time-dependent transport costs between locations.
//!
//! The `TransportCosts` trait abstracts how much it costs, and how long it
//! takes, to travel between two [`Location`]s when leaving at a given time.
//! Implementations may price congestion windows, so callers must never assume
//! the result is independent of `departure_time`.

use crate::{Driver, Location, Vehicle};

/// Cost and duration of a single leg.
///
/// Implementations must be deterministic for identical inputs and return
/// non-negative, finite values.
///
/// # Examples
///
/// ```
/// use routecraft_core::{Driver, Location, TransportCosts, Vehicle};
///
/// struct Flat;
///
/// impl TransportCosts for Flat {
///     fn transport_cost(
///         &self,
///         from: &Location,
///         to: &Location,
///         _departure_time: f64,
///         _driver: &Driver,
///         _vehicle: &Vehicle,
///     ) -> f64 {
///         if from == to { 0.0 } else { 10.0 }
///     }
///
///     fn transport_time(
///         &self,
///         from: &Location,
///         to: &Location,
///         departure_time: f64,
///         driver: &Driver,
///         vehicle: &Vehicle,
///     ) -> f64 {
///         self.transport_cost(from, to, departure_time, driver, vehicle)
///     }
/// }
///
/// let depot = Location::new("depot");
/// let vehicle = Vehicle::new("v", depot.clone());
/// let cost = Flat.transport_cost(&depot, &Location::new("b"), 0.0, &Driver::no_driver(), &vehicle);
/// assert_eq!(cost, 10.0);
/// ```
pub trait TransportCosts: Send + Sync {
    /// Cost of travelling from `from` to `to`, leaving at `departure_time`.
    fn transport_cost(
        &self,
        from: &Location,
        to: &Location,
        departure_time: f64,
        driver: &Driver,
        vehicle: &Vehicle,
    ) -> f64;

    /// Travel time from `from` to `to`, leaving at `departure_time`.
    fn transport_time(
        &self,
        from: &Location,
        to: &Location,
        departure_time: f64,
        driver: &Driver,
        vehicle: &Vehicle,
    ) -> f64;
}
