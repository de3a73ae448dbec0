//! Vehicles and the drivers assigned to them.

use thiserror::Error;

use crate::Location;

/// Errors returned by [`Vehicle::with_operating_window`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VehicleError {
    /// The vehicle would have to arrive before it may leave.
    #[error("earliest departure {earliest} is after latest arrival {latest}")]
    InvertedOperatingWindow {
        /// Earliest departure time.
        earliest: f64,
        /// Latest arrival time.
        latest: f64,
    },
    /// A bound is NaN.
    #[error("operating window bounds must not be NaN")]
    NotANumber,
}

/// A vehicle with a home location, capacity and operating window.
///
/// `earliest_departure` and `latest_arrival` are hard bounds: no departure
/// time search may leave the open interval between them.
///
/// # Examples
/// ```
/// use routecraft_core::{Location, Vehicle};
///
/// # fn main() -> Result<(), routecraft_core::VehicleError> {
/// let vehicle = Vehicle::new("van-1", Location::new("depot"))
///     .with_capacity(20)
///     .with_operating_window(0.0, 100.0)?;
/// assert_eq!(vehicle.capacity(), 20);
/// assert_eq!(vehicle.latest_arrival(), 100.0);
/// # Ok(())
/// # }
/// ```
///
/// With the `serde` feature, deserialisation goes through
/// [`Vehicle::with_operating_window`] and an unbounded `latest_arrival` is
/// written as an absent field.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "VehicleRecord", into = "VehicleRecord")
)]
pub struct Vehicle {
    id: String,
    start_location: Location,
    end_location: Location,
    capacity: u32,
    earliest_departure: f64,
    latest_arrival: f64,
    fixed_cost: f64,
    cost_per_distance: f64,
}

impl Vehicle {
    /// Construct a vehicle that starts and ends at `location`.
    ///
    /// Defaults: unlimited capacity, operating window `[0, +inf)`, no fixed
    /// cost and a unit distance rate.
    pub fn new(id: impl Into<String>, location: Location) -> Self {
        Self {
            id: id.into(),
            end_location: location.clone(),
            start_location: location,
            capacity: u32::MAX,
            earliest_departure: 0.0,
            latest_arrival: f64::INFINITY,
            fixed_cost: 0.0,
            cost_per_distance: 1.0,
        }
    }

    /// Return to a different location than the start.
    #[must_use]
    pub fn with_end_location(mut self, location: Location) -> Self {
        self.end_location = location;
        self
    }

    /// Set the capacity in demand units.
    #[must_use]
    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    /// Validate and set the operating window.
    ///
    /// # Errors
    /// Returns [`VehicleError`] when a bound is NaN or the departure is later
    /// than the arrival.
    pub fn with_operating_window(
        mut self,
        earliest_departure: f64,
        latest_arrival: f64,
    ) -> Result<Self, VehicleError> {
        if earliest_departure.is_nan() || latest_arrival.is_nan() {
            return Err(VehicleError::NotANumber);
        }
        if earliest_departure > latest_arrival {
            return Err(VehicleError::InvertedOperatingWindow {
                earliest: earliest_departure,
                latest: latest_arrival,
            });
        }
        self.earliest_departure = earliest_departure;
        self.latest_arrival = latest_arrival;
        Ok(self)
    }

    /// Cost charged once when the vehicle is put into service.
    #[must_use]
    pub fn with_fixed_cost(mut self, fixed_cost: f64) -> Self {
        self.fixed_cost = fixed_cost;
        self
    }

    /// Rate applied to travelled distance by distance-based cost models.
    #[must_use]
    pub fn with_cost_per_distance(mut self, rate: f64) -> Self {
        self.cost_per_distance = rate;
        self
    }

    /// Unique identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Where every route of this vehicle begins.
    pub const fn start_location(&self) -> &Location {
        &self.start_location
    }

    /// Where every route of this vehicle ends.
    pub const fn end_location(&self) -> &Location {
        &self.end_location
    }

    /// Capacity in demand units.
    pub const fn capacity(&self) -> u32 {
        self.capacity
    }

    /// The vehicle cannot leave before this time.
    pub const fn earliest_departure(&self) -> f64 {
        self.earliest_departure
    }

    /// The vehicle must be back by this time.
    pub const fn latest_arrival(&self) -> f64 {
        self.latest_arrival
    }

    /// Cost of using the vehicle at all.
    pub const fn fixed_cost(&self) -> f64 {
        self.fixed_cost
    }

    /// Cost per unit of distance.
    pub const fn cost_per_distance(&self) -> f64 {
        self.cost_per_distance
    }
}

/// Wire form of [`Vehicle`].
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct VehicleRecord {
    id: String,
    start_location: Location,
    end_location: Location,
    capacity: u32,
    earliest_departure: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    latest_arrival: Option<f64>,
    fixed_cost: f64,
    cost_per_distance: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<VehicleRecord> for Vehicle {
    type Error = VehicleError;

    fn try_from(record: VehicleRecord) -> Result<Self, Self::Error> {
        Self::new(record.id, record.start_location)
            .with_end_location(record.end_location)
            .with_capacity(record.capacity)
            .with_fixed_cost(record.fixed_cost)
            .with_cost_per_distance(record.cost_per_distance)
            .with_operating_window(
                record.earliest_departure,
                record.latest_arrival.unwrap_or(f64::INFINITY),
            )
    }
}

#[cfg(feature = "serde")]
impl From<Vehicle> for VehicleRecord {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            latest_arrival: (vehicle.latest_arrival < f64::INFINITY)
                .then_some(vehicle.latest_arrival),
            id: vehicle.id,
            start_location: vehicle.start_location,
            end_location: vehicle.end_location,
            capacity: vehicle.capacity,
            earliest_departure: vehicle.earliest_departure,
            fixed_cost: vehicle.fixed_cost,
            cost_per_distance: vehicle.cost_per_distance,
        }
    }
}

/// The person operating a vehicle.
///
/// Drivers carry no constraints yet; cost models receive them so that
/// driver-dependent pricing can be added without changing signatures.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Driver {
    id: String,
}

impl Driver {
    /// Construct a named driver.
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// Placeholder used when no driver is modelled.
    pub fn no_driver() -> Self {
        Self::new("noDriver")
    }

    /// Unique identifier.
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl Default for Driver {
    fn default() -> Self {
        Self::no_driver()
    }
}
