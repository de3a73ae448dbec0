//! Jobs: units of demand served at a location inside a time window.

use thiserror::Error;

use crate::Location;

/// Errors returned by [`TimeWindow::new`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimeWindowError {
    /// The window closes before it opens.
    #[error("time window start {start} is after its end {end}")]
    Inverted {
        /// Opening time.
        start: f64,
        /// Closing time.
        end: f64,
    },
    /// One of the bounds is NaN.
    #[error("time window bounds must not be NaN")]
    NotANumber,
}

/// Closed interval `[start, end]` of admissible service start times.
///
/// # Examples
/// ```
/// use routecraft_core::TimeWindow;
///
/// # fn main() -> Result<(), routecraft_core::TimeWindowError> {
/// let window = TimeWindow::new(10.0, 20.0)?;
/// assert!(window.contains(15.0));
/// assert!(TimeWindow::new(20.0, 10.0).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "TimeWindowRecord", into = "TimeWindowRecord")
)]
pub struct TimeWindow {
    start: f64,
    end: f64,
}

impl TimeWindow {
    /// Validates and constructs a [`TimeWindow`].
    ///
    /// # Errors
    /// Returns [`TimeWindowError`] when a bound is NaN or `start > end`.
    pub fn new(start: f64, end: f64) -> Result<Self, TimeWindowError> {
        if start.is_nan() || end.is_nan() {
            return Err(TimeWindowError::NotANumber);
        }
        if start > end {
            return Err(TimeWindowError::Inverted { start, end });
        }
        Ok(Self { start, end })
    }

    /// Earliest admissible time.
    pub const fn start(&self) -> f64 {
        self.start
    }

    /// Latest admissible time.
    pub const fn end(&self) -> f64 {
        self.end
    }

    /// Whether `time` falls inside the window, bounds included.
    pub fn contains(&self, time: f64) -> bool {
        (self.start..=self.end).contains(&time)
    }
}

impl Default for TimeWindow {
    /// `[0, +inf)`: the job can be served at any time.
    fn default() -> Self {
        Self {
            start: 0.0,
            end: f64::INFINITY,
        }
    }
}

/// Wire form of [`TimeWindow`]; an open end is left out.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct TimeWindowRecord {
    #[serde(default)]
    start: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    end: Option<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<TimeWindowRecord> for TimeWindow {
    type Error = TimeWindowError;

    fn try_from(record: TimeWindowRecord) -> Result<Self, Self::Error> {
        Self::new(record.start, record.end.unwrap_or(f64::INFINITY))
    }
}

#[cfg(feature = "serde")]
impl From<TimeWindow> for TimeWindowRecord {
    fn from(window: TimeWindow) -> Self {
        Self {
            start: window.start,
            end: (window.end < f64::INFINITY).then_some(window.end),
        }
    }
}

/// A service or delivery to perform at one location.
///
/// Jobs are immutable once built; routes share them behind `Arc`.
///
/// # Examples
/// ```
/// use routecraft_core::{Job, Location, TimeWindow};
///
/// # fn main() -> Result<(), routecraft_core::TimeWindowError> {
/// let job = Job::new("parcel-7", Location::new("customer"))
///     .with_demand(2)
///     .with_time_window(TimeWindow::new(0.0, 60.0)?)
///     .with_service_duration(5.0);
/// assert_eq!(job.demand(), 2);
/// assert_eq!(job.time_window().end(), 60.0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Job {
    id: String,
    location: Location,
    demand: u32,
    time_window: TimeWindow,
    service_duration: f64,
}

impl Job {
    /// Construct a job without demand, time restriction or service time.
    pub fn new(id: impl Into<String>, location: Location) -> Self {
        Self {
            id: id.into(),
            location,
            demand: 0,
            time_window: TimeWindow::default(),
            service_duration: 0.0,
        }
    }

    /// Set the demand in capacity units.
    #[must_use]
    pub fn with_demand(mut self, demand: u32) -> Self {
        self.demand = demand;
        self
    }

    /// Set the window in which service must start.
    #[must_use]
    pub fn with_time_window(mut self, time_window: TimeWindow) -> Self {
        self.time_window = time_window;
        self
    }

    /// Set how long the service takes once started.
    ///
    /// Negative durations are clamped to zero.
    #[must_use]
    pub fn with_service_duration(mut self, duration: f64) -> Self {
        self.service_duration = duration.max(0.0);
        self
    }

    /// Unique identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Where the job is served.
    pub const fn location(&self) -> &Location {
        &self.location
    }

    /// Capacity units consumed.
    pub const fn demand(&self) -> u32 {
        self.demand
    }

    /// Admissible service start times.
    pub const fn time_window(&self) -> TimeWindow {
        self.time_window
    }

    /// Service time.
    pub const fn service_duration(&self) -> f64 {
        self.service_duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(0.0, 10.0)]
    fn window_accepts_ordered_bounds(#[case] start: f64, #[case] end: f64) {
        assert!(TimeWindow::new(start, end).is_ok());
    }

    #[rstest]
    fn window_rejects_inverted_bounds() {
        let err = TimeWindow::new(5.0, 1.0).expect_err("inverted window");
        assert!(matches!(err, TimeWindowError::Inverted { .. }));
    }

    #[rstest]
    fn window_rejects_nan() {
        assert_eq!(
            TimeWindow::new(f64::NAN, 1.0),
            Err(TimeWindowError::NotANumber)
        );
    }

    #[rstest]
    fn job_defaults_are_unrestricted() {
        let job = Job::new("j", Location::new("x"));
        assert_eq!(job.demand(), 0);
        assert!(job.time_window().contains(1.0e9));
    }

    #[rstest]
    fn negative_service_duration_is_clamped() {
        let job = Job::new("j", Location::new("x")).with_service_duration(-3.0);
        assert!(job.service_duration().abs() < f64::EPSILON);
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn job_deserialises_from_json() {
        let json = r#"{
            "id": "j1",
            "location": { "id": "c1", "coord": { "x": 1.0, "y": 2.0 } },
            "demand": 3,
            "time_window": { "start": 10.0, "end": 20.0 },
            "service_duration": 5.0
        }"#;
        let job: Job = serde_json::from_str(json).expect("valid job json");
        assert_eq!(job.id(), "j1");
        assert_eq!(job.demand(), 3);
        assert!(job.time_window().contains(15.0));
        assert!(job.location().coord().is_some());
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn open_window_survives_json() {
        let job = Job::new("j", Location::new("x")).with_demand(1);
        let json = serde_json::to_string(&job).expect("serialisable job");
        assert!(json.contains(r#""time_window":{"start":0.0}"#), "{json}");
        let restored: Job = serde_json::from_str(&json).expect("readable job");
        assert_eq!(restored, job);
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn json_with_inverted_window_is_rejected() {
        let err = serde_json::from_str::<TimeWindow>(r#"{ "start": 20.0, "end": 10.0 }"#)
            .expect_err("inverted window");
        assert!(err.to_string().contains("is after its end"), "{err}");
    }
}
