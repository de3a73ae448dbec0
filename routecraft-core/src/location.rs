use geo::Coord;

/// A place a vehicle can start from, end at, or serve a job at.
///
/// The identifier is what transport-cost implementations key on; the
/// coordinate is optional and only consulted by geometric cost models.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use routecraft_core::Location;
///
/// let depot = Location::new("depot").with_coord(Coord { x: 0.0, y: 0.0 });
/// assert_eq!(depot.id(), "depot");
/// assert!(depot.coord().is_some());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    coord: Option<Coord<f64>>,
}

impl Location {
    /// Construct a location known only by its identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            coord: None,
        }
    }

    /// Attach a planar coordinate.
    #[must_use]
    pub fn with_coord(mut self, coord: Coord<f64>) -> Self {
        self.coord = Some(coord);
        self
    }

    /// Identifier used by transport-cost lookups.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Coordinate, if one was supplied.
    pub const fn coord(&self) -> Option<Coord<f64>> {
        self.coord
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_without_coord() {
        let location = Location::new("a");
        assert_eq!(location.id(), "a");
        assert!(location.coord().is_none());
    }
}
