//! Neighborhoods and their coordinates as consumed by the engine.

use geo::Coord;
use thiserror::Error;

use crate::AmenityCounts;

/// Identifier assigned to a neighborhood by the directory.
pub type NeighborhoodId = u64;

/// A validated WGS84 position in degrees.
///
/// Stored as a [`geo::Coord`] with `x = longitude` and `y = latitude`. No
/// projection correction is applied by consumers.
///
/// # Examples
/// ```
/// use matchmaker_core::Coordinate;
///
/// # fn main() -> Result<(), matchmaker_core::CoordinateError> {
/// let plateau = Coordinate::new(45.52, -73.58)?;
/// assert_eq!(plateau.lat(), 45.52);
/// assert_eq!(plateau.as_coord().x, -73.58);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "LatLon", into = "LatLon")
)]
pub struct Coordinate {
    coord: Coord<f64>,
}

/// Errors returned by [`Coordinate::new`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CoordinateError {
    /// Latitude was NaN, infinite, or outside `-90.0..=90.0`.
    #[error("latitude {0} is outside -90..=90")]
    Latitude(f64),
    /// Longitude was NaN, infinite, or outside `-180.0..=180.0`.
    #[error("longitude {0} is outside -180..=180")]
    Longitude(f64),
}

impl Coordinate {
    /// Validate and construct a coordinate from latitude and longitude.
    ///
    /// # Errors
    /// Returns [`CoordinateError`] when either component is not finite or is
    /// out of range.
    pub fn new(lat: f64, lon: f64) -> Result<Self, CoordinateError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(CoordinateError::Latitude(lat));
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(CoordinateError::Longitude(lon));
        }
        Ok(Self {
            coord: Coord { x: lon, y: lat },
        })
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn lat(self) -> f64 {
        self.coord.y
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn lon(self) -> f64 {
        self.coord.x
    }

    /// The underlying `geo` coordinate (`x = longitude`, `y = latitude`).
    #[must_use]
    pub const fn as_coord(self) -> Coord<f64> {
        self.coord
    }
}

impl TryFrom<Coord<f64>> for Coordinate {
    type Error = CoordinateError;

    fn try_from(coord: Coord<f64>) -> Result<Self, Self::Error> {
        Self::new(coord.y, coord.x)
    }
}

/// Wire shape for [`Coordinate`].
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct LatLon {
    lat: f64,
    lon: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<LatLon> for Coordinate {
    type Error = CoordinateError;

    fn try_from(raw: LatLon) -> Result<Self, Self::Error> {
        Self::new(raw.lat, raw.lon)
    }
}

#[cfg(feature = "serde")]
impl From<Coordinate> for LatLon {
    fn from(coordinate: Coordinate) -> Self {
        Self {
            lat: coordinate.lat(),
            lon: coordinate.lon(),
        }
    }
}

/// A candidate neighborhood.
///
/// The engine never changes a neighborhood's identity or location. Cached
/// amenity counts may be incomplete; missing kinds are resolved on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct Neighborhood {
    /// Directory identifier.
    pub id: NeighborhoodId,
    /// Display name.
    pub name: String,
    /// City the neighborhood belongs to.
    pub city: String,
    /// Representative location.
    pub location: Coordinate,
    /// Previously resolved amenity counts, if any.
    pub amenities: Option<AmenityCounts>,
}

impl Neighborhood {
    /// Construct a neighborhood with no cached amenity counts.
    #[must_use]
    pub fn new(
        id: NeighborhoodId,
        name: impl Into<String>,
        city: impl Into<String>,
        location: Coordinate,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            city: city.into(),
            location,
            amenities: None,
        }
    }

    /// Attach cached amenity counts while returning `self` for chaining.
    #[must_use]
    pub fn with_amenities(mut self, amenities: AmenityCounts) -> Self {
        self.amenities = Some(amenities);
        self
    }
}
