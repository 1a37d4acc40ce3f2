//! Estimate commute times between two coordinates.
//!
//! The [`CommuteEstimator`] trait turns an origin and a destination into a
//! whole number of minutes. [`TransitProfileEstimator`] is the default: a
//! great-circle distance mapped through a coarse speed/wait table standing in
//! for a transit router.

use crate::Coordinate;

/// Mean Earth radius in kilometres used by [`haversine_km`].
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Lower bound applied to every commute estimate.
pub const MIN_COMMUTE_MINUTES: u32 = 5;

/// Speed and fixed wait applied to trips up to a given length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitBand {
    /// Inclusive upper bound of the band in kilometres.
    pub max_distance_km: f64,
    /// Average door-to-door speed.
    pub speed_kmh: f64,
    /// Fixed waiting and transfer time added to every trip.
    pub wait_minutes: u32,
}

/// Distance buckets, shortest first. The final band is unbounded.
pub const TRANSIT_PROFILE: [TransitBand; 4] = [
    TransitBand {
        max_distance_km: 2.0,
        speed_kmh: 15.0,
        wait_minutes: 5,
    },
    TransitBand {
        max_distance_km: 5.0,
        speed_kmh: 18.0,
        wait_minutes: 8,
    },
    TransitBand {
        max_distance_km: 10.0,
        speed_kmh: 25.0,
        wait_minutes: 10,
    },
    TransitBand {
        max_distance_km: f64::INFINITY,
        speed_kmh: 22.0,
        wait_minutes: 15,
    },
];

const LONG_HAUL: TransitBand = TRANSIT_PROFILE[3];

/// Great-circle distance between two coordinates in kilometres.
///
/// # Examples
/// ```
/// use matchmaker_core::{Coordinate, distance::haversine_km};
///
/// # fn main() -> Result<(), matchmaker_core::CoordinateError> {
/// let a = Coordinate::new(0.0, 0.0)?;
/// let b = Coordinate::new(1.0, 0.0)?;
/// assert!((haversine_km(a, b) - 111.19).abs() < 0.01);
/// # Ok(())
/// # }
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "the haversine formula is inherently floating point"
)]
pub fn haversine_km(origin: Coordinate, destination: Coordinate) -> f64 {
    let lat1 = origin.lat().to_radians();
    let lat2 = destination.lat().to_radians();
    let d_lat = (destination.lat() - origin.lat()).to_radians();
    let d_lon = (destination.lon() - origin.lon()).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Turn an origin/destination pair into a commute time in minutes.
///
/// Implementations must be deterministic and never return less than
/// [`MIN_COMMUTE_MINUTES`].
pub trait CommuteEstimator: Send + Sync {
    /// Estimated travel time from `origin` to `destination`.
    fn estimate_minutes(&self, origin: Coordinate, destination: Coordinate) -> u32;
}

/// Estimator backed by [`TRANSIT_PROFILE`].
///
/// # Examples
/// ```
/// use matchmaker_core::{CommuteEstimator, Coordinate, TransitProfileEstimator};
///
/// # fn main() -> Result<(), matchmaker_core::CoordinateError> {
/// let origin = Coordinate::new(45.50, -73.57)?;
/// let destination = Coordinate::new(45.52, -73.59)?;
/// assert_eq!(TransitProfileEstimator.estimate_minutes(origin, destination), 17);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct TransitProfileEstimator;

impl TransitProfileEstimator {
    /// The band covering `distance_km`.
    #[must_use]
    pub fn band_for(distance_km: f64) -> TransitBand {
        TRANSIT_PROFILE
            .iter()
            .find(|band| distance_km <= band.max_distance_km)
            .copied()
            .unwrap_or(LONG_HAUL)
    }

    /// Travel minutes for a trip of `distance_km`, before the lower bound.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "distance over speed yields fractional hours"
    )]
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "the value is floored, non-negative and far below u32::MAX"
    )]
    pub fn minutes_for_distance(distance_km: f64) -> u32 {
        let band = Self::band_for(distance_km);
        let riding = (distance_km / band.speed_kmh * 60.0).floor().max(0.0) as u32;
        riding.saturating_add(band.wait_minutes)
    }
}

impl CommuteEstimator for TransitProfileEstimator {
    fn estimate_minutes(&self, origin: Coordinate, destination: Coordinate) -> u32 {
        let distance = haversine_km(origin, destination);
        Self::minutes_for_distance(distance).max(MIN_COMMUTE_MINUTES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn at(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).expect("valid coordinate")
    }

    #[rstest]
    fn same_point_is_clamped_to_minimum() {
        let here = at(45.5, -73.57);
        assert_eq!(TransitProfileEstimator.estimate_minutes(here, here), 5);
    }

    #[rstest]
    fn montreal_hop_uses_second_band() {
        let origin = at(45.50, -73.57);
        let destination = at(45.52, -73.59);
        let km = haversine_km(origin, destination);
        assert!((km - 2.715).abs() < 0.01, "unexpected distance {km}");
        assert_eq!(
            TransitProfileEstimator.estimate_minutes(origin, destination),
            17
        );
    }

    #[rstest]
    #[case(0.01, 9)]
    #[case(0.03, 19)]
    #[case(0.05, 23)]
    #[case(0.08, 31)]
    #[case(0.2, 75)]
    fn bands_apply_speed_and_wait(#[case] lat_offset: f64, #[case] expected: u32) {
        let origin = at(0.0, 0.0);
        let destination = at(lat_offset, 0.0);
        assert_eq!(
            TransitProfileEstimator.estimate_minutes(origin, destination),
            expected
        );
    }

    #[rstest]
    #[case(2.0, 5)]
    #[case(2.01, 8)]
    #[case(10.0, 10)]
    #[case(250.0, 15)]
    fn band_boundaries_are_inclusive(#[case] km: f64, #[case] wait: u32) {
        assert_eq!(TransitProfileEstimator::band_for(km).wait_minutes, wait);
    }

    #[rstest]
    fn estimate_is_symmetric_and_deterministic() {
        let a = at(45.49, -73.62);
        let b = at(45.56, -73.55);
        let first = TransitProfileEstimator.estimate_minutes(a, b);
        assert_eq!(first, TransitProfileEstimator.estimate_minutes(b, a));
        assert_eq!(first, TransitProfileEstimator.estimate_minutes(a, b));
        assert!(first >= MIN_COMMUTE_MINUTES);
    }
}
