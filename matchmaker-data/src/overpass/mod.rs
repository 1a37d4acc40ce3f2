//! Amenity counts from the OpenStreetMap Overpass API.
//!
//! [`OverpassAmenityLookup`] implements [`matchmaker_core::AmenityLookup`]. A
//! request becomes a single Overpass QL query with a `node` and a `way` clause
//! per OSM tag of each requested kind. Returned elements are classified back
//! into [`matchmaker_core::AmenityKind`]s and counted.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use matchmaker_core::{AmenityKind, AmenityLookup, Coordinate};
//! use matchmaker_data::overpass::{OverpassAmenityLookup, OverpassConfig};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let config = OverpassConfig::default()
//!     .with_radius_meters(750)
//!     .with_timeout(Duration::from_secs(20));
//! let lookup = OverpassAmenityLookup::with_config(config)?;
//! let plateau = Coordinate::new(45.52, -73.58)?;
//! let counts = lookup
//!     .resolve(plateau, &[AmenityKind::Park, AmenityKind::Cafe])
//!     .await?;
//! println!("{} parks", counts.get(AmenityKind::Park));
//! # Ok(())
//! # }
//! ```

mod provider;
mod query;
mod response;

pub use provider::{
    DEFAULT_BASE_URL, DEFAULT_RADIUS_METERS, DEFAULT_USER_AGENT, OverpassAmenityLookup,
    OverpassBuildError, OverpassConfig,
};
pub use query::{OVERPASS_TAGS, build_query, tags_for};
pub use response::{OverpassElement, OverpassResponse, classify};
