//! Concrete collaborators for the matchmaker engine.
//!
//! - [`overpass`] counts amenities near a coordinate through the Overpass API.
//! - [`sqlite`] stores neighborhoods and caches resolved amenity counts.

#![forbid(unsafe_code)]

pub mod overpass;
pub mod sqlite;

pub use overpass::{OverpassAmenityLookup, OverpassBuildError, OverpassConfig};
pub use sqlite::{SqliteNeighborhoodStore, SqliteStoreError};
