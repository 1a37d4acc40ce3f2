//! SQLite-backed neighborhood directory and amenity cache.
//!
//! [`SqliteNeighborhoodStore`] implements both
//! [`matchmaker_core::NeighborhoodDirectory`] and
//! [`matchmaker_core::AmenityStore`] over one database file. Cached counts are
//! keyed by `(neighborhood_id, kind)` and upserted, so the last write wins.

mod schema;
mod store;

pub use schema::SCHEMA;
pub use store::{SqliteNeighborhoodStore, SqliteStoreError};
