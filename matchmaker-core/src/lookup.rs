//! Amenity lookup and cache collaborators.
//!
//! [`AmenityLookup`] resolves counts near a coordinate, typically by calling a
//! remote geodata service. [`AmenityStore`] persists resolved counts so later
//! searches can skip the lookup. Both are injected into the ranking engine.

use async_trait::async_trait;
use thiserror::Error;

use crate::{AmenityCounts, AmenityKind, Coordinate, NeighborhoodId};

/// Errors raised by an [`AmenityLookup`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The service did not answer in time.
    #[error("amenity lookup to {url} timed out")]
    Timeout {
        /// Requested endpoint.
        url: String,
    },
    /// The service answered with a non-success status.
    #[error("amenity lookup to {url} failed with status {status}")]
    Http {
        /// Requested endpoint.
        url: String,
        /// HTTP status code.
        status: u16,
    },
    /// The request could not be delivered.
    #[error("network error contacting {url}: {message}")]
    Network {
        /// Requested endpoint.
        url: String,
        /// Transport message.
        message: String,
    },
    /// The response body could not be understood.
    #[error("failed to parse amenity response: {message}")]
    Parse {
        /// Decoder message.
        message: String,
    },
    /// The service kept rejecting requests as too frequent.
    #[error("amenity lookup to {url} rate limited after {attempts} attempts")]
    RateLimited {
        /// Requested endpoint.
        url: String,
        /// Requests sent before giving up.
        attempts: u32,
    },
}

/// Errors raised by an [`AmenityStore`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Writing counts for a neighborhood failed.
    #[error("failed to persist amenities for neighborhood {neighborhood}: {message}")]
    Write {
        /// Neighborhood whose counts were being written.
        neighborhood: NeighborhoodId,
        /// Backend message.
        message: String,
    },
}

/// Resolve amenity counts near a location.
///
/// The returned counts must hold an entry for every requested kind, zero when
/// nothing was found.
#[async_trait]
pub trait AmenityLookup: Send + Sync {
    /// Count amenities of `kinds` around `location`.
    async fn resolve(
        &self,
        location: Coordinate,
        kinds: &[AmenityKind],
    ) -> Result<AmenityCounts, LookupError>;
}

/// Durable cache of resolved amenity counts.
///
/// Writes are last-writer-wins per neighborhood and kind.
#[async_trait]
pub trait AmenityStore: Send + Sync {
    /// Upsert `counts` for `neighborhood`.
    async fn persist(
        &self,
        neighborhood: NeighborhoodId,
        counts: &AmenityCounts,
    ) -> Result<(), StoreError>;
}
