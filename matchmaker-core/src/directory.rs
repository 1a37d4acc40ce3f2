//! The neighborhood directory collaborator.

use async_trait::async_trait;
use thiserror::Error;

use crate::{CoordinateError, Neighborhood, NeighborhoodId};

/// Errors raised by a [`NeighborhoodDirectory`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DirectoryError {
    /// The backing store could not be queried.
    #[error("directory query '{operation}' failed: {message}")]
    Query {
        /// Operation that failed.
        operation: &'static str,
        /// Backend message.
        message: String,
    },
    /// A stored neighborhood carried an invalid location.
    #[error("neighborhood {id} has an invalid location: {source}")]
    InvalidLocation {
        /// Offending record.
        id: NeighborhoodId,
        /// Validation failure.
        #[source]
        source: CoordinateError,
    },
}

/// Source of candidate neighborhoods.
///
/// A city without neighborhoods and an unknown name are legitimate empty
/// answers, not errors.
#[async_trait]
pub trait NeighborhoodDirectory: Send + Sync {
    /// Every neighborhood in `city`, with any cached amenity counts attached.
    async fn list_by_city(&self, city: &str) -> Result<Vec<Neighborhood>, DirectoryError>;

    /// The first neighborhood named `name`, if any.
    async fn find_by_name(&self, name: &str) -> Result<Option<Neighborhood>, DirectoryError>;
}
