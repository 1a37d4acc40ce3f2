//! Deterministic collaborator doubles for unit and behaviour tests.
//!
//! None of these touch the network or disk. Each double records enough about
//! its calls for tests to assert on caching and persistence behaviour.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::{
    AmenityCounts, AmenityKind, AmenityLookup, AmenityStore, Coordinate, DirectoryError,
    LookupError, Neighborhood, NeighborhoodDirectory, NeighborhoodId, StoreError,
};

/// In-memory `NeighborhoodDirectory`.
///
/// Lookups perform a linear scan in insertion order.
#[derive(Debug, Default)]
pub struct MemoryDirectory {
    neighborhoods: Vec<Neighborhood>,
    failure: Option<DirectoryError>,
}

impl MemoryDirectory {
    /// Create a directory holding `neighborhoods`.
    #[must_use]
    pub fn with_neighborhoods<I>(neighborhoods: I) -> Self
    where
        I: IntoIterator<Item = Neighborhood>,
    {
        Self {
            neighborhoods: neighborhoods.into_iter().collect(),
            failure: None,
        }
    }

    /// Create a directory whose every call fails with `error`.
    #[must_use]
    pub const fn failing(error: DirectoryError) -> Self {
        Self {
            neighborhoods: Vec::new(),
            failure: Some(error),
        }
    }

    fn check(&self) -> Result<(), DirectoryError> {
        self.failure.clone().map_or(Ok(()), Err)
    }
}

#[async_trait]
impl NeighborhoodDirectory for MemoryDirectory {
    async fn list_by_city(&self, city: &str) -> Result<Vec<Neighborhood>, DirectoryError> {
        self.check()?;
        Ok(self
            .neighborhoods
            .iter()
            .filter(|n| n.city == city)
            .cloned()
            .collect())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Neighborhood>, DirectoryError> {
        self.check()?;
        Ok(self.neighborhoods.iter().find(|n| n.name == name).cloned())
    }
}

/// Stub `AmenityLookup` returning pre-configured counts.
///
/// Counts registered for a specific location take precedence over the
/// default. Responses are projected onto the requested kinds, so every kind
/// asked for is present.
#[derive(Debug, Default)]
pub struct StubAmenityLookup {
    default_counts: AmenityCounts,
    by_location: Vec<(Coordinate, AmenityCounts)>,
    error: Option<LookupError>,
    calls: Mutex<Vec<(Coordinate, Vec<AmenityKind>)>>,
}

impl StubAmenityLookup {
    /// Return `counts` for every location.
    #[must_use]
    pub fn with_counts(counts: AmenityCounts) -> Self {
        Self {
            default_counts: counts,
            ..Self::default()
        }
    }

    /// Return `error` for every call.
    #[must_use]
    pub fn with_error(error: LookupError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }

    /// Return `counts` when asked about `location`.
    #[must_use]
    pub fn at(mut self, location: Coordinate, counts: AmenityCounts) -> Self {
        self.by_location.push((location, counts));
        self
    }

    /// Every call received so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<(Coordinate, Vec<AmenityKind>)> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of calls received so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait]
impl AmenityLookup for StubAmenityLookup {
    async fn resolve(
        &self,
        location: Coordinate,
        kinds: &[AmenityKind],
    ) -> Result<AmenityCounts, LookupError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((location, kinds.to_vec()));
        if let Some(error) = &self.error {
            return Err(error.clone());
        }
        let counts = self
            .by_location
            .iter()
            .find(|(at, _)| *at == location)
            .map_or(&self.default_counts, |(_, counts)| counts);
        Ok(counts.restricted_to(kinds))
    }
}

/// `AmenityStore` that records every write.
#[derive(Debug, Default)]
pub struct RecordingAmenityStore {
    failing: Vec<NeighborhoodId>,
    writes: Mutex<Vec<(NeighborhoodId, AmenityCounts)>>,
}

impl RecordingAmenityStore {
    /// Create a store that rejects writes for the listed neighborhoods.
    #[must_use]
    pub fn failing_for<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = NeighborhoodId>,
    {
        Self {
            failing: ids.into_iter().collect(),
            writes: Mutex::default(),
        }
    }

    /// Successful writes so far, in order.
    #[must_use]
    pub fn writes(&self) -> Vec<(NeighborhoodId, AmenityCounts)> {
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl AmenityStore for RecordingAmenityStore {
    async fn persist(
        &self,
        neighborhood: NeighborhoodId,
        counts: &AmenityCounts,
    ) -> Result<(), StoreError> {
        if self.failing.contains(&neighborhood) {
            return Err(StoreError::Write {
                neighborhood,
                message: "store unavailable".to_owned(),
            });
        }
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((neighborhood, counts.clone()));
        Ok(())
    }
}
