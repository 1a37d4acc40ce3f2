//! Search results and the ranking seam.

use async_trait::async_trait;
use thiserror::Error;

use crate::{
    AmenityCounts, Coordinate, Neighborhood, NeighborhoodId, SearchCriteria, SearchCriteriaError,
};

/// One ranked neighborhood.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoredResult {
    /// Directory identifier.
    pub neighborhood_id: NeighborhoodId,
    /// Display name.
    pub neighborhood_name: String,
    /// Counts for the kinds that were scored.
    pub amenity_counts: AmenityCounts,
    /// Sum of `amenity_counts`.
    pub total_amenities: u32,
    /// Estimated commute in minutes; `0` when no commute was computed.
    pub commute_time: u32,
    /// Relevance in `0..=100`.
    pub score: u8,
    /// Neighborhood location.
    pub coordinates: Coordinate,
}

impl ScoredResult {
    /// Build a result for `neighborhood`.
    ///
    /// An unknown commute is reported with the `0` sentinel.
    #[must_use]
    pub fn new(
        neighborhood: &Neighborhood,
        amenity_counts: AmenityCounts,
        commute_minutes: Option<u32>,
        score: u8,
    ) -> Self {
        Self {
            neighborhood_id: neighborhood.id,
            neighborhood_name: neighborhood.name.clone(),
            total_amenities: amenity_counts.total(),
            amenity_counts,
            commute_time: commute_minutes.unwrap_or_default(),
            score: score.min(100),
            coordinates: neighborhood.location,
        }
    }
}

/// Ranked results, best first, with the criteria that produced them.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankedSearchResult {
    /// Results sorted by descending score.
    pub neighborhoods: Vec<ScoredResult>,
    /// Number of entries in `neighborhoods`.
    pub total_results: usize,
    /// Echo of the request.
    pub search_criteria: SearchCriteria,
}

impl RankedSearchResult {
    /// Wrap already-ranked results.
    #[must_use]
    pub fn new(neighborhoods: Vec<ScoredResult>, search_criteria: SearchCriteria) -> Self {
        Self {
            total_results: neighborhoods.len(),
            neighborhoods,
            search_criteria,
        }
    }

    /// A result with no neighborhoods.
    #[must_use]
    pub fn empty(search_criteria: SearchCriteria) -> Self {
        Self::new(Vec::new(), search_criteria)
    }

    /// Whether no neighborhood matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.neighborhoods.is_empty()
    }
}

/// Errors surfaced to callers of a [`Ranker`].
///
/// Only malformed input is an error; empty candidate sets and per-neighborhood
/// failures produce (possibly empty) results instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The criteria were rejected before any work began.
    #[error("invalid search criteria: {0}")]
    InvalidCriteria(#[from] SearchCriteriaError),
}

/// Rank neighborhoods for a set of criteria.
#[async_trait]
pub trait Ranker: Send + Sync {
    /// Produce the ranked result for `criteria`.
    async fn rank(&self, criteria: &SearchCriteria) -> Result<RankedSearchResult, SearchError>;
}
