//! Facade crate for the neighborhood matchmaker engine.
//!
//! This crate re-exports the core domain types and the ranking engine, and
//! exposes the SQLite and Overpass collaborators behind the `data` feature.

#![forbid(unsafe_code)]

pub use matchmaker_core::{
    AmenityCounts, AmenityKind, AmenityLookup, AmenityPolicy, AmenityStore, CommuteEstimator,
    Coordinate, CoordinateError, DirectoryError, HeuristicScorer, LookupError, Neighborhood,
    NeighborhoodDirectory, NeighborhoodId, NeighborhoodRef, RankedSearchResult, Ranker, RentType,
    ScoreBreakdown, ScoreRequest, ScoredResult, Scorer, SearchCriteria, SearchCriteriaError,
    SearchError, StoreError, TransitProfileEstimator,
};
pub use matchmaker_ranking::{RankingConfig, RankingEngine, rank_results};

#[cfg(feature = "data")]
pub use matchmaker_data::{
    OverpassAmenityLookup, OverpassBuildError, OverpassConfig, SqliteNeighborhoodStore,
    SqliteStoreError,
};

#[cfg(feature = "test-support")]
pub use matchmaker_core::test_support;
