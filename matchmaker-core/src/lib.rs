//! Core domain types for the neighborhood matchmaker.
//!
//! This crate holds the amenity and neighborhood model, the commute estimator,
//! the fixed scoring formula and the collaborator traits the ranking engine is
//! built against. Concrete adapters live in `matchmaker-data`; orchestration
//! lives in `matchmaker-ranking`.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod amenity;
pub mod criteria;
pub mod directory;
pub mod distance;
pub mod lookup;
pub mod neighborhood;
pub mod rent;
pub mod scorer;
pub mod scoring;
pub mod search;
#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use amenity::{
    AMENITY_WEIGHTS, AmenityCounts, AmenityKind, DEFAULT_AMENITY_WEIGHT, ESSENTIAL_AMENITIES,
    ParseAmenityKindError,
};
pub use criteria::{AmenityPolicy, NeighborhoodRef, SearchCriteria, SearchCriteriaError};
pub use directory::{DirectoryError, NeighborhoodDirectory};
pub use distance::{
    CommuteEstimator, MIN_COMMUTE_MINUTES, TRANSIT_PROFILE, TransitBand, TransitProfileEstimator,
};
pub use lookup::{AmenityLookup, AmenityStore, LookupError, StoreError};
pub use neighborhood::{Coordinate, CoordinateError, Neighborhood, NeighborhoodId};
pub use rent::{ParseRentTypeError, RentType};
pub use scorer::{HeuristicScorer, PREFERRED_BONUS, ScoreBreakdown, ScoreRequest, Scorer};
pub use scoring::SubScore;
pub use search::{RankedSearchResult, Ranker, ScoredResult, SearchError};
#[cfg(any(test, feature = "test-support"))]
pub use test_support::{MemoryDirectory, RecordingAmenityStore, StubAmenityLookup};
