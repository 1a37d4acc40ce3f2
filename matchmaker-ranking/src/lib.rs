//! Neighborhood ranking for the matchmaker.
//!
//! This crate provides [`RankingEngine`], the default implementation of the
//! [`Ranker`](matchmaker_core::Ranker) trait. It lists candidates from a
//! [`NeighborhoodDirectory`](matchmaker_core::NeighborhoodDirectory), resolves
//! missing amenity counts through an
//! [`AmenityLookup`](matchmaker_core::AmenityLookup) in small paced batches,
//! persists what it fetched, scores every candidate and returns the best
//! few. Failures local to one neighborhood never abort the search.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod config;
mod engine;

pub use config::{DEFAULT_BATCH_SIZE, DEFAULT_PACING, DEFAULT_RESULT_LIMIT, RankingConfig};
pub use engine::{RankingEngine, rank_results};
