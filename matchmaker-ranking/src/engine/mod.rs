//! `RankingEngine` implementation.
//!
//! Candidates are processed in batches of [`RankingConfig::batch_size`]. Within
//! a batch every neighborhood is evaluated concurrently and its outcome is
//! captured separately, so one failure never cancels its siblings. Batches run
//! in sequence with [`RankingConfig::pacing`] between them.

use async_trait::async_trait;
use futures_util::future::join_all;
use thiserror::Error;

use matchmaker_core::{
    AmenityCounts, AmenityKind, AmenityLookup, AmenityPolicy, AmenityStore, CommuteEstimator,
    Coordinate, HeuristicScorer, Neighborhood, NeighborhoodDirectory, RankedSearchResult, Ranker,
    ScoreRequest, ScoredResult, Scorer, SearchCriteria, SearchError, StoreError,
    TransitProfileEstimator,
};

use crate::RankingConfig;

/// Why a neighborhood was left out of the results.
#[derive(Debug, Error)]
enum SkipReason {
    #[error("amenity counts could not be persisted: {0}")]
    Persist(#[from] StoreError),
}

/// Per-request values shared by every candidate.
struct SearchContext<'a> {
    criteria: &'a SearchCriteria,
    policy: AmenityPolicy,
    destination: Option<Coordinate>,
}

/// Default [`Ranker`] built from injected collaborators.
///
/// The engine is generic over the directory, the amenity lookup and cache,
/// the scorer and the commute estimator. The last two default to the fixed
/// heuristic and the transit profile.
pub struct RankingEngine<D, L, A, S = HeuristicScorer, E = TransitProfileEstimator>
where
    D: NeighborhoodDirectory,
    L: AmenityLookup,
    A: AmenityStore,
    S: Scorer,
    E: CommuteEstimator,
{
    directory: D,
    lookup: L,
    store: A,
    scorer: S,
    estimator: E,
    config: RankingConfig,
}

impl<D, L, A> RankingEngine<D, L, A>
where
    D: NeighborhoodDirectory,
    L: AmenityLookup,
    A: AmenityStore,
{
    /// Construct an engine with the default scorer, estimator and
    /// configuration.
    #[must_use]
    pub fn new(directory: D, lookup: L, store: A) -> Self {
        Self::with_parts(
            directory,
            lookup,
            store,
            HeuristicScorer,
            TransitProfileEstimator,
            RankingConfig::default(),
        )
    }
}

impl<D, L, A, S, E> RankingEngine<D, L, A, S, E>
where
    D: NeighborhoodDirectory,
    L: AmenityLookup,
    A: AmenityStore,
    S: Scorer,
    E: CommuteEstimator,
{
    /// Construct an engine from explicit parts.
    pub const fn with_parts(
        directory: D,
        lookup: L,
        store: A,
        scorer: S,
        estimator: E,
        config: RankingConfig,
    ) -> Self {
        Self {
            directory,
            lookup,
            store,
            scorer,
            estimator,
            config,
        }
    }

    /// Replace the configuration.
    #[must_use]
    pub fn with_config(mut self, config: RankingConfig) -> Self {
        self.config = config;
        self
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &RankingConfig {
        &self.config
    }

    async fn resolve_destination(&self, criteria: &SearchCriteria) -> Option<Coordinate> {
        let name = criteria.destination.as_deref()?;
        match self.directory.find_by_name(name).await {
            Ok(Some(destination)) => Some(destination.location),
            Ok(None) => {
                log::warn!("destination '{name}' not found; commute treated as unknown");
                None
            }
            Err(error) => {
                log::warn!("destination '{name}' could not be resolved: {error}");
                None
            }
        }
    }

    async fn resolve_amenities(
        &self,
        neighborhood: &Neighborhood,
        kinds: &[AmenityKind],
    ) -> Result<AmenityCounts, SkipReason> {
        let cached = neighborhood.amenities.clone().unwrap_or_default();
        let missing = cached.missing(kinds);
        if missing.is_empty() {
            log::info!("using cached amenities for '{}'", neighborhood.name);
            return Ok(cached.restricted_to(kinds));
        }

        match self.lookup.resolve(neighborhood.location, &missing).await {
            Ok(fetched) => {
                let merged = cached.merged_with(&fetched.restricted_to(&missing));
                self.store.persist(neighborhood.id, &merged).await?;
                Ok(merged.restricted_to(kinds))
            }
            Err(error) => {
                log::warn!(
                    "amenity lookup for '{}' failed, scoring missing kinds as zero: {error}",
                    neighborhood.name
                );
                Ok(cached.restricted_to(kinds))
            }
        }
    }

    async fn evaluate(
        &self,
        neighborhood: &Neighborhood,
        context: &SearchContext<'_>,
    ) -> Result<ScoredResult, SkipReason> {
        let counts = self
            .resolve_amenities(neighborhood, context.policy.kinds())
            .await?;
        let commute_minutes = context
            .destination
            .map(|to| self.estimator.estimate_minutes(neighborhood.location, to));
        let breakdown = self.scorer.score(&ScoreRequest {
            counts: &counts,
            policy: &context.policy,
            commute_minutes,
            max_commute_minutes: context.criteria.max_commute_minutes,
            preferred: context.criteria.is_preferred(neighborhood),
        });
        log::debug!(
            "scored '{}' at {} ({:?})",
            neighborhood.name,
            breakdown.score,
            breakdown.total()
        );
        Ok(ScoredResult::new(
            neighborhood,
            counts,
            commute_minutes,
            breakdown.score,
        ))
    }

    async fn evaluate_all(
        &self,
        candidates: &[Neighborhood],
        context: &SearchContext<'_>,
    ) -> Vec<ScoredResult> {
        let mut results = Vec::with_capacity(candidates.len());
        for (index, batch) in candidates.chunks(self.config.batch_size.get()).enumerate() {
            if index > 0 && !self.config.pacing.is_zero() {
                tokio::time::sleep(self.config.pacing).await;
            }
            let outcomes = join_all(batch.iter().map(|n| self.evaluate(n, context))).await;
            for (neighborhood, outcome) in batch.iter().zip(outcomes) {
                match outcome {
                    Ok(result) => results.push(result),
                    Err(reason) => {
                        log::warn!("skipping neighborhood '{}': {reason}", neighborhood.name);
                    }
                }
            }
        }
        results
    }
}

#[async_trait]
impl<D, L, A, S, E> Ranker for RankingEngine<D, L, A, S, E>
where
    D: NeighborhoodDirectory,
    L: AmenityLookup,
    A: AmenityStore,
    S: Scorer,
    E: CommuteEstimator,
{
    async fn rank(&self, criteria: &SearchCriteria) -> Result<RankedSearchResult, SearchError> {
        criteria.validate()?;

        let candidates = match self.directory.list_by_city(&criteria.city).await {
            Ok(candidates) => candidates,
            Err(error) => {
                log::error!("listing neighborhoods in '{}' failed: {error}", criteria.city);
                return Ok(RankedSearchResult::empty(criteria.clone()));
            }
        };
        if candidates.is_empty() {
            log::info!("no neighborhoods found in '{}'", criteria.city);
            return Ok(RankedSearchResult::empty(criteria.clone()));
        }
        log::info!(
            "ranking {} neighborhoods in '{}'",
            candidates.len(),
            criteria.city
        );

        let context = SearchContext {
            criteria,
            policy: criteria.amenity_policy(),
            destination: self.resolve_destination(criteria).await,
        };
        let results = self.evaluate_all(&candidates, &context).await;
        Ok(RankedSearchResult::new(
            rank_results(results, self.config.result_limit),
            criteria.clone(),
        ))
    }
}

/// Sort `results` by descending score and keep the first `limit`.
///
/// The sort is stable, so equal scores keep their input order. Truncation
/// happens only after the full sort.
///
/// # Examples
/// ```
/// use matchmaker_core::{AmenityCounts, Coordinate, Neighborhood, ScoredResult};
/// use matchmaker_ranking::rank_results;
///
/// # fn main() -> Result<(), matchmaker_core::CoordinateError> {
/// let at = Coordinate::new(45.5, -73.6)?;
/// let result = |id, score| {
///     let n = Neighborhood::new(id, format!("n{id}"), "Montreal", at);
///     ScoredResult::new(&n, AmenityCounts::new(), None, score)
/// };
/// let ranked = rank_results(vec![result(1, 40), result(2, 90), result(3, 40)], 2);
/// let ids: Vec<_> = ranked.iter().map(|r| r.neighborhood_id).collect();
/// assert_eq!(ids, vec![2, 1]);
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn rank_results(mut results: Vec<ScoredResult>, limit: usize) -> Vec<ScoredResult> {
    results.sort_by(|a, b| b.score.cmp(&a.score));
    results.truncate(limit);
    results
}

#[cfg(test)]
mod tests;
