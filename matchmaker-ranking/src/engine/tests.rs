//! Tests for the `RankingEngine`.

use std::time::Duration;

use super::*;
use matchmaker_core::test_support::{MemoryDirectory, RecordingAmenityStore, StubAmenityLookup};
use matchmaker_core::{DirectoryError, LookupError, NeighborhoodRef, RentType, SearchCriteriaError};
use rstest::{fixture, rstest};

fn neighborhood(id: u64, lat: f64) -> Neighborhood {
    let location = Coordinate::new(lat, -73.57).expect("valid coordinate");
    Neighborhood::new(id, format!("n{id}"), "Montreal", location)
}

fn unpaced() -> RankingConfig {
    RankingConfig::default().with_pacing(Duration::ZERO)
}

#[fixture]
fn grocery_search() -> SearchCriteria {
    SearchCriteria::new("Montreal", 1500).with_amenities([AmenityKind::Grocery])
}

#[rstest]
#[tokio::test]
async fn fifteen_candidates_yield_top_ten(grocery_search: SearchCriteria) {
    let neighborhoods: Vec<_> = (1..=15_u32)
        .map(|i| neighborhood(u64::from(i), 45.0 + f64::from(i) / 100.0))
        .collect();
    let mut lookup = StubAmenityLookup::with_counts(AmenityCounts::new());
    for (n, count) in neighborhoods.iter().zip([0, 1, 2, 3].into_iter().cycle()) {
        lookup = lookup.at(
            n.location,
            AmenityCounts::new().with_count(AmenityKind::Grocery, count),
        );
    }
    let engine = RankingEngine::new(
        MemoryDirectory::with_neighborhoods(neighborhoods),
        lookup,
        RecordingAmenityStore::default(),
    )
    .with_config(unpaced());

    let ranked = engine.rank(&grocery_search).await.expect("rank succeeds");

    assert_eq!(ranked.total_results, 10);
    assert_eq!(ranked.neighborhoods.len(), 10);
    assert!(
        ranked
            .neighborhoods
            .windows(2)
            .all(|pair| pair.first().map(|r| r.score) >= pair.last().map(|r| r.score))
    );
    // Three counts score 100; ids 4, 8 and 12 carry count 3.
    let leaders: Vec<_> = ranked
        .neighborhoods
        .iter()
        .take(3)
        .map(|r| r.neighborhood_id)
        .collect();
    assert_eq!(leaders, vec![4, 8, 12]);
}

#[rstest]
#[tokio::test]
async fn equal_scores_keep_directory_order(grocery_search: SearchCriteria) {
    let neighborhoods = vec![neighborhood(9, 45.1), neighborhood(3, 45.2), neighborhood(5, 45.3)];
    let engine = RankingEngine::new(
        MemoryDirectory::with_neighborhoods(neighborhoods),
        StubAmenityLookup::with_counts(AmenityCounts::new().with_count(AmenityKind::Grocery, 2)),
        RecordingAmenityStore::default(),
    )
    .with_config(unpaced().with_batch_size(2));

    let ranked = engine.rank(&grocery_search).await.expect("rank succeeds");
    let ids: Vec<_> = ranked
        .neighborhoods
        .iter()
        .map(|r| r.neighborhood_id)
        .collect();
    assert_eq!(ids, vec![9, 3, 5]);
}

#[rstest]
#[tokio::test]
async fn cached_counts_skip_the_lookup(grocery_search: SearchCriteria) {
    let cached = neighborhood(1, 45.5)
        .with_amenities(AmenityCounts::new().with_count(AmenityKind::Grocery, 3));
    let lookup = StubAmenityLookup::default();
    let store = RecordingAmenityStore::default();
    let directory = MemoryDirectory::with_neighborhoods([cached]);
    let engine = RankingEngine::new(directory, lookup, store).with_config(unpaced());

    let ranked = engine.rank(&grocery_search).await.expect("rank succeeds");

    assert_eq!(engine.lookup.call_count(), 0);
    assert!(engine.store.writes().is_empty());
    let first = ranked.neighborhoods.first().expect("one result");
    assert_eq!(first.score, 100);
}

#[rstest]
#[tokio::test]
async fn only_missing_kinds_are_fetched_and_merged() {
    let partial = neighborhood(1, 45.5)
        .with_amenities(AmenityCounts::new().with_count(AmenityKind::Grocery, 3));
    let lookup = StubAmenityLookup::with_counts(
        AmenityCounts::new()
            .with_count(AmenityKind::Park, 2)
            .with_count(AmenityKind::Grocery, 0),
    );
    let engine = RankingEngine::new(
        MemoryDirectory::with_neighborhoods([partial]),
        lookup,
        RecordingAmenityStore::default(),
    )
    .with_config(unpaced());
    let criteria = SearchCriteria::new("Montreal", 1500)
        .with_amenities([AmenityKind::Grocery, AmenityKind::Park]);

    let ranked = engine.rank(&criteria).await.expect("rank succeeds");

    let calls = engine.lookup.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls.first().map(|(_, kinds)| kinds.clone()),
        Some(vec![AmenityKind::Park])
    );
    let writes = engine.store.writes();
    let (id, persisted) = writes.first().expect("merged counts persisted");
    assert_eq!(*id, 1);
    assert_eq!(persisted.get(AmenityKind::Grocery), 3);
    assert_eq!(persisted.get(AmenityKind::Park), 2);
    let result = ranked.neighborhoods.first().expect("one result");
    assert_eq!(result.total_amenities, 5);
}

#[rstest]
#[tokio::test]
async fn lookup_failure_scores_zero_counts(grocery_search: SearchCriteria) {
    let engine = RankingEngine::new(
        MemoryDirectory::with_neighborhoods([neighborhood(1, 45.5)]),
        StubAmenityLookup::with_error(LookupError::Timeout {
            url: "http://overpass.test".into(),
        }),
        RecordingAmenityStore::default(),
    )
    .with_config(unpaced());

    let ranked = engine.rank(&grocery_search).await.expect("rank succeeds");

    let result = ranked.neighborhoods.first().expect("neighborhood kept");
    assert_eq!(result.amenity_counts.get(AmenityKind::Grocery), 0);
    assert!(result.amenity_counts.contains(AmenityKind::Grocery));
    assert_eq!(result.score, 0);
    assert!(engine.store.writes().is_empty());
}

#[rstest]
#[tokio::test]
async fn persist_failure_skips_only_that_neighborhood(grocery_search: SearchCriteria) {
    let engine = RankingEngine::new(
        MemoryDirectory::with_neighborhoods([
            neighborhood(1, 45.5),
            neighborhood(2, 45.6),
            neighborhood(3, 45.7),
        ]),
        StubAmenityLookup::with_counts(AmenityCounts::new().with_count(AmenityKind::Grocery, 1)),
        RecordingAmenityStore::failing_for([2]),
    )
    .with_config(unpaced());

    let ranked = engine.rank(&grocery_search).await.expect("rank succeeds");
    let ids: Vec<_> = ranked
        .neighborhoods
        .iter()
        .map(|r| r.neighborhood_id)
        .collect();
    assert_eq!(ids, vec![1, 3]);
    assert_eq!(ranked.total_results, 2);
}

#[rstest]
#[tokio::test]
async fn unknown_destination_leaves_commute_unknown() {
    let engine = RankingEngine::new(
        MemoryDirectory::with_neighborhoods([neighborhood(1, 45.5)]),
        StubAmenityLookup::with_counts(AmenityCounts::new().with_count(AmenityKind::Grocery, 3)),
        RecordingAmenityStore::default(),
    )
    .with_config(unpaced());
    let criteria = SearchCriteria::new("Montreal", 1500)
        .with_amenities([AmenityKind::Grocery])
        .with_destination("Atlantis");

    let ranked = engine.rank(&criteria).await.expect("rank succeeds");
    let result = ranked.neighborhoods.first().expect("one result");
    assert_eq!(result.commute_time, 0);
    assert_eq!(result.score, 100);
}

#[rstest]
#[tokio::test]
async fn known_destination_adds_commute_component() {
    let downtown = neighborhood(7, 45.52);
    let engine = RankingEngine::new(
        MemoryDirectory::with_neighborhoods([neighborhood(1, 45.5), downtown]),
        StubAmenityLookup::with_counts(AmenityCounts::new().with_count(AmenityKind::Grocery, 3)),
        RecordingAmenityStore::default(),
    )
    .with_config(unpaced());
    let criteria = SearchCriteria::new("Montreal", 1500)
        .with_amenities([AmenityKind::Grocery])
        .with_destination("n7");

    let ranked = engine.rank(&criteria).await.expect("rank succeeds");
    let own = ranked
        .neighborhoods
        .iter()
        .find(|r| r.neighborhood_id == 7)
        .expect("destination itself is ranked");
    assert_eq!(own.commute_time, 5);
    assert_eq!(own.score, 100);
}

#[rstest]
#[tokio::test]
async fn preferred_neighborhood_earns_bonus(grocery_search: SearchCriteria) {
    let engine = RankingEngine::new(
        MemoryDirectory::with_neighborhoods([neighborhood(1, 45.5), neighborhood(2, 45.6)]),
        StubAmenityLookup::with_counts(AmenityCounts::new().with_count(AmenityKind::Grocery, 1)),
        RecordingAmenityStore::default(),
    )
    .with_config(unpaced());
    let criteria = grocery_search.with_preferred(NeighborhoodRef::Id(2));

    let ranked = engine.rank(&criteria).await.expect("rank succeeds");
    let scores: Vec<_> = ranked
        .neighborhoods
        .iter()
        .map(|r| (r.neighborhood_id, r.score))
        .collect();
    // 5/10 without the bonus, 10/15 with it.
    assert_eq!(scores, vec![(2, 66), (1, 50)]);
}

#[rstest]
#[tokio::test]
async fn dynamic_search_with_nothing_nearby_scores_zero() {
    let engine = RankingEngine::new(
        MemoryDirectory::with_neighborhoods([neighborhood(1, 45.5)]),
        StubAmenityLookup::default(),
        RecordingAmenityStore::default(),
    )
    .with_config(unpaced());

    let ranked = engine
        .rank(&SearchCriteria::new("Montreal", 1500))
        .await
        .expect("rank succeeds");
    let result = ranked.neighborhoods.first().expect("one result");
    assert_eq!(result.amenity_counts.len(), AmenityKind::ALL.len());
    assert_eq!(result.score, 0);
}

#[rstest]
#[tokio::test]
async fn preferred_only_search_keeps_the_dynamic_amenity_ceiling() {
    let engine = RankingEngine::new(
        MemoryDirectory::with_neighborhoods([neighborhood(1, 45.5)]),
        StubAmenityLookup::default(),
        RecordingAmenityStore::default(),
    )
    .with_config(unpaced());
    let criteria = SearchCriteria::new("Montreal", 1500)
        .with_preferred(NeighborhoodRef::Id(1))
        .with_rent_types([RentType::Studio]);

    let ranked = engine.rank(&criteria).await.expect("rank succeeds");
    let result = ranked.neighborhoods.first().expect("one result");
    assert_eq!(result.commute_time, 0);
    // Bonus 5 over a ceiling of 67 weights + 10 diversity + 5 preferred.
    assert_eq!(result.score, 6);
    assert_eq!(ranked.search_criteria.rent_types, vec![RentType::Studio]);
}

#[rstest]
#[tokio::test]
async fn empty_city_is_an_empty_result(grocery_search: SearchCriteria) {
    let engine = RankingEngine::new(
        MemoryDirectory::default(),
        StubAmenityLookup::default(),
        RecordingAmenityStore::default(),
    );
    let ranked = engine.rank(&grocery_search).await.expect("rank succeeds");
    assert!(ranked.is_empty());
    assert_eq!(ranked.search_criteria, grocery_search);
    assert_eq!(engine.lookup.call_count(), 0);
}

#[rstest]
#[tokio::test]
async fn directory_failure_is_an_empty_result(grocery_search: SearchCriteria) {
    let engine = RankingEngine::new(
        MemoryDirectory::failing(DirectoryError::Query {
            operation: "list_by_city",
            message: "disk on fire".into(),
        }),
        StubAmenityLookup::default(),
        RecordingAmenityStore::default(),
    );
    let ranked = engine.rank(&grocery_search).await.expect("rank succeeds");
    assert!(ranked.is_empty());
}

#[rstest]
#[tokio::test]
async fn invalid_criteria_are_rejected_before_lookup() {
    let engine = RankingEngine::new(
        MemoryDirectory::with_neighborhoods([neighborhood(1, 45.5)]),
        StubAmenityLookup::default(),
        RecordingAmenityStore::default(),
    );
    let err = engine
        .rank(&SearchCriteria::new(" ", 1500))
        .await
        .expect_err("blank city rejected");
    assert_eq!(err, SearchError::InvalidCriteria(SearchCriteriaError::BlankCity));
    assert_eq!(engine.lookup.call_count(), 0);
}

#[rstest]
#[tokio::test]
async fn pacing_between_batches_is_honoured(grocery_search: SearchCriteria) {
    let engine = RankingEngine::new(
        MemoryDirectory::with_neighborhoods([
            neighborhood(1, 45.5),
            neighborhood(2, 45.6),
            neighborhood(3, 45.7),
        ]),
        StubAmenityLookup::default(),
        RecordingAmenityStore::default(),
    )
    .with_config(
        RankingConfig::default()
            .with_batch_size(1)
            .with_pacing(Duration::from_millis(20)),
    );
    let started = std::time::Instant::now();
    let ranked = engine.rank(&grocery_search).await.expect("rank succeeds");
    assert_eq!(ranked.total_results, 3);
    assert!(started.elapsed() >= Duration::from_millis(40));
}

#[rstest]
fn ranking_truncates_after_sorting() {
    let at = Coordinate::new(45.5, -73.6).expect("valid coordinate");
    let results: Vec<_> = [10_u8, 20, 90, 30]
        .into_iter()
        .zip(1_u64..)
        .map(|(score, id)| {
            let n = Neighborhood::new(id, format!("n{id}"), "Montreal", at);
            ScoredResult::new(&n, AmenityCounts::new(), None, score)
        })
        .collect();
    let ranked = rank_results(results, 1);
    assert_eq!(ranked.first().map(|r| r.neighborhood_id), Some(3));
    assert_eq!(ranked.len(), 1);
}
