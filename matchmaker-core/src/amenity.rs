//! Amenity kinds and per-neighborhood amenity counts.
//!
//! The kind enumeration is closed. Each kind carries a fixed importance weight
//! taken from [`AMENITY_WEIGHTS`]; weights are not caller-configurable.
//!
//! # Examples
//! ```
//! use matchmaker_core::{AmenityCounts, AmenityKind};
//!
//! assert_eq!(AmenityKind::Grocery.as_str(), "grocery");
//! assert_eq!(AmenityKind::Grocery.weight(), 10);
//!
//! let counts = AmenityCounts::new().with_count(AmenityKind::Park, 2);
//! assert_eq!(counts.get(AmenityKind::Park), 2);
//! assert_eq!(counts.get(AmenityKind::Cafe), 0);
//! ```

use std::collections::BTreeMap;

use thiserror::Error;

/// Category of point of interest tracked for scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AmenityKind {
    /// Parks and playgrounds.
    Park,
    /// Schools and universities.
    School,
    /// Restaurants and fast food.
    Restaurant,
    /// Public transport stations.
    Transit,
    /// Supermarkets, convenience stores and grocers.
    Grocery,
    /// Hospitals and clinics.
    Hospital,
    /// Cafes and bars.
    Cafe,
    /// Public libraries.
    Library,
    /// Fitness and sports centres.
    Gym,
}

/// Weight applied to a kind absent from [`AMENITY_WEIGHTS`].
pub const DEFAULT_AMENITY_WEIGHT: u32 = 5;

/// Importance weight per amenity kind.
///
/// Weights are local per-kind caps; they are not required to sum to 100.
pub const AMENITY_WEIGHTS: [(AmenityKind, u32); 9] = [
    (AmenityKind::Grocery, 10),
    (AmenityKind::Transit, 9),
    (AmenityKind::Hospital, 9),
    (AmenityKind::Restaurant, 8),
    (AmenityKind::School, 7),
    (AmenityKind::Park, 7),
    (AmenityKind::Cafe, 6),
    (AmenityKind::Gym, 6),
    (AmenityKind::Library, 5),
];

/// Kinds held to the stricter sufficiency curve in dynamic scoring.
pub const ESSENTIAL_AMENITIES: [AmenityKind; 3] = [
    AmenityKind::Grocery,
    AmenityKind::Transit,
    AmenityKind::Hospital,
];

impl AmenityKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 9] = [
        Self::Park,
        Self::School,
        Self::Restaurant,
        Self::Transit,
        Self::Grocery,
        Self::Hospital,
        Self::Cafe,
        Self::Library,
        Self::Gym,
    ];

    /// Return the kind as a lowercase `&str`.
    ///
    /// # Examples
    /// ```
    /// use matchmaker_core::AmenityKind;
    ///
    /// assert_eq!(AmenityKind::Transit.as_str(), "transit");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Park => "park",
            Self::School => "school",
            Self::Restaurant => "restaurant",
            Self::Transit => "transit",
            Self::Grocery => "grocery",
            Self::Hospital => "hospital",
            Self::Cafe => "cafe",
            Self::Library => "library",
            Self::Gym => "gym",
        }
    }

    /// Importance weight from [`AMENITY_WEIGHTS`].
    #[must_use]
    pub fn weight(self) -> u32 {
        AMENITY_WEIGHTS
            .iter()
            .find(|(kind, _)| *kind == self)
            .map_or(DEFAULT_AMENITY_WEIGHT, |&(_, weight)| weight)
    }

    /// Whether the kind is one of [`ESSENTIAL_AMENITIES`].
    #[must_use]
    pub fn is_essential(self) -> bool {
        ESSENTIAL_AMENITIES.contains(&self)
    }
}

impl std::fmt::Display for AmenityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown amenity name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown amenity kind '{0}'")]
pub struct ParseAmenityKindError(pub String);

impl std::str::FromStr for AmenityKind {
    type Err = ParseAmenityKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| ParseAmenityKindError(s.to_owned()))
    }
}

/// Non-negative amenity counts keyed by kind.
///
/// A kind without an entry reads as zero. Counts are unsigned, so the map can
/// never hold a negative value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AmenityCounts {
    counts: BTreeMap<AmenityKind, u32>,
}

impl AmenityCounts {
    /// Construct an empty set of counts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct counts holding zero for every listed kind.
    #[must_use]
    pub fn zeroed(kinds: &[AmenityKind]) -> Self {
        kinds.iter().map(|&kind| (kind, 0)).collect()
    }

    /// Return the count for `kind`, or zero when unknown.
    #[must_use]
    pub fn get(&self, kind: AmenityKind) -> u32 {
        self.counts.get(&kind).copied().unwrap_or_default()
    }

    /// Whether an entry exists for `kind`, even if it is zero.
    #[must_use]
    pub fn contains(&self, kind: AmenityKind) -> bool {
        self.counts.contains_key(&kind)
    }

    /// Insert or replace the count for `kind`.
    pub fn set(&mut self, kind: AmenityKind, count: u32) {
        self.counts.insert(kind, count);
    }

    /// Add `amount` to the count for `kind`.
    pub fn increment(&mut self, kind: AmenityKind, amount: u32) {
        let entry = self.counts.entry(kind).or_default();
        *entry = entry.saturating_add(amount);
    }

    /// Set a count while returning `self` for chaining.
    #[must_use]
    pub fn with_count(mut self, kind: AmenityKind, count: u32) -> Self {
        self.set(kind, count);
        self
    }

    /// Sum of all counts.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.counts
            .values()
            .fold(0_u32, |sum, &count| sum.saturating_add(count))
    }

    /// Number of kinds with a count above zero.
    #[must_use]
    pub fn present_kinds(&self) -> usize {
        self.counts.values().filter(|&&count| count > 0).count()
    }

    /// Kinds from `kinds` with no entry in these counts.
    #[must_use]
    pub fn missing(&self, kinds: &[AmenityKind]) -> Vec<AmenityKind> {
        kinds
            .iter()
            .copied()
            .filter(|kind| !self.contains(*kind))
            .collect()
    }

    /// Overlay `other` on top of `self`; entries in `other` win.
    #[must_use]
    pub fn merged_with(mut self, other: &Self) -> Self {
        self.counts.extend(other.iter());
        self
    }

    /// Project the counts onto `kinds`, filling absent kinds with zero.
    #[must_use]
    pub fn restricted_to(&self, kinds: &[AmenityKind]) -> Self {
        kinds.iter().map(|&kind| (kind, self.get(kind))).collect()
    }

    /// Iterate over `(kind, count)` pairs in kind order.
    pub fn iter(&self) -> impl Iterator<Item = (AmenityKind, u32)> + '_ {
        self.counts.iter().map(|(&kind, &count)| (kind, count))
    }

    /// Number of kinds with an entry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether no kind has an entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl FromIterator<(AmenityKind, u32)> for AmenityCounts {
    fn from_iter<I: IntoIterator<Item = (AmenityKind, u32)>>(iter: I) -> Self {
        Self {
            counts: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[rstest]
    #[case(AmenityKind::Grocery, 10)]
    #[case(AmenityKind::Transit, 9)]
    #[case(AmenityKind::Hospital, 9)]
    #[case(AmenityKind::Restaurant, 8)]
    #[case(AmenityKind::School, 7)]
    #[case(AmenityKind::Park, 7)]
    #[case(AmenityKind::Cafe, 6)]
    #[case(AmenityKind::Gym, 6)]
    #[case(AmenityKind::Library, 5)]
    fn weights_follow_table(#[case] kind: AmenityKind, #[case] weight: u32) {
        assert_eq!(kind.weight(), weight);
    }

    #[rstest]
    fn essential_kinds_are_grocery_transit_hospital() {
        let essential: Vec<_> = AmenityKind::ALL
            .into_iter()
            .filter(|kind| kind.is_essential())
            .collect();
        assert_eq!(
            essential,
            vec![
                AmenityKind::Transit,
                AmenityKind::Grocery,
                AmenityKind::Hospital
            ]
        );
    }

    #[rstest]
    fn parsing_is_case_insensitive() {
        assert_eq!(AmenityKind::from_str(" Grocery "), Ok(AmenityKind::Grocery));
        assert_eq!(AmenityKind::from_str("GYM"), Ok(AmenityKind::Gym));
    }

    #[rstest]
    fn parsing_rejects_unknown() {
        let err = AmenityKind::from_str("casino").expect_err("unknown kind");
        assert!(err.to_string().contains("unknown amenity kind"));
    }

    #[rstest]
    fn display_matches_as_str() {
        for kind in AmenityKind::ALL {
            assert_eq!(kind.to_string(), kind.as_str());
        }
    }

    #[rstest]
    fn missing_reports_kinds_without_entries() {
        let counts = AmenityCounts::new()
            .with_count(AmenityKind::Park, 0)
            .with_count(AmenityKind::Cafe, 4);
        let missing = counts.missing(&[AmenityKind::Park, AmenityKind::Gym, AmenityKind::Cafe]);
        assert_eq!(missing, vec![AmenityKind::Gym]);
    }

    #[rstest]
    fn merge_prefers_incoming_entries() {
        let cached = AmenityCounts::new()
            .with_count(AmenityKind::Park, 1)
            .with_count(AmenityKind::Cafe, 2);
        let fetched = AmenityCounts::new()
            .with_count(AmenityKind::Cafe, 5)
            .with_count(AmenityKind::Gym, 3);
        let merged = cached.merged_with(&fetched);
        assert_eq!(merged.get(AmenityKind::Park), 1);
        assert_eq!(merged.get(AmenityKind::Cafe), 5);
        assert_eq!(merged.get(AmenityKind::Gym), 3);
    }

    #[rstest]
    fn restriction_fills_zeroes_and_drops_extras() {
        let counts = AmenityCounts::new()
            .with_count(AmenityKind::Park, 3)
            .with_count(AmenityKind::Library, 1);
        let restricted = counts.restricted_to(&[AmenityKind::Park, AmenityKind::School]);
        assert_eq!(restricted.len(), 2);
        assert_eq!(restricted.get(AmenityKind::Park), 3);
        assert!(restricted.contains(AmenityKind::School));
        assert!(!restricted.contains(AmenityKind::Library));
    }

    #[rstest]
    fn totals_and_presence() {
        let counts = AmenityCounts::zeroed(&AmenityKind::ALL)
            .with_count(AmenityKind::Park, 2)
            .with_count(AmenityKind::Gym, 5);
        assert_eq!(counts.total(), 7);
        assert_eq!(counts.present_kinds(), 2);
        assert_eq!(counts.len(), 9);
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn serialises_as_lowercase_map() {
        let counts = AmenityCounts::new().with_count(AmenityKind::Grocery, 3);
        let json = serde_json::to_string(&counts).expect("serialise counts");
        assert_eq!(json, r#"{"grocery":3}"#);
    }
}
