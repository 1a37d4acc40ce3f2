//! Overpass JSON response types and element classification.
//!
//! Only element tags are read. Geometry, ids and metadata are ignored.

use std::collections::BTreeMap;

use matchmaker_core::{AmenityCounts, AmenityKind};
use serde::Deserialize;

/// Body returned for an `[out:json]` query.
#[derive(Debug, Default, Deserialize)]
pub struct OverpassResponse {
    /// Matched nodes and ways. Absent in some error bodies.
    #[serde(default)]
    pub elements: Vec<OverpassElement>,
}

/// One matched OSM element.
#[derive(Debug, Default, Deserialize)]
pub struct OverpassElement {
    /// OSM tags; untagged elements omit the field.
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl OverpassResponse {
    /// Count elements per kind, keeping only `kinds`.
    ///
    /// Every requested kind is present in the result, zero when nothing
    /// matched it.
    #[must_use]
    pub fn count(&self, kinds: &[AmenityKind]) -> AmenityCounts {
        let mut counts = AmenityCounts::zeroed(kinds);
        for kind in self.elements.iter().filter_map(|e| classify(&e.tags)) {
            if kinds.contains(&kind) {
                counts.increment(kind, 1);
            }
        }
        counts
    }
}

/// Map an element's tags to the amenity kind it represents.
///
/// `shop` is consulted first, then `amenity`, then `leisure`. Any element
/// carrying a `public_transport` or `railway` key is transit.
#[must_use]
pub fn classify(tags: &BTreeMap<String, String>) -> Option<AmenityKind> {
    let value = |key: &str| tags.get(key).map(String::as_str);

    let by_shop = match value("shop") {
        Some("supermarket" | "convenience" | "grocery") => Some(AmenityKind::Grocery),
        Some("bakery") => Some(AmenityKind::Cafe),
        _ => None,
    };
    let by_amenity = || match value("amenity") {
        Some("restaurant" | "fast_food") => Some(AmenityKind::Restaurant),
        Some("cafe" | "bar") => Some(AmenityKind::Cafe),
        Some("hospital" | "clinic") => Some(AmenityKind::Hospital),
        Some("school" | "university") => Some(AmenityKind::School),
        Some("library") => Some(AmenityKind::Library),
        Some("gym") => Some(AmenityKind::Gym),
        _ => None,
    };
    let by_leisure = || match value("leisure") {
        Some("park" | "playground") => Some(AmenityKind::Park),
        Some("fitness_centre" | "sports_centre") => Some(AmenityKind::Gym),
        _ => None,
    };
    let by_transport = || {
        (tags.contains_key("public_transport") || tags.contains_key("railway"))
            .then_some(AmenityKind::Transit)
    };

    by_shop
        .or_else(by_amenity)
        .or_else(by_leisure)
        .or_else(by_transport)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn tags(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[rstest]
    #[case(&[("shop", "supermarket")], Some(AmenityKind::Grocery))]
    #[case(&[("shop", "bakery")], Some(AmenityKind::Cafe))]
    #[case(&[("amenity", "fast_food")], Some(AmenityKind::Restaurant))]
    #[case(&[("amenity", "bar")], Some(AmenityKind::Cafe))]
    #[case(&[("amenity", "clinic")], Some(AmenityKind::Hospital))]
    #[case(&[("amenity", "university")], Some(AmenityKind::School))]
    #[case(&[("amenity", "library")], Some(AmenityKind::Library))]
    #[case(&[("amenity", "gym")], Some(AmenityKind::Gym))]
    #[case(&[("leisure", "playground")], Some(AmenityKind::Park))]
    #[case(&[("leisure", "sports_centre")], Some(AmenityKind::Gym))]
    #[case(&[("railway", "halt")], Some(AmenityKind::Transit))]
    #[case(&[("public_transport", "platform")], Some(AmenityKind::Transit))]
    #[case(&[("shop", "hardware")], None)]
    #[case(&[], None)]
    fn classifies_tags(#[case] pairs: &[(&str, &str)], #[case] expected: Option<AmenityKind>) {
        assert_eq!(classify(&tags(pairs)), expected);
    }

    #[rstest]
    fn shop_wins_over_amenity() {
        let element = tags(&[("shop", "convenience"), ("amenity", "cafe")]);
        assert_eq!(classify(&element), Some(AmenityKind::Grocery));
    }

    #[rstest]
    fn unmatched_shop_falls_through_to_amenity() {
        let element = tags(&[("shop", "books"), ("amenity", "library")]);
        assert_eq!(classify(&element), Some(AmenityKind::Library));
    }

    #[rstest]
    fn counts_only_requested_kinds() {
        let body = r#"{
            "elements": [
                {"type": "node", "id": 1, "tags": {"leisure": "park"}},
                {"type": "way", "id": 2, "tags": {"leisure": "playground"}},
                {"type": "node", "id": 3, "tags": {"amenity": "cafe"}},
                {"type": "node", "id": 4}
            ]
        }"#;
        let response: OverpassResponse = serde_json::from_str(body).expect("valid body");
        let counts = response.count(&[AmenityKind::Park, AmenityKind::Gym]);
        assert_eq!(counts.get(AmenityKind::Park), 2);
        assert!(counts.contains(AmenityKind::Gym));
        assert_eq!(counts.get(AmenityKind::Gym), 0);
        assert!(!counts.contains(AmenityKind::Cafe));
    }

    #[rstest]
    fn missing_elements_yield_zeroes() {
        let response: OverpassResponse =
            serde_json::from_str(r#"{"remark": "runtime error"}"#).expect("valid body");
        let counts = response.count(&[AmenityKind::School]);
        assert_eq!(counts.get(AmenityKind::School), 0);
        assert!(counts.contains(AmenityKind::School));
    }
}
