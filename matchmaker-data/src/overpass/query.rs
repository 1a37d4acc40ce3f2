//! Overpass QL query construction.

use matchmaker_core::{AmenityKind, Coordinate};

/// OSM `key=value` tags searched for each amenity kind.
pub const OVERPASS_TAGS: [(AmenityKind, &[(&str, &str)]); 9] = [
    (
        AmenityKind::Grocery,
        &[
            ("shop", "supermarket"),
            ("shop", "convenience"),
            ("shop", "grocery"),
        ],
    ),
    (
        AmenityKind::Restaurant,
        &[("amenity", "restaurant"), ("amenity", "fast_food")],
    ),
    (AmenityKind::Cafe, &[("amenity", "cafe"), ("amenity", "bar")]),
    (
        AmenityKind::Hospital,
        &[("amenity", "hospital"), ("amenity", "clinic")],
    ),
    (
        AmenityKind::School,
        &[("amenity", "school"), ("amenity", "university")],
    ),
    (
        AmenityKind::Park,
        &[("leisure", "park"), ("leisure", "playground")],
    ),
    (
        AmenityKind::Transit,
        &[("public_transport", "station"), ("railway", "station")],
    ),
    (
        AmenityKind::Gym,
        &[("leisure", "fitness_centre"), ("leisure", "sports_centre")],
    ),
    (AmenityKind::Library, &[("amenity", "library")]),
];

/// Tags searched for `kind`.
#[must_use]
pub fn tags_for(kind: AmenityKind) -> &'static [(&'static str, &'static str)] {
    OVERPASS_TAGS
        .iter()
        .find(|(candidate, _)| *candidate == kind)
        .map_or(&[], |(_, tags)| *tags)
}

/// Build the query counting `kinds` within `radius_meters` of `location`.
///
/// Duplicate kinds produce duplicate clauses; Overpass unions them, so the
/// result is unaffected.
///
/// # Examples
/// ```
/// use matchmaker_core::{AmenityKind, Coordinate};
/// use matchmaker_data::overpass::build_query;
///
/// # fn main() -> Result<(), matchmaker_core::CoordinateError> {
/// let query = build_query(Coordinate::new(45.5, -73.6)?, 500, &[AmenityKind::Library]);
/// assert!(query.contains(r#"node["amenity"="library"](around:500,45.5,-73.6);"#));
/// assert!(query.ends_with("out center;"));
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn build_query(location: Coordinate, radius_meters: u32, kinds: &[AmenityKind]) -> String {
    let around = format!(
        "(around:{radius_meters},{},{})",
        location.lat(),
        location.lon()
    );
    let mut query = String::from("[out:json][timeout:25];\n(\n");
    for kind in kinds {
        for (key, value) in tags_for(*kind) {
            for element in ["node", "way"] {
                query.push_str(&format!("{element}[\"{key}\"=\"{value}\"]{around};\n"));
            }
        }
    }
    query.push_str(");\nout center;");
    query
}
