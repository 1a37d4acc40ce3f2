//! Amenity sub-score under the targeted and dynamic policies.

use super::{SubScore, curve_percent, percent_of};
use crate::{AmenityCounts, AmenityKind, AmenityPolicy};

/// Share of a kind's weight earned per count when the user picked kinds.
pub const TARGETED_CURVE: [(u32, u32); 3] = [(3, 100), (2, 80), (1, 50)];

/// Stricter curve for essential kinds under the dynamic policy.
pub const ESSENTIAL_CURVE: [(u32, u32); 2] = [(2, 100), (1, 60)];

/// Diversity tiers as `(minimum share in tenths, bonus)`, highest first.
pub const DIVERSITY_TIERS: [(usize, u32); 4] = [(8, 10), (6, 7), (4, 4), (2, 2)];

/// Maximum diversity bonus.
pub const DIVERSITY_CEILING: u32 = 10;

/// Score only `kinds`, each on the targeted curve.
///
/// # Examples
/// ```
/// use matchmaker_core::{AmenityCounts, AmenityKind, scoring::{SubScore, targeted_score}};
///
/// let counts = AmenityCounts::new().with_count(AmenityKind::Grocery, 3);
/// assert_eq!(targeted_score(&counts, &[AmenityKind::Grocery]), SubScore::new(10, 10));
/// ```
#[must_use]
pub fn targeted_score(counts: &AmenityCounts, kinds: &[AmenityKind]) -> SubScore {
    kinds.iter().fold(SubScore::EMPTY, |acc, &kind| {
        let weight = kind.weight();
        let earned = percent_of(weight, curve_percent(&TARGETED_CURVE, counts.get(kind)));
        acc.plus(SubScore::new(earned, weight))
    })
}

/// Score every kind, essentials on the stricter curve, plus the diversity
/// bonus.
#[must_use]
pub fn dynamic_score(counts: &AmenityCounts) -> SubScore {
    let per_kind = AmenityKind::ALL
        .iter()
        .fold(SubScore::EMPTY, |acc, &kind| {
            let weight = kind.weight();
            let curve: &[(u32, u32)] = if kind.is_essential() {
                &ESSENTIAL_CURVE
            } else {
                &TARGETED_CURVE
            };
            let earned = percent_of(weight, curve_percent(curve, counts.get(kind)));
            acc.plus(SubScore::new(earned, weight))
        });
    let present = AmenityKind::ALL
        .iter()
        .filter(|&&kind| counts.get(kind) > 0)
        .count();
    let bonus = diversity_bonus(present, AmenityKind::ALL.len());
    per_kind.plus(SubScore::new(bonus, DIVERSITY_CEILING))
}

/// Bonus for offering `present` of `total` kinds.
///
/// Non-decreasing in `present`. Returns zero when `total` is zero.
#[must_use]
pub fn diversity_bonus(present: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let share = present.saturating_mul(10);
    DIVERSITY_TIERS
        .iter()
        .find(|(tenths, _)| share >= total.saturating_mul(*tenths))
        .map_or(0, |&(_, bonus)| bonus)
}

/// Dispatch to the scorer for `policy`.
#[must_use]
pub fn amenity_score(counts: &AmenityCounts, policy: &AmenityPolicy) -> SubScore {
    match policy {
        AmenityPolicy::Targeted(kinds) => targeted_score(counts, kinds),
        AmenityPolicy::Dynamic => dynamic_score(counts),
    }
}
