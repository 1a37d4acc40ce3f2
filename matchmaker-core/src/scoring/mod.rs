//! Component scorers and the shared sub-score arithmetic.
//!
//! Each component yields a [`SubScore`]: points achieved out of a ceiling.
//! The composite scorer sums components and normalises to `0..=100`.
//! Percentages are applied with integer truncation toward zero.

mod amenity;
mod commute;

pub use amenity::{
    DIVERSITY_CEILING, DIVERSITY_TIERS, ESSENTIAL_CURVE, TARGETED_CURVE, amenity_score,
    diversity_bonus, dynamic_score, targeted_score,
};
pub use commute::{BOUNDED_COMMUTE_TIERS, COMMUTE_CEILING, OPEN_COMMUTE_TIERS, commute_score};

/// Points achieved by one scoring component and the most it could award.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubScore {
    /// Points awarded.
    pub score: u32,
    /// Maximum attainable points.
    pub ceiling: u32,
}

impl SubScore {
    /// A component that contributes nothing, not even a ceiling.
    pub const EMPTY: Self = Self::new(0, 0);

    /// Construct a sub-score.
    #[must_use]
    pub const fn new(score: u32, ceiling: u32) -> Self {
        Self { score, ceiling }
    }

    /// Component-wise sum, saturating on overflow.
    #[must_use]
    pub const fn plus(self, other: Self) -> Self {
        Self {
            score: self.score.saturating_add(other.score),
            ceiling: self.ceiling.saturating_add(other.ceiling),
        }
    }
}

/// `percent`% of `value`, truncated toward zero.
#[must_use]
#[expect(
    clippy::integer_division,
    reason = "truncating percentages is part of the scoring formula"
)]
pub fn percent_of(value: u32, percent: u32) -> u32 {
    let scaled = u64::from(value) * u64::from(percent) / 100;
    u32::try_from(scaled).unwrap_or(u32::MAX)
}

/// Look up the percentage for `count` in a descending `(minimum, percent)`
/// curve. Counts below every minimum earn nothing.
#[must_use]
pub fn curve_percent(curve: &[(u32, u32)], count: u32) -> u32 {
    curve
        .iter()
        .find(|(minimum, _)| count >= *minimum)
        .map_or(0, |&(_, percent)| percent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(10, 80, 8)]
    #[case(15, 70, 10)]
    #[case(15, 30, 4)]
    #[case(7, 50, 3)]
    #[case(9, 60, 5)]
    #[case(0, 100, 0)]
    fn percentages_truncate(#[case] value: u32, #[case] percent: u32, #[case] expected: u32) {
        assert_eq!(percent_of(value, percent), expected);
    }

    #[rstest]
    fn sub_scores_add_componentwise() {
        let total = SubScore::new(3, 10).plus(SubScore::new(4, 15)).plus(SubScore::EMPTY);
        assert_eq!(total, SubScore::new(7, 25));
    }
}
