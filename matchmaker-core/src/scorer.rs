//! Combine component sub-scores into a single relevance percentage.
//!
//! The `Scorer` trait turns the resolved inputs for one neighborhood into a
//! [`ScoreBreakdown`]. [`HeuristicScorer`] applies the fixed amenity, commute
//! and preference formula.

use crate::scoring::{SubScore, amenity_score, commute_score};
use crate::{AmenityCounts, AmenityPolicy};

/// Bonus, and matching ceiling, for a neighborhood the user prefers.
pub const PREFERRED_BONUS: u32 = 5;

/// Inputs needed to score one neighborhood.
#[derive(Debug, Clone, Copy)]
pub struct ScoreRequest<'a> {
    /// Resolved counts covering every kind the policy reads.
    pub counts: &'a AmenityCounts,
    /// Amenity scoring policy.
    pub policy: &'a AmenityPolicy,
    /// Estimated commute, or `None` when unknown.
    pub commute_minutes: Option<u32>,
    /// The user's commute ceiling, if given.
    pub max_commute_minutes: Option<u32>,
    /// Whether the neighborhood is on the preferred list.
    pub preferred: bool,
}

/// Per-component scores and the final percentage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreBreakdown {
    /// Amenity component.
    pub amenity: SubScore,
    /// Commute component.
    pub commute: SubScore,
    /// Preference component.
    pub preferred: SubScore,
    /// Final score in `0..=100`.
    pub score: u8,
}

impl ScoreBreakdown {
    /// Sum of every component.
    #[must_use]
    pub const fn total(&self) -> SubScore {
        self.amenity.plus(self.commute).plus(self.preferred)
    }
}

/// Calculate a relevance score for one neighborhood.
///
/// Implementations must be thread-safe (`Send` + `Sync`) so scoring can run
/// inside concurrent lookups. Scoring is infallible; a breakdown whose total
/// ceiling is zero must report a score of zero.
///
/// # Examples
///
/// ```rust
/// use matchmaker_core::{
///     AmenityCounts, AmenityPolicy, ScoreBreakdown, ScoreRequest, Scorer,
/// };
///
/// struct Flat;
///
/// impl Scorer for Flat {
///     fn score(&self, _request: &ScoreRequest<'_>) -> ScoreBreakdown {
///         ScoreBreakdown { score: 50, ..ScoreBreakdown::default() }
///     }
/// }
///
/// let counts = AmenityCounts::new();
/// let request = ScoreRequest {
///     counts: &counts,
///     policy: &AmenityPolicy::Dynamic,
///     commute_minutes: None,
///     max_commute_minutes: None,
///     preferred: false,
/// };
/// assert_eq!(Flat.score(&request).score, 50);
/// ```
pub trait Scorer: Send + Sync {
    /// Score the neighborhood described by `request`.
    fn score(&self, request: &ScoreRequest<'_>) -> ScoreBreakdown;

    /// Normalise achieved points against a ceiling into `0..=100`.
    ///
    /// A zero ceiling yields zero rather than a division error.
    #[must_use]
    #[expect(
        clippy::integer_division,
        reason = "the final score is floored to a whole percentage"
    )]
    fn normalise(total: SubScore) -> u8
    where
        Self: Sized,
    {
        if total.ceiling == 0 {
            return 0;
        }
        let percent = u64::from(total.score) * 100 / u64::from(total.ceiling);
        u8::try_from(percent.min(100)).unwrap_or(100)
    }
}

/// The fixed amenity + commute + preference formula.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicScorer;

impl Scorer for HeuristicScorer {
    fn score(&self, request: &ScoreRequest<'_>) -> ScoreBreakdown {
        let amenity = amenity_score(request.counts, request.policy);
        let commute = commute_score(request.commute_minutes, request.max_commute_minutes);
        let preferred = if request.preferred {
            SubScore::new(PREFERRED_BONUS, PREFERRED_BONUS)
        } else {
            SubScore::EMPTY
        };
        let mut breakdown = ScoreBreakdown {
            amenity,
            commute,
            preferred,
            score: 0,
        };
        breakdown.score = Self::normalise(breakdown.total());
        breakdown
    }
}
