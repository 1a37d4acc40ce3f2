//! Commute sub-score.

use super::{SubScore, percent_of};

/// Ceiling of the commute component whenever an estimate exists.
pub const COMMUTE_CEILING: u32 = 15;

/// Tiers relative to a user maximum as `(multiple of max in tenths, percent)`.
pub const BOUNDED_COMMUTE_TIERS: [(u64, u32); 3] = [(7, 100), (10, 70), (12, 30)];

/// Absolute tiers used when no maximum is given, as `(minutes, percent)`.
pub const OPEN_COMMUTE_TIERS: [(u32, u32); 4] = [(15, 100), (25, 80), (35, 60), (45, 30)];

/// Score a commute estimate against an optional user maximum.
///
/// No estimate means no component at all: both score and ceiling are zero.
///
/// # Examples
/// ```
/// use matchmaker_core::scoring::{SubScore, commute_score};
///
/// assert_eq!(commute_score(None, Some(30)), SubScore::EMPTY);
/// assert_eq!(commute_score(Some(20), Some(30)), SubScore::new(15, 15));
/// assert_eq!(commute_score(Some(30), None), SubScore::new(9, 15));
/// ```
#[must_use]
pub fn commute_score(commute_minutes: Option<u32>, max_commute_minutes: Option<u32>) -> SubScore {
    let Some(minutes) = commute_minutes else {
        return SubScore::EMPTY;
    };
    let percent = match max_commute_minutes {
        Some(max) => bounded_percent(minutes, max),
        None => open_percent(minutes),
    };
    SubScore::new(percent_of(COMMUTE_CEILING, percent), COMMUTE_CEILING)
}

fn bounded_percent(minutes: u32, max: u32) -> u32 {
    let scaled = u64::from(minutes) * 10;
    BOUNDED_COMMUTE_TIERS
        .iter()
        .find(|(tenths, _)| scaled <= u64::from(max) * tenths)
        .map_or(0, |&(_, percent)| percent)
}

fn open_percent(minutes: u32) -> u32 {
    OPEN_COMMUTE_TIERS
        .iter()
        .find(|(limit, _)| minutes <= *limit)
        .map_or(0, |&(_, percent)| percent)
}
