//! Tuning knobs for [`RankingEngine`](crate::RankingEngine).

use std::num::NonZeroUsize;
use std::time::Duration;

/// Neighborhoods resolved concurrently per batch.
pub const DEFAULT_BATCH_SIZE: NonZeroUsize = NonZeroUsize::MIN.saturating_add(4);

/// Pause between batches, easing load on the amenity lookup service.
pub const DEFAULT_PACING: Duration = Duration::from_secs(1);

/// Results kept after sorting.
pub const DEFAULT_RESULT_LIMIT: usize = 10;

/// Configuration for [`RankingEngine`](crate::RankingEngine).
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use matchmaker_ranking::RankingConfig;
///
/// let config = RankingConfig::default()
///     .with_batch_size(2)
///     .with_pacing(Duration::ZERO)
///     .with_result_limit(3);
/// assert_eq!(config.batch_size.get(), 2);
/// assert_eq!(config.result_limit, 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankingConfig {
    /// Neighborhoods resolved concurrently; batches run strictly in sequence.
    pub batch_size: NonZeroUsize,
    /// Delay between consecutive batches. Zero disables pacing.
    pub pacing: Duration,
    /// Maximum number of ranked results returned.
    pub result_limit: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            pacing: DEFAULT_PACING,
            result_limit: DEFAULT_RESULT_LIMIT,
        }
    }
}

impl RankingConfig {
    /// Set the batch size. Zero is raised to one.
    #[must_use]
    pub const fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = match NonZeroUsize::new(batch_size) {
            Some(size) => size,
            None => NonZeroUsize::MIN,
        };
        self
    }

    /// Set the pause between batches.
    #[must_use]
    pub const fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    /// Set the maximum number of results.
    #[must_use]
    pub const fn with_result_limit(mut self, result_limit: usize) -> Self {
        self.result_limit = result_limit;
        self
    }
}
