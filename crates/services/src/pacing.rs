use std::time::Duration;

use quiz_core::EngagementSampler;

use crate::error::PacingError;

/// Upper bound for the feedback pause; anything longer is a configuration slip.
pub const MAX_ADVANCE_DELAY: Duration = Duration::from_secs(60);

/// UI pacing: how long feedback stays up and how often engagement is sampled.
///
/// Neither value affects scoring. A zero advance delay is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    advance_delay: Duration,
    engagement_period: Duration,
}

impl Pacing {
    pub const DEFAULT_ADVANCE_DELAY: Duration = Duration::from_millis(900);

    /// # Errors
    ///
    /// Returns `PacingError::ZeroEngagementPeriod` for a zero period and
    /// `PacingError::AdvanceDelayTooLong` above `MAX_ADVANCE_DELAY`.
    pub fn new(advance_delay: Duration, engagement_period: Duration) -> Result<Self, PacingError> {
        if engagement_period.is_zero() {
            return Err(PacingError::ZeroEngagementPeriod);
        }
        if advance_delay > MAX_ADVANCE_DELAY {
            return Err(PacingError::AdvanceDelayTooLong(advance_delay));
        }
        Ok(Self {
            advance_delay,
            engagement_period,
        })
    }

    #[must_use]
    pub fn advance_delay(&self) -> Duration {
        self.advance_delay
    }

    #[must_use]
    pub fn engagement_period(&self) -> Duration {
        self.engagement_period
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            advance_delay: Self::DEFAULT_ADVANCE_DELAY,
            engagement_period: EngagementSampler::REFERENCE_PERIOD,
        }
    }
}
