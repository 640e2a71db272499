use std::time::Duration;

use crate::progress::{ProgressState, ProgressTracker};
use crate::render::RenderCommand;

/// Within-level XP at which the metric saturates.
pub const ENGAGEMENT_FULL_XP: u64 = 400;

/// Simulated engagement percentage in `[0, 100]`.
///
/// Derived from the within-level XP, so it drops back when the learner
/// levels up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Engagement(u8);

impl Engagement {
    #[must_use]
    pub fn from_progress(state: ProgressState) -> Self {
        let percent = state.xp.saturating_mul(100) / ENGAGEMENT_FULL_XP;
        Self(u8::try_from(percent.min(100)).unwrap_or(100))
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }
}

/// Periodic, stateless read of the progress tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngagementSampler {
    period: Duration,
}

impl EngagementSampler {
    pub const REFERENCE_PERIOD: Duration = Duration::from_secs(1);

    #[must_use]
    pub fn new(period: Duration) -> Self {
        Self { period }
    }

    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }

    #[must_use]
    pub fn sample(&self, progress: &ProgressTracker) -> RenderCommand {
        RenderCommand::engagement(Engagement::from_progress(progress.snapshot()))
    }
}

impl Default for EngagementSampler {
    fn default() -> Self {
        Self::new(Self::REFERENCE_PERIOD)
    }
}
