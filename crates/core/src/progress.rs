use serde::{Deserialize, Serialize};

/// XP cost of one level step is `level * XP_PER_LEVEL`.
pub const XP_PER_LEVEL: u64 = 100;

/// Largest single award. Bigger awards are clamped to this, which keeps the
/// level-up loop short and `xp` far from overflow.
pub const MAX_AWARD: u64 = 1_000_000;

/// Read-only view of the learner's progress.
///
/// `xp` is the unspent remainder inside the current level, always below
/// `level * XP_PER_LEVEL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressState {
    pub xp: u64,
    pub level: u64,
}

impl Default for ProgressState {
    fn default() -> Self {
        Self { xp: 0, level: 1 }
    }
}

impl ProgressState {
    /// XP needed to leave the current level.
    #[must_use]
    pub fn level_threshold(&self) -> u64 {
        self.level.saturating_mul(XP_PER_LEVEL)
    }
}

/// Result of a single `ProgressTracker::award` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AwardOutcome {
    pub points: u64,
    pub before: ProgressState,
    pub after: ProgressState,
    pub levels_gained: u64,
}

/// Owner of the learner's XP and level.
///
/// There is one tracker per process; it is passed explicitly to whatever
/// needs to award points or read a snapshot.
#[derive(Debug, Clone, Default)]
pub struct ProgressTracker {
    state: ProgressState,
    lifetime_xp: u64,
}

impl ProgressTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `points` and applies every level-up they pay for.
    ///
    /// A single award can cross several thresholds; each step costs the level
    /// being left times `XP_PER_LEVEL`. `points` above `MAX_AWARD` are clamped
    /// and the outcome reports the clamped value.
    pub fn award(&mut self, points: u64) -> AwardOutcome {
        let before = self.state;
        let points = if points > MAX_AWARD {
            tracing::warn!(points, max = MAX_AWARD, "award clamped");
            MAX_AWARD
        } else {
            points
        };
        self.lifetime_xp = self.lifetime_xp.saturating_add(points);

        // Remainder stays below the threshold, so this cannot overflow.
        let mut xp = before.xp + points;
        let mut level = before.level;
        while xp >= level.saturating_mul(XP_PER_LEVEL) {
            xp -= level.saturating_mul(XP_PER_LEVEL);
            level += 1;
        }

        self.state = ProgressState { xp, level };
        let levels_gained = level - before.level;
        if levels_gained > 0 {
            tracing::debug!(points, level, xp, levels_gained, "level up");
        }

        AwardOutcome {
            points,
            before,
            after: self.state,
            levels_gained,
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> ProgressState {
        self.state
    }

    /// Total points ever awarded, before any level-up deductions.
    #[must_use]
    pub fn lifetime_xp(&self) -> u64 {
        self.lifetime_xp
    }

    #[must_use]
    pub fn xp_to_next_level(&self) -> u64 {
        self.state.level_threshold() - self.state.xp
    }
}
