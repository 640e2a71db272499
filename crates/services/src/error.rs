//! Shared error types for the services crate.

use std::time::Duration;

use thiserror::Error;

/// Errors emitted while building `Pacing`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PacingError {
    #[error("engagement period must be > 0")]
    ZeroEngagementPeriod,
    #[error("advance delay {0:?} is too long")]
    AdvanceDelayTooLong(Duration),
}

/// Errors that stop the `QuizRuntime` loop.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RuntimeError {
    #[error("presenter is no longer accepting render commands")]
    PresenterClosed,
}
