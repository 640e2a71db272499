#![forbid(unsafe_code)]

pub mod catalog;
pub mod engagement;
pub mod model;
pub mod progress;
pub mod render;
pub mod session;
pub mod time;

pub use catalog::{CatalogError, TopicCatalog};
pub use engagement::{Engagement, EngagementSampler};
pub use progress::{AwardOutcome, MAX_AWARD, ProgressState, ProgressTracker};
pub use render::{RenderCommand, TopicTile, UserIntent};
pub use session::{
    Advance, AnswerOutcome, COMPLETION_BONUS, POINTS_PER_CORRECT, QuizSession, QuizSummary,
    SessionError, SessionPhase, SessionToken,
};
pub use time::Clock;
