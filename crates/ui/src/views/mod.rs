mod lesson;
mod quiz;
mod screen;
mod stats;
mod summary;
mod topics;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use lesson::LessonView;
pub use quiz::QuizView;
pub use screen::ScreenView;
pub use stats::StatsBar;
pub use summary::SummaryView;
pub use topics::TopicTiles;
