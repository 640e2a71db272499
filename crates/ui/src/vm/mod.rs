mod markdown_vm;
mod screen_vm;
mod time_fmt;

pub use markdown_vm::{markdown_to_html, markdown_to_text, sanitize_html};
pub use screen_vm::{
    FeedbackVm, LessonVm, QuestionVm, ScreenVm, SummaryVm, TopicTileVm, ViewVm, feedback_message,
};
pub use time_fmt::format_elapsed;
