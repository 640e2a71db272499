use quiz_core::{QuizSummary, RenderCommand, TopicTile};

use crate::vm::markdown_vm::markdown_to_html;
use crate::vm::time_fmt::format_elapsed;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TopicTileVm {
    pub id: String,
    pub title: String,
}

impl From<TopicTile> for TopicTileVm {
    fn from(tile: TopicTile) -> Self {
        Self {
            id: tile.id.to_string(),
            title: tile.title,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonVm {
    pub topic_id: String,
    pub title: String,
    pub lesson_html: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackVm {
    pub correct: bool,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub topic_id: String,
    pub prompt: String,
    pub options: Vec<String>,
    pub number: usize,
    pub total: usize,
    pub feedback: Option<FeedbackVm>,
}

impl QuestionVm {
    /// Options stop accepting clicks once feedback is showing.
    #[must_use]
    pub fn locked(&self) -> bool {
        self.feedback.is_some()
    }

    #[must_use]
    pub fn heading(&self) -> String {
        format!("Q{}. {}", self.number, self.prompt)
    }

    #[must_use]
    pub fn progress_label(&self) -> String {
        format!("Question {} of {}", self.number, self.total)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SummaryVm {
    pub topic_id: String,
    pub topic_title: String,
    pub score_label: String,
    pub earned_xp: u64,
    pub bonus: u64,
    pub elapsed_label: String,
}

impl From<QuizSummary> for SummaryVm {
    fn from(summary: QuizSummary) -> Self {
        Self {
            topic_id: summary.topic_id.to_string(),
            topic_title: summary.topic_title,
            score_label: format!("{} / {}", summary.correct_count, summary.total_questions),
            earned_xp: summary.earned_xp,
            bonus: summary.bonus,
            elapsed_label: format_elapsed(summary.started_at, summary.completed_at),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ViewVm {
    #[default]
    Welcome,
    Lesson(LessonVm),
    Question(QuestionVm),
    Summary(SummaryVm),
    Error(String),
}

/// Everything on screen, rebuilt by folding render commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScreenVm {
    pub topics: Vec<TopicTileVm>,
    pub view: ViewVm,
    pub xp: u64,
    pub level: u64,
    pub engagement: u8,
}

impl Default for ScreenVm {
    fn default() -> Self {
        Self {
            topics: Vec::new(),
            view: ViewVm::Welcome,
            xp: 0,
            level: 1,
            engagement: 0,
        }
    }
}

#[must_use]
pub fn feedback_message(correct: bool, correct_option_text: &str, points: u64) -> String {
    if correct {
        format!("Correct! +{points} XP")
    } else {
        format!("Wrong. Correct answer: {correct_option_text}")
    }
}

impl ScreenVm {
    pub fn apply(&mut self, command: RenderCommand) {
        match command {
            RenderCommand::Topics { topics } => {
                self.topics = topics.into_iter().map(TopicTileVm::from).collect();
            }
            RenderCommand::Lesson {
                topic_id,
                title,
                lesson_text,
            } => {
                self.view = ViewVm::Lesson(LessonVm {
                    topic_id: topic_id.to_string(),
                    title,
                    lesson_html: markdown_to_html(&lesson_text),
                });
            }
            RenderCommand::Question {
                topic_id,
                prompt,
                options,
                number,
                total,
            } => {
                self.view = ViewVm::Question(QuestionVm {
                    topic_id: topic_id.to_string(),
                    prompt,
                    options,
                    number,
                    total,
                    feedback: None,
                });
            }
            RenderCommand::Feedback {
                correct,
                correct_option_text,
                points,
            } => {
                if let ViewVm::Question(question) = &mut self.view {
                    question.feedback = Some(FeedbackVm {
                        correct,
                        message: feedback_message(correct, &correct_option_text, points),
                    });
                } else {
                    tracing::debug!("feedback arrived with no question on screen");
                }
            }
            RenderCommand::Summary(summary) => {
                self.view = ViewVm::Summary(SummaryVm::from(summary));
            }
            RenderCommand::Error { message } => {
                self.view = ViewVm::Error(message);
            }
            RenderCommand::Progress { xp, level } => {
                self.xp = xp;
                self.level = level;
            }
            RenderCommand::Engagement { value } => {
                self.engagement = value;
            }
        }
    }
}
