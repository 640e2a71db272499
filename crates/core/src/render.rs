//! Render requests emitted by the core and user intents received from a
//! presentation layer.
//!
//! Both are plain data so any front end (terminal, JSON pipe, desktop window)
//! can drive the same state machine.

use serde::{Deserialize, Serialize};

use crate::engagement::Engagement;
use crate::model::{Question, Topic, TopicId};
use crate::progress::ProgressState;
use crate::session::QuizSummary;

/// One entry of the topic picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicTile {
    pub id: TopicId,
    pub title: String,
}

impl From<&Topic> for TopicTile {
    fn from(topic: &Topic) -> Self {
        Self {
            id: topic.id().clone(),
            title: topic.title().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderCommand {
    Topics {
        topics: Vec<TopicTile>,
    },
    Lesson {
        topic_id: TopicId,
        title: String,
        lesson_text: String,
    },
    Question {
        topic_id: TopicId,
        prompt: String,
        options: Vec<String>,
        /// 1-based position, for "Question N of M".
        number: usize,
        total: usize,
    },
    Feedback {
        correct: bool,
        correct_option_text: String,
        /// Points awarded for this answer (0 when wrong).
        points: u64,
    },
    Summary(QuizSummary),
    Error {
        message: String,
    },
    Progress {
        xp: u64,
        level: u64,
    },
    Engagement {
        value: u8,
    },
}

impl RenderCommand {
    #[must_use]
    pub fn lesson(topic: &Topic) -> Self {
        Self::Lesson {
            topic_id: topic.id().clone(),
            title: topic.title().to_string(),
            lesson_text: topic.lesson_text().to_string(),
        }
    }

    #[must_use]
    pub fn question(topic: &Topic, index: usize, question: &Question) -> Self {
        Self::Question {
            topic_id: topic.id().clone(),
            prompt: question.prompt().to_string(),
            options: question.options().to_vec(),
            number: index + 1,
            total: topic.question_count(),
        }
    }

    #[must_use]
    pub fn progress(state: ProgressState) -> Self {
        Self::Progress {
            xp: state.xp,
            level: state.level,
        }
    }

    #[must_use]
    pub fn engagement(value: Engagement) -> Self {
        Self::Engagement {
            value: value.value(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }
}

/// What the learner asked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", content = "value", rename_all = "snake_case")]
pub enum UserIntent {
    SelectTopic(String),
    StartQuiz(String),
    /// 0-based index into the options of the rendered question.
    AnswerSelected(usize),
    BackToLesson(String),
    Retake(String),
}
