use thiserror::Error;

use crate::model::ids::TopicId;
use crate::model::question::{Question, QuestionError};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TopicError {
    #[error("topic id cannot be empty")]
    EmptyId,

    #[error("topic title cannot be empty")]
    EmptyTitle,

    #[error("topic {0} has no questions")]
    NoQuestions(TopicId),

    #[error("question {number} of topic {topic} is invalid: {source}")]
    InvalidQuestion {
        topic: TopicId,
        number: usize,
        #[source]
        source: QuestionError,
    },
}

//
// ─── TOPIC ─────────────────────────────────────────────────────────────────────
//

/// A lesson plus the ordered questions quizzed over it.
///
/// Immutable once built; the catalog hands it out behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    id: TopicId,
    title: String,
    lesson_text: String,
    questions: Vec<Question>,
}

impl Topic {
    /// Creates a validated topic.
    ///
    /// # Errors
    ///
    /// Returns `TopicError::EmptyTitle` for a blank title and
    /// `TopicError::NoQuestions` when the question list is empty.
    pub fn new(
        id: TopicId,
        title: impl Into<String>,
        lesson_text: impl Into<String>,
        questions: Vec<Question>,
    ) -> Result<Self, TopicError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(TopicError::EmptyTitle);
        }
        if questions.is_empty() {
            return Err(TopicError::NoQuestions(id));
        }

        Ok(Self {
            id,
            title,
            lesson_text: lesson_text.into(),
            questions,
        })
    }

    #[must_use]
    pub fn id(&self) -> &TopicId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn lesson_text(&self) -> &str {
        &self.lesson_text
    }

    /// Questions in authored order.
    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(prompt: &str) -> Question {
        Question::new(prompt, vec!["yes".into(), "no".into()], 0).unwrap()
    }

    #[test]
    fn topic_keeps_question_order() {
        let id = TopicId::new("t").unwrap();
        let topic = Topic::new(
            id,
            "Title",
            "Lesson",
            vec![question("first"), question("second"), question("third")],
        )
        .unwrap();

        let prompts: Vec<_> = topic.questions().iter().map(Question::prompt).collect();
        assert_eq!(prompts, ["first", "second", "third"]);
        assert_eq!(topic.question(1).map(Question::prompt), Some("second"));
        assert!(topic.question(3).is_none());
    }

    #[test]
    fn topic_requires_questions() {
        let id = TopicId::new("empty").unwrap();
        let err = Topic::new(id.clone(), "Empty", "", Vec::new()).unwrap_err();
        assert_eq!(err, TopicError::NoQuestions(id));
    }

    #[test]
    fn topic_requires_title() {
        let id = TopicId::new("t").unwrap();
        let err = Topic::new(id, " ", "", vec![question("q")]).unwrap_err();
        assert_eq!(err, TopicError::EmptyTitle);
    }
}
