use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Question, Topic, TopicId};
use crate::progress::{AwardOutcome, ProgressTracker};
use crate::render::RenderCommand;

/// XP awarded for each correctly answered question.
pub const POINTS_PER_CORRECT: u64 = 30;

/// XP awarded once when a run reaches the end of its topic.
pub const COMPLETION_BONUS: u64 = 50;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Rejected session calls. None of them change session or progress state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("session is not waiting for an answer")]
    NotAwaitingAnswer,

    #[error("no revealed answer to advance from")]
    NotRevealed,

    #[error("choice {choice} is not one of {options} options")]
    InvalidChoice { choice: usize, options: usize },
}

//
// ─── TOKENS & PHASES ───────────────────────────────────────────────────────────
//

/// Generation number of a session. Delayed work carries the token of the
/// session that scheduled it and is dropped if that session was superseded.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct SessionToken(u64);

impl SessionToken {
    #[must_use]
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }

    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// The current question is shown and accepts one answer.
    AwaitingAnswer,
    /// Feedback is shown; choices are inert until the session advances.
    Revealed { correct: bool },
    Finished,
}

//
// ─── OUTCOMES ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub correct_option_text: String,
    pub points: u64,
    /// Present when points were awarded.
    pub award: Option<AwardOutcome>,
}

impl AnswerOutcome {
    #[must_use]
    pub fn feedback(&self) -> RenderCommand {
        RenderCommand::Feedback {
            correct: self.correct,
            correct_option_text: self.correct_option_text.clone(),
            points: self.points,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// Moved on to the question at `index`.
    Next { index: usize },
    Finished {
        summary: QuizSummary,
        award: AwardOutcome,
    },
}

/// End-of-run report.
///
/// `earned_xp` counts per-question points only; the completion bonus is
/// reported separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSummary {
    pub topic_id: TopicId,
    pub topic_title: String,
    pub correct_count: usize,
    pub total_questions: usize,
    pub earned_xp: u64,
    pub bonus: u64,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One run through a topic's questions, in authored order.
///
/// The session shares the catalog's topic; it never owns or mutates it.
/// Progress is passed in by the caller on every mutating call.
#[derive(Clone)]
pub struct QuizSession {
    topic: Arc<Topic>,
    token: SessionToken,
    index: usize,
    correct_count: usize,
    earned_xp: u64,
    phase: SessionPhase,
    started_at: DateTime<Utc>,
    summary: Option<QuizSummary>,
}

impl QuizSession {
    /// Start a fresh run on the first question.
    ///
    /// `started_at` should come from the caller's clock.
    #[must_use]
    pub fn start(topic: Arc<Topic>, token: SessionToken, started_at: DateTime<Utc>) -> Self {
        Self {
            topic,
            token,
            index: 0,
            correct_count: 0,
            earned_xp: 0,
            phase: SessionPhase::AwaitingAnswer,
            started_at,
            summary: None,
        }
    }

    /// A brand-new run over the same topic. The current session is left as is.
    #[must_use]
    pub fn retake(&self, token: SessionToken, started_at: DateTime<Utc>) -> Self {
        Self::start(Arc::clone(&self.topic), token, started_at)
    }

    #[must_use]
    pub fn topic(&self) -> &Arc<Topic> {
        &self.topic
    }

    #[must_use]
    pub fn token(&self) -> SessionToken {
        self.token
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Index of the question on screen; equals the question count once finished.
    #[must_use]
    pub fn question_index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    /// Per-question XP earned in this run, bonus excluded.
    #[must_use]
    pub fn earned_xp(&self) -> u64 {
        self.earned_xp
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.topic.question_count()
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, SessionPhase::Finished)
    }

    #[must_use]
    pub fn summary(&self) -> Option<&QuizSummary> {
        self.summary.as_ref()
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if self.is_finished() {
            return None;
        }
        self.topic.question(self.index)
    }

    /// Render request for the question on screen.
    #[must_use]
    pub fn question_command(&self) -> Option<RenderCommand> {
        self.current_question()
            .map(|question| RenderCommand::question(&self.topic, self.index, question))
    }

    /// Grade `choice` against the current question.
    ///
    /// A correct answer awards `POINTS_PER_CORRECT` through `progress`. Either
    /// way the session moves to `Revealed` and refuses further answers until
    /// `advance` is called.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotAwaitingAnswer` outside `AwaitingAnswer` and
    /// `SessionError::InvalidChoice` for an index outside the option list.
    pub fn answer(
        &mut self,
        choice: usize,
        progress: &mut ProgressTracker,
    ) -> Result<AnswerOutcome, SessionError> {
        if self.phase != SessionPhase::AwaitingAnswer {
            return Err(SessionError::NotAwaitingAnswer);
        }
        let question = self
            .topic
            .question(self.index)
            .ok_or(SessionError::NotAwaitingAnswer)?;
        if choice >= question.option_count() {
            return Err(SessionError::InvalidChoice {
                choice,
                options: question.option_count(),
            });
        }

        let correct = question.is_correct(choice);
        let correct_option_text = question.correct_option_text().to_string();
        let award = if correct {
            self.correct_count += 1;
            self.earned_xp = self.earned_xp.saturating_add(POINTS_PER_CORRECT);
            Some(progress.award(POINTS_PER_CORRECT))
        } else {
            None
        };

        self.phase = SessionPhase::Revealed { correct };
        Ok(AnswerOutcome {
            correct,
            correct_option_text,
            points: if correct { POINTS_PER_CORRECT } else { 0 },
            award,
        })
    }

    /// Leave the revealed answer: next question, or finish the run.
    ///
    /// Finishing awards `COMPLETION_BONUS` through `progress`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotRevealed` unless an answer is being shown.
    pub fn advance(
        &mut self,
        progress: &mut ProgressTracker,
        now: DateTime<Utc>,
    ) -> Result<Advance, SessionError> {
        if !matches!(self.phase, SessionPhase::Revealed { .. }) {
            return Err(SessionError::NotRevealed);
        }

        if self.index + 1 < self.topic.question_count() {
            self.index += 1;
            self.phase = SessionPhase::AwaitingAnswer;
            return Ok(Advance::Next { index: self.index });
        }

        Ok(self.finish(progress, now))
    }

    fn finish(&mut self, progress: &mut ProgressTracker, completed_at: DateTime<Utc>) -> Advance {
        let award = progress.award(COMPLETION_BONUS);
        self.index = self.topic.question_count();
        self.phase = SessionPhase::Finished;

        let summary = QuizSummary {
            topic_id: self.topic.id().clone(),
            topic_title: self.topic.title().to_string(),
            correct_count: self.correct_count,
            total_questions: self.topic.question_count(),
            earned_xp: self.earned_xp,
            bonus: COMPLETION_BONUS,
            started_at: self.started_at,
            completed_at,
        };
        self.summary = Some(summary.clone());

        Advance::Finished { summary, award }
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("topic", self.topic.id())
            .field("token", &self.token)
            .field("index", &self.index)
            .field("correct_count", &self.correct_count)
            .field("earned_xp", &self.earned_xp)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}
