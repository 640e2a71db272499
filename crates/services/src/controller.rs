use std::sync::Arc;

use quiz_core::model::Topic;
use quiz_core::{
    Advance, CatalogError, Clock, EngagementSampler, ProgressState, ProgressTracker, QuizSession,
    RenderCommand, SessionToken, TopicCatalog, TopicTile, UserIntent,
};

//
// ─── SCREEN ────────────────────────────────────────────────────────────────────
//

/// What the learner is currently looking at.
#[derive(Debug, Clone)]
pub enum Screen {
    Topics,
    Lesson(Arc<Topic>),
    Quiz(QuizSession),
    Error(String),
}

/// Render requests produced by one input, plus an optional delayed advance.
///
/// `advance_after` carries the token of the session that must advance once
/// the feedback delay has elapsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Step {
    pub renders: Vec<RenderCommand>,
    pub advance_after: Option<SessionToken>,
}

impl Step {
    fn render(command: RenderCommand) -> Self {
        Self {
            renders: vec![command],
            advance_after: None,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.renders.is_empty() && self.advance_after.is_none()
    }
}

//
// ─── CONTROLLER ────────────────────────────────────────────────────────────────
//

/// Routes user intents and timer firings to the quiz domain.
///
/// Single owner of the process-wide `ProgressTracker`. Every session it starts
/// gets a fresh `SessionToken`, so a delayed advance scheduled by an
/// abandoned session is recognised and dropped.
pub struct QuizController {
    catalog: Arc<TopicCatalog>,
    progress: ProgressTracker,
    sampler: EngagementSampler,
    clock: Clock,
    screen: Screen,
    last_token: SessionToken,
}

impl QuizController {
    #[must_use]
    pub fn new(catalog: Arc<TopicCatalog>, clock: Clock) -> Self {
        Self {
            catalog,
            progress: ProgressTracker::new(),
            sampler: EngagementSampler::default(),
            clock,
            screen: Screen::Topics,
            last_token: SessionToken::new(0),
        }
    }

    /// Replace the engagement sampler (and with it the tick period).
    #[must_use]
    pub fn with_sampler(mut self, sampler: EngagementSampler) -> Self {
        self.sampler = sampler;
        self
    }

    #[must_use]
    pub fn sampler(&self) -> &EngagementSampler {
        &self.sampler
    }

    #[must_use]
    pub fn catalog(&self) -> &TopicCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    #[must_use]
    pub fn session(&self) -> Option<&QuizSession> {
        match &self.screen {
            Screen::Quiz(session) => Some(session),
            _ => None,
        }
    }

    #[must_use]
    pub fn progress(&self) -> ProgressState {
        self.progress.snapshot()
    }

    #[must_use]
    pub fn progress_tracker(&self) -> &ProgressTracker {
        &self.progress
    }

    /// Everything a presenter needs before the first input arrives.
    #[must_use]
    pub fn initial_renders(&self) -> Vec<RenderCommand> {
        let topics = self
            .catalog
            .topics()
            .map(|topic| TopicTile::from(topic.as_ref()))
            .collect();
        vec![
            RenderCommand::Topics { topics },
            RenderCommand::progress(self.progress.snapshot()),
            self.sample_engagement(),
        ]
    }

    #[must_use]
    pub fn sample_engagement(&self) -> RenderCommand {
        self.sampler.sample(&self.progress)
    }

    pub fn handle(&mut self, intent: UserIntent) -> Step {
        match intent {
            UserIntent::SelectTopic(id) | UserIntent::BackToLesson(id) => self.show_lesson(&id),
            UserIntent::StartQuiz(id) => self.start_quiz(&id),
            UserIntent::Retake(id) => self.retake(&id),
            UserIntent::AnswerSelected(choice) => self.answer(choice),
        }
    }

    /// Fired when the feedback delay for `token` has elapsed.
    ///
    /// A token that no longer matches the session on screen is ignored.
    pub fn advance_due(&mut self, token: SessionToken) -> Step {
        let Screen::Quiz(session) = &mut self.screen else {
            tracing::debug!(%token, "advance fired with no quiz on screen");
            return Step::default();
        };
        if session.token() != token {
            tracing::debug!(%token, current = %session.token(), "stale advance ignored");
            return Step::default();
        }

        match session.advance(&mut self.progress, self.clock.now()) {
            Ok(Advance::Next { .. }) => session
                .question_command()
                .map(Step::render)
                .unwrap_or_default(),
            Ok(Advance::Finished { summary, award }) => {
                tracing::info!(
                    topic = %summary.topic_id,
                    correct = summary.correct_count,
                    total = summary.total_questions,
                    earned_xp = summary.earned_xp,
                    level = award.after.level,
                    "quiz finished"
                );
                Step {
                    renders: vec![
                        RenderCommand::progress(award.after),
                        RenderCommand::Summary(summary),
                    ],
                    advance_after: None,
                }
            }
            Err(err) => {
                tracing::debug!(%token, %err, "advance ignored");
                Step::default()
            }
        }
    }

    fn lookup(&mut self, id: &str) -> Result<Arc<Topic>, Step> {
        self.catalog.get_str(id).map_err(|err| {
            tracing::warn!(topic = id, %err, "topic lookup failed");
            let message = match err {
                CatalogError::TopicNotFound(_) => "Topic not found.".to_string(),
                other => other.to_string(),
            };
            self.screen = Screen::Error(message.clone());
            Step::render(RenderCommand::error(message))
        })
    }

    fn show_lesson(&mut self, id: &str) -> Step {
        let topic = match self.lookup(id) {
            Ok(topic) => topic,
            Err(step) => return step,
        };
        let step = Step::render(RenderCommand::lesson(&topic));
        self.screen = Screen::Lesson(topic);
        step
    }

    fn start_quiz(&mut self, id: &str) -> Step {
        match self.lookup(id) {
            Ok(topic) => {
                let token = self.next_token();
                self.enter_session(QuizSession::start(topic, token, self.clock.now()))
            }
            Err(step) => step,
        }
    }

    fn retake(&mut self, id: &str) -> Step {
        let fresh = match &self.screen {
            Screen::Quiz(session) if session.topic().id().as_str() == id => {
                Some(session.retake(self.last_token.next(), self.clock.now()))
            }
            _ => None,
        };
        match fresh {
            Some(session) => {
                self.last_token = session.token();
                self.enter_session(session)
            }
            None => self.start_quiz(id),
        }
    }

    fn enter_session(&mut self, session: QuizSession) -> Step {
        tracing::info!(topic = %session.topic().id(), token = %session.token(), "quiz started");
        let step = session
            .question_command()
            .map(Step::render)
            .unwrap_or_default();
        self.screen = Screen::Quiz(session);
        step
    }

    fn answer(&mut self, choice: usize) -> Step {
        let Screen::Quiz(session) = &mut self.screen else {
            tracing::debug!(choice, "answer with no quiz on screen");
            return Step::default();
        };

        match session.answer(choice, &mut self.progress) {
            Ok(outcome) => {
                let mut renders = vec![outcome.feedback()];
                if let Some(award) = outcome.award {
                    renders.push(RenderCommand::progress(award.after));
                }
                Step {
                    renders,
                    advance_after: Some(session.token()),
                }
            }
            Err(err) => {
                tracing::debug!(choice, %err, "answer ignored");
                Step::default()
            }
        }
    }

    fn next_token(&mut self) -> SessionToken {
        self.last_token = self.last_token.next();
        self.last_token
    }
}
