use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::Instant;

use quiz_core::time::fixed_clock;
use quiz_core::{RenderCommand, TopicCatalog, UserIntent};
use services::{Pacing, QuizController, QuizRuntime, RuntimeError};

struct Harness {
    intents: mpsc::UnboundedSender<UserIntent>,
    renders: mpsc::UnboundedReceiver<RenderCommand>,
    handle: tokio::task::JoinHandle<Result<QuizController, RuntimeError>>,
}

fn start_runtime(pacing: Pacing) -> Harness {
    let controller =
        QuizController::new(Arc::new(TopicCatalog::builtin().unwrap()), fixed_clock());
    let (intents, intent_rx) = mpsc::unbounded_channel();
    let (render_tx, renders) = mpsc::unbounded_channel();
    let handle = tokio::spawn(QuizRuntime::new(controller, pacing, render_tx).run(intent_rx));
    Harness {
        intents,
        renders,
        handle,
    }
}

impl Harness {
    fn send(&self, intent: UserIntent) {
        self.intents.send(intent).expect("runtime running");
    }

    /// Next render command that is not an engagement sample.
    async fn next(&mut self) -> RenderCommand {
        loop {
            match self.renders.recv().await.expect("runtime running") {
                RenderCommand::Engagement { .. } => {}
                other => return other,
            }
        }
    }

    async fn skip_initial(&mut self) {
        assert!(matches!(self.next().await, RenderCommand::Topics { .. }));
        assert!(matches!(self.next().await, RenderCommand::Progress { .. }));
    }

    fn drain_visible(&mut self) -> Vec<RenderCommand> {
        let mut out = Vec::new();
        while let Ok(cmd) = self.renders.try_recv() {
            if !matches!(cmd, RenderCommand::Engagement { .. }) {
                out.push(cmd);
            }
        }
        out
    }

    async fn finish(self) -> QuizController {
        drop(self.intents);
        self.handle
            .await
            .expect("runtime task")
            .expect("runtime result")
    }
}

#[tokio::test(start_paused = true)]
async fn next_question_waits_for_feedback_delay() {
    let mut h = start_runtime(Pacing::default());
    h.skip_initial().await;

    h.send(UserIntent::StartQuiz("titration".into()));
    assert!(matches!(h.next().await, RenderCommand::Question { number: 1, .. }));

    let answered_at = Instant::now();
    h.send(UserIntent::AnswerSelected(0));
    assert!(matches!(
        h.next().await,
        RenderCommand::Feedback { correct: true, .. }
    ));
    assert_eq!(h.next().await, RenderCommand::Progress { xp: 30, level: 1 });

    assert!(matches!(h.next().await, RenderCommand::Question { number: 2, .. }));
    assert!(answered_at.elapsed() >= Duration::from_millis(900));

    h.finish().await;
}

#[tokio::test(start_paused = true)]
async fn double_answer_counts_once() {
    let mut h = start_runtime(Pacing::default());
    h.skip_initial().await;

    h.send(UserIntent::StartQuiz("titration".into()));
    h.next().await;
    h.send(UserIntent::AnswerSelected(0));
    h.send(UserIntent::AnswerSelected(0));

    assert!(matches!(h.next().await, RenderCommand::Feedback { .. }));
    assert!(matches!(h.next().await, RenderCommand::Progress { .. }));
    assert!(matches!(h.next().await, RenderCommand::Question { number: 2, .. }));

    let controller = h.finish().await;
    assert_eq!(controller.progress_tracker().lifetime_xp(), 30);
    assert_eq!(controller.session().unwrap().correct_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn superseded_session_timer_does_not_fire() {
    let mut h = start_runtime(Pacing::default());
    h.skip_initial().await;

    h.send(UserIntent::StartQuiz("titration".into()));
    h.next().await;
    h.send(UserIntent::AnswerSelected(0));
    h.send(UserIntent::Retake("titration".into()));
    assert!(matches!(h.next().await, RenderCommand::Feedback { .. }));
    assert!(matches!(h.next().await, RenderCommand::Progress { .. }));
    assert!(matches!(h.next().await, RenderCommand::Question { number: 1, .. }));

    tokio::time::sleep(Duration::from_secs(3)).await;
    assert_eq!(h.drain_visible(), Vec::new());

    // The retaken session still works normally.
    h.send(UserIntent::AnswerSelected(2));
    assert!(matches!(
        h.next().await,
        RenderCommand::Feedback { correct: false, .. }
    ));
    assert!(matches!(h.next().await, RenderCommand::Question { number: 2, .. }));

    let controller = h.finish().await;
    assert_eq!(controller.session().unwrap().question_index(), 1);
}

#[tokio::test(start_paused = true)]
async fn full_run_reports_summary_after_last_delay() {
    let mut h = start_runtime(Pacing::new(Duration::ZERO, Duration::from_secs(1)).unwrap());
    h.skip_initial().await;

    h.send(UserIntent::StartQuiz("titration".into()));
    h.next().await;

    h.send(UserIntent::AnswerSelected(0));
    assert!(matches!(h.next().await, RenderCommand::Feedback { correct: true, .. }));
    assert_eq!(h.next().await, RenderCommand::Progress { xp: 30, level: 1 });
    assert!(matches!(h.next().await, RenderCommand::Question { number: 2, .. }));

    h.send(UserIntent::AnswerSelected(1));
    assert!(matches!(h.next().await, RenderCommand::Feedback { correct: false, .. }));
    assert!(matches!(h.next().await, RenderCommand::Question { number: 3, .. }));

    h.send(UserIntent::AnswerSelected(1));
    assert!(matches!(h.next().await, RenderCommand::Feedback { correct: true, .. }));
    assert_eq!(h.next().await, RenderCommand::Progress { xp: 60, level: 1 });

    assert_eq!(h.next().await, RenderCommand::Progress { xp: 10, level: 2 });
    match h.next().await {
        RenderCommand::Summary(summary) => {
            assert_eq!(summary.correct_count, 2);
            assert_eq!(summary.total_questions, 3);
            assert_eq!(summary.earned_xp, 60);
            assert_eq!(summary.bonus, 50);
        }
        other => panic!("expected summary, got {other:?}"),
    }

    h.finish().await;
}

#[tokio::test(start_paused = true)]
async fn engagement_is_sampled_every_period() {
    let mut h = start_runtime(Pacing::default());
    h.skip_initial().await;
    let _ = h.renders.try_recv();

    tokio::time::sleep(Duration::from_millis(3_500)).await;
    let mut samples = 0;
    while let Ok(cmd) = h.renders.try_recv() {
        assert_eq!(cmd, RenderCommand::Engagement { value: 0 });
        samples += 1;
    }
    assert_eq!(samples, 3);

    h.finish().await;
}

#[tokio::test(start_paused = true)]
async fn tick_period_follows_pacing() {
    let period = Duration::from_millis(250);
    let mut h = start_runtime(Pacing::new(Duration::ZERO, period).unwrap());
    h.skip_initial().await;
    let _ = h.renders.try_recv();

    tokio::time::sleep(Duration::from_millis(1_100)).await;
    let mut samples = 0;
    while let Ok(cmd) = h.renders.try_recv() {
        assert!(matches!(cmd, RenderCommand::Engagement { .. }));
        samples += 1;
    }
    assert_eq!(samples, 4);

    let controller = h.finish().await;
    assert_eq!(controller.sampler().period(), period);
}

#[tokio::test]
async fn closed_presenter_stops_runtime() {
    let controller =
        QuizController::new(Arc::new(TopicCatalog::builtin().unwrap()), fixed_clock());
    let (_intents, intent_rx) = mpsc::unbounded_channel();
    let (render_tx, render_rx) = mpsc::unbounded_channel();
    drop(render_rx);

    let result = QuizRuntime::new(controller, Pacing::default(), render_tx)
        .run(intent_rx)
        .await;
    assert!(matches!(result, Err(RuntimeError::PresenterClosed)));
}
